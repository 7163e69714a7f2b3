// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::geometry::Rect;
use crate::tree::mbr::{Entry, Geometry};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Node of a tree. Either contains other levels or entries.
///
/// Nodes are never modified once built. Children are shared between tree versions through `Arc`,
/// so a new version only allocates the nodes on the path it changed.
#[derive(Debug)]
pub enum MbrNode<T, G> {
    /// Contains only other levels
    Level {
        mbr: Rect,
        children: Vec<Arc<MbrNode<T, G>>>,
    },
    /// Contains only entries
    Leaf {
        mbr: Rect,
        entries: Vec<Entry<T, G>>,
    },
}

impl<T, G> MbrNode<T, G>
    where G: Geometry
{
/// Create a leaf whose mbr fits the entries
    pub fn leaf(entries: Vec<Entry<T, G>>) -> MbrNode<T, G> {
        let mut mbr = Rect::max_inverted();
        for entry in &entries {
            entry.expand_mbr_to_fit(&mut mbr);
        }
        MbrNode::Leaf { mbr, entries }
    }

/// Create a level whose mbr fits the children
    pub fn level(children: Vec<Arc<MbrNode<T, G>>>) -> MbrNode<T, G> {
        let mut mbr = Rect::max_inverted();
        for child in &children {
            mbr.expand_to_fit(child.mbr());
        }
        MbrNode::Level { mbr, children }
    }
}

impl<T, G> MbrNode<T, G> {
/// Does the node hold entries?
    pub fn is_leaf(&self) -> bool {
        match *self {
            MbrNode::Level { .. } => false,
            MbrNode::Leaf { .. } => true,
        }
    }

/// Does the node point to other levels?
    pub fn is_level(&self) -> bool {
        !self.is_leaf()
    }

/// Borrow the node's minimum bounding rectangle
    pub fn mbr(&self) -> &Rect {
        match *self {
            MbrNode::Level { ref mbr, .. } => mbr,
            MbrNode::Leaf { ref mbr, .. } => mbr,
        }
    }

/// Number of children or entries
    pub fn len(&self) -> usize {
        match *self {
            MbrNode::Level { ref children, .. } => children.len(),
            MbrNode::Leaf { ref entries, .. } => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

/// The entries of a leaf. Empty for a level.
    pub fn entries(&self) -> &[Entry<T, G>] {
        match *self {
            MbrNode::Level { .. } => &[],
            MbrNode::Leaf { ref entries, .. } => entries,
        }
    }

/// The children of a level. Empty for a leaf.
    pub fn children(&self) -> &[Arc<MbrNode<T, G>>] {
        match *self {
            MbrNode::Level { ref children, .. } => children,
            MbrNode::Leaf { .. } => &[],
        }
    }

/// Number of node levels from here down to the leaves. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self;
        while let MbrNode::Level { ref children, .. } = *node {
            match children.first() {
                Some(child) => {
                    depth += 1;
                    node = &**child;
                }
                None => break,
            }
        }
        depth
    }

/// Number of entries held in this subtree
    pub fn count(&self) -> usize {
        match *self {
            MbrNode::Level { ref children, .. } => children.iter().map(|child| child.count()).sum(),
            MbrNode::Leaf { ref entries, .. } => entries.len(),
        }
    }

    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, margin: &str) -> fmt::Result
        where T: Debug,
              G: Debug
    {
        writeln!(f, "{}mbr={}", margin, self.mbr())?;
        let inner = format!("{}  ", margin);
        match *self {
            MbrNode::Level { ref children, .. } => {
                for child in children {
                    child.fmt_indented(f, &inner)?;
                }
            }
            MbrNode::Leaf { ref entries, .. } => {
                for entry in entries {
                    writeln!(f, "{}entry=Entry [value={:?}, geometry={:?}]", inner, entry.value, entry.geometry)?;
                }
            }
        }
        Ok(())
    }
}

impl<T: Clone, G> MbrNode<T, G>
    where G: Clone
{
/// Clone every entry of this subtree into `entries`
    pub fn collect_entries(&self, entries: &mut Vec<Entry<T, G>>) {
        match *self {
            MbrNode::Level { ref children, .. } => {
                for child in children {
                    child.collect_entries(entries);
                }
            }
            MbrNode::Leaf { entries: ref leaf_entries, .. } => entries.extend(leaf_entries.iter().cloned()),
        }
    }
}
