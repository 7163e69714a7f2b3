// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Copy-on-write insertion. Only the nodes on the path to the new entry are rebuilt.

use crate::geometry::Rect;
use crate::tree::mbr::{Context, Entry, Geometry, MbrNode};
use crate::vecext::SplitByIndices;
use std::sync::Arc;

/// The replacement for a node after inserting into it
#[derive(Debug)]
#[must_use]
pub enum InsertResult<T, G> {
    Ok(MbrNode<T, G>),
    Split(MbrNode<T, G>, MbrNode<T, G>),
}

/// Split the items of an overflowing node with the context's splitter
fn split_items<T, G, I, F>(items: Vec<I>, context: &Context<T, G>, mbr: F) -> (Vec<I>, Vec<I>)
    where F: Fn(&I) -> Rect
{
    let mbrs: Vec<Rect> = items.iter().map(mbr).collect();
    let groups = context.splitter().split(&mbrs, context.min_children());
    trace!("split {} items into {} and {}", mbrs.len(), groups.first.len(), groups.second.len());
    items.split_by_indices(&groups.first, &groups.second)
}

impl<T, G> MbrNode<T, G>
    where T: Clone,
          G: Geometry + Clone
{
    /// Insert the entry below this node. The node itself is left untouched.
    pub fn insert(&self, entry: Entry<T, G>, context: &Context<T, G>) -> InsertResult<T, G> {
        let factory = context.factory();
        match *self {
            //I2
            MbrNode::Leaf { ref entries, .. } => {
                let mut entries = entries.clone();
                entries.push(entry);
                if entries.len() <= context.max_children() {
                    return InsertResult::Ok(factory.create_leaf(entries));
                }
                let (first, second) = split_items(entries, context, |entry: &Entry<T, G>| entry.mbr());
                InsertResult::Split(factory.create_leaf(first), factory.create_leaf(second))
            }
            //I1
            MbrNode::Level { ref children, .. } => {
                let mbrs: Vec<Rect> = children.iter().map(|child| *child.mbr()).collect();
                let index = context.selector().select(&entry.mbr(), &mbrs);
                debug_assert!(index < children.len(), "selector chose child {} of {}", index, children.len());
                let mut children = children.clone();
                //I3
                match children[index].insert(entry, context) {
                    InsertResult::Ok(child) => children[index] = Arc::new(child),
                    InsertResult::Split(child, split) => {
                        children[index] = Arc::new(child);
                        children.insert(index + 1, Arc::new(split));
                    }
                }
                if children.len() <= context.max_children() {
                    return InsertResult::Ok(factory.create_level(children));
                }
                let (first, second) = split_items(children, context, |child: &Arc<MbrNode<T, G>>| *child.mbr());
                InsertResult::Split(factory.create_level(first), factory.create_level(second))
            }
        }
    }
}
