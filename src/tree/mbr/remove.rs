// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::tree::mbr::index::NOT_AT_ROOT;
use crate::tree::mbr::{Context, Entry, Geometry, MbrNode};
use crate::vecext::RemoveMatching;
use std::sync::Arc;

/// The outcome of removing an entry below a node
#[derive(Debug)]
pub struct RemoveResult<T, G> {
    /// The replacement node. `None` if the node dissolved or, at the root, emptied.
    pub node: Option<Arc<MbrNode<T, G>>>,
    /// Entries of dissolved nodes that must be inserted again
    pub orphans: Vec<Entry<T, G>>,
    pub removed: usize,
}

impl<T, G> RemoveResult<T, G> {
    fn unchanged(node: &Arc<MbrNode<T, G>>) -> RemoveResult<T, G> {
        RemoveResult { node: Some(node.clone()), orphans: Vec::new(), removed: 0 }
    }
}

impl<T, G> MbrNode<T, G>
    where T: Clone + PartialEq,
          G: Geometry + Clone + PartialEq
{
    /// Remove the first entry equal to `entry` below this node, or all of them if `all`.
    ///
    /// A node that removed nothing is handed back as is. A node other than the root that falls
    /// below the minimum dissolves: it is dropped and every entry below it becomes an orphan.
    pub fn remove(self: &Arc<Self>, entry: &Entry<T, G>, all: bool, context: &Context<T, G>, at_root: bool) -> RemoveResult<T, G> {
        let min = context.min_children();
        match **self {
            MbrNode::Leaf { ref entries, .. } => {
                if !entries.contains(entry) {
                    return RemoveResult::unchanged(self);
                }
                let mut remaining = entries.clone();
                let removed = remaining.remove_matching(entry, all);
                if remaining.len() >= min || (at_root && !remaining.is_empty()) {
                    let node = Arc::new(context.factory().create_leaf(remaining));
                    return RemoveResult { node: Some(node), orphans: Vec::new(), removed };
                }
                RemoveResult { node: None, orphans: remaining, removed }
            }
            MbrNode::Level { ref children, .. } => {
                let target = entry.mbr();
                let mut kept = Vec::with_capacity(children.len());
                let mut orphans = Vec::new();
                let mut removed = 0;
                for child in children {
                    let done = removed > 0 && !all;
                    if done || !child.mbr().intersects(&target) {
                        kept.push(child.clone());
                        continue;
                    }
                    let result = child.remove(entry, all, context, NOT_AT_ROOT);
                    removed += result.removed;
                    orphans.extend(result.orphans);
                    kept.extend(result.node);
                }
                if removed == 0 {
                    return RemoveResult::unchanged(self);
                }
                if kept.len() >= min || (at_root && !kept.is_empty()) {
                    let node = Arc::new(context.factory().create_level(kept));
                    return RemoveResult { node: Some(node), orphans, removed };
                }
                for child in &kept {
                    child.collect_entries(&mut orphans);
                }
                RemoveResult { node: None, orphans, removed }
            }
        }
    }
}
