// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::tree::mbr::{Entry, MbrNode, MbrQuery};

/// A node being visited and the index of its next child or entry
#[derive(Debug)]
struct NodePosition<'tree, T, G> {
    node: &'tree MbrNode<T, G>,
    position: usize,
}

/// Lazily iterate all entries matching a query.
///
/// The traversal state is an explicit stack, so each call to `next` resumes where the last one
/// stopped. Levels whose mbr the query rejects are never descended into.
pub struct Search<'tree, T, G, Q> {
    query: Q,
    stack: Vec<NodePosition<'tree, T, G>>,
}

impl<'tree, T, G, Q> Search<'tree, T, G, Q>
    where Q: MbrQuery<G>
{
    pub fn new(root: Option<&'tree MbrNode<T, G>>, query: Q) -> Search<'tree, T, G, Q> {
        let stack = root.into_iter().map(|node| NodePosition { node, position: 0 }).collect();
        Search { query, stack }
    }

    // The top node is done. Its parent moves on to the next child.
    fn pop(&mut self) {
        self.stack.pop();
        if let Some(parent) = self.stack.last_mut() {
            parent.position += 1;
        }
    }
}

impl<'tree, T, G, Q> Iterator for Search<'tree, T, G, Q>
    where Q: MbrQuery<G>
{
    type Item = &'tree Entry<T, G>;

    fn next(&mut self) -> Option<&'tree Entry<T, G>> {
        loop {
            let (node, position) = match self.stack.last() {
                Some(top) => (top.node, top.position),
                None => return None,
            };
            if position >= node.len() {
                self.pop();
                continue;
            }
            match *node {
                MbrNode::Level { ref children, .. } => {
                    let child: &'tree MbrNode<T, G> = &children[position];
                    if self.query.accept_level(child.mbr()) {
                        self.stack.push(NodePosition { node: child, position: 0 });
                    } else if let Some(top) = self.stack.last_mut() {
                        top.position += 1;
                    }
                }
                MbrNode::Leaf { ref entries, .. } => {
                    let query = &self.query;
                    let found = entries[position..].iter().position(|entry| query.accept_leaf(&entry.geometry));
                    if let Some(top) = self.stack.last_mut() {
                        match found {
                            Some(offset) => {
                                top.position = position + offset + 1;
                                return Some(&entries[position + offset]);
                            }
                            None => top.position = entries.len(),
                        }
                    }
                }
            }
        }
    }
}
