// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::stack::ImmutableStack;
use crate::tree::mbr::{Entry, MbrNode, MbrQuery};
use std::sync::Arc;

struct Position<T, G> {
    node: Arc<MbrNode<T, G>>,
    position: usize,
}

impl<T, G> Position<T, G> {
    fn at(node: &Arc<MbrNode<T, G>>, position: usize) -> Position<T, G> {
        Position { node: node.clone(), position }
    }
}

// Replace the top frame
fn with_top<T, G>(stack: &ImmutableStack<Position<T, G>>, node: &Arc<MbrNode<T, G>>, position: usize) -> ImmutableStack<Position<T, G>> {
    stack.pop().push(Position::at(node, position))
}

// Advance the top frame past its current child
fn advance<T, G>(stack: &ImmutableStack<Position<T, G>>) -> ImmutableStack<Position<T, G>> {
    match stack.peek() {
        Some(top) => with_top(stack, &top.node, top.position + 1),
        None => stack.clone(),
    }
}

/// An owning traversal of the entries matching a query.
///
/// The cursor holds its own handles to the nodes it visits, so it outlives the tree it came from.
/// Its state is an immutable stack: cloning a cursor is O(1) and both copies continue
/// independently from the same point.
pub struct Cursor<T, G, Q> {
    query: Arc<Q>,
    stack: ImmutableStack<Position<T, G>>,
}

impl<T, G, Q> Clone for Cursor<T, G, Q> {
    fn clone(&self) -> Self {
        Cursor { query: self.query.clone(), stack: self.stack.clone() }
    }
}

impl<T, G, Q> Cursor<T, G, Q>
    where Q: MbrQuery<G>
{
    pub fn new(root: Option<&Arc<MbrNode<T, G>>>, query: Q) -> Cursor<T, G, Q> {
        let stack = match root {
            Some(root) => ImmutableStack::empty().push(Position::at(root, 0)),
            None => ImmutableStack::empty(),
        };
        Cursor { query: Arc::new(query), stack }
    }

    /// Number of frames on the traversal stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<T, G, Q> Iterator for Cursor<T, G, Q>
    where T: Clone,
          G: Clone,
          Q: MbrQuery<G>
{
    type Item = Entry<T, G>;

    fn next(&mut self) -> Option<Entry<T, G>> {
        loop {
            let (node, position) = match self.stack.peek() {
                Some(top) => (top.node.clone(), top.position),
                None => return None,
            };
            if position >= node.len() {
                self.stack = advance(&self.stack.pop());
                continue;
            }
            match *node {
                MbrNode::Level { ref children, .. } => {
                    let child = &children[position];
                    if self.query.accept_level(child.mbr()) {
                        self.stack = self.stack.push(Position::at(child, 0));
                    } else {
                        self.stack = advance(&self.stack);
                    }
                }
                MbrNode::Leaf { ref entries, .. } => {
                    let query = &self.query;
                    let found = entries[position..].iter().position(|entry| query.accept_leaf(&entry.geometry));
                    match found {
                        Some(offset) => {
                            self.stack = with_top(&self.stack, &node, position + offset + 1);
                            return Some(entries[position + offset].clone());
                        }
                        None => self.stack = with_top(&self.stack, &node, entries.len()),
                    }
                }
            }
        }
    }
}
