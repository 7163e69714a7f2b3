// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::tree::mbr::{Entry, Geometry, RTree};
use parking_lot::RwLock;

/// A single authoritative tree version that several threads may advance.
///
/// Mutations run one at a time under the write lock, each producing the next version from the
/// current one. Readers take a `snapshot` and then search it without holding any lock.
pub struct SharedRTree<T, G> {
    current: RwLock<RTree<T, G>>,
}

impl<T, G> SharedRTree<T, G> {
    pub fn new(tree: RTree<T, G>) -> SharedRTree<T, G> {
        SharedRTree { current: RwLock::new(tree) }
    }

/// The current version
    pub fn snapshot(&self) -> RTree<T, G> {
        self.current.read().clone()
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }

/// Replace the current version with `f(current)` and return the new version
    pub fn update<F>(&self, f: F) -> RTree<T, G>
        where F: FnOnce(&RTree<T, G>) -> RTree<T, G>
    {
        let mut current = self.current.write();
        let next = f(&current);
        *current = next.clone();
        next
    }

    pub fn into_inner(self) -> RTree<T, G> {
        self.current.into_inner()
    }
}

impl<T, G> SharedRTree<T, G>
    where T: Clone,
          G: Geometry + Clone
{
    pub fn add(&self, entry: Entry<T, G>) -> RTree<T, G> {
        self.update(|tree| tree.add(entry))
    }
}

impl<T, G> SharedRTree<T, G>
    where T: Clone + PartialEq,
          G: Geometry + Clone + PartialEq
{
    pub fn delete(&self, entry: &Entry<T, G>, all: bool) -> RTree<T, G> {
        self.update(|tree| tree.delete(entry, all))
    }
}
