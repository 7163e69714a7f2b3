// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Immutable R-trees and R*-trees.
//!
//! Every operation that changes an `RTree` returns a new tree. Nodes off the changed path are
//! shared between versions, so old versions stay valid and cost little to keep.

#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate approx;

mod error;
mod geometry;
mod shared;
mod stack;
pub mod tree;
mod vecext;

pub use crate::error::{RTreeError, Result};
pub use crate::geometry::{Circle, LineSegment, Point, Polygon, Rect, Shapes};
pub use crate::shared::SharedRTree;
pub use crate::stack::ImmutableStack;
pub use crate::tree::mbr::{Builder, Condition, Cursor, Entry, Geometry, MbrNode, MbrQuery, MbrRectQuery, RTree, Search};
use std::marker::PhantomData;

/// Convenience struct for creating a new R* Tree
pub struct RStar<T, G> {
    _t: PhantomData<T>,
    _g: PhantomData<G>,
}

impl<T, G> RStar<T, G>
    where T: Clone,
          G: Geometry + Clone
{
/// Create a new R* tree with max children lengths as provided. min length will be set to round(0.4 * max)
    pub fn new_with_max(max: usize) -> Result<RTree<T, G>> {
        RTree::star().max_children(max).create()
    }
}
