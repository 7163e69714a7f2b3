// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::geometry::Rect;
use crate::tree::mbr::Geometry;

/// Query trait for navigating the tree
///
/// `accept_level` prunes whole subtrees, so it must accept every level whose mbr could contain
/// an accepted leaf.
pub trait MbrQuery<G> {
    /// Returns true if the leaf geometry matches the query
    fn accept_leaf(&self, geometry: &G) -> bool;
    /// Returns true if the level's mbr may hold matching leaves
    fn accept_level(&self, mbr: &Rect) -> bool;
}

/// Rect based query
#[derive(Debug, Clone, PartialEq)]
pub enum MbrRectQuery {
    /// Matching leaves are ones that are completely contained by this rect
    ContainedBy(Rect),
    /// Matching leaves are ones that touch or overlap this rect
    Intersects(Rect),
    /// Matching leaves are no further than the distance from this rect
    WithinDistance(Rect, f64),
    /// Every leaf matches
    All,
}

impl<G> MbrQuery<G> for MbrRectQuery
    where G: Geometry
{
    fn accept_leaf(&self, geometry: &G) -> bool {
        match *self {
            MbrRectQuery::ContainedBy(ref query) => query.contains_rect(&geometry.mbr()),
            MbrRectQuery::Intersects(ref query) => geometry.intersects(query),
            MbrRectQuery::WithinDistance(ref query, distance) => geometry.distance(query) <= distance,
            MbrRectQuery::All => true,
        }
    }

    fn accept_level(&self, mbr: &Rect) -> bool {
        match *self {
            MbrRectQuery::ContainedBy(ref query) => mbr.intersects(query),
            MbrRectQuery::Intersects(ref query) => mbr.intersects(query),
            MbrRectQuery::WithinDistance(ref query, distance) => mbr.distance_to_rect(query) <= distance,
            MbrRectQuery::All => true,
        }
    }
}

/// A single condition applied to both level mbrs and leaf geometries
pub struct Condition<F>(pub F);

impl<G, F> MbrQuery<G> for Condition<F>
    where G: Geometry,
          F: Fn(&dyn Geometry) -> bool
{
    fn accept_leaf(&self, geometry: &G) -> bool {
        (self.0)(geometry)
    }

    fn accept_level(&self, mbr: &Rect) -> bool {
        (self.0)(mbr)
    }
}

impl<'a, G, Q> MbrQuery<G> for &'a Q
    where Q: MbrQuery<G> + ?Sized
{
    fn accept_leaf(&self, geometry: &G) -> bool {
        (**self).accept_leaf(geometry)
    }

    fn accept_level(&self, mbr: &Rect) -> bool {
        (**self).accept_level(mbr)
    }
}
