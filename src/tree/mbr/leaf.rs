// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::geometry::Rect;
use crate::tree::mbr::Geometry;

/// A tree entry: an opaque value stored under a geometry.
///
/// Two entries are equal when both their values and their geometries are equal. Deleting an
/// entry removes entries equal to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T, G> {
    pub value: T,
    pub geometry: G,
}

impl<T, G> Entry<T, G> {
    /// New entry from value and geometry
    pub fn new(value: T, geometry: G) -> Entry<T, G> {
        Entry { value, geometry }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Consumes self, returning the value and geometry
    pub fn into_parts(self) -> (T, G) {
        (self.value, self.geometry)
    }

    pub fn as_tuple(&self) -> (&T, &G) {
        (&self.value, &self.geometry)
    }
}

impl<T, G> Geometry for Entry<T, G>
    where G: Geometry
{
    fn mbr(&self) -> Rect {
        self.geometry.mbr()
    }

    fn intersects(&self, mbr: &Rect) -> bool {
        self.geometry.intersects(mbr)
    }

    fn distance(&self, mbr: &Rect) -> f64 {
        self.geometry.distance(mbr)
    }

    fn expand_mbr_to_fit(&self, mbr: &mut Rect) {
        self.geometry.expand_mbr_to_fit(mbr)
    }
}

impl<T, G> From<(T, G)> for Entry<T, G> {
    fn from((value, geometry): (T, G)) -> Entry<T, G> {
        Entry::new(value, geometry)
    }
}
