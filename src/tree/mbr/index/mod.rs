// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Pluggable strategies used when inserting into a tree
//!
//! Both strategies work on plain rectangles and answer with indices, so the same implementation
//! serves leaves (entry bounds) and levels (child bounds).

use crate::error::{RTreeError, Result};
use crate::geometry::Rect;
use std::fmt::Debug;

pub mod r;
pub mod rstar;

pub const AT_ROOT: bool = true;
pub const NOT_AT_ROOT: bool = false;

/// Chooses the child that should receive a new entry
pub trait Selector: Debug + Send + Sync {
    /// Index into `candidates` of the child to descend into, for an entry bounded by `mbr`.
    /// `candidates` is never empty.
    fn select(&self, mbr: &Rect, candidates: &[Rect]) -> usize;
}

/// The two groups of an overflowing node, as indices into the items that were split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitGroups {
    pub first: Vec<usize>,
    pub second: Vec<usize>,
}

/// Divides the items of an overflowing node into two groups
pub trait Splitter: Debug + Send + Sync {
    /// Split `mbrs` into two groups of at least `min` each.
    /// Callers guarantee `mbrs.len() >= 2 * min` and `min >= 1`, see `try_split`.
    fn split(&self, mbrs: &[Rect], min: usize) -> SplitGroups;

    /// `split` with its preconditions checked
    fn try_split(&self, mbrs: &[Rect], min: usize) -> Result<SplitGroups> {
        if mbrs.is_empty() {
            return Err(RTreeError::EmptySplit);
        }
        if min == 0 || mbrs.len() < 2 * min {
            return Err(RTreeError::InsufficientEntries { count: mbrs.len(), min });
        }
        Ok(self.split(mbrs, min))
    }
}

/// Both groups hold every index exactly once
#[cfg(test)]
pub(crate) fn assert_partition(groups: &SplitGroups, len: usize, min: usize) {
    assert!(groups.first.len() >= min, "first group {:?} smaller than {}", groups.first, min);
    assert!(groups.second.len() >= min, "second group {:?} smaller than {}", groups.second, min);
    let mut all: Vec<usize> = groups.first.iter().chain(groups.second.iter()).cloned().collect();
    all.sort();
    assert_eq!((0..len).collect::<Vec<_>>(), all);
}
