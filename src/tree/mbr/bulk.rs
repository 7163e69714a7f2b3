// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Sort-Tile-Recurse bulk loading (Leutenegger, Lopez and Edgington)

use crate::geometry::Rect;
use crate::tree::mbr::{Context, Entry, Geometry, MbrNode};
use ordered_float::OrderedFloat;
use std::sync::Arc;

/// Split `items` into `count` contiguous runs whose lengths differ by at most one
fn even_chunks<I>(items: Vec<I>, count: usize) -> Vec<Vec<I>> {
    let len = items.len();
    let base = len / count;
    let extra = len % count;
    let mut iter = items.into_iter();
    (0..count)
        .map(|i| iter.by_ref().take(base + usize::from(i < extra)).collect())
        .collect()
}

/// Tile one level of items into groups of at most `capacity` (and at least `min` when there is
/// more than one group).
fn tile<I, F>(mut items: Vec<I>, capacity: usize, min: usize, mbr: F) -> Vec<Vec<I>>
    where F: Fn(&I) -> Rect
{
    let len = items.len();
    if len <= capacity {
        return vec![items];
    }
    let slice_count = ((len as f64 / capacity as f64).sqrt().ceil() as usize).clamp(1, (len / min).max(1));
    items.sort_by_cached_key(|item| OrderedFloat(mbr(item).center().x()));

    let mut groups = Vec::new();
    for mut slice in even_chunks(items, slice_count) {
        slice.sort_by_cached_key(|item| OrderedFloat(mbr(item).center().y()));
        let slice_len = slice.len();
        let group_count = ((slice_len + capacity - 1) / capacity).clamp(1, (slice_len / min).max(1));
        groups.extend(even_chunks(slice, group_count));
    }
    trace!("tiled {} items into {} slices and {} groups", len, slice_count, groups.len());
    groups
}

/// Build the root of a packed tree holding `entries`, `None` if there are none
pub fn bulk_load<T, G>(entries: Vec<Entry<T, G>>, context: &Context<T, G>, loading_factor: f64) -> Option<MbrNode<T, G>>
    where G: Geometry
{
    if entries.is_empty() {
        return None;
    }
    let factory = context.factory();
    let min = context.min_children();
    let max = context.max_children();
    let leaf_capacity = ((max as f64 * loading_factor).floor() as usize).clamp(min, max);

    let mut nodes: Vec<MbrNode<T, G>> = tile(entries, leaf_capacity, min, |entry: &Entry<T, G>| entry.mbr())
        .into_iter()
        .map(|group| factory.create_leaf(group))
        .collect();
    while nodes.len() > 1 {
        let children: Vec<Arc<MbrNode<T, G>>> = nodes.into_iter().map(Arc::new).collect();
        nodes = tile(children, max, min, |child: &Arc<MbrNode<T, G>>| *child.mbr())
            .into_iter()
            .map(|group| factory.create_level(group))
            .collect();
    }
    nodes.pop()
}
