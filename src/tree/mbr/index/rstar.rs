// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! R*-tree strategies (Beckmann et al.)

use crate::geometry::Rect;
use crate::tree::mbr::index::r::area_cost;
use crate::tree::mbr::index::{Selector, SplitGroups, Splitter};
use itertools::Itertools;
use ordered_float::OrderedFloat;

/// The sum of all of the shape's edges. Used in the R* algorithm
pub trait Margin {
    fn margin(&self) -> f64;
}

impl Margin for Rect {
    fn margin(&self) -> f64 {
        self.perimeter()
    }
}

/// Chooses the child whose enlargement adds the least overlap with its siblings.
/// Ties go to the smaller area increase, then the smaller resulting area, then the earlier child.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorMinimalOverlapArea;

impl SelectorMinimalOverlapArea {
    fn overlap_cost(&self, index: usize, mbr: &Rect, candidates: &[Rect]) -> OrderedFloat<f64> {
        let candidate = &candidates[index];
        let expanded = candidate.union(mbr);
        let increase: f64 = candidates.iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, sibling)| expanded.intersection_area(sibling) - candidate.intersection_area(sibling))
            .sum();
        OrderedFloat(increase)
    }

    fn overlap_area_cost(&self, index: usize, mbr: &Rect, candidates: &[Rect]) -> (OrderedFloat<f64>, OrderedFloat<f64>, OrderedFloat<f64>) {
        let (area_cost, expanded_area) = area_cost(&candidates[index], mbr);
        (self.overlap_cost(index, mbr, candidates), area_cost, expanded_area)
    }
}

impl Selector for SelectorMinimalOverlapArea {
    // CS2
    fn select(&self, mbr: &Rect, candidates: &[Rect]) -> usize {
        (0..candidates.len())
            .position_min_by_key(|&i| self.overlap_area_cost(i, mbr, candidates))
            .unwrap_or(0)
    }
}

/// The R* split: choose the axis with the least total margin, then the distribution on that axis
/// with the least overlap (ties by least area).
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitterRStar;

/// An ordering of the items and the position splitting it in two
type Distribution = (Vec<usize>, usize);

impl SplitterRStar {
    fn sorted_by_edge(&self, mbrs: &[Rect], axis: usize, edge: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..mbrs.len()).collect();
        if edge == 0 {
            order.sort_by_key(|&i| OrderedFloat(mbrs[i].min_for_axis(axis)));
        } else {
            order.sort_by_key(|&i| OrderedFloat(mbrs[i].max_for_axis(axis)));
        }
        order
    }

    // fn best_position_for_axis -> (margin, distribution)
    fn best_split_position_for_axis(&self, axis: usize, mbrs: &[Rect], min: usize) -> (f64, Distribution) {
        let len = mbrs.len();
        let mut margin = 0.0;
        let mut d_area = f64::MAX;
        let mut d_overlap = f64::MAX;
        let mut best: Distribution = ((0..len).collect(), min);

        for edge in 0..2 {
            let order = self.sorted_by_edge(mbrs, axis, edge);

            // prefix[k - 1] fits the first k items, suffix[k] fits the rest
            let prefix: Vec<Rect> = order.iter()
                .scan(Rect::max_inverted(), |mbr, &i| {
                    mbr.expand_to_fit(&mbrs[i]);
                    Some(*mbr)
                })
                .collect();
            let mut suffix = vec![Rect::max_inverted(); len + 1];
            for p in (0..len).rev() {
                suffix[p] = suffix[p + 1].union(&mbrs[order[p]]);
            }

            for k in min..(len - min + 1) {
                let r1 = &prefix[k - 1];
                let r2 = &suffix[k];

                // (I)
                let area = r1.area() + r2.area();
                // (II)
                margin += r1.margin() + r2.margin();
                // (III)
                let overlap = r1.intersection_area(r2);

                // CSI1
                if (overlap, area) < (d_overlap, d_area) {
                    d_overlap = overlap;
                    d_area = area;
                    best = (order.clone(), k);
                }
            }
        }
        (margin, best)
    }
}

impl Splitter for SplitterRStar {
    fn split(&self, mbrs: &[Rect], min: usize) -> SplitGroups {
        let len = mbrs.len();
        if len < 2 {
            return SplitGroups { first: (0..len).collect(), second: Vec::new() };
        }
        let min = min.clamp(1, len / 2);
        // S1 & S2, CSA1
        let (x_margin, x_split) = self.best_split_position_for_axis(0, mbrs, min);
        let (y_margin, y_split) = self.best_split_position_for_axis(1, mbrs, min);
        // CSA2
        let (mut order, index) = if y_margin < x_margin { y_split } else { x_split };
        // S3
        let second = order.split_off(index);
        SplitGroups { first: order, second }
    }
}
