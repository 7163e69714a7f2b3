// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Guttman's original R-tree strategies

use crate::geometry::Rect;
use crate::tree::mbr::index::{Selector, SplitGroups, Splitter};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};

/// (area increase, resulting area) of growing `candidate` to fit `mbr`
pub(crate) fn area_cost(candidate: &Rect, mbr: &Rect) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
    let expanded = candidate.union(mbr);
    let expanded_area = expanded.area();
    (OrderedFloat(expanded_area - candidate.area()), OrderedFloat(expanded_area))
}

/// Chooses the child whose area grows the least.
/// Ties go to the smaller resulting area, then to the earlier child.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorMinimalAreaIncrease;

impl Selector for SelectorMinimalAreaIncrease {
    fn select(&self, mbr: &Rect, candidates: &[Rect]) -> usize {
        candidates.iter()
            .position_min_by_key(|candidate| area_cost(candidate, mbr))
            .unwrap_or(0)
    }
}

/// Guttman's quadratic split
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitterQuadratic;

impl SplitterQuadratic {
    // PS1: the pair wasting the most area when grouped together
    fn pick_seeds(&self, mbrs: &[Rect]) -> (usize, usize) {
        let mut seeds = (0, 1);
        let mut worst = f64::MIN;
        for (i, j) in (0..mbrs.len()).tuple_combinations() {
            let waste = mbrs[i].union(&mbrs[j]).area() - mbrs[i].area() - mbrs[j].area();
            if waste > worst {
                worst = waste;
                seeds = (i, j);
            }
        }
        seeds
    }

    // PN1: the remaining item with the strongest preference for one group
    fn pick_next(&self, mbrs: &[Rect], remaining: &[usize], mbr1: &Rect, mbr2: &Rect) -> usize {
        remaining.iter()
            .position_min_by_key(|&&i| {
                let d1 = mbr1.union(&mbrs[i]).area() - mbr1.area();
                let d2 = mbr2.union(&mbrs[i]).area() - mbr2.area();
                Reverse(OrderedFloat((d1 - d2).abs()))
            })
            .unwrap_or(0)
    }
}

impl Splitter for SplitterQuadratic {
    fn split(&self, mbrs: &[Rect], min: usize) -> SplitGroups {
        if mbrs.len() < 2 {
            return SplitGroups { first: (0..mbrs.len()).collect(), second: Vec::new() };
        }
        let (seed1, seed2) = self.pick_seeds(mbrs);
        let mut first = vec![seed1];
        let mut second = vec![seed2];
        let mut mbr1 = mbrs[seed1];
        let mut mbr2 = mbrs[seed2];
        let mut remaining: Vec<usize> = (0..mbrs.len()).filter(|&i| i != seed1 && i != seed2).collect();

        while !remaining.is_empty() {
            // QS2
            if first.len() + remaining.len() <= min {
                first.append(&mut remaining);
                break;
            }
            if second.len() + remaining.len() <= min {
                second.append(&mut remaining);
                break;
            }
            let index = remaining.remove(self.pick_next(mbrs, &remaining, &mbr1, &mbr2));
            let union1 = mbr1.union(&mbrs[index]);
            let union2 = mbr2.union(&mbrs[index]);
            let d1 = union1.area() - mbr1.area();
            let d2 = union2.area() - mbr2.area();
            // QS3
            let to_first = match d1.partial_cmp(&d2) {
                Some(Ordering::Less) => true,
                Some(Ordering::Greater) => false,
                _ => match first.len().cmp(&second.len()) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => union1.area() <= union2.area(),
                },
            };
            if to_first {
                first.push(index);
                mbr1 = union1;
            } else {
                second.push(index);
                mbr2 = union2;
            }
        }
        SplitGroups { first, second }
    }
}
