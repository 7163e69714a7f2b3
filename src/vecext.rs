// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

/// Remove items equal to a target, keeping the order of the survivors
pub trait RemoveMatching<T> {
    /// Removes the first equal item, or every equal item if `all`. Returns the number removed.
    fn remove_matching(&mut self, item: &T, all: bool) -> usize;
}

/// Move items out of a vec into two groups chosen by index
pub trait SplitByIndices<T> {
    fn split_by_indices(self, first: &[usize], second: &[usize]) -> (Vec<T>, Vec<T>);
}

impl<T> RemoveMatching<T> for Vec<T>
    where T: PartialEq
{
    fn remove_matching(&mut self, item: &T, all: bool) -> usize {
        let mut removed = 0;
        self.retain(|x| {
            let matched = x == item && (all || removed == 0);
            if matched {
                removed += 1;
            }
            !matched
        });
        removed
    }
}

impl<T> SplitByIndices<T> for Vec<T> {
    fn split_by_indices(self, first: &[usize], second: &[usize]) -> (Vec<T>, Vec<T>) {
        let mut slots: Vec<Option<T>> = self.into_iter().map(Some).collect();
        let mut take = |indices: &[usize]| -> Vec<T> {
            indices.iter().filter_map(|&i| slots.get_mut(i).and_then(Option::take)).collect()
        };
        let first = take(first);
        let second = take(second);
        (first, second)
    }
}
