// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::{RTreeError, Result};
use crate::tree::mbr::context::{default_min_children, DefaultFactory, D_MAX_CHILDREN};
use crate::tree::mbr::index::r::{SelectorMinimalAreaIncrease, SplitterQuadratic};
use crate::tree::mbr::index::rstar::{SelectorMinimalOverlapArea, SplitterRStar};
use crate::tree::mbr::index::{Selector, Splitter};
use crate::tree::mbr::{bulk, Context, Entry, Factory, Geometry, RTree};
use std::fmt;
use std::sync::Arc;

pub const D_LOADING_FACTOR: f64 = 0.7;

/// Configures and creates an `RTree`.
///
/// Unset options fall back to a maximum of 4 children, a minimum of `round(0.4 * max)` (at least
/// 1), a loading factor of 0.7 and Guttman's strategies.
pub struct Builder<T, G> {
    max_children: Option<usize>,
    min_children: Option<usize>,
    loading_factor: f64,
    selector: Option<Box<dyn Selector>>,
    splitter: Option<Box<dyn Splitter>>,
    factory: Option<Box<dyn Factory<T, G>>>,
    star: bool,
}

impl<T, G> Builder<T, G>
    where T: Clone,
          G: Geometry + Clone
{
    pub fn new() -> Builder<T, G> {
        Builder {
            max_children: None,
            min_children: None,
            loading_factor: D_LOADING_FACTOR,
            selector: None,
            splitter: None,
            factory: None,
            star: false,
        }
    }

    pub fn max_children(mut self, max_children: usize) -> Builder<T, G> {
        self.max_children = Some(max_children);
        self
    }

    pub fn min_children(mut self, min_children: usize) -> Builder<T, G> {
        self.min_children = Some(min_children);
        self
    }

    /// Fraction of `max_children` that bulk loading fills each leaf with, in `(0, 1]`
    pub fn loading_factor(mut self, loading_factor: f64) -> Builder<T, G> {
        self.loading_factor = loading_factor;
        self
    }

    pub fn selector<S: Selector + 'static>(mut self, selector: S) -> Builder<T, G> {
        self.selector = Some(Box::new(selector));
        self
    }

    pub fn splitter<S: Splitter + 'static>(mut self, splitter: S) -> Builder<T, G> {
        self.splitter = Some(Box::new(splitter));
        self
    }

    pub fn factory<F: Factory<T, G> + 'static>(mut self, factory: F) -> Builder<T, G> {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Use the R* strategies unless a selector or splitter is set explicitly
    pub fn star(mut self) -> Builder<T, G> {
        self.star = true;
        self
    }

    fn context(self) -> Result<(Context<T, G>, f64)> {
        if !(self.loading_factor > 0.0 && self.loading_factor <= 1.0) {
            return Err(RTreeError::InvalidLoadingFactor(self.loading_factor));
        }
        let max_children = self.max_children.unwrap_or(D_MAX_CHILDREN);
        let min_children = self.min_children.unwrap_or_else(|| default_min_children(max_children));
        let selector: Box<dyn Selector> = match self.selector {
            Some(selector) => selector,
            None if self.star => Box::new(SelectorMinimalOverlapArea),
            None => Box::new(SelectorMinimalAreaIncrease),
        };
        let splitter: Box<dyn Splitter> = match self.splitter {
            Some(splitter) => splitter,
            None if self.star => Box::new(SplitterRStar),
            None => Box::new(SplitterQuadratic),
        };
        let factory: Box<dyn Factory<T, G>> = match self.factory {
            Some(factory) => factory,
            None => Box::new(DefaultFactory),
        };
        let context = Context::new(min_children, max_children, selector, splitter, factory)?;
        Ok((context, self.loading_factor))
    }

    /// Create an empty tree
    pub fn create(self) -> Result<RTree<T, G>> {
        let (context, _) = self.context()?;
        Ok(RTree::with_context(Arc::new(context)))
    }

    /// Create a packed tree holding `entries`
    pub fn bulk_load(self, entries: Vec<Entry<T, G>>) -> Result<RTree<T, G>> {
        let (context, loading_factor) = self.context()?;
        let size = entries.len();
        let root = bulk::bulk_load(entries, &context, loading_factor).map(Arc::new);
        debug!("bulk loaded {} entries, depth {}", size, root.as_ref().map_or(0, |root| root.depth()));
        Ok(RTree::from_parts(root, size, Arc::new(context)))
    }
}

impl<T, G> Default for Builder<T, G>
    where T: Clone,
          G: Geometry + Clone
{
    fn default() -> Builder<T, G> {
        Builder::new()
    }
}

impl<T, G> fmt::Debug for Builder<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("max_children", &self.max_children)
            .field("min_children", &self.min_children)
            .field("loading_factor", &self.loading_factor)
            .field("selector", &self.selector)
            .field("splitter", &self.splitter)
            .field("star", &self.star)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    type Tree = RTree<u32, Point>;

    #[test]
    fn defaults() {
        let tree = Tree::builder().create().expect("defaults are valid");
        assert_eq!(4, tree.context().max_children());
        assert_eq!(2, tree.context().min_children());
        assert_eq!("SelectorMinimalAreaIncrease", format!("{:?}", tree.context().selector()));
        assert_eq!("SplitterQuadratic", format!("{:?}", tree.context().splitter()));
    }

    #[test]
    fn star_switches_strategies() {
        let tree = Tree::star().max_children(6).create().expect("valid");
        assert_eq!(6, tree.context().max_children());
        assert_eq!(2, tree.context().min_children());
        assert_eq!("SelectorMinimalOverlapArea", format!("{:?}", tree.context().selector()));
        assert_eq!("SplitterRStar", format!("{:?}", tree.context().splitter()));
    }

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(
            Some(RTreeError::InvalidChildren { min: 3, max: 4 }),
            Tree::builder().min_children(3).create().err()
        );
        assert_eq!(
            Some(RTreeError::InvalidLoadingFactor(0.0)),
            Tree::builder().loading_factor(0.0).create().err()
        );
        assert_eq!(
            Some(RTreeError::InvalidLoadingFactor(1.5)),
            Tree::builder().loading_factor(1.5).bulk_load(Vec::new()).err()
        );
    }

    #[test]
    fn bulk_load_empty() {
        let tree = Tree::builder().bulk_load(Vec::new()).expect("valid");
        assert!(tree.is_empty());
        assert_eq!(0, tree.depth());
    }
}
