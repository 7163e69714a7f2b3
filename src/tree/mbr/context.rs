// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::{RTreeError, Result};
use crate::tree::mbr::index::r::{SelectorMinimalAreaIncrease, SplitterQuadratic};
use crate::tree::mbr::index::{Selector, Splitter};
use crate::tree::mbr::{Entry, Geometry, MbrNode};
use std::fmt::Debug;
use std::sync::Arc;

pub const D_MAX_CHILDREN: usize = 4;
pub const D_MIN_CHILDREN_P: f64 = 0.4;

/// Builds the nodes of a tree
pub trait Factory<T, G>: Debug + Send + Sync {
    fn create_leaf(&self, entries: Vec<Entry<T, G>>) -> MbrNode<T, G>;

    fn create_level(&self, children: Vec<Arc<MbrNode<T, G>>>) -> MbrNode<T, G>;
}

/// Builds nodes from the given vectors as is
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl<T, G> Factory<T, G> for DefaultFactory
    where G: Geometry
{
    fn create_leaf(&self, entries: Vec<Entry<T, G>>) -> MbrNode<T, G> {
        MbrNode::leaf(entries)
    }

    fn create_level(&self, children: Vec<Arc<MbrNode<T, G>>>) -> MbrNode<T, G> {
        MbrNode::level(children)
    }
}

/// Builds nodes whose storage holds no spare capacity
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactFactory;

impl<T, G> Factory<T, G> for CompactFactory
    where G: Geometry
{
    fn create_leaf(&self, mut entries: Vec<Entry<T, G>>) -> MbrNode<T, G> {
        entries.shrink_to_fit();
        MbrNode::leaf(entries)
    }

    fn create_level(&self, mut children: Vec<Arc<MbrNode<T, G>>>) -> MbrNode<T, G> {
        children.shrink_to_fit();
        MbrNode::level(children)
    }
}

/// Configuration shared by every node of a tree and by every version derived from it
#[derive(Debug)]
pub struct Context<T, G> {
    min_children: usize,
    max_children: usize,
    selector: Box<dyn Selector>,
    splitter: Box<dyn Splitter>,
    factory: Box<dyn Factory<T, G>>,
}

/// The default minimum for a given maximum, never below 1
pub fn default_min_children(max_children: usize) -> usize {
    ((max_children as f64 * D_MIN_CHILDREN_P).round() as usize).max(1)
}

impl<T, G> Context<T, G> {
    /// Validates the child counts: `min >= 1`, `max >= 3` and `2 * min <= max + 1`,
    /// so an overflowing node of `max + 1` items can always split into two valid nodes.
    pub fn new(min_children: usize,
               max_children: usize,
               selector: Box<dyn Selector>,
               splitter: Box<dyn Splitter>,
               factory: Box<dyn Factory<T, G>>)
               -> Result<Context<T, G>> {
        if min_children < 1 || max_children < 3 || 2 * min_children > max_children + 1 {
            return Err(RTreeError::InvalidChildren { min: min_children, max: max_children });
        }
        Ok(Context { min_children, max_children, selector, splitter, factory })
    }

    pub fn min_children(&self) -> usize {
        self.min_children
    }

    pub fn max_children(&self) -> usize {
        self.max_children
    }

    pub fn selector(&self) -> &dyn Selector {
        &*self.selector
    }

    pub fn splitter(&self) -> &dyn Splitter {
        &*self.splitter
    }

    pub fn factory(&self) -> &dyn Factory<T, G> {
        &*self.factory
    }
}

impl<T, G> Default for Context<T, G>
    where G: Geometry
{
    fn default() -> Context<T, G> {
        Context {
            min_children: default_min_children(D_MAX_CHILDREN),
            max_children: D_MAX_CHILDREN,
            selector: Box::new(SelectorMinimalAreaIncrease),
            splitter: Box::new(SplitterQuadratic),
            factory: Box::new(DefaultFactory),
        }
    }
}
