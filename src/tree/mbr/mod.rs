// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Immutable minimum bounding rectangle trees

mod builder;
mod bulk;
mod context;
mod cursor;
pub mod index;
mod insert;
mod leaf;
mod leafgeometry;
mod map;
mod node;
mod query;
mod remove;
mod search;

pub use crate::tree::mbr::builder::{Builder, D_LOADING_FACTOR};
pub use crate::tree::mbr::context::{default_min_children, CompactFactory, Context, DefaultFactory, Factory, D_MAX_CHILDREN,
                                    D_MIN_CHILDREN_P};
pub use crate::tree::mbr::cursor::Cursor;
pub use crate::tree::mbr::index::{SplitGroups, Selector, Splitter};
pub use crate::tree::mbr::index::r::{SelectorMinimalAreaIncrease, SplitterQuadratic};
pub use crate::tree::mbr::index::rstar::{Margin, SelectorMinimalOverlapArea, SplitterRStar};
pub use crate::tree::mbr::insert::InsertResult;
pub use crate::tree::mbr::leaf::Entry;
pub use crate::tree::mbr::leafgeometry::Geometry;
pub use crate::tree::mbr::map::RTree;
pub use crate::tree::mbr::node::MbrNode;
pub use crate::tree::mbr::query::{Condition, MbrQuery, MbrRectQuery};
pub use crate::tree::mbr::remove::RemoveResult;
pub use crate::tree::mbr::search::Search;
