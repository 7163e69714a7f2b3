// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::geometry::Rect;
use crate::tree::mbr::index::AT_ROOT;
use crate::tree::mbr::insert::InsertResult;
use crate::tree::mbr::{Builder, Condition, Context, Cursor, Entry, Geometry, MbrNode, MbrQuery, MbrRectQuery, Search};
use ordered_float::OrderedFloat;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// An immutable R-tree.
///
/// Every mutating operation returns a new tree and leaves `self` as it was. The new tree shares
/// all nodes off the modified path with the old one, so keeping old versions around is cheap and
/// any number of versions may be read from different threads at once.
pub struct RTree<T, G> {
    root: Option<Arc<MbrNode<T, G>>>,
    size: usize,
    context: Arc<Context<T, G>>,
}

impl<T, G> Clone for RTree<T, G> {
    fn clone(&self) -> Self {
        RTree { root: self.root.clone(), size: self.size, context: self.context.clone() }
    }
}

impl<T, G> RTree<T, G> {
    pub(crate) fn with_context(context: Arc<Context<T, G>>) -> RTree<T, G> {
        RTree { root: None, size: 0, context }
    }

    pub(crate) fn from_parts(root: Option<Arc<MbrNode<T, G>>>, size: usize, context: Arc<Context<T, G>>) -> RTree<T, G> {
        RTree { root, size, context }
    }

/// Number of entries
    pub fn len(&self) -> usize {
        self.size
    }

/// Whether the tree is empty
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn root(&self) -> Option<&Arc<MbrNode<T, G>>> {
        self.root.as_ref()
    }

    pub fn context(&self) -> &Context<T, G> {
        &self.context
    }

/// Bounds of every entry, `None` for an empty tree
    pub fn mbr(&self) -> Option<Rect> {
        self.root.as_ref().map(|root| *root.mbr())
    }

/// Number of node levels. 0 when empty, 1 when the root is a leaf.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.depth())
    }

/// An indented dump of the node structure, empty for an empty tree
    pub fn as_string(&self) -> String
        where T: Debug,
              G: Debug
    {
        self.to_string()
    }
}

impl<T, G> RTree<T, G>
    where G: Geometry
{
/// Lazily iterate the entries accepted by the query
    pub fn search_query<Q: MbrQuery<G>>(&self, query: Q) -> Search<'_, T, G, Q> {
        Search::new(self.root.as_deref(), query)
    }

/// Entries touching or overlapping the rect
    pub fn search(&self, rect: &Rect) -> Search<'_, T, G, MbrRectQuery> {
        self.search_query(MbrRectQuery::Intersects(*rect))
    }

/// Entries no further than `max_distance` from the rect
    pub fn search_within(&self, rect: &Rect, max_distance: f64) -> Search<'_, T, G, MbrRectQuery> {
        self.search_query(MbrRectQuery::WithinDistance(*rect, max_distance))
    }

/// Entries satisfying a condition. The condition also prunes levels by their mbr.
    pub fn search_by<F>(&self, condition: F) -> Search<'_, T, G, Condition<F>>
        where F: Fn(&dyn Geometry) -> bool
    {
        self.search_query(Condition(condition))
    }

/// Entries whose mbr touches the geometry's mbr and for which `intersects` holds
    pub fn search_geometry<'a, Q, F>(&'a self, geometry: &'a Q, intersects: F) -> impl Iterator<Item = &'a Entry<T, G>> + 'a
        where Q: Geometry,
              F: Fn(&G, &Q) -> bool + 'a
    {
        self.search(&geometry.mbr()).filter(move |entry| intersects(&entry.geometry, geometry))
    }

/// Entries near the geometry's mbr for which `distance` is at most `max_distance`
    pub fn search_within_with<'a, Q, F>(&'a self, geometry: &'a Q, max_distance: f64, distance: F) -> impl Iterator<Item = &'a Entry<T, G>> + 'a
        where Q: Geometry,
              F: Fn(&G, &Q) -> f64 + 'a
    {
        self.search_within(&geometry.mbr(), max_distance)
            .filter(move |entry| distance(&entry.geometry, geometry) <= max_distance)
    }

/// Every entry
    pub fn entries(&self) -> Search<'_, T, G, MbrRectQuery> {
        self.search_query(MbrRectQuery::All)
    }

/// Up to `k` entries within `max_distance` of the query, nearest first.
/// Distances are measured to the query's mbr, so a `Circle` query ranks entries by their
/// distance to the circle's bounding rect. Entries at equal distance keep their traversal order.
    pub fn nearest<Q>(&self, query: &Q, max_distance: f64, k: usize) -> Vec<&Entry<T, G>>
        where Q: Geometry + ?Sized
    {
        let mbr = query.mbr();
        let mut candidates: Vec<(f64, &Entry<T, G>)> = self.search_within(&mbr, max_distance)
            .map(|entry| (entry.geometry.distance(&mbr), entry))
            .collect();
        candidates.sort_by_key(|&(distance, _)| OrderedFloat(distance));
        candidates.into_iter().take(k).map(|(_, entry)| entry).collect()
    }
}

impl<T, G> RTree<T, G>
    where T: Clone,
          G: Geometry + Clone
{
/// An empty tree with the default configuration
    pub fn new() -> RTree<T, G> {
        RTree::with_context(Arc::new(Context::default()))
    }

    pub fn builder() -> Builder<T, G> {
        Builder::new()
    }

/// A builder preset to the R* strategies
    pub fn star() -> Builder<T, G> {
        Builder::new().star()
    }

/// A new tree with the entry added
    pub fn add(&self, entry: Entry<T, G>) -> RTree<T, G> {
        let root = match self.root {
            None => self.context.factory().create_leaf(vec![entry]),
            Some(ref root) => match root.insert(entry, &self.context) {
                InsertResult::Ok(node) => node,
                InsertResult::Split(node, split) => {
                    debug!("root split, depth now {}", node.depth() + 1);
                    self.context.factory().create_level(vec![Arc::new(node), Arc::new(split)])
                }
            },
        };
        RTree { root: Some(Arc::new(root)), size: self.size + 1, context: self.context.clone() }
    }

    pub fn add_value(&self, value: T, geometry: G) -> RTree<T, G> {
        self.add(Entry::new(value, geometry))
    }

    pub fn add_all<I>(&self, entries: I) -> RTree<T, G>
        where I: IntoIterator<Item = Entry<T, G>>
    {
        entries.into_iter().fold(self.clone(), |tree, entry| tree.add(entry))
    }

/// An owning traversal of the entries accepted by the query. See `Cursor`.
    pub fn cursor<Q: MbrQuery<G>>(&self, query: Q) -> Cursor<T, G, Q> {
        Cursor::new(self.root.as_ref(), query)
    }
}

impl<T, G> RTree<T, G>
    where T: Clone + PartialEq,
          G: Geometry + Clone + PartialEq
{
/// A new tree without the first entry equal to `entry`, or without all of them if `all`.
/// Returns a clone of `self` sharing the same root when nothing matches.
    pub fn delete(&self, entry: &Entry<T, G>, all: bool) -> RTree<T, G> {
        let root = match self.root {
            Some(ref root) => root,
            None => return self.clone(),
        };
        let result = root.remove(entry, all, &self.context, AT_ROOT);
        if result.removed == 0 {
            return self.clone();
        }
        debug!("deleted {} entries, reinserting {} orphans", result.removed, result.orphans.len());
        let orphans = result.orphans;
        let tree = RTree {
            root: result.node.map(collapse),
            size: self.size - result.removed - orphans.len(),
            context: self.context.clone(),
        };
        tree.add_all(orphans)
    }

    pub fn delete_value(&self, value: T, geometry: G, all: bool) -> RTree<T, G> {
        self.delete(&Entry::new(value, geometry), all)
    }

    pub fn delete_all<I>(&self, entries: I, all: bool) -> RTree<T, G>
        where I: IntoIterator<Item = Entry<T, G>>
    {
        entries.into_iter().fold(self.clone(), |tree, entry| tree.delete(&entry, all))
    }
}

/// A root level with a single child is replaced by that child
fn collapse<T, G>(mut root: Arc<MbrNode<T, G>>) -> Arc<MbrNode<T, G>> {
    loop {
        let child = match *root {
            MbrNode::Level { ref children, .. } if children.len() == 1 => children[0].clone(),
            _ => return root,
        };
        debug!("collapsed root, depth now {}", child.depth());
        root = child;
    }
}

impl<T, G> Default for RTree<T, G>
    where T: Clone,
          G: Geometry + Clone
{
    fn default() -> RTree<T, G> {
        RTree::new()
    }
}

impl<T, G> fmt::Display for RTree<T, G>
    where T: Debug,
          G: Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(ref root) => root.fmt_indented(f, ""),
            None => Ok(()),
        }
    }
}

impl<T, G> Debug for RTree<T, G>
    where T: Debug,
          G: Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RTree")
            .field("size", &self.size)
            .field("root", &self.root)
            .field("context", &self.context)
            .finish()
    }
}
