#[macro_use]
extern crate approx;

use persistent_rtree::tree::mbr::{Builder, MbrNode};
use persistent_rtree::{Circle, Entry, Geometry, MbrRectQuery, Point, RTree, Rect, Shapes};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::thread;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn e(n: u32) -> Entry<u32, Rect> {
    Entry::new(n, r(n as f64))
}

fn r(n: f64) -> Rect {
    Rect::new(n, n, n + 1.0, n + 1.0)
}

fn create(max_children: usize, n: u32) -> RTree<u32, Rect> {
    let tree = RTree::builder().max_children(max_children).create().expect("valid configuration");
    tree.add_all((1..=n).map(e))
}

fn random_points(count: u32, seed: u64) -> Vec<Entry<u32, Point>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|i| Entry::new(i, Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))).collect()
}

fn random_rect(rng: &mut StdRng) -> Rect {
    let x = rng.gen_range(0.0..1000.0);
    let y = rng.gen_range(0.0..1000.0);
    Rect::new(x, y, x + rng.gen_range(0.0..150.0), y + rng.gen_range(0.0..150.0))
}

fn values<'a, T: Ord + Clone + 'a, G: 'a>(entries: impl Iterator<Item = &'a Entry<T, G>>) -> BTreeSet<T> {
    entries.map(|entry| entry.value.clone()).collect()
}

/// Walk the tree checking balance, fill bounds and mbr consistency. Returns the leaf depth.
fn check_node<T, G: Geometry>(node: &MbrNode<T, G>, is_root: bool, min: usize, max: usize) -> usize {
    assert!(node.len() <= max, "node of {} exceeds {}", node.len(), max);
    if is_root {
        assert!(!node.is_empty());
    } else {
        assert!(node.len() >= min, "node of {} below {}", node.len(), min);
    }
    if node.is_leaf() {
        let mbr = node.entries().iter().fold(Rect::max_inverted(), |mbr, entry| mbr.union(&entry.geometry.mbr()));
        assert_eq!(&mbr, node.mbr());
        return 1;
    }
    if is_root {
        assert!(node.len() >= 2, "a root level holds at least two children");
    }
    let mbr = node.children().iter().fold(Rect::max_inverted(), |mbr, child| mbr.union(child.mbr()));
    assert_eq!(&mbr, node.mbr());
    let depths: BTreeSet<usize> = node.children().iter().map(|child| check_node(child, false, min, max)).collect();
    assert_eq!(1, depths.len(), "leaves at different depths");
    depths.into_iter().next().unwrap_or(0) + 1
}

fn check<T, G: Geometry>(tree: &RTree<T, G>) {
    let context = tree.context();
    match tree.root() {
        None => {
            assert_eq!(0, tree.len());
            assert_eq!(0, tree.depth());
        }
        Some(root) => {
            let depth = check_node(root, true, context.min_children(), context.max_children());
            assert_eq!(depth, tree.depth());
            assert_eq!(tree.len(), root.count());
        }
    }
    assert_eq!(tree.len(), tree.entries().count());
}

#[test]
fn search_returns_only_overlapping_rect() {
    init();
    let tree = RTree::builder().max_children(4).create().expect("valid")
        .add(Entry::new(1u32, Rect::new(1.0, 1.0, 2.0, 2.0)))
        .add(Entry::new(2, Rect::new(2.0, 2.0, 3.0, 3.0)))
        .add(Entry::new(3, Rect::new(3.0, 3.0, 4.0, 4.0)));
    let found: Vec<u32> = tree.search(&Rect::new(1.0, 1.0, 1.9, 1.9)).map(|entry| entry.value).collect();
    assert_eq!(vec![1], found);
}

#[test]
fn search_includes_touching_rects() {
    let tree = RTree::new()
        .add(Entry::new(1u32, Rect::new(1.0, 1.0, 2.0, 2.0)))
        .add(Entry::new(2, Rect::new(2.0, 2.0, 3.0, 3.0)))
        .add(Entry::new(3, Rect::new(3.0, 3.0, 4.0, 4.0)));
    let found = values(tree.search(&Rect::new(1.0, 1.0, 2.0, 2.0)));
    assert_eq!(vec![1, 2], found.into_iter().collect::<Vec<_>>());
}

#[test]
fn partial_and_full_deletion_of_duplicates() {
    init();
    let entry = e(1);
    let tree = RTree::builder().max_children(4).create().expect("valid").add_all(std::iter::repeat(entry.clone()).take(5));
    assert_eq!(5, tree.len());
    check(&tree);

    let one_less = tree.delete(&entry, false);
    assert_eq!(4, one_less.len());
    assert_eq!(4, one_less.entries().filter(|found| **found == entry).count());
    check(&one_less);

    let none = tree.delete(&entry, true);
    assert_eq!(0, none.len());
    assert_eq!(0, none.entries().count());
    check(&none);

    assert_eq!(5, tree.entries().count());
}

#[test]
fn depth_with_three_children() {
    assert_eq!(1, create(3, 1).depth());
    assert_eq!(1, create(3, 2).depth());
    assert_eq!(1, create(3, 3).depth());
    assert_eq!(2, create(3, 4).depth());
    assert_eq!(3, create(3, 8).depth());
    assert_eq!(3, create(3, 10).depth());
    assert_eq!(0, create(3, 0).depth());
    assert_eq!(5, create(3, 5).len());
}

#[test]
fn deletion_that_removes_a_whole_branch() {
    init();
    let tree = create(3, 8).add(e(10));
    assert_eq!(3, tree.depth());
    let tree = tree.delete(&e(10), false);
    assert_eq!(3, tree.depth());
    check(&tree);
    assert_eq!((1..=8).collect::<BTreeSet<u32>>(), values(tree.entries()));
}

#[test]
fn size_after_delete() {
    let tree = create(3, 0).add(e(1)).add(e(1)).add(e(1)).delete(&e(1), false);
    assert_eq!(2, tree.len());
}

#[test]
fn delete_of_missing_entry_is_identity() {
    let tree = RTree::new().add(e(1));
    let same = tree.delete(&e(2), false);
    assert_eq!(vec![e(1)], same.entries().cloned().collect::<Vec<_>>());
    assert!(Arc::ptr_eq(tree.root().expect("root"), same.root().expect("root")));

    let empty: RTree<u32, Rect> = RTree::new();
    assert!(empty.delete(&e(1), true).is_empty());
}

fn scattered(builder: Builder<usize, Point>) -> RTree<usize, Point> {
    let coords = [(1.0, 9.0), (2.0, 10.0), (4.0, 8.0), (6.0, 7.0), (9.0, 10.0), (7.0, 5.0), (5.0, 6.0), (4.0, 3.0),
                  (3.0, 2.0), (9.0, 1.0), (10.0, 4.0), (6.0, 2.0), (8.0, 3.0)];
    let tree = builder.max_children(3).create().expect("valid");
    tree.add_all(coords.iter().enumerate().map(|(i, &(x, y))| Entry::new(i, Point::new(x, y))))
}

#[test]
fn construction_is_deterministic() {
    let first = scattered(RTree::builder());
    let second = scattered(RTree::builder());
    check(&first);
    assert_eq!(13, first.len());
    assert_eq!(first.depth(), second.depth());
    assert_eq!(first.as_string(), second.as_string());

    let star = scattered(RTree::star());
    check(&star);
    assert_eq!(star.as_string(), scattered(RTree::star()).as_string());
}

#[test]
fn nearest_returns_closest_in_order() {
    let tree = RTree::new().add_all([1.0, 2.0, 3.0, 10.0, 11.0].iter().map(|&x| Entry::new(x as u32, Point::new(x, 1.0))));
    let nearest: Vec<u32> = tree.nearest(&Point::new(9.0, 1.0), 10.0, 2).iter().map(|entry| entry.value).collect();
    assert_eq!(vec![10, 11], nearest);

    assert!(tree.nearest(&Point::new(9.0, 1.0), 0.5, 2).is_empty());
    assert_eq!(5, tree.nearest(&Point::new(9.0, 1.0), 100.0, 10).len());
}

#[test]
fn nearest_matches_brute_force() {
    let entries = random_points(500, 11);
    let tree = RTree::new().add_all(entries.clone());
    let query = Point::new(500.0, 500.0);
    let found = tree.nearest(&query, 200.0, 10);

    let mut expected: Vec<f64> = entries.iter()
        .map(|entry| entry.geometry.distance_to_point(&query))
        .filter(|&distance| distance <= 200.0)
        .collect();
    expected.sort_by(|a, b| a.total_cmp(b));
    expected.truncate(10);

    assert_eq!(expected.len(), found.len());
    for (entry, distance) in found.iter().zip(expected) {
        assert_relative_eq!(distance, entry.geometry.distance_to_point(&query), epsilon = 1e-9);
    }
}

#[test]
fn bulk_load_answers_like_sequential_add() {
    init();
    let entries = random_points(10_000, 42);
    let packed = RTree::builder().loading_factor(1.0).bulk_load(entries.clone()).expect("valid");
    let sequential = RTree::new().add_all(entries);
    assert_eq!(10_000, packed.len());
    check(&packed);
    check(&sequential);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let query = random_rect(&mut rng);
        assert_eq!(values(sequential.search(&query)), values(packed.search(&query)));
    }
}

#[test]
fn bulk_load_with_loading_factor() {
    let entries = random_points(1000, 3);
    for &max in &[4, 8, 16] {
        let tree = RTree::builder().max_children(max).bulk_load(entries.clone()).expect("valid");
        check(&tree);
        assert_eq!(1000, tree.len());
    }
}

fn search_is_sound_and_complete(tree: &RTree<u32, Point>, entries: &[Entry<u32, Point>], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..50 {
        let query = random_rect(&mut rng);
        let expected: BTreeSet<u32> = entries.iter().filter(|entry| entry.geometry.intersects(&query)).map(|entry| entry.value).collect();
        assert_eq!(expected, values(tree.search(&query)));

        let distance = rng.gen_range(0.0..50.0);
        let expected: BTreeSet<u32> = entries.iter()
            .filter(|entry| entry.geometry.distance(&query) <= distance)
            .map(|entry| entry.value)
            .collect();
        assert_eq!(expected, values(tree.search_within(&query, distance)));
    }
}

#[test]
fn random_adds_and_deletes_keep_invariants() {
    init();
    for star in [false, true] {
        let builder = if star { RTree::star() } else { RTree::builder() };
        let empty = builder.max_children(6).create().expect("valid");
        let entries = random_points(600, 5);
        let full = empty.add_all(entries.clone());
        check(&full);
        assert_eq!(600, full.len());
        search_is_sound_and_complete(&full, &entries, 9);

        let (gone, kept) = entries.split_at(350);
        let partial = full.delete_all(gone.iter().cloned(), false);
        check(&partial);
        assert_eq!(250, partial.len());
        assert_eq!(values(kept.iter()), values(partial.entries()));
        search_is_sound_and_complete(&partial, kept, 10);

        let emptied = partial.delete_all(kept.iter().cloned(), false);
        check(&emptied);
        assert!(emptied.is_empty());
        assert!(emptied.mbr().is_none());

        check(&full);
        assert_eq!(values(entries.iter()), values(full.entries()));
    }
}

#[test]
fn delete_is_inverse_of_add() {
    let tree = RTree::new().add_all(random_points(100, 1));
    let extra = Entry::new(1000, Point::new(1.5, 2.5));
    let added = tree.add(extra.clone());
    assert_eq!(1, added.search(&extra.geometry.mbr()).filter(|entry| **entry == extra).count());
    let removed = added.delete(&extra, false);
    assert_eq!(values(tree.entries()), values(removed.entries()));
    assert_eq!(tree.len(), removed.len());
}

fn node_ptrs<T, G>(node: &Arc<MbrNode<T, G>>, ptrs: &mut HashSet<*const MbrNode<T, G>>) {
    ptrs.insert(Arc::as_ptr(node));
    for child in node.children() {
        node_ptrs(child, ptrs);
    }
}

// Nodes of `node` not found in `old`, without descending into shared subtrees
fn new_nodes<T, G>(node: &Arc<MbrNode<T, G>>, old: &HashSet<*const MbrNode<T, G>>) -> usize {
    if old.contains(&Arc::as_ptr(node)) {
        return 0;
    }
    1 + node.children().iter().map(|child| new_nodes(child, old)).sum::<usize>()
}

#[test]
fn only_the_changed_path_is_rebuilt() {
    let tree = RTree::new().add_all(random_points(200, 2));
    let mut old = HashSet::new();
    node_ptrs(tree.root().expect("root"), &mut old);
    for i in 0..20 {
        let next = tree.add(Entry::new(1000 + i, Point::new(i as f64 * 50.0, 500.0)));
        let rebuilt = new_nodes(next.root().expect("root"), &old);
        assert!(rebuilt >= next.depth());
        assert!(rebuilt <= 2 * next.depth() + 1, "{} nodes rebuilt for depth {}", rebuilt, next.depth());
    }
}

#[test]
fn condition_and_refined_searches() {
    let tree = RTree::new().add_all((0..20).map(|i| Entry::new(i, Point::new(i as f64, 0.0))));

    let left: BTreeSet<u32> = values(tree.search_by(|geometry: &dyn Geometry| geometry.mbr().x1() < 5.0));
    assert_eq!((0..5).collect::<BTreeSet<u32>>(), left);

    let circle = Circle::new(10.0, 0.0, 2.5);
    let inside = values(tree.search_geometry(&circle, |point: &Point, circle: &Circle| circle.intersects_point(point)));
    assert_eq!((8..=12).collect::<BTreeSet<u32>>(), inside);

    let origin = Point::new(0.0, 0.0);
    let near = values(tree.search_within_with(&origin, 3.0, |point: &Point, origin: &Point| point.distance_to_point(origin)));
    assert_eq!((0..=3).collect::<BTreeSet<u32>>(), near);

    let contained = values(tree.search_query(MbrRectQuery::ContainedBy(Rect::new(2.0, -1.0, 4.0, 1.0))));
    assert_eq!((2..=4).collect::<BTreeSet<u32>>(), contained);
}

#[test]
fn mixed_shapes_share_a_tree() {
    let tree: RTree<&str, Shapes> = RTree::new()
        .add_value("point", Point::new(1.0, 1.0).into())
        .add_value("rect", Rect::new(5.0, 5.0, 6.0, 6.0).into())
        .add_value("circle", Circle::new(20.0, 20.0, 1.0).into());
    let found: Vec<&str> = tree.search(&Rect::new(0.0, 0.0, 10.0, 10.0)).map(|entry| entry.value).collect();
    assert_eq!(2, found.len());
    assert!(found.contains(&"point") && found.contains(&"rect"));
    assert_relative_eq!(20.0, tree.mbr().expect("not empty").x2() - 1.0);
}

#[test]
fn cursor_outlives_its_tree() {
    let tree = RTree::new().add_all((0..30).map(|i| Entry::new(i, Point::new(i as f64, i as f64))));
    let mut cursor = tree.cursor(MbrRectQuery::Intersects(Rect::new(10.0, 10.0, 19.0, 19.0)));
    drop(tree);
    let first = cursor.next().expect("ten matches");
    let fork = cursor.clone();
    let rest: BTreeSet<u32> = cursor.map(|entry| entry.value).collect();
    let forked: BTreeSet<u32> = fork.map(|entry| entry.value).collect();
    assert_eq!(rest, forked);
    assert_eq!(9, rest.len());
    assert!(!rest.contains(&first.value));
}

#[test]
fn versions_are_readable_across_threads() {
    let tree = Arc::new(RTree::new().add_all(random_points(1000, 4)));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tree = tree.clone();
            thread::spawn(move || {
                let x = i as f64 * 250.0;
                tree.search(&Rect::new(x, 0.0, x + 250.0, 1000.0)).count()
            })
        })
        .collect();
    let total: usize = handles.into_iter().map(|handle| handle.join().expect("reader panicked")).sum();
    assert!(total >= 1000);
}
