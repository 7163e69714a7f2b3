// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Various geometric shapes to insert into spatial trees

use crate::error::{RTreeError, Result};
use itertools::Itertools;
use std::fmt;
use std::ops::Deref;

/// A 2-dimensional point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub coords: [f64; 2],
}

impl Point {
    /// New Point from its coordinates
    pub fn new(x: f64, y: f64) -> Point {
        assert!(x.is_finite(), "{:?} should be finite", x);
        assert!(y.is_finite(), "{:?} should be finite", y);
        Point { coords: [x, y] }
    }

    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// Euclidean distance to another point
    pub fn distance_to_point(&self, other: &Point) -> f64 {
        (self.x() - other.x()).hypot(self.y() - other.y())
    }
}

impl Deref for Point {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.coords
    }
}

/// A 2-dimensional line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    /// New LineSegment from the coordinates of either end
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    /// New LineSegment from two points
    pub fn from_points(start: Point, end: Point) -> LineSegment {
        LineSegment { start, end }
    }

    /// Shortest distance from (x, y) to any point of the segment
    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        let (x1, y1) = (self.start.x(), self.start.y());
        let (dx, dy) = (self.end.x() - x1, self.end.y() - y1);
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return (x - x1).hypot(y - y1);
        }
        let t = (((x - x1) * dx + (y - y1) * dy) / len_sq).clamp(0.0, 1.0);
        (x - (x1 + t * dx)).hypot(y - (y1 + t * dy))
    }

    /// Does this segment touch or cross the other segment?
    pub fn intersects_segment(&self, other: &LineSegment) -> bool {
        let (p1, p2, q1, q2) = (&self.start, &self.end, &other.start, &other.end);
        let d1 = orientation(q1, q2, p1);
        let d2 = orientation(q1, q2, p2);
        let d3 = orientation(p1, p2, q1);
        let d4 = orientation(p1, p2, q2);
        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }
        (d1 == 0.0 && within_bounds(q1, q2, p1))
            || (d2 == 0.0 && within_bounds(q1, q2, p2))
            || (d3 == 0.0 && within_bounds(p1, p2, q1))
            || (d4 == 0.0 && within_bounds(p1, p2, q2))
    }

    /// Shortest distance between two segments, 0 if they intersect
    pub fn distance_to_segment(&self, other: &LineSegment) -> f64 {
        if self.intersects_segment(other) {
            return 0.0;
        }
        self.distance_to_point(other.start.x(), other.start.y())
            .min(self.distance_to_point(other.end.x(), other.end.y()))
            .min(other.distance_to_point(self.start.x(), self.start.y()))
            .min(other.distance_to_point(self.end.x(), self.end.y()))
    }

    /// Does the segment pass through the point?
    pub fn intersects_point(&self, point: &Point) -> bool {
        self.intersects_segment(&LineSegment::from_points(*point, *point))
    }
}

// cross product of (b - a) and (c - a)
fn orientation(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x() - a.x()) * (c.y() - a.y()) - (b.y() - a.y()) * (c.x() - a.x())
}

// c lies within the bounding box of a and b
fn within_bounds(a: &Point, b: &Point, c: &Point) -> bool {
    c.x() >= a.x().min(b.x())
        && c.x() <= a.x().max(b.x())
        && c.y() >= a.y().min(b.y())
        && c.y() <= a.y().max(b.y())
}

/// A circle given by its centre and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64) -> Circle {
        assert!(radius.is_finite() && radius >= 0.0, "radius {:?} should be finite and non-negative", radius);
        Circle {
            center: Point::new(x, y),
            radius,
        }
    }

    pub fn intersects_point(&self, point: &Point) -> bool {
        self.center.distance_to_point(point) <= self.radius
    }

    pub fn intersects_circle(&self, other: &Circle) -> bool {
        self.center.distance_to_point(&other.center) <= self.radius + other.radius
    }

    pub fn intersects_segment(&self, line: &LineSegment) -> bool {
        line.distance_to_point(self.center.x(), self.center.y()) <= self.radius
    }
}

/// A closed polygon. The last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
    mbr: Rect,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Polygon {
        assert!(points.len() >= 3, "a polygon needs at least 3 points, got {}", points.len());
        let mut mbr = Rect::max_inverted();
        for point in &points {
            mbr.expand_to_point(point);
        }
        Polygon { points, mbr }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn bounds(&self) -> &Rect {
        &self.mbr
    }

    /// The polygon's edges, closing the ring
    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.points
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| LineSegment::from_points(*a, *b))
    }

    /// Even-odd rule containment
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let mut inside = false;
        for (a, b) in self.points.iter().circular_tuple_windows() {
            if (a.y() > y) != (b.y() > y) && x < (b.x() - a.x()) * (y - a.y()) / (b.y() - a.y()) + a.x() {
                inside = !inside;
            }
        }
        inside
    }
}

/// A 2-dimensional axis aligned rectangle
/// A rectangle whose corners are at (x1, y1), (x2, y2) will have the corresponding edges: (x1, x2), (y1, y2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub edges: [(f64, f64); 2],
}

impl Rect {
    /// New Rect from its lower and upper corner. Panics on invalid bounds, see `try_new`.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect {
        match Rect::try_new(x1, y1, x2, y2) {
            Ok(rect) => rect,
            Err(err) => panic!("{}", err),
        }
    }

    /// New Rect from its lower and upper corner
    pub fn try_new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Rect> {
        let finite = [x1, y1, x2, y2].iter().all(|c| c.is_finite());
        if !finite || x2 < x1 || y2 < y1 {
            return Err(RTreeError::InvalidRect { x1, y1, x2, y2 });
        }
        Ok(Rect { edges: [(x1, x2), (y1, y2)] })
    }

    /// New Rect from any two opposing corners
    pub fn from_corners(a: &Point, b: &Point) -> Rect {
        let mut edges = Rect::max_inverted();
        edges.expand_to_point(a);
        edges.expand_to_point(b);
        edges
    }

    /// An inverted Rect where ever dimension's (x, y) coordinates are (MAX, MIN). Simplifies finding boundaries.
    pub fn max_inverted() -> Rect {
        Rect { edges: [(f64::MAX, f64::MIN); 2] }
    }

    /// The largest possible rect
    pub fn max() -> Rect {
        Rect { edges: [(f64::MIN, f64::MAX); 2] }
    }

    /// True until something has been fitted into a `max_inverted` rect
    pub fn is_inverted(&self) -> bool {
        self.edges.iter().any(|&(x, y)| y < x)
    }

    pub fn x1(&self) -> f64 {
        self.edges[0].0
    }

    pub fn x2(&self) -> f64 {
        self.edges[0].1
    }

    pub fn y1(&self) -> f64 {
        self.edges[1].0
    }

    pub fn y2(&self) -> f64 {
        self.edges[1].1
    }

    pub fn min_for_axis(&self, axis: usize) -> f64 {
        self.edges[axis].0
    }

    pub fn max_for_axis(&self, axis: usize) -> f64 {
        self.edges[axis].1
    }

    pub fn area(&self) -> f64 {
        self.edges.iter().fold(1.0, |area, &(x, y)| area * (y - x))
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * self.edges.iter().fold(0.0, |margin, &(x, y)| margin + y - x)
    }

    /// Centre of the rect, the point used to order rects during bulk loading
    pub fn center(&self) -> Point {
        Point::new(self.x1() / 2.0 + self.x2() / 2.0, self.y1() / 2.0 + self.y2() / 2.0)
    }

    /// Expand this rect to minimally fit `other`
    pub fn expand_to_fit(&mut self, other: &Rect) {
        for (&mut (ref mut x1, ref mut y1), &(x2, y2)) in izip!(self.edges.iter_mut(), other.edges.iter()) {
            *x1 = x1.min(x2);
            *y1 = y1.max(y2);
        }
    }

    pub fn expand_to_point(&mut self, point: &Point) {
        for (&mut (ref mut x, ref mut y), &z) in izip!(self.edges.iter_mut(), point.coords.iter()) {
            *x = x.min(z);
            *y = y.max(z);
        }
    }

    /// The smallest rect covering both rects
    pub fn union(&self, other: &Rect) -> Rect {
        let mut union = *self;
        union.expand_to_fit(other);
        union
    }

    /// Inclusive: touching rects intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        izip!(self.edges.iter(), other.edges.iter()).all(|(&(x1, y1), &(x2, y2))| x1 <= y2 && x2 <= y1)
    }

    /// Area shared with the other rect, 0 when they are disjoint
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        izip!(self.edges.iter(), other.edges.iter()).fold(1.0, |area, (&(x1, y1), &(x2, y2))| {
            area * (y1.min(y2) - x1.max(x2)).max(0.0)
        })
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x1() && x <= self.x2() && y >= self.y1() && y <= self.y2()
    }

    /// Is the other rect completely inside this one?
    pub fn contains_rect(&self, other: &Rect) -> bool {
        izip!(self.edges.iter(), other.edges.iter()).all(|(&(x1, y1), &(x2, y2))| x1 <= x2 && y2 <= y1)
    }

    /// Euclidean gap between two rects, 0 when they intersect
    pub fn distance_to_rect(&self, other: &Rect) -> f64 {
        let gaps = izip!(self.edges.iter(), other.edges.iter())
            .map(|(&(x1, y1), &(x2, y2))| (x1 - y2).max(x2 - y1).max(0.0))
            .collect_vec();
        gaps[0].hypot(gaps[1])
    }

    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        let dx = (self.x1() - x).max(x - self.x2()).max(0.0);
        let dy = (self.y1() - y).max(y - self.y2()).max(0.0);
        dx.hypot(dy)
    }

    /// The four sides as segments, anticlockwise from the lower left corner
    pub fn sides(&self) -> [LineSegment; 4] {
        [
            LineSegment::new(self.x1(), self.y1(), self.x2(), self.y1()),
            LineSegment::new(self.x2(), self.y1(), self.x2(), self.y2()),
            LineSegment::new(self.x2(), self.y2(), self.x1(), self.y2()),
            LineSegment::new(self.x1(), self.y2(), self.x1(), self.y1()),
        ]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect [x1={}, y1={}, x2={}, y2={}]", self.x1(), self.y1(), self.x2(), self.y2())
    }
}

/// A convenience enum that contains every shape, so one tree can hold mixed geometries
#[derive(Debug, Clone, PartialEq)]
pub enum Shapes {
    Point(Point),
    LineSegment(LineSegment),
    Rect(Rect),
    Circle(Circle),
    Polygon(Polygon),
}

impl From<Point> for Shapes {
    fn from(point: Point) -> Shapes {
        Shapes::Point(point)
    }
}

impl From<LineSegment> for Shapes {
    fn from(line: LineSegment) -> Shapes {
        Shapes::LineSegment(line)
    }
}

impl From<Rect> for Shapes {
    fn from(rect: Rect) -> Shapes {
        Shapes::Rect(rect)
    }
}

impl From<Circle> for Shapes {
    fn from(circle: Circle) -> Shapes {
        Shapes::Circle(circle)
    }
}

impl From<Polygon> for Shapes {
    fn from(polygon: Polygon) -> Shapes {
        Shapes::Polygon(polygon)
    }
}
