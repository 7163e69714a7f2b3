// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::geometry::{Circle, LineSegment, Point, Polygon, Rect, Shapes};

/// The minimum functionality required to insert leaf geometry into `RTree`
///
/// The parameter `mbr` represents a minimum bounding rectangle.
/// An mbr whose corners are at (x1, y1), (x2, y2) will have the corresponding edges: (x1, x2), (y1, y2)
pub trait Geometry {
    /// The smallest rectangle enclosing the geometry
    fn mbr(&self) -> Rect;

    /// Determine if the geometry touches or overlaps the mbr
    fn intersects(&self, mbr: &Rect) -> bool;

    /// Shortest distance to the mbr. Must be 0 if and only if `intersects` is true.
    fn distance(&self, mbr: &Rect) -> f64;

    /// Expand the mbr to minimally fit the geometry
    fn expand_mbr_to_fit(&self, mbr: &mut Rect) {
        mbr.expand_to_fit(&self.mbr());
    }
}

impl Geometry for Point {
    fn mbr(&self) -> Rect {
        Rect::from_corners(self, self)
    }

    fn intersects(&self, mbr: &Rect) -> bool {
        mbr.contains(self.x(), self.y())
    }

    fn distance(&self, mbr: &Rect) -> f64 {
        mbr.distance_to_point(self.x(), self.y())
    }

    fn expand_mbr_to_fit(&self, mbr: &mut Rect) {
        mbr.expand_to_point(self);
    }
}

impl Geometry for LineSegment {
    fn mbr(&self) -> Rect {
        Rect::from_corners(&self.start, &self.end)
    }

    fn intersects(&self, mbr: &Rect) -> bool {
        mbr.contains(self.start.x(), self.start.y())
            || mbr.contains(self.end.x(), self.end.y())
            || mbr.sides().iter().any(|side| self.intersects_segment(side))
    }

    fn distance(&self, mbr: &Rect) -> f64 {
        if self.intersects(mbr) {
            return 0.0;
        }
        mbr.sides()
            .iter()
            .map(|side| self.distance_to_segment(side))
            .fold(f64::INFINITY, f64::min)
    }
}

impl Geometry for Rect {
    fn mbr(&self) -> Rect {
        *self
    }

    fn intersects(&self, mbr: &Rect) -> bool {
        Rect::intersects(self, mbr)
    }

    fn distance(&self, mbr: &Rect) -> f64 {
        self.distance_to_rect(mbr)
    }

    fn expand_mbr_to_fit(&self, mbr: &mut Rect) {
        mbr.expand_to_fit(self);
    }
}

impl Geometry for Circle {
    fn mbr(&self) -> Rect {
        let (x, y, r) = (self.center.x(), self.center.y(), self.radius);
        Rect::from_corners(&Point::new(x - r, y - r), &Point::new(x + r, y + r))
    }

    fn intersects(&self, mbr: &Rect) -> bool {
        mbr.distance_to_point(self.center.x(), self.center.y()) <= self.radius
    }

    fn distance(&self, mbr: &Rect) -> f64 {
        (mbr.distance_to_point(self.center.x(), self.center.y()) - self.radius).max(0.0)
    }
}

impl Geometry for Polygon {
    fn mbr(&self) -> Rect {
        *self.bounds()
    }

    fn intersects(&self, mbr: &Rect) -> bool {
        if !self.bounds().intersects(mbr) {
            return false;
        }
        self.points().iter().any(|p| mbr.contains(p.x(), p.y()))
            || self.contains_point(mbr.x1(), mbr.y1())
            || self.edges().any(|edge| Geometry::intersects(&edge, mbr))
    }

    fn distance(&self, mbr: &Rect) -> f64 {
        if self.intersects(mbr) {
            return 0.0;
        }
        self.edges().map(|edge| edge.distance(mbr)).fold(f64::INFINITY, f64::min)
    }
}

impl Geometry for Shapes {
    fn mbr(&self) -> Rect {
        match *self {
            Shapes::Point(ref point) => point.mbr(),
            Shapes::LineSegment(ref line) => line.mbr(),
            Shapes::Rect(ref rect) => rect.mbr(),
            Shapes::Circle(ref circle) => circle.mbr(),
            Shapes::Polygon(ref polygon) => polygon.mbr(),
        }
    }

    fn intersects(&self, mbr: &Rect) -> bool {
        match *self {
            Shapes::Point(ref point) => point.intersects(mbr),
            Shapes::LineSegment(ref line) => line.intersects(mbr),
            Shapes::Rect(ref rect) => Geometry::intersects(rect, mbr),
            Shapes::Circle(ref circle) => circle.intersects(mbr),
            Shapes::Polygon(ref polygon) => polygon.intersects(mbr),
        }
    }

    fn distance(&self, mbr: &Rect) -> f64 {
        match *self {
            Shapes::Point(ref point) => point.distance(mbr),
            Shapes::LineSegment(ref line) => line.distance(mbr),
            Shapes::Rect(ref rect) => rect.distance(mbr),
            Shapes::Circle(ref circle) => circle.distance(mbr),
            Shapes::Polygon(ref polygon) => polygon.distance(mbr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Rect {
        Rect::new(0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn point() {
        let inside = Point::new(0.5, 0.5);
        let outside = Point::new(4.0, 5.0);

        assert_eq!(Rect::new(0.5, 0.5, 0.5, 0.5), inside.mbr());
        assert!(inside.intersects(&unit()));
        assert!(!outside.intersects(&unit()));
        assert_relative_eq!(0.0f64, inside.distance(&unit()));
        assert_relative_eq!(5.0f64, outside.distance(&unit()));

        let mut mbr = Rect::max_inverted();
        inside.expand_mbr_to_fit(&mut mbr);
        outside.expand_mbr_to_fit(&mut mbr);
        assert_eq!(Rect::new(0.5, 0.5, 4.0, 5.0), mbr);
    }

    #[test]
    fn line_segment() {
        let crossing = LineSegment::new(-1.0, 0.5, 2.0, 0.5);
        let beside = LineSegment::new(2.0, 0.0, 2.0, 1.0);

        assert_eq!(Rect::new(-1.0, 0.5, 2.0, 0.5), crossing.mbr());
        assert!(crossing.intersects(&unit()));
        assert!(!beside.intersects(&unit()));
        assert_relative_eq!(0.0f64, crossing.distance(&unit()));
        assert_relative_eq!(1.0f64, beside.distance(&unit()));
    }

    #[test]
    fn rect() {
        let far = Rect::new(4.0, 5.0, 6.0, 6.0);
        assert_eq!(unit(), unit().mbr());
        assert!(Geometry::intersects(&unit(), &Rect::new(0.5, 0.5, 3.0, 3.0)));
        assert!(!Geometry::intersects(&far, &unit()));
        assert_relative_eq!(5.0f64, Geometry::distance(&far, &unit()));
    }

    #[test]
    fn circle() {
        let circle = Circle::new(3.0, 0.5, 1.0);
        assert_eq!(Rect::new(2.0, -0.5, 4.0, 1.5), circle.mbr());
        assert!(!circle.intersects(&unit()));
        assert_relative_eq!(1.0f64, circle.distance(&unit()));
        assert!(Circle::new(1.5, 0.5, 0.5).intersects(&unit()));
    }

    #[test]
    fn polygon() {
        let triangle = Polygon::new(vec![Point::new(-1.0, -1.0), Point::new(3.0, -1.0), Point::new(-1.0, 3.0)]);
        assert_eq!(Rect::new(-1.0, -1.0, 3.0, 3.0), triangle.mbr());
        // the unit square sits inside the triangle
        assert!(triangle.intersects(&unit()));
        assert!(!triangle.intersects(&Rect::new(2.0, 2.0, 3.0, 3.0)));
        assert!(triangle.distance(&Rect::new(2.0, 2.0, 3.0, 3.0)) > 0.0);
    }

    #[test]
    fn shapes_dispatch() {
        let shapes: Vec<Shapes> = vec![
            Point::new(0.5, 0.5).into(),
            LineSegment::new(0.0, 0.0, 1.0, 1.0).into(),
            unit().into(),
            Circle::new(0.5, 0.5, 0.1).into(),
        ];
        for shape in &shapes {
            assert!(shape.intersects(&unit()));
            assert_relative_eq!(0.0f64, shape.distance(&unit()));
            assert!(unit().contains_rect(&shape.mbr()));
        }
    }
}
