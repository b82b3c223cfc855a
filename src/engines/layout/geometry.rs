use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i64,
    pub height: i64,
}

impl Size {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

/// Axis aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub start: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(start: Point, size: Size) -> Self {
        Self { start, size }
    }

    pub fn end_x(&self) -> i64 {
        self.start.x + self.size.width
    }

    pub fn end_y(&self) -> i64 {
        self.start.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.start.x + self.size.width / 2,
            self.start.y + self.size.height / 2,
        )
    }

    /// Touching edges count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.end_x() >= other.start.x
            && self.end_y() >= other.start.y
            && self.start.x <= other.end_x()
            && self.start.y <= other.end_y()
    }

    pub fn edges(&self) -> [Segment; 4] {
        let top_left = self.start;
        let top_right = Point::new(self.end_x(), self.start.y);
        let bottom_right = Point::new(self.end_x(), self.end_y());
        let bottom_left = Point::new(self.start.x, self.end_y());
        [
            Segment::new(top_left, top_right),
            Segment::new(top_right, bottom_right),
            Segment::new(bottom_right, bottom_left),
            Segment::new(bottom_left, top_left),
        ]
    }

    /// True when the segment crosses or touches any edge of the rectangle.
    pub fn outline_crossed_by(&self, segment: &Segment) -> bool {
        self.edges().iter().any(|edge| edge.intersects(segment))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Proper crossings, plus any endpoint lying on the other segment.
    pub fn intersects(&self, other: &Segment) -> bool {
        let d1 = orientation(self.start, self.end, other.start);
        let d2 = orientation(self.start, self.end, other.end);
        let d3 = orientation(other.start, other.end, self.start);
        let d4 = orientation(other.start, other.end, self.end);

        if d1 * d2 < 0 && d3 * d4 < 0 {
            return true;
        }

        (d1 == 0 && self.bounds_contain(other.start))
            || (d2 == 0 && self.bounds_contain(other.end))
            || (d3 == 0 && other.bounds_contain(self.start))
            || (d4 == 0 && other.bounds_contain(self.end))
    }

    fn bounds_contain(&self, p: Point) -> bool {
        between(self.start.x, self.end.x, p.x) && between(self.start.y, self.end.y, p.y)
    }
}

/// Sign of the cross product (b - a) x (c - a): positive for a counter
/// clockwise turn, zero when collinear.
fn orientation(a: Point, b: Point, c: Point) -> i64 {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    cross.signum()
}

fn between(a: i64, b: i64, c: i64) -> bool {
    a.min(b) <= c && c <= a.max(b)
}
