use rand::Rng;
use std::fmt::Debug;

pub trait Shape: Debug {
    fn bounding_box(&self) -> Aabb;
    fn center(&self) -> Point;
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Clamps both coordinates into `[-half_extent, half_extent]`.
    pub fn clamped(&self, half_extent: f32) -> Self {
        Self {
            x: self.x.clamp(-half_extent, half_extent),
            y: self.y.clamp(-half_extent, half_extent),
        }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn distance_sq(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_sq(other).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn overlaps(&self, other: &Circle) -> bool {
        let r = self.radius + other.radius;
        self.position().distance_sq(&other.position()) < r * r
    }
}

impl Shape for Circle {
    fn bounding_box(&self) -> Aabb {
        Aabb::around(self.position(), self.radius)
    }

    fn center(&self) -> Point {
        self.position()
    }
}

/// Axis-aligned box given by its two corners. Containment is open on every
/// side: a point lying on an edge is outside.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Aabb {
    pub begin: Point,
    pub end: Point,
}

impl Aabb {
    pub fn new(begin: Point, end: Point) -> Self {
        Self { begin, end }
    }

    pub fn from_min_max(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            begin: Point::new(min_x, min_y),
            end: Point::new(max_x, max_y),
        }
    }

    /// Square box centred on `center` reaching `half_extent` in every direction.
    pub fn around(center: Point, half_extent: f32) -> Self {
        Self {
            begin: center.offset(-half_extent, -half_extent),
            end: center.offset(half_extent, half_extent),
        }
    }

    pub fn width(&self) -> f32 {
        self.end.x - self.begin.x
    }

    pub fn height(&self) -> f32 {
        self.end.y - self.begin.y
    }

    /// True when no point can satisfy the strict bounds, including NaN corners.
    pub fn is_empty(&self) -> bool {
        !(self.begin.x < self.end.x && self.begin.y < self.end.y)
    }

    pub fn strictly_contains(&self, point: &Point) -> bool {
        self.begin.x < point.x
            && point.x < self.end.x
            && self.begin.y < point.y
            && point.y < self.end.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.begin.x < other.end.x
            && self.end.x > other.begin.x
            && self.begin.y < other.end.y
            && self.end.y > other.begin.y
    }

    pub fn random_point_inside<R: Rng>(&self, rng: &mut R) -> Point {
        Point::new(
            safe_randf32(rng, self.begin.x, self.end.x),
            safe_randf32(rng, self.begin.y, self.end.y),
        )
    }
}

impl Shape for Aabb {
    fn bounding_box(&self) -> Aabb {
        *self
    }

    fn center(&self) -> Point {
        Point::new(
            (self.begin.x + self.end.x) * 0.5,
            (self.begin.y + self.end.y) * 0.5,
        )
    }
}

fn safe_randf32<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..max)
}
