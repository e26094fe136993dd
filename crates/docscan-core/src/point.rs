//! Point and vector primitives.
//!
//! Every function here is total: degenerate input (coincident points,
//! zero-length edges, near-collinear triangles) yields a finite, neutral
//! value instead of NaN.

use nalgebra::{Point2, Vector2};
use std::f64::consts::FRAC_PI_2;

/// A point in a floating-point plane.
pub type Point = Point2<f64>;

#[inline]
pub fn add(a: Point, b: Point) -> Point {
    Point::from(a.coords + b.coords)
}

#[inline]
pub fn subtract(a: Point, b: Point) -> Point {
    Point::from(a.coords - b.coords)
}

/// Multiply both coordinates by `factor`. Division is `scale(p, 1.0 / d)`.
#[inline]
pub fn scale(p: Point, factor: f64) -> Point {
    Point::from(p.coords * factor)
}

/// `|x| + |y|`, a cheap magnitude used by the jitter metric.
#[inline]
pub fn manhattan(p: Point) -> f64 {
    p.x.abs() + p.y.abs()
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    nalgebra::distance(&a, &b)
}

/// Euclidean norm of `v` interpreted as a vector from the origin.
#[inline]
pub fn length(v: Point) -> f64 {
    v.coords.norm()
}

/// Triangle area by Heron's formula.
///
/// The radicand is clamped at zero: rounding can push it slightly
/// negative for near-degenerate triangles.
pub fn triangle_area(p1: Point, p2: Point, p3: Point) -> f64 {
    let a = distance(p1, p2);
    let b = distance(p2, p3);
    let c = distance(p3, p1);
    heron(a, b, c)
}

/// Area of the quadrilateral `p1 p2 p3 p4`, split along the `p1–p3` diagonal.
///
/// Corners must follow the ring order (tl, tr, br, bl) for the result to be
/// the geometric area.
pub fn quad_area(p1: Point, p2: Point, p3: Point, p4: Point) -> f64 {
    let a = distance(p1, p2);
    let b = distance(p2, p3);
    let c = distance(p3, p4);
    let d = distance(p4, p1);
    let f = distance(p1, p3);
    heron(a, b, f) + heron(c, d, f)
}

#[inline]
fn heron(a: f64, b: f64, c: f64) -> f64 {
    let radicand = (a + b + c) * (a + b - c) * (b + c - a) * (c + a - b);
    0.25 * radicand.max(0.0).sqrt()
}

/// Interior angle at `vertex` between the edges towards `prev` and `next`.
///
/// A zero-length edge has no direction; it reports `π/2` so that it is
/// neutral for squareness scoring.
pub fn corner_angle(vertex: Point, prev: Point, next: Point) -> f64 {
    let u: Vector2<f64> = prev - vertex;
    let v: Vector2<f64> = next - vertex;
    let denom = u.norm() * v.norm();
    if denom <= f64::EPSILON {
        return FRAC_PI_2;
    }
    (u.dot(&v) / denom).clamp(-1.0, 1.0).acos()
}
