use crate::point::Point;
use crate::Quad;

/// Push `p1` and `p2` apart along their connecting line.
///
/// Each point moves by `ratio * |p2 - p1|` away from the other, so the
/// midpoint is unchanged and the separation grows by `1 + 2 * ratio`.
pub fn extend_pair(p1: Point, p2: Point, ratio: f64) -> (Point, Point) {
    let d = p2 - p1;
    (p1 - d * ratio, p2 + d * ratio)
}

/// Extend both diagonals (`tl↔br`, `tr↔bl`) so a crop keeps a small margin
/// around the detected edge.
pub fn extend_quad(q: &Quad, ratio: f64) -> Quad {
    let (top_left, bottom_right) = extend_pair(q.top_left, q.bottom_right, ratio);
    let (top_right, bottom_left) = extend_pair(q.top_right, q.bottom_left, ratio);
    Quad {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::distance;
    use approx::assert_relative_eq;

    fn midpoint(a: Point, b: Point) -> Point {
        nalgebra::center(&a, &b)
    }

    #[test]
    fn extension_keeps_midpoint_and_line() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(110.0, 70.0);
        let (a1, b1) = extend_pair(a, b, 0.05);
        let (a2, b2) = extend_pair(a1, b1, 0.05);

        let d0 = distance(a, b);
        let d1 = distance(a1, b1);
        let d2 = distance(a2, b2);
        assert!(d0 < d1 && d1 < d2);
        assert_relative_eq!(d1, d0 * 1.1, epsilon = 1e-9);

        let m = midpoint(a, b);
        assert_relative_eq!(midpoint(a1, b1), m, epsilon = 1e-9);
        assert_relative_eq!(midpoint(a2, b2), m, epsilon = 1e-9);

        // Collinear with the original segment.
        let dir = b - a;
        let off = a2 - a;
        assert_relative_eq!(dir.perp(&off), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_ratio_is_identity() {
        let q = Quad::axis_aligned(Point::new(1.0, 2.0), 30.0, 40.0);
        assert_eq!(extend_quad(&q, 0.0), q);
    }

    #[test]
    fn quad_extension_grows_area() {
        let q = Quad::axis_aligned(Point::new(0.0, 0.0), 100.0, 50.0);
        let out = extend_quad(&q, 0.02);
        assert_relative_eq!(out.top_left, Point::new(-2.0, -1.0), epsilon = 1e-9);
        assert_relative_eq!(out.bottom_right, Point::new(102.0, 51.0), epsilon = 1e-9);
        assert_relative_eq!(out.top_right, Point::new(102.0, -1.0), epsilon = 1e-9);
        assert!(out.area() > q.area());
    }
}
