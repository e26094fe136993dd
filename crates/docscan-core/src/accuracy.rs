//! Capture-readiness classification of a smoothed quadrilateral.
//!
//! Two gates run in order: the corner angles must be close to right angles,
//! and only then the document must cover enough of the viewport.

use crate::point::{corner_angle, distance};
use crate::{Quad, Size};
use log::trace;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Thresholds for [`classify`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyParams {
    /// Minimal product of per-corner squareness ratios, in `[0, 1]`.
    pub min_squareness: f64,
    /// Minimal document area as a fraction of the viewport area.
    pub min_area_ratio: f64,
}

impl Default for AccuracyParams {
    fn default() -> Self {
        Self {
            min_squareness: 0.9,
            min_area_ratio: 0.4,
        }
    }
}

/// Readiness verdict for one smoothed quadrilateral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    Acceptable,
    /// Corners are too far from right angles; the device is tilted.
    NeedsSquaring,
    /// Shape is fine but the document is too small in the frame.
    MoveCloser,
}

impl Accuracy {
    #[inline]
    pub fn is_acceptable(self) -> bool {
        self == Accuracy::Acceptable
    }

    /// User-facing hint, `None` when nothing needs fixing.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Accuracy::Acceptable => None,
            Accuracy::NeedsSquaring => Some("Hold straight"),
            Accuracy::MoveCloser => Some("Move closer"),
        }
    }
}

/// Product over the four corners of `angle / (π/2)` (acute) or
/// `(π/2) / angle` (obtuse). A perfect rectangle scores 1.
pub fn squareness(q: &Quad) -> f64 {
    let angles = [
        corner_angle(q.top_right, q.top_left, q.bottom_right),
        corner_angle(q.bottom_right, q.top_right, q.bottom_left),
        corner_angle(q.bottom_left, q.bottom_right, q.top_left),
        corner_angle(q.top_left, q.top_right, q.bottom_left),
    ];
    angles.iter().fold(1.0, |rate, &angle| {
        if angle < FRAC_PI_2 {
            rate * angle / FRAC_PI_2
        } else {
            rate * FRAC_PI_2 / angle
        }
    })
}

/// Quadrilateral area from its diagonals and edges (Bretschneider):
/// `0.25 * sqrt(4 e² f² − (b² + d² − a² − c²)²)`.
pub fn diagonal_area(q: &Quad) -> f64 {
    let a = distance(q.top_left, q.top_right);
    let b = distance(q.top_right, q.bottom_right);
    let c = distance(q.bottom_right, q.bottom_left);
    let d = distance(q.bottom_left, q.top_left);
    let e = distance(q.top_right, q.bottom_left);
    let f = distance(q.top_left, q.bottom_right);
    let t = b * b + d * d - a * a - c * c;
    0.25 * (4.0 * e * e * f * f - t * t).max(0.0).sqrt()
}

/// Classify `q` against a viewport of size `viewport`.
pub fn classify(q: &Quad, viewport: Size, params: &AccuracyParams) -> Accuracy {
    let rate = squareness(q);
    trace!("squareness rate {rate:.4}");
    if rate < params.min_squareness {
        return Accuracy::NeedsSquaring;
    }

    let area = diagonal_area(q);
    let viewport_area = viewport.area();
    let ratio = if viewport_area > 0.0 {
        area / viewport_area
    } else {
        0.0
    };
    trace!(
        "document area {area:.1}, viewport {:.0}x{:.0} ({viewport_area:.1}), ratio {ratio:.4}",
        viewport.width,
        viewport.height
    );
    if ratio < params.min_area_ratio {
        return Accuracy::MoveCloser;
    }

    Accuracy::Acceptable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use approx::assert_relative_eq;

    const VIEWPORT: Size = Size::new(100.0, 100.0);

    #[test]
    fn square_at_sixty_percent_is_acceptable() {
        let side = (0.6 * VIEWPORT.area()).sqrt();
        let q = Quad::axis_aligned(Point::new(10.0, 10.0), side, side);
        assert_relative_eq!(squareness(&q), 1.0, epsilon = 1e-12);
        assert_relative_eq!(diagonal_area(&q), side * side, epsilon = 1e-6);
        assert_eq!(
            classify(&q, VIEWPORT, &AccuracyParams::default()),
            Accuracy::Acceptable
        );
    }

    #[test]
    fn thirty_degree_corner_needs_squaring() {
        // Parallelogram with 30° and 150° corners.
        let (s, c) = 30f64.to_radians().sin_cos();
        let side = 80.0;
        let q = Quad::new(
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side * c, side * s),
            Point::new(side + side * c, side * s),
        );
        assert!(squareness(&q) < 0.9);
        let verdict = classify(&q, VIEWPORT, &AccuracyParams::default());
        assert_eq!(verdict, Accuracy::NeedsSquaring);
        assert_eq!(verdict.hint(), Some("Hold straight"));
        assert!(!verdict.is_acceptable());
    }

    #[test]
    fn small_square_asks_to_move_closer() {
        let q = Quad::axis_aligned(Point::new(0.0, 0.0), 20.0, 20.0);
        let verdict = classify(&q, VIEWPORT, &AccuracyParams::default());
        assert_eq!(verdict, Accuracy::MoveCloser);
        assert_eq!(verdict.hint(), Some("Move closer"));
    }

    #[test]
    fn shape_gate_runs_before_size_gate() {
        // Tiny and skewed: the shape verdict wins.
        let q = Quad::new(
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(3.0, 2.0),
            Point::new(7.0, 2.0),
        );
        assert_eq!(
            classify(&q, VIEWPORT, &AccuracyParams::default()),
            Accuracy::NeedsSquaring
        );
    }

    #[test]
    fn degenerate_quad_is_classified_without_nan() {
        let q = Quad::default();
        assert_eq!(squareness(&q), 1.0);
        assert_eq!(diagonal_area(&q), 0.0);
        assert_eq!(
            classify(&q, VIEWPORT, &AccuracyParams::default()),
            Accuracy::MoveCloser
        );

        let collinear = Quad::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        );
        assert!(squareness(&collinear).is_finite());
        assert!(diagonal_area(&collinear).is_finite());
    }

    #[test]
    fn verdicts_and_params_use_snake_case_json() {
        let json = serde_json::to_string(&Accuracy::NeedsSquaring).expect("serialize");
        assert_eq!(json, r#""needs_squaring""#);
        let back: Accuracy = serde_json::from_str(r#""move_closer""#).expect("parse");
        assert_eq!(back, Accuracy::MoveCloser);

        let params: AccuracyParams =
            serde_json::from_str(r#"{ "min_area_ratio": 0.25 }"#).expect("parse");
        assert_eq!(params.min_area_ratio, 0.25);
        assert_eq!(params.min_squareness, 0.9);
    }

    #[test]
    fn thresholds_are_configurable() {
        let q = Quad::axis_aligned(Point::new(0.0, 0.0), 20.0, 20.0);
        let relaxed = AccuracyParams {
            min_area_ratio: 0.01,
            ..AccuracyParams::default()
        };
        assert_eq!(classify(&q, VIEWPORT, &relaxed), Accuracy::Acceptable);
        assert_eq!(Accuracy::Acceptable.hint(), None);
    }
}
