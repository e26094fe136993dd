use crate::point::{self, Point};
use crate::Size;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Four document corners in detection order.
///
/// No convexity or winding is enforced; every derived metric tolerates
/// degenerate corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl Default for Quad {
    fn default() -> Self {
        Self {
            top_left: Point::origin(),
            top_right: Point::origin(),
            bottom_left: Point::origin(),
            bottom_right: Point::origin(),
        }
    }
}

impl Quad {
    pub fn new(top_left: Point, top_right: Point, bottom_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Axis-aligned rectangle with its top-left corner at `origin`.
    pub fn axis_aligned(origin: Point, width: f64, height: f64) -> Self {
        Self {
            top_left: origin,
            top_right: Point::new(origin.x + width, origin.y),
            bottom_left: Point::new(origin.x, origin.y + height),
            bottom_right: Point::new(origin.x + width, origin.y + height),
        }
    }

    /// Apply `f` to every corner.
    pub fn map(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
        }
    }

    /// Corners as a closed ring: tl, tr, br, bl. This is the drawing order
    /// for an outline overlay.
    pub fn outline(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// All four corners have finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.outline()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Geometric area of the corner ring.
    pub fn area(&self) -> f64 {
        point::quad_area(
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        )
    }

    /// Sum of Manhattan distances between corresponding corners.
    pub fn difference(&self, other: &Quad) -> f64 {
        point::manhattan(point::subtract(other.top_left, self.top_left))
            + point::manhattan(point::subtract(other.top_right, self.top_right))
            + point::manhattan(point::subtract(other.bottom_left, self.bottom_left))
            + point::manhattan(point::subtract(other.bottom_right, self.bottom_right))
    }

    /// Size score used to rank candidates; not a true area.
    ///
    /// `|d1| |d2| sin θ` over the two diagonals. A zero-length diagonal
    /// scores 0; diagonals too long to multiply in `f64` score infinity.
    /// Non-finite corners give NaN.
    pub fn area_qualifier(&self) -> f64 {
        let to_left = self.top_right - self.bottom_left;
        let to_right = self.top_left - self.bottom_right;
        let lengths = to_left.norm() * to_right.norm();
        if lengths <= f64::EPSILON {
            return 0.0;
        }
        if lengths.is_infinite() && self.is_finite() {
            return f64::INFINITY;
        }
        let cos = (to_left.dot(&to_right) / lengths).clamp(-1.0, 1.0);
        (1.0 - cos * cos).max(0.0).sqrt() * lengths
    }

    /// Ordering used for candidate selection.
    ///
    /// Identical corners compare equal; anything else is ordered by
    /// [`Quad::area_qualifier`] using the IEEE total order, so the relation
    /// never cycles. A NaN qualifier ranks below every real one.
    pub fn cmp_by_area(&self, other: &Quad) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        rank_key(self).total_cmp(&rank_key(other))
    }

    /// Remap from `source` space into `target` space the way an aspect-fill
    /// preview shows it.
    ///
    /// The source is widened to the target aspect ratio at constant height,
    /// the excess width is centered, the Y axis is flipped and the result is
    /// scaled per axis. Calling it again with the sizes swapped returns the
    /// original corners.
    pub fn normalized(&self, source: Size, target: Size) -> Quad {
        let stretched = Size::new(source.height * target.aspect_ratio(), source.height);
        let x_shift = (stretched.width - source.width) / 2.0;
        let y_shift = (stretched.height - source.height) / 2.0;
        let sx = target.width / stretched.width;
        let sy = target.height / stretched.height;

        self.map(|p| {
            let y = source.height - p.y;
            Point::new((p.x + x_shift) * sx, (y + y_shift) * sy)
        })
    }
}

fn rank_key(q: &Quad) -> f64 {
    let qualifier = q.area_qualifier();
    if qualifier.is_nan() {
        f64::NEG_INFINITY
    } else {
        qualifier
    }
}

/// Componentwise mean of every corner.
///
/// # Panics
///
/// Panics on an empty slice. The tracker always includes the current
/// candidate, so an empty input is a caller bug.
pub fn average_of(quads: &[Quad]) -> Quad {
    assert!(!quads.is_empty(), "average_of called with no quadrilaterals");
    let sum = quads.iter().fold(
        [Point::origin(); 4],
        |[tl, tr, bl, br], q| {
            [
                point::add(tl, q.top_left),
                point::add(tr, q.top_right),
                point::add(bl, q.bottom_left),
                point::add(br, q.bottom_right),
            ]
        },
    );
    let inv = 1.0 / quads.len() as f64;
    let [tl, tr, bl, br] = sum.map(|p| point::scale(p, inv));
    Quad::new(tl, tr, bl, br)
}

/// Largest candidate by [`Quad::cmp_by_area`]; ties keep the first one seen.
///
/// Candidates with non-finite corners are skipped.
pub fn select_largest<I>(candidates: I) -> Option<Quad>
where
    I: IntoIterator<Item = Quad>,
{
    candidates.into_iter().filter(Quad::is_finite).reduce(|best, q| {
        if q.cmp_by_area(&best) == Ordering::Greater {
            q
        } else {
            best
        }
    })
}
