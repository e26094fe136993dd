//! Geometry for document edge capture.
//!
//! This crate is intentionally small and purely geometric: points, the
//! four-corner [`Quad`], its accuracy classification, coordinate-space
//! remapping, crop margins and rectification plans. It does *not* detect
//! quadrilaterals in pixels and does not resample images.

mod accuracy;
mod homography;
mod logger;
mod margin;
pub mod point;
mod quad;
mod rectify;
mod size;

pub use accuracy::{classify, diagonal_area, squareness, Accuracy, AccuracyParams};
pub use homography::{homography_from_4pt, Homography};
pub use margin::{extend_pair, extend_quad};
pub use point::Point;
pub use quad::{average_of, select_largest, Quad};
pub use rectify::RectificationPlan;
pub use size::Size;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
