use crate::point::distance;
use crate::{homography_from_4pt, Homography, Point, Quad};
use serde::{Deserialize, Serialize};

/// Everything an external warp routine needs to dewarp a document.
///
/// The rectified output is `width × height` pixels; its corner `(0, 0)` maps
/// to `corners.top_left`, `(width, 0)` to `corners.top_right` and so on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectificationPlan {
    pub corners: Quad,
    pub width: usize,
    pub height: usize,
    pub h_img_from_rect: Homography,
}

impl RectificationPlan {
    /// Plan a rectification of `corners` (image coordinates).
    ///
    /// The output keeps the longer of each pair of opposite edges. Returns
    /// `None` for a quad that collapses to zero width or height, or whose
    /// corners admit no homography.
    pub fn from_quad(corners: &Quad) -> Option<Self> {
        let top = distance(corners.top_left, corners.top_right);
        let bottom = distance(corners.bottom_left, corners.bottom_right);
        let left = distance(corners.top_left, corners.bottom_left);
        let right = distance(corners.top_right, corners.bottom_right);

        let width = top.max(bottom).round();
        let height = left.max(right).round();
        if !(width >= 1.0 && height >= 1.0) {
            return None;
        }

        let (w, h) = (width, height);
        let rect = [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ];
        let h_img_from_rect = homography_from_4pt(&rect, &corners.outline())?;

        Some(Self {
            corners: *corners,
            width: width as usize,
            height: height as usize,
            h_img_from_rect,
        })
    }

    /// Map a point of the rectified output back into the image.
    #[inline]
    pub fn map(&self, p_rect: Point) -> Point {
        self.h_img_from_rect.apply(p_rect)
    }
}
