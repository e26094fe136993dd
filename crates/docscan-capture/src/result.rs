use crate::CaptureState;
use docscan_core::{Accuracy, Quad, RectificationPlan, Size};
use serde::{Deserialize, Serialize};

/// Crop handed to the external capture path when a capture triggers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureHandoff {
    /// Smoothed quad in target (screen) space, as shown to the user.
    pub smoothed: Quad,
    /// `smoothed` with the crop margin applied, still in target space.
    pub crop: Quad,
    /// Size of the target space both quads live in.
    pub target_size: Size,
}

impl CaptureHandoff {
    /// Map the crop into the space of the captured photo.
    ///
    /// This is the inverse remap of the one applied to detections, so the
    /// cropped region matches what was on screen.
    pub fn map_to_image(&self, image_size: Size) -> Quad {
        self.crop.normalized(self.target_size, image_size)
    }

    /// Crop corners and dewarp homography in photo coordinates.
    pub fn rectification(&self, image_size: Size) -> Option<RectificationPlan> {
        RectificationPlan::from_quad(&self.map_to_image(image_size))
    }
}

/// Outcome of one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Session state after the frame was processed.
    pub state: CaptureState,
    /// Smoothed quad in target space; `None` without a candidate or while
    /// paused.
    pub smoothed: Option<Quad>,
    pub accuracy: Option<Accuracy>,
    pub jitter: Option<f64>,
    pub history_len: usize,
    /// Present exactly on the frame that triggered a capture.
    pub capture: Option<CaptureHandoff>,
}

impl FrameReport {
    pub(crate) fn idle(state: CaptureState, history_len: usize) -> Self {
        Self {
            state,
            smoothed: None,
            accuracy: None,
            jitter: None,
            history_len,
            capture: None,
        }
    }

    #[inline]
    pub fn triggered(&self) -> bool {
        self.capture.is_some()
    }

    /// Stability progress in `[0, 1]` for a progress bar: `1` once jitter
    /// drops to `desired_jitter` or below.
    pub fn progress(&self, desired_jitter: f64) -> Option<f64> {
        let jitter = self.jitter?;
        if jitter <= desired_jitter {
            return Some(1.0);
        }
        Some((desired_jitter / jitter).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use docscan_core::Point;

    #[test]
    fn progress_saturates() {
        let mut report = FrameReport::idle(CaptureState::Active, 3);
        assert_eq!(report.progress(100.0), None);
        report.jitter = Some(0.0);
        assert_eq!(report.progress(100.0), Some(1.0));
        report.jitter = Some(400.0);
        assert_eq!(report.progress(100.0), Some(0.25));
        report.jitter = Some(300.0);
        assert_relative_eq!(report.progress(100.0).expect("jitter set"), 1.0 / 3.0);
    }

    #[test]
    fn handoff_maps_into_photo_space() {
        let screen = Size::new(400.0, 800.0);
        let photo = Size::new(2000.0, 4000.0);
        let crop = Quad::axis_aligned(Point::new(100.0, 200.0), 200.0, 300.0);
        let handoff = CaptureHandoff {
            smoothed: crop,
            crop,
            target_size: screen,
        };
        // Same aspect ratio: Y flip then a uniform x5 scale.
        let mapped = handoff.map_to_image(photo);
        assert_relative_eq!(mapped.top_left, Point::new(500.0, 3000.0), epsilon = 1e-9);
        assert_relative_eq!(mapped.bottom_right, Point::new(1500.0, 1500.0), epsilon = 1e-9);

        let plan = handoff.rectification(photo).expect("plan");
        assert_eq!((plan.width, plan.height), (1000, 1500));
    }
}
