use crate::stability::HISTORY_CAPACITY;
use crate::CaptureParamsError;
use docscan_core::AccuracyParams;
use serde::{Deserialize, Serialize};

/// Configuration of the capture decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureParams {
    /// History must hold strictly more entries than this before a capture
    /// may trigger.
    pub required_feature_count: usize,
    /// Jitter must be strictly below this, in [`Quad::difference`] units.
    ///
    /// [`Quad::difference`]: docscan_core::Quad::difference
    pub desired_jitter: f64,
    /// Outward extension of the handed-off crop, per diagonal end.
    pub margin_extension_ratio: f64,
    pub accuracy: AccuracyParams,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            required_feature_count: 7,
            desired_jitter: 100.0,
            margin_extension_ratio: 0.02,
            accuracy: AccuracyParams::default(),
        }
    }
}

impl CaptureParams {
    /// Whether the history length gate can ever open.
    ///
    /// History is capped at [`HISTORY_CAPACITY`], so a `required_feature_count`
    /// at or above it turns automatic capture off; only
    /// [`ScanSession::force_capture`](crate::ScanSession::force_capture)
    /// hands off then.
    #[inline]
    pub fn auto_capture_enabled(&self) -> bool {
        self.required_feature_count < HISTORY_CAPACITY
    }

    /// Check ranges.
    pub fn validate(&self) -> Result<(), CaptureParamsError> {
        if self.required_feature_count == 0 {
            return Err(CaptureParamsError::ZeroRequiredFeatureCount);
        }
        if !(self.desired_jitter.is_finite() && self.desired_jitter > 0.0) {
            return Err(CaptureParamsError::DesiredJitter(self.desired_jitter));
        }
        if !(0.0..1.0).contains(&self.margin_extension_ratio) {
            return Err(CaptureParamsError::MarginExtensionRatio(
                self.margin_extension_ratio,
            ));
        }
        for (name, value) in [
            ("min_squareness", self.accuracy.min_squareness),
            ("min_area_ratio", self.accuracy.min_area_ratio),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CaptureParamsError::AccuracyThreshold { name, value });
            }
        }
        Ok(())
    }
}
