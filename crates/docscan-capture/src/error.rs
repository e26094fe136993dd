/// Invalid [`CaptureParams`](crate::CaptureParams).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CaptureParamsError {
    #[error("required_feature_count must be at least 1")]
    ZeroRequiredFeatureCount,
    #[error("desired_jitter must be finite and positive (got {0})")]
    DesiredJitter(f64),
    #[error("margin_extension_ratio must be in [0, 1) (got {0})")]
    MarginExtensionRatio(f64),
    #[error("accuracy threshold `{name}` must be finite and non-negative (got {value})")]
    AccuracyThreshold { name: &'static str, value: f64 },
}
