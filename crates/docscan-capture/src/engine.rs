use crate::stability::{fold, StabilityHistory, HISTORY_CAPACITY};
use crate::{CaptureHandoff, CaptureParams, CaptureParamsError, FrameReport, ScanObserver};
use docscan_core::{classify, extend_quad, select_largest, Quad, Size};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Whether the session evaluates incoming frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Active,
    /// Entered on capture; left only through [`ScanSession::resume`] or
    /// [`ScanSession::reset`].
    Paused,
}

/// One camera frame as seen by the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Best detection of this frame in detector coordinates, if any.
    pub candidate: Option<Quad>,
    /// Extent of the detector image.
    pub source_size: Size,
    /// Extent of the space results are reported in (usually the screen).
    pub target_size: Size,
}

impl Frame {
    pub fn new(candidate: Option<Quad>, source_size: Size, target_size: Size) -> Self {
        Self {
            candidate,
            source_size,
            target_size,
        }
    }

    /// Keep the largest of several detector hits (first one on ties).
    pub fn from_candidates(
        candidates: impl IntoIterator<Item = Quad>,
        source_size: Size,
        target_size: Size,
    ) -> Self {
        Self::new(select_largest(candidates), source_size, target_size)
    }
}

/// Per-stream scanning state: detection history plus the capture state.
///
/// Frames must be fed one at a time; the session holds no locks.
#[derive(Clone, Debug)]
pub struct ScanSession {
    params: CaptureParams,
    history: StabilityHistory,
    state: CaptureState,
}

impl ScanSession {
    /// Create an active session with an empty history.
    pub fn new(params: CaptureParams) -> Result<Self, CaptureParamsError> {
        params.validate()?;
        if !params.auto_capture_enabled() {
            warn!(
                "required_feature_count {} is not below the history capacity {}; auto-capture is off",
                params.required_feature_count, HISTORY_CAPACITY
            );
        }
        Ok(Self {
            params,
            history: StabilityHistory::new(),
            state: CaptureState::Active,
        })
    }

    #[inline]
    pub fn params(&self) -> &CaptureParams {
        &self.params
    }

    #[inline]
    pub fn history(&self) -> &StabilityHistory {
        &self.history
    }

    #[inline]
    pub fn state(&self) -> CaptureState {
        self.state
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == CaptureState::Paused
    }

    /// Evaluate one frame.
    ///
    /// While paused the frame is ignored. Without a usable candidate the
    /// history is left unchanged and nothing is smoothed.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, frame), fields(history = self.history.len()))
    )]
    pub fn process_frame(&mut self, frame: Frame) -> FrameReport {
        if self.is_paused() {
            debug!("session paused, frame ignored");
            return FrameReport::idle(self.state, self.history.len());
        }
        let Some(candidate) = frame.candidate else {
            return FrameReport::idle(self.state, self.history.len());
        };
        if !frame.source_size.is_valid() || !frame.target_size.is_valid() {
            warn!(
                "dropping frame with invalid sizes: source {:?}, target {:?}",
                frame.source_size, frame.target_size
            );
            return FrameReport::idle(self.state, self.history.len());
        }
        if !candidate.is_finite() {
            warn!("dropping candidate with non-finite corners: {candidate:?}");
            return FrameReport::idle(self.state, self.history.len());
        }

        let candidate = candidate.normalized(frame.source_size, frame.target_size);
        let (smoothed, history) = fold(candidate, &self.history);
        self.history = history;

        let jitter = self.history.jitter();
        let accuracy = classify(&smoothed, frame.target_size, &self.params.accuracy);
        debug!(
            "history {} jitter {jitter:.2} accuracy {accuracy:?}",
            self.history.len()
        );

        let ready = self.history.len() > self.params.required_feature_count
            && jitter < self.params.desired_jitter
            && accuracy.is_acceptable();

        let capture = if ready {
            self.state = CaptureState::Paused;
            info!(
                "capture triggered after {} frames (jitter {jitter:.2})",
                self.history.len()
            );
            Some(self.handoff(smoothed, frame.target_size))
        } else {
            None
        };

        FrameReport {
            state: self.state,
            smoothed: Some(smoothed),
            accuracy: Some(accuracy),
            jitter: Some(jitter),
            history_len: self.history.len(),
            capture,
        }
    }

    /// [`ScanSession::process_frame`], delivering the outcome to `observer`.
    pub fn process_frame_with<O>(&mut self, frame: Frame, observer: &mut O) -> FrameReport
    where
        O: ScanObserver + ?Sized,
    {
        let report = self.process_frame(frame);
        observer.on_frame(&report);
        if let Some(handoff) = &report.capture {
            observer.on_capture(handoff);
        }
        report
    }

    /// Stop evaluating frames without capturing.
    pub fn pause(&mut self) {
        self.state = CaptureState::Paused;
    }

    /// Re-arm after a capture. The history is kept.
    pub fn resume(&mut self) {
        if self.is_paused() {
            info!("session resumed with {} frames of history", self.history.len());
        }
        self.state = CaptureState::Active;
    }

    /// Clear the history and re-arm; used when scanning (re)starts.
    pub fn reset(&mut self) {
        info!("session reset");
        self.history.clear();
        self.state = CaptureState::Active;
    }

    /// Manual shutter: hand off the mean of the current history and pause.
    ///
    /// Returns `None` (and keeps the state) when nothing has been tracked.
    pub fn force_capture(&mut self, target_size: Size) -> Option<CaptureHandoff> {
        let smoothed = self.history.average()?;
        self.state = CaptureState::Paused;
        info!("manual capture with {} frames of history", self.history.len());
        Some(self.handoff(smoothed, target_size))
    }

    fn handoff(&self, smoothed: Quad, target_size: Size) -> CaptureHandoff {
        CaptureHandoff {
            smoothed,
            crop: extend_quad(&smoothed, self.params.margin_extension_ratio),
            target_size,
        }
    }
}
