//! Replay recorded detection traces through a [`ScanSession`].
//!
//! A trace is the detector output of a camera session saved as JSON: the
//! detector and screen sizes plus, for every frame, all quadrilaterals the
//! detector reported. Replaying it offline is how capture thresholds are
//! tuned without a device.

use crate::capture::io::ScanIoError;
use crate::capture::{CaptureHandoff, CaptureState, Frame, FrameReport, ScanSession};
use crate::core::{Quad, RectificationPlan, Size};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Detector hits of one frame; empty when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    #[serde(default)]
    pub candidates: Vec<Quad>,
}

/// A recorded scanning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTrace {
    /// Detector image extent (candidates are in this space).
    pub source_size: Size,
    /// Screen extent used for feedback and accuracy.
    pub target_size: Size,
    pub frames: Vec<TraceFrame>,
}

impl FrameTrace {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ScanIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ScanIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Resume right after every capture instead of ignoring the rest.
    pub auto_resume: bool,
    /// Replace the trace's target size.
    pub target_size: Option<Size>,
}

/// One capture observed during a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// Zero-based index into the trace frames.
    pub frame: usize,
    pub handoff: CaptureHandoff,
    /// Margin-extended crop mapped back into detector space.
    pub source_crop: Quad,
    #[serde(default)]
    pub plan: Option<RectificationPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub num_frames: usize,
    pub captures: Vec<CaptureRecord>,
    pub final_state: CaptureState,
    pub reports: Vec<FrameReport>,
}

impl ReplayReport {
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ScanIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Feed every frame of `trace` into `session`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(session, trace), fields(frames = trace.frames.len()))
)]
pub fn replay(session: &mut ScanSession, trace: &FrameTrace, opts: ReplayOptions) -> ReplayReport {
    let target_size = opts.target_size.unwrap_or(trace.target_size);
    let mut captures = Vec::new();
    let mut reports = Vec::with_capacity(trace.frames.len());

    for (idx, frame) in trace.frames.iter().enumerate() {
        let frame = Frame::from_candidates(
            frame.candidates.iter().copied(),
            trace.source_size,
            target_size,
        );
        let report = session.process_frame(frame);

        if let Some(handoff) = report.capture {
            debug!("frame {idx}: capture");
            captures.push(CaptureRecord {
                frame: idx,
                handoff,
                source_crop: handoff.map_to_image(trace.source_size),
                plan: handoff.rectification(trace.source_size),
            });
            if opts.auto_resume {
                session.resume();
            }
        }
        reports.push(report);
    }

    info!(
        "replayed {} frames, {} capture(s)",
        trace.frames.len(),
        captures.len()
    );

    ReplayReport {
        num_frames: trace.frames.len(),
        captures,
        final_state: session.state(),
        reports,
    }
}
