//! High-level facade crate for the `docscan-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the geometry ([`core`]) and decision ([`capture`])
//!   crates
//! - [`replay`]: offline replay of recorded detector traces, used to tune
//!   capture thresholds
//! - (feature `cli`) the `docscan` binary wrapping the replay
//!
//! ## Quickstart
//!
//! ```
//! use docscan::{CaptureParams, Frame, Quad, ScanSession, Size};
//! use docscan::core::Point;
//!
//! let mut session = ScanSession::new(CaptureParams::default())?;
//! let detector = Size::new(1080.0, 1920.0);
//! let screen = Size::new(390.0, 844.0);
//! let page = Quad::axis_aligned(Point::new(90.0, 150.0), 900.0, 1650.0);
//!
//! let report = session.process_frame(Frame::new(Some(page), detector, screen));
//! println!("accuracy: {:?}, jitter: {:?}", report.accuracy, report.jitter);
//! # Ok::<(), docscan::capture::CaptureParamsError>(())
//! ```
//!
//! ## API map
//! - `docscan::core`: points, quads, accuracy, margins, rectification plans.
//! - `docscan::capture`: stability history, capture params and the session.
//! - `docscan::replay`: JSON frame traces and replay reports.

pub use docscan_capture as capture;
pub use docscan_core as core;

pub use docscan_capture::{
    CaptureHandoff, CaptureParams, CaptureState, Frame, FrameReport, ScanSession,
};
pub use docscan_core::{Accuracy, Quad, Size};

pub mod replay;
