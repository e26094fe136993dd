//! Frame-by-frame capture decisions on top of `docscan-core`.
//!
//! ## Quickstart
//!
//! ```
//! use docscan_capture::{CaptureParams, Frame, ScanSession};
//! use docscan_core::{Point, Quad, Size};
//!
//! let mut session = ScanSession::new(CaptureParams::default()).expect("valid params");
//! let screen = Size::new(1.0, 1.0);
//! let page = Quad::axis_aligned(Point::new(0.0, 0.0), 1.0, 1.0);
//!
//! let mut captured = None;
//! while captured.is_none() {
//!     captured = session.process_frame(Frame::new(Some(page), screen, screen)).capture;
//! }
//! assert!(session.is_paused());
//! ```
//!
//! Per frame:
//! 1. Map the detector's candidate into target (screen) space.
//! 2. Fold it into the last ten detections; the mean is the smoothed quad.
//! 3. Measure jitter as the pairwise disagreement of the history.
//! 4. Classify the smoothed quad (squareness, then size).
//! 5. Trigger when the history is long enough, jitter is low and the quad
//!    is acceptable; hand off a margin-extended crop and pause.

mod engine;
mod error;
pub mod io;
mod observer;
mod params;
mod result;
pub mod stability;

pub use engine::{CaptureState, Frame, ScanSession};
pub use error::CaptureParamsError;
pub use observer::{ScanEvent, ScanObserver};
pub use params::CaptureParams;
pub use result::{CaptureHandoff, FrameReport};
pub use stability::{fold, StabilityHistory, HISTORY_CAPACITY};
