use crate::{CaptureHandoff, FrameReport};
use std::sync::mpsc::Sender;

/// Receiver of per-frame feedback and capture hand-offs.
///
/// The session never knows how results are shown; UI layers, recorders and
/// channels plug in here.
pub trait ScanObserver {
    fn on_frame(&mut self, report: &FrameReport);

    /// Called once per trigger, after [`ScanObserver::on_frame`] for the
    /// same frame.
    fn on_capture(&mut self, handoff: &CaptureHandoff);
}

/// Event form of the observer callbacks, for channel delivery.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanEvent {
    Frame(FrameReport),
    Capture(CaptureHandoff),
}

/// Forward events to another thread. A disconnected receiver is ignored:
/// the scanner keeps running when nobody listens.
impl ScanObserver for Sender<ScanEvent> {
    fn on_frame(&mut self, report: &FrameReport) {
        let _ = self.send(ScanEvent::Frame(report.clone()));
    }

    fn on_capture(&mut self, handoff: &CaptureHandoff) {
        let _ = self.send(ScanEvent::Capture(*handoff));
    }
}

/// Collect events in memory.
impl ScanObserver for Vec<ScanEvent> {
    fn on_frame(&mut self, report: &FrameReport) {
        self.push(ScanEvent::Frame(report.clone()));
    }

    fn on_capture(&mut self, handoff: &CaptureHandoff) {
        self.push(ScanEvent::Capture(*handoff));
    }
}
