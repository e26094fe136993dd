//! Bounded detection history, smoothing and jitter.
//!
//! The history is a plain value: [`fold`] takes the previous history by
//! reference and returns the next one, so a test can build any state
//! directly and the session owns the only copy.

use docscan_core::{average_of, Quad};
use serde::{Deserialize, Serialize};

/// Maximal number of detections kept for smoothing.
pub const HISTORY_CAPACITY: usize = 10;

/// Most recent detections, newest first, at most [`HISTORY_CAPACITY`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StabilityHistory {
    entries: Vec<Quad>,
}

impl StabilityHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from entries ordered newest first. Anything past the
    /// capacity is dropped.
    pub fn from_newest_first(entries: impl IntoIterator<Item = Quad>) -> Self {
        Self {
            entries: entries.into_iter().take(HISTORY_CAPACITY).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn newest(&self) -> Option<&Quad> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Quad] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Mean of the stored entries, `None` when empty.
    pub fn average(&self) -> Option<Quad> {
        (!self.entries.is_empty()).then(|| average_of(&self.entries))
    }

    /// Sum of [`Quad::difference`] over all unordered pairs.
    ///
    /// Quadratic in the length, which the capacity keeps at 45 pairs.
    pub fn jitter(&self) -> f64 {
        self.entries
            .iter()
            .enumerate()
            .flat_map(|(i, a)| self.entries[i + 1..].iter().map(move |b| a.difference(b)))
            .sum()
    }
}

/// Fold `candidate` into `history`.
///
/// The smoothed quad averages the candidate together with every previous
/// entry (up to `HISTORY_CAPACITY + 1` quads); the returned history keeps
/// the newest `HISTORY_CAPACITY`.
pub fn fold(candidate: Quad, history: &StabilityHistory) -> (Quad, StabilityHistory) {
    let mut all = Vec::with_capacity(history.len() + 1);
    all.push(candidate);
    all.extend_from_slice(history.as_slice());

    let smoothed = average_of(&all);
    all.truncate(HISTORY_CAPACITY);
    (smoothed, StabilityHistory { entries: all })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use docscan_core::Point;

    fn square_at(x: f64, y: f64) -> Quad {
        Quad::axis_aligned(Point::new(x, y), 100.0, 100.0)
    }

    #[test]
    fn fold_prepends_and_caps() {
        let mut history = StabilityHistory::new();
        for i in 0..15 {
            let (_, next) = fold(square_at(i as f64, 0.0), &history);
            history = next;
            assert_eq!(history.len(), (i + 1).min(HISTORY_CAPACITY));
            assert_eq!(history.newest(), Some(&square_at(i as f64, 0.0)));
        }
        // Oldest surviving entry is frame 5.
        assert_eq!(history.as_slice().last(), Some(&square_at(5.0, 0.0)));
    }

    #[test]
    fn fold_leaves_input_history_untouched() {
        let history = StabilityHistory::from_newest_first([square_at(1.0, 1.0)]);
        let before = history.clone();
        let _ = fold(square_at(9.0, 9.0), &history);
        assert_eq!(history, before);
    }

    #[test]
    fn smoothed_averages_candidate_with_full_previous_history() {
        // Ten previous entries at x = 0 plus a candidate at x = 11: the mean
        // covers all eleven quads even though only ten are kept.
        let history = StabilityHistory::from_newest_first(vec![square_at(0.0, 0.0); 10]);
        let (smoothed, next) = fold(square_at(11.0, 0.0), &history);
        assert_relative_eq!(smoothed.top_left, Point::new(1.0, 0.0), epsilon = 1e-12);
        assert_eq!(next.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn jitter_of_identical_entries_is_zero() {
        let history = StabilityHistory::from_newest_first(vec![square_at(3.0, 4.0); 10]);
        assert_eq!(history.jitter(), 0.0);
        assert_eq!(StabilityHistory::new().jitter(), 0.0);
    }

    #[test]
    fn jitter_counts_every_pair_once() {
        // Offsets 0, 1, 2 along x: pair differences 4, 8, 4 (four corners each).
        let history = StabilityHistory::from_newest_first([
            square_at(0.0, 0.0),
            square_at(1.0, 0.0),
            square_at(2.0, 0.0),
        ]);
        assert_eq!(history.jitter(), 16.0);
    }

    #[test]
    fn average_of_empty_history_is_none() {
        assert!(StabilityHistory::new().average().is_none());
        let history = StabilityHistory::from_newest_first([square_at(0.0, 0.0), square_at(2.0, 2.0)]);
        assert_eq!(history.average(), Some(square_at(1.0, 1.0)));
    }
}
