//! State transition history tracking.
//!
//! A `StateHistory` is an ordered log of fired transitions. It is usually
//! fed by a [`HistoryRecorder`](crate::machine::HistoryRecorder) attached to
//! a machine's transition stream.

use super::transition::Transition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single fired transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was recorded
    pub timestamp: DateTime<Utc>,
    /// Position of this record among all records ever written to the log
    pub sequence: u64,
}

impl<S: Clone> TransitionRecord<S> {
    pub fn transition(&self) -> Transition<S> {
        Transition::new(self.from.clone(), self.to.clone())
    }
}

/// Ordered history of state transitions.
///
/// An optional capacity bounds the log; once full, the oldest record is
/// evicted for each new one.
///
/// # Example
///
/// ```rust
/// use statewire::core::{StateHistory, Transition};
/// use statewire::state_enum;
///
/// state_enum! {
///     enum WorkState {
///         Start,
///         Middle,
///         End,
///     }
/// }
///
/// let mut history = StateHistory::new();
/// history.record(Transition::new(WorkState::Start, WorkState::Middle));
/// history.record(Transition::new(WorkState::Middle, WorkState::End));
///
/// let path = history.path();
/// assert_eq!(path.len(), 3); // Start -> Middle -> End
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S> {
    records: VecDeque<TransitionRecord<S>>,
    capacity: Option<usize>,
    recorded: u64,
}

impl<S> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            capacity: None,
            recorded: 0,
        }
    }

    /// Create a history that keeps at most `capacity` records.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
            recorded: 0,
        }
    }

    /// Append a transition, stamped with the current time.
    pub fn record(&mut self, transition: Transition<S>) -> &TransitionRecord<S> {
        self.record_at(transition, Utc::now())
    }

    /// Append a transition with an explicit timestamp.
    pub fn record_at(
        &mut self,
        transition: Transition<S>,
        timestamp: DateTime<Utc>,
    ) -> &TransitionRecord<S> {
        if let Some(capacity) = self.capacity {
            while self.records.len() >= capacity {
                self.records.pop_front();
            }
        }

        self.records.push_back(TransitionRecord {
            from: transition.from,
            to: transition.to,
            timestamp,
            sequence: self.recorded,
        });
        self.recorded += 1;

        // Just pushed, so the back is always present.
        &self.records[self.records.len() - 1]
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record followed by
    /// the `to` state of every record.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|record| &record.to));
        path
    }

    /// Time between the oldest and newest retained record.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord<S>> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of records ever written, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.recorded
    }

    /// Drop all retained records. The sequence counter keeps running.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        #[derive(serde::Serialize, serde::Deserialize)]
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_adds_transition() {
        let mut history = StateHistory::new();
        let record = history.record(Transition::new(TestState::Initial, TestState::Processing));

        assert_eq!(record.sequence, 0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(Transition::new(TestState::Initial, TestState::Processing));
        history.record(Transition::new(TestState::Processing, TestState::Complete));

        let path = history.path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut history = StateHistory::new();
        let start = Utc::now();

        history.record_at(
            Transition::new(TestState::Initial, TestState::Processing),
            start,
        );
        history.record_at(
            Transition::new(TestState::Processing, TestState::Complete),
            start + chrono::Duration::milliseconds(250),
        );

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(Transition::new(TestState::Initial, TestState::Processing));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = StateHistory::with_capacity(2);
        history.record(Transition::new(TestState::Initial, TestState::Processing));
        history.record(Transition::new(TestState::Processing, TestState::Complete));
        history.record(Transition::new(TestState::Complete, TestState::Initial));

        assert_eq!(history.len(), 2);
        assert_eq!(history.total_recorded(), 3);

        let sequences: Vec<u64> = history.records().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert_eq!(history.path()[0], &TestState::Processing);
    }

    #[test]
    fn zero_capacity_keeps_latest_record() {
        let mut history = StateHistory::with_capacity(0);
        history.record(Transition::new(TestState::Initial, TestState::Processing));
        history.record(Transition::new(TestState::Processing, TestState::Complete));

        assert_eq!(history.capacity(), Some(1));
        assert_eq!(
            history.last().map(|r| r.transition()),
            Some(Transition::new(TestState::Processing, TestState::Complete))
        );
    }

    #[test]
    fn clear_keeps_sequence_running() {
        let mut history = StateHistory::new();
        history.record(Transition::new(TestState::Initial, TestState::Processing));
        history.clear();
        let record = history.record(Transition::new(TestState::Processing, TestState::Complete));

        assert_eq!(record.sequence, 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::new();
        history.record(Transition::new(TestState::Initial, TestState::Processing));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.len(), deserialized.len());
        assert_eq!(history.last(), deserialized.last());
    }
}
