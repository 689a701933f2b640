//! Discrete-Event Scheduler
//!
//! A single logical clock over a priority queue of process resumptions,
//! keyed by `(time, insertion sequence)`. Exactly one process runs at any
//! instant; the scheduler pops the next-due entry, advances the clock to its
//! time, and hands the process token back to the driver.
//!
//! The insertion sequence gives stable FIFO ordering within a timestamp.
//! This is a hard requirement: with a fixed seed, two runs of the same model
//! must resume tied processes in the same order, or the trials stop being
//! reproducible.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::error::SimError;
use crate::topology::NodeId;

/// Identifies the suspended process a queue entry will resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessToken {
    /// An agent due to perform its next move.
    Agent(NodeId),
    /// The periodic value logger.
    Logger,
}

/// One pending resumption.
#[derive(Debug, Clone)]
struct Entry {
    time: f64,
    seq: u64,
    token: ProcessToken,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Scheduled delays are validated finite, so total_cmp is a plain
        // numeric order here.
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Event-time priority queue with a monotone clock.
#[derive(Debug, Default)]
pub struct EventScheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    now: f64,
    next_seq: u64,
}

impl EventScheduler {
    /// Creates an empty scheduler with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedules `token` to resume no earlier than `now + delay`.
    ///
    /// Returns the absolute resumption time. A negative or non-finite delay
    /// is an input error and is rejected, never clamped.
    pub fn schedule_after(&mut self, delay: f64, token: ProcessToken) -> Result<f64, SimError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(SimError::InvalidDelay(delay));
        }
        let time = self.now + delay;
        self.queue.push(Reverse(Entry {
            time,
            seq: self.next_seq,
            token,
        }));
        self.next_seq += 1;
        Ok(time)
    }

    /// Pops the next entry due strictly before `horizon`, advancing the
    /// clock to its time. Returns `None` once nothing remains before the
    /// horizon; entries at or past the horizon stay queued and never fire.
    pub fn pop_due(&mut self, horizon: f64) -> Option<(f64, ProcessToken)> {
        match self.queue.peek() {
            Some(Reverse(entry)) if entry.time < horizon => {}
            _ => return None,
        }
        let Reverse(entry) = self.queue.pop()?;
        if entry.time > self.now {
            self.now = entry.time;
        }
        Some((self.now, entry.token))
    }

    /// Advances the clock to the horizon at the end of a run. Moving the
    /// clock backwards is a no-op.
    pub fn finish_at(&mut self, horizon: f64) {
        if horizon > self.now {
            self.now = horizon;
        }
    }

    /// Whether any entry remains due strictly before `horizon`.
    pub fn has_pending(&self, horizon: f64) -> bool {
        self.queue
            .peek()
            .map_or(false, |Reverse(e)| e.time < horizon)
    }

    /// Number of queued entries, including those past any horizon.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_returns_events_in_time_order() {
        let mut sched = EventScheduler::new();
        sched.schedule_after(5.0, ProcessToken::Agent(0)).unwrap();
        sched.schedule_after(3.0, ProcessToken::Agent(1)).unwrap();
        sched.schedule_after(7.0, ProcessToken::Agent(2)).unwrap();

        let (t1, tok1) = sched.pop_due(100.0).unwrap();
        assert_eq!(t1, 3.0);
        assert_eq!(tok1, ProcessToken::Agent(1));

        let (t2, _) = sched.pop_due(100.0).unwrap();
        assert_eq!(t2, 5.0);

        let (t3, _) = sched.pop_due(100.0).unwrap();
        assert_eq!(t3, 7.0);

        assert!(sched.pop_due(100.0).is_none());
    }

    #[test]
    fn test_ties_resume_in_schedule_order() {
        let mut sched = EventScheduler::new();
        sched.schedule_after(2.0, ProcessToken::Agent(9)).unwrap();
        sched.schedule_after(2.0, ProcessToken::Logger).unwrap();
        sched.schedule_after(2.0, ProcessToken::Agent(1)).unwrap();

        let order: Vec<ProcessToken> =
            std::iter::from_fn(|| sched.pop_due(10.0).map(|(_, tok)| tok)).collect();
        assert_eq!(
            order,
            vec![
                ProcessToken::Agent(9),
                ProcessToken::Logger,
                ProcessToken::Agent(1)
            ]
        );
    }

    #[test]
    fn test_negative_delay_is_rejected() {
        let mut sched = EventScheduler::new();
        let err = sched.schedule_after(-0.5, ProcessToken::Logger);
        assert!(matches!(err, Err(SimError::InvalidDelay(_))));
        assert_eq!(sched.queue_len(), 0);
    }

    #[test]
    fn test_non_finite_delay_is_rejected() {
        let mut sched = EventScheduler::new();
        assert!(sched.schedule_after(f64::NAN, ProcessToken::Logger).is_err());
        assert!(sched
            .schedule_after(f64::INFINITY, ProcessToken::Logger)
            .is_err());
    }

    #[test]
    fn test_clock_advances_to_popped_entry() {
        let mut sched = EventScheduler::new();
        assert_eq!(sched.now(), 0.0);

        sched.schedule_after(4.0, ProcessToken::Agent(0)).unwrap();
        sched.pop_due(10.0).unwrap();
        assert_eq!(sched.now(), 4.0);
    }

    #[test]
    fn test_horizon_is_exclusive() {
        let mut sched = EventScheduler::new();
        sched.schedule_after(5.0, ProcessToken::Agent(0)).unwrap();

        // An entry exactly at the horizon never fires.
        assert!(sched.pop_due(5.0).is_none());
        assert!(sched.has_pending(5.1));
        assert!(!sched.has_pending(5.0));
    }

    #[test]
    fn test_finish_at_never_moves_backwards() {
        let mut sched = EventScheduler::new();
        sched.schedule_after(8.0, ProcessToken::Agent(0)).unwrap();
        sched.pop_due(10.0).unwrap();

        sched.finish_at(10.0);
        assert_eq!(sched.now(), 10.0);
        sched.finish_at(3.0);
        assert_eq!(sched.now(), 10.0);
    }

    #[test]
    fn test_schedule_after_returns_absolute_time() {
        let mut sched = EventScheduler::new();
        sched.schedule_after(2.0, ProcessToken::Agent(0)).unwrap();
        sched.pop_due(10.0).unwrap();

        let at = sched.schedule_after(1.5, ProcessToken::Agent(0)).unwrap();
        assert_eq!(at, 3.5);
    }

    #[test]
    fn test_zero_delay_fires_at_current_time() {
        let mut sched = EventScheduler::new();
        sched.schedule_after(1.0, ProcessToken::Agent(0)).unwrap();
        sched.pop_due(10.0).unwrap();

        sched.schedule_after(0.0, ProcessToken::Logger).unwrap();
        let (t, tok) = sched.pop_due(10.0).unwrap();
        assert_eq!(t, 1.0);
        assert_eq!(tok, ProcessToken::Logger);
    }
}
