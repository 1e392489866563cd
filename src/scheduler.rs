use std::time::Duration;

use crate::dashboard::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    LoadCards,
    SimulateTick,
    ClearShimmer(CardId),
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    task: Task,
}

/// One-shot and repeating timers over a monotonic session clock.
///
/// Time is whatever the caller passes as `now`: wall-clock time since start in
/// the binary, virtual time in tests. Nothing fires on its own; the owner
/// drains due tasks with [`Scheduler::pop_due`].
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_timeout(&mut self, now: Duration, delay: Duration, task: Task) -> TimerId {
        self.insert(now + delay, None, task)
    }

    pub fn set_interval(&mut self, now: Duration, period: Duration, task: Task) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(now + period, Some(period), task)
    }

    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Removes and returns the earliest task due at `now`. Ties go to the timer
    /// created first. Repeating timers are re-armed one period later; if that
    /// is already in the past they skip ahead instead of bursting.
    pub fn pop_due(&mut self, now: Duration) -> Option<Task> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| (timer.due, timer.id.0))
            .map(|(idx, _)| idx)?;

        let task = self.timers[idx].task;
        match self.timers[idx].period {
            Some(period) => {
                let timer = &mut self.timers[idx];
                let next = timer.due + period;
                timer.due = if next <= now { now + period } else { next };
            }
            None => {
                self.timers.swap_remove(idx);
            }
        }
        Some(task)
    }

    fn insert(&mut self, due: Duration, period: Option<Duration>, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due,
            period,
            task,
        });
        id
    }
}
