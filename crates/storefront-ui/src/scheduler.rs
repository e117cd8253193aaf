//! Timer scheduler with a virtual clock.
//!
//! The page has two kinds of deferred work: the post-logout redirect and the
//! toast auto-hide. Both are queued here and run when the clock is advanced,
//! so tests control time exactly.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::dom::ElementId;

/// Deferred work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Navigate to a URL.
    Navigate(String),
    /// Hide a toast; its `hidden` event fires afterwards.
    HideToast(ElementId),
}

/// Cancellation handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask {
    handle: TaskHandle,
    due: Duration,
    task: Task,
}

/// Queue of timers ordered by due time, then by scheduling order.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Time since page load.
    now: Duration,
    /// Wall-clock milliseconds at page load.
    epoch_ms: u64,
    next_handle: u64,
    queue: Vec<ScheduledTask>,
}

impl Scheduler {
    /// Create a scheduler whose wall clock starts at the current system time.
    pub fn new() -> Self {
        let epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::with_epoch(epoch_ms)
    }

    /// Create a scheduler whose wall clock starts at `epoch_ms`.
    pub fn with_epoch(epoch_ms: u64) -> Self {
        Self {
            now: Duration::ZERO,
            epoch_ms,
            next_handle: 1,
            queue: Vec::new(),
        }
    }

    /// Time elapsed since page load.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Wall-clock time in milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> u64 {
        self.epoch_ms + self.now.as_millis() as u64
    }

    /// Run `task` after `delay`.
    pub fn schedule(&mut self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.queue.push(ScheduledTask {
            handle,
            due: self.now + delay,
            task,
        });
        handle
    }

    /// Cancel a pending task. Returns `false` if it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.handle != handle);
        self.queue.len() < before
    }

    /// Whether `handle` is still waiting to run.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.queue.iter().any(|t| t.handle == handle)
    }

    /// Number of waiting tasks.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest task due at or before `deadline`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Task> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.handle))
            .map(|(i, _)| i)?;
        let scheduled = self.queue.remove(index);
        if scheduled.due > self.now {
            self.now = scheduled.due;
        }
        Some(scheduled.task)
    }

    /// Move the clock forward to `deadline` without running anything.
    pub fn set_now(&mut self, deadline: Duration) {
        if deadline > self.now {
            self.now = deadline;
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(path: &str) -> Task {
        Task::Navigate(path.to_string())
    }

    #[test]
    fn test_nothing_due_early() {
        let mut scheduler = Scheduler::with_epoch(0);
        scheduler.schedule(Duration::from_millis(1000), nav("/"));

        assert_eq!(scheduler.pop_due(Duration::from_millis(999)), None);
        assert_eq!(scheduler.pop_due(Duration::from_millis(1000)), Some(nav("/")));
        assert_eq!(scheduler.now(), Duration::from_millis(1000));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_due_order_then_schedule_order() {
        let mut scheduler = Scheduler::with_epoch(0);
        scheduler.schedule(Duration::from_millis(20), nav("/late"));
        scheduler.schedule(Duration::from_millis(10), nav("/a"));
        scheduler.schedule(Duration::from_millis(10), nav("/b"));

        let deadline = Duration::from_secs(1);
        assert_eq!(scheduler.pop_due(deadline), Some(nav("/a")));
        assert_eq!(scheduler.pop_due(deadline), Some(nav("/b")));
        assert_eq!(scheduler.pop_due(deadline), Some(nav("/late")));
        assert_eq!(scheduler.pop_due(deadline), None);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::with_epoch(0);
        let handle = scheduler.schedule(Duration::from_millis(5), nav("/"));

        assert!(scheduler.is_pending(handle));
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(scheduler.pop_due(Duration::from_secs(1)), None);
    }

    #[test]
    fn test_timestamp_follows_clock() {
        let mut scheduler = Scheduler::with_epoch(1_700_000_000_000);
        scheduler.set_now(Duration::from_millis(250));
        assert_eq!(scheduler.timestamp_ms(), 1_700_000_000_250);

        // Never goes backwards.
        scheduler.set_now(Duration::from_millis(100));
        assert_eq!(scheduler.now(), Duration::from_millis(250));
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut scheduler = Scheduler::with_epoch(0);
        scheduler.set_now(Duration::from_millis(500));
        scheduler.schedule(Duration::from_millis(1000), nav("/"));

        assert_eq!(scheduler.pop_due(Duration::from_millis(1499)), None);
        assert!(scheduler.pop_due(Duration::from_millis(1500)).is_some());
    }
}
