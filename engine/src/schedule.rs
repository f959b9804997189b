use std::time::Duration;

#[derive(Debug, Clone)]
struct Timer<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// Cooperative, single-threaded scheduler driven by a virtual clock.
///
/// Two kinds of suspension points are supported:
/// - redraw cycles: `request_frame` queues work for the next cycle, drained as a batch by
///   `take_frame`. Anything requested while a batch is being processed lands in the cycle after.
/// - deferred tasks: `set_timeout` fires once the clock reaches `now + delay`.
///
/// There is no cancellation. Owners of a task re-check their own state when it fires.
#[derive(Debug, Clone)]
pub struct FrameScheduler<T> {
    now: Duration,
    frame: Vec<T>,
    timers: Vec<Timer<T>>,
    next_seq: u64,
    frames_run: u64,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            frame: Vec::new(),
            timers: Vec::new(),
            next_seq: 0,
            frames_run: 0,
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn request_frame(&mut self, task: T) {
        self.frame.push(task);
    }

    pub fn has_pending_frame(&self) -> bool {
        !self.frame.is_empty()
    }

    /// Takes every task queued for the current redraw cycle.
    pub fn take_frame(&mut self) -> Vec<T> {
        self.frames_run += 1;
        std::mem::take(&mut self.frame)
    }

    /// Number of redraw cycles drained so far.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn set_timeout(&mut self, delay: Duration, task: T) {
        let due = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        // Equal due times keep insertion order.
        let idx = self
            .timers
            .partition_point(|t| (t.due, t.seq) <= (due, seq));
        self.timers.insert(idx, Timer { due, seq, task });
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.timers.first().map(|t| t.due)
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to its due time.
    ///
    /// Timers scheduled by the caller while handling a popped task are considered on the next
    /// call, so chains of short delays resolve within a single `until` window.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let first = self.timers.first()?;
        if first.due > until {
            return None;
        }
        let timer = self.timers.remove(0);
        self.now = self.now.max(timer.due);
        Some(timer.task)
    }

    /// Moves the clock forward to `until` (never backwards).
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(sched: &mut FrameScheduler<T>, until: Duration) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(task) = sched.pop_due(until) {
            out.push(task);
        }
        sched.settle(until);
        out
    }

    #[test]
    fn frame_requests_made_while_draining_land_in_next_cycle() {
        let mut sched = FrameScheduler::new();
        sched.request_frame(1);
        sched.request_frame(2);

        let batch = sched.take_frame();
        assert_eq!(batch, vec![1, 2]);

        // Simulates a task re-queueing itself during the batch.
        sched.request_frame(3);
        assert!(sched.has_pending_frame());
        assert_eq!(sched.take_frame(), vec![3]);
        assert!(!sched.has_pending_frame());
        assert_eq!(sched.frames_run(), 2);
    }

    #[test]
    fn timers_fire_in_due_then_insertion_order() {
        let mut sched = FrameScheduler::new();
        sched.set_timeout(Duration::from_millis(500), "late");
        sched.set_timeout(Duration::from_millis(100), "early-a");
        sched.set_timeout(Duration::from_millis(100), "early-b");

        assert_eq!(
            drain(&mut sched, Duration::from_millis(1000)),
            vec!["early-a", "early-b", "late"]
        );
        assert_eq!(sched.now(), Duration::from_millis(1000));
    }

    #[test]
    fn timers_not_yet_due_stay_pending() {
        let mut sched = FrameScheduler::new();
        sched.set_timeout(Duration::from_millis(1500), ());

        assert!(drain(&mut sched, Duration::from_millis(1499)).is_empty());
        assert_eq!(sched.pending_timers(), 1);
        assert_eq!(sched.next_due(), Some(Duration::from_millis(1500)));

        assert_eq!(drain(&mut sched, Duration::from_millis(1500)).len(), 1);
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn chained_timer_inside_window_fires_in_same_drain() {
        let mut sched = FrameScheduler::new();
        sched.set_timeout(Duration::from_millis(1500), 1);

        let until = Duration::from_millis(2000);
        let first = sched.pop_due(until);
        assert_eq!(first, Some(1));
        assert_eq!(sched.now(), Duration::from_millis(1500));

        sched.set_timeout(Duration::from_millis(500), 2);
        assert_eq!(sched.pop_due(until), Some(2));
        assert_eq!(sched.now(), Duration::from_millis(2000));
    }

    #[test]
    fn settle_never_moves_clock_backwards() {
        let mut sched: FrameScheduler<()> = FrameScheduler::new();
        sched.settle(Duration::from_secs(2));
        sched.settle(Duration::from_secs(1));
        assert_eq!(sched.now(), Duration::from_secs(2));
    }
}
