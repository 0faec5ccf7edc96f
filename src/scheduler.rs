//! Virtual-time task scheduler.
//!
//! Panels never sleep or spawn threads. Every delayed or periodic piece of work
//! (a fake "processing" delay, a countdown, a metric refresh) is registered on a
//! [`Scheduler`] and fired when the owner advances virtual time. The desktop
//! shell advances it with wall-clock frame deltas, tests fast-forward it.

use std::collections::BTreeMap;
use std::time::Duration;

use log::trace;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
enum Cadence {
    Once,
    Every(Duration),
}

#[derive(Debug)]
struct ScheduledTask<E> {
    due: Duration,
    cadence: Cadence,
    event: E,
}

/// A cancellable queue of timed events keyed by [`TimerId`].
///
/// Events are delivered one at a time by [`Scheduler::poll`] in due-time order,
/// ties broken by registration order, so a handler can cancel other timers
/// before they get a chance to fire within the same advance.
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    tasks: BTreeMap<TimerId, ScheduledTask<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: BTreeMap::new(),
        }
    }
}

impl<E: Clone> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from the creation of the scheduler.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, delay: Duration, event: E) -> TimerId {
        self.insert(delay, Cadence::Once, event)
    }

    /// Schedules `event` every `period`, first firing one period from now.
    /// A zero period is bumped to one millisecond so the queue always makes progress.
    pub fn schedule_every(&mut self, period: Duration, event: E) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(period, Cadence::Every(period), event)
    }

    fn insert(&mut self, delay: Duration, cadence: Cadence, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            ScheduledTask {
                due: self.now + delay,
                cadence,
                event,
            },
        );
        id
    }

    /// Returns true if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            trace!("Cancelling {} pending timers", self.tasks.len());
        }
        self.tasks.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Pops the next event due at or before `until`, moving virtual time to its
    /// due instant. Returns `None` once nothing else is due, leaving virtual time
    /// at `until`.
    pub fn poll(&mut self, until: Duration) -> Option<E> {
        let next = self
            .tasks
            .iter()
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(id, task)| (task.due, **id))
            .map(|(id, _)| *id);

        let Some(id) = next else {
            self.now = self.now.max(until);
            return None;
        };

        let task = self.tasks.get_mut(&id)?;
        self.now = self.now.max(task.due);
        let event = task.event.clone();
        match task.cadence {
            Cadence::Once => {
                self.tasks.remove(&id);
            }
            Cadence::Every(period) => task.due += period,
        }
        Some(event)
    }

    /// Target instant for advancing by `elapsed` from the current virtual time.
    pub fn horizon(&self, elapsed: Duration) -> Duration {
        self.now + elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>, elapsed: Duration) -> Vec<&'static str> {
        let until = scheduler.horizon(elapsed);
        let mut fired = Vec::new();
        while let Some(event) = scheduler.poll(until) {
            fired.push(event);
        }
        fired
    }

    #[test]
    fn test_one_shot_fires_once_at_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(Duration::from_millis(3000), "done");

        assert!(drain(&mut scheduler, Duration::from_millis(2999)).is_empty());
        assert_eq!(drain(&mut scheduler, Duration::from_millis(1)), vec!["done"]);
        assert!(drain(&mut scheduler, Duration::from_secs(10)).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_repeating_timer_fires_every_period() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(Duration::from_secs(1), "tick");

        let fired = drain(&mut scheduler, Duration::from_millis(3500));
        assert_eq!(fired, vec!["tick", "tick", "tick"]);
        assert_eq!(scheduler.now(), Duration::from_millis(3500));
    }

    #[test]
    fn test_events_ordered_by_due_then_registration() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(Duration::from_secs(2), "slow");
        scheduler.schedule_every(Duration::from_secs(1), "fast");

        let fired = drain(&mut scheduler, Duration::from_secs(2));
        assert_eq!(fired, vec!["fast", "slow", "fast"]);
    }

    #[test]
    fn test_cancel_between_polls_suppresses_event() {
        let mut scheduler = Scheduler::new();
        let _first = scheduler.schedule_once(Duration::from_secs(1), "first");
        let second = scheduler.schedule_once(Duration::from_secs(1), "second");

        let until = scheduler.horizon(Duration::from_secs(5));
        assert_eq!(scheduler.poll(until), Some("first"));
        assert!(scheduler.cancel(second));
        assert_eq!(scheduler.poll(until), None);
        assert!(!scheduler.cancel(second));
    }

    #[test]
    fn test_cancel_all_clears_queue() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_every(Duration::from_secs(1), "tick");
        scheduler.schedule_once(Duration::from_secs(3), "done");
        scheduler.cancel_all();

        assert!(!scheduler.is_pending(id));
        assert!(drain(&mut scheduler, Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn test_delays_are_relative_to_current_time() {
        let mut scheduler = Scheduler::new();
        drain(&mut scheduler, Duration::from_secs(10));
        scheduler.schedule_once(Duration::from_secs(1), "later");

        assert!(drain(&mut scheduler, Duration::from_millis(999)).is_empty());
        assert_eq!(drain(&mut scheduler, Duration::from_millis(1)), vec!["later"]);
    }
}
