use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use super::*;

#[derive(Debug)]
struct Entry {
    due: u64,
    seq: u64,
    period: Option<Millis>,
    task: Task,
    cancelled: Rc<Cell<bool>>,
}

/// Cancels its task when dropped.
#[derive(Debug)]
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

/// Scheduler running on a virtual clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time in milliseconds since the scheduler was created.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of tasks that are still armed.
    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.cancelled.get())
            .count()
    }

    /// Pops the earliest armed task due at or before `until`, moving the clock to its deadline.
    ///
    /// Ties are broken by scheduling order. Periodic tasks are re-armed one period later.
    pub fn pop_due(&mut self, until: u64) -> Option<Task> {
        self.entries.retain(|entry| !entry.cancelled.get());

        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index)?;

        let entry = &mut self.entries[index];
        self.now = self.now.max(entry.due);
        let task = entry.task;
        match entry.period {
            Some(period) => {
                entry.due += u64::from(period.max(1));
                entry.seq = self.next_seq;
                self.next_seq += 1;
            }
            None => {
                self.entries.swap_remove(index);
            }
        }
        Some(task)
    }

    /// Moves the clock forward without firing anything, deadlines already passed stay due.
    pub fn advance_clock(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    fn push(&mut self, delay: Millis, period: Option<Millis>, task: Task) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.entries.push(Entry {
            due: self.now + u64::from(delay),
            seq: self.next_seq,
            period,
            task,
            cancelled: cancelled.clone(),
        });
        self.next_seq += 1;
        ManualHandle { cancelled }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_once(&mut self, delay: Millis, task: Task) -> Self::Handle {
        self.push(delay, None, task)
    }

    fn schedule_every(&mut self, period: Millis, task: Task) -> Self::Handle {
        self.push(period, Some(period), task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOLVE: Task = Task::new(0, TaskKind::Resolve);
    const TICK: Task = Task::new(0, TaskKind::Tick);

    #[test]
    fn fires_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let _late = scheduler.schedule_once(500, RESOLVE);
        let _early = scheduler.schedule_once(100, TICK);

        assert_eq!(scheduler.pop_due(1000), Some(TICK));
        assert_eq!(scheduler.now(), 100);
        assert_eq!(scheduler.pop_due(1000), Some(RESOLVE));
        assert_eq!(scheduler.now(), 500);
        assert_eq!(scheduler.pop_due(1000), None);
    }

    #[test]
    fn dropped_handle_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_once(10, RESOLVE);
        drop(handle);

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.pop_due(100), None);
    }

    #[test]
    fn periodic_task_rearms_until_cancelled() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_every(1000, TICK);

        assert_eq!(scheduler.pop_due(2500), Some(TICK));
        assert_eq!(scheduler.pop_due(2500), Some(TICK));
        assert_eq!(scheduler.pop_due(2500), None);
        assert_eq!(scheduler.now(), 2000);

        drop(handle);
        assert_eq!(scheduler.pop_due(10_000), None);
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut scheduler = ManualScheduler::new();
        scheduler.advance_clock(300);
        let _handle = scheduler.schedule_once(200, RESOLVE);

        assert_eq!(scheduler.pop_due(499), None);
        assert_eq!(scheduler.pop_due(500), Some(RESOLVE));
    }
}
