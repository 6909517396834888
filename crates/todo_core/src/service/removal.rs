//! Deferred removal scheduling.
//!
//! A UI marks an item for removal (so it can play an exit animation) and
//! later flushes due marks into the store's synchronous `delete`. Until a mark
//! is flushed the item stays in the store and accepts toggles.

use crate::model::todo::TodoId;
use crate::service::todo_store::{StoreResult, TodoStore};
use crate::slot::TodoSlot;
use log::debug;
use std::time::{Duration, Instant};

/// Delay between marking and removing, matching the exit animation length.
pub const REMOVAL_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct RemovalSchedule {
    delay: Duration,
    pending: Vec<(TodoId, Instant)>,
}

impl Default for RemovalSchedule {
    fn default() -> Self {
        Self::new(REMOVAL_DELAY)
    }
}

impl RemovalSchedule {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Vec::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Marks `id` for removal at `now + delay`.
    ///
    /// Returns `false` if `id` is already pending; the original deadline stays.
    pub fn mark(&mut self, id: TodoId, now: Instant) -> bool {
        if self.is_pending(&id) {
            return false;
        }
        debug!("event=removal_mark module=removal status=ok id={id}");
        self.pending.push((id, now + self.delay));
        true
    }

    pub fn is_pending(&self, id: &TodoId) -> bool {
        self.pending.iter().any(|(pending, _)| pending == id)
    }

    pub fn cancel(&mut self, id: &TodoId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| pending != id);
        self.pending.len() != before
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every mark whose deadline is at or before `now`,
    /// in marking order.
    pub fn take_due(&mut self, now: Instant) -> Vec<TodoId> {
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(_, deadline)| *deadline <= now);
        self.pending = waiting;
        due.into_iter().map(|(id, _)| id).collect()
    }
}

/// Deletes every due item from `store`.
///
/// Returns the ids actually removed; marks for items that no longer exist are
/// dropped silently. On a persistence error the remaining due marks are put
/// back so a later flush retries them.
pub fn flush_due<S: TodoSlot>(
    store: &mut TodoStore<S>,
    schedule: &mut RemovalSchedule,
    now: Instant,
) -> StoreResult<Vec<TodoId>> {
    let mut due = schedule.take_due(now).into_iter();
    let mut removed = Vec::new();

    while let Some(id) = due.next() {
        match store.delete(&id) {
            Ok(true) => removed.push(id),
            Ok(false) => {}
            Err(err) => {
                for retry in std::iter::once(id).chain(due) {
                    schedule.pending.push((retry, now));
                }
                return Err(err);
            }
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::RemovalSchedule;
    use crate::model::todo::TodoId;
    use std::time::{Duration, Instant};

    #[test]
    fn marks_become_due_after_delay() {
        let mut schedule = RemovalSchedule::new(Duration::from_millis(300));
        let start = Instant::now();

        assert!(schedule.mark("a".into(), start));
        assert!(!schedule.mark("a".into(), start + Duration::from_millis(10)));

        assert!(schedule.take_due(start + Duration::from_millis(299)).is_empty());
        assert_eq!(
            schedule.take_due(start + Duration::from_millis(300)),
            vec![TodoId::from("a")]
        );
        assert!(schedule.is_empty());
    }

    #[test]
    fn cancel_drops_pending_mark() {
        let mut schedule = RemovalSchedule::default();
        let start = Instant::now();
        schedule.mark("a".into(), start);

        assert!(schedule.cancel(&"a".into()));
        assert!(!schedule.cancel(&"a".into()));
        assert!(schedule.take_due(start + Duration::from_secs(1)).is_empty());
    }
}
