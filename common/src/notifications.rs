//! Toast queue and the per-toast expiry bookkeeping.
//!
//! The queue itself is plain data. Scheduling is left to the caller, which
//! registers one cancellable handle per notification in [`ExpiryTimers`]:
//! in the browser that handle is a `gloo_timers::callback::Timeout`, whose
//! `Drop` cancels the pending callback.

use std::collections::HashMap;
use std::time::Duration;

use crate::model::notification::{Notification, NotificationId, NotificationKind};

/// How long a toast stays on screen unless dismissed earlier.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);

/// Ordered, oldest-first sequence of live notifications.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification and returns its freshly issued id.
    pub fn push(&mut self, text: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        self.items.push(Notification {
            id,
            text: text.into(),
            kind,
        });
        id
    }

    /// Removes the notification with `id`. Returns `None` when it is already
    /// gone, which is not an error.
    pub fn dismiss(&mut self, id: NotificationId) -> Option<Notification> {
        let index = self.items.iter().position(|n| n.id == id)?;
        Some(self.items.remove(index))
    }

    /// Timer path. Same semantics as [`dismiss`](Self::dismiss); kept separate
    /// so call sites read as what happened.
    pub fn expire(&mut self, id: NotificationId) -> Option<Notification> {
        self.dismiss(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.items.iter().any(|n| n.id == id)
    }
}

/// Pending expiry tasks keyed by notification id.
///
/// `H` is any handle that cancels its task when dropped. Cancelling or
/// completing an id that has no entry is a no-op.
#[derive(Debug)]
pub struct ExpiryTimers<H> {
    pending: HashMap<NotificationId, H>,
}

impl<H> Default for ExpiryTimers<H> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<H> ExpiryTimers<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the expiry task for `id`, replacing (and cancelling) any
    /// previous one.
    pub fn schedule(&mut self, id: NotificationId, handle: H) {
        self.pending.insert(id, handle);
    }

    /// Drops the pending handle for `id`, cancelling the task if it has not
    /// fired yet. Returns whether a handle was registered.
    pub fn cancel(&mut self, id: NotificationId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Forgets the handle of a task that has just fired.
    pub fn fired(&mut self, id: NotificationId) {
        self.pending.remove(&id);
    }

    pub fn is_pending(&self, id: NotificationId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records its id in a shared log when dropped, like a cancelled timer.
    struct Handle {
        id: NotificationId,
        dropped: Rc<RefCell<Vec<NotificationId>>>,
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn push_keeps_insertion_order_and_unique_ids() {
        let mut queue = NotificationQueue::new();
        let a = queue.push("first", NotificationKind::Success);
        let b = queue.push("second", NotificationKind::Error);
        let c = queue.push("third", NotificationKind::Error);

        let texts: Vec<&str> = queue.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert!(a < b && b < c);
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut queue = NotificationQueue::new();
        let a = queue.push("one", NotificationKind::Success);
        queue.dismiss(a);
        let b = queue.push("two", NotificationKind::Success);
        assert_ne!(a, b);
    }

    #[test]
    fn dismissing_an_unknown_id_is_a_no_op() {
        let mut queue = NotificationQueue::new();
        let id = queue.push("hello", NotificationKind::Success);
        assert!(queue.dismiss(NotificationId(999)).is_none());
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(id));
    }

    #[test]
    fn each_notification_is_removed_exactly_once() {
        let mut queue = NotificationQueue::new();
        let dismissed = queue.push("dismiss me", NotificationKind::Error);
        let expired = queue.push("let me expire", NotificationKind::Success);

        assert!(queue.dismiss(dismissed).is_some());
        // The timer for the dismissed toast fires late.
        assert!(queue.expire(dismissed).is_none());

        assert!(queue.expire(expired).is_some());
        // A click that lands after expiry.
        assert!(queue.dismiss(expired).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelling_drops_the_handle_once() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        let mut timers = ExpiryTimers::new();
        let id = NotificationId(1);
        timers.schedule(
            id,
            Handle {
                id,
                dropped: dropped.clone(),
            },
        );

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        timers.fired(id);

        assert_eq!(*dropped.borrow(), vec![id]);
        assert!(timers.is_empty());
    }

    #[test]
    fn fired_timers_are_forgotten() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        let mut timers = ExpiryTimers::new();
        for raw in 1..=2 {
            let id = NotificationId(raw);
            timers.schedule(
                id,
                Handle {
                    id,
                    dropped: dropped.clone(),
                },
            );
        }

        timers.fired(NotificationId(2));
        assert!(timers.is_pending(NotificationId(1)));
        assert!(!timers.is_pending(NotificationId(2)));
        assert_eq!(timers.len(), 1);
    }
}
