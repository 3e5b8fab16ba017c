#![forbid(unsafe_code)]

//! Synchronous listener lists.
//!
//! Listeners run in subscription order on the caller's stack. A listener
//! cannot reach back into the emitter; it records what it needs and the
//! embedder acts after the call returns.

use std::fmt;

/// Handle returned by a subscription; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

type Listener<T> = Box<dyn FnMut(&T)>;

/// Ordered listeners for one event type.
pub struct EventBus<T> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<T>)>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<T> EventBus<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Subscribe under an id allocated by the owner, so that several buses
    /// can share one id space.
    pub(crate) fn subscribe_as(&mut self, id: ListenerId, listener: impl FnMut(&T) + 'static) {
        self.next_id = self.next_id.max(id.0 + 1);
        self.listeners.push((id, Box::new(listener)));
    }

    /// Remove a listener. Returns false if it was not subscribed here.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &T) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emits_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::<u32>::new();
        let l1 = Rc::clone(&log);
        bus.subscribe(move |v| l1.borrow_mut().push(format!("a{v}")));
        let l2 = Rc::clone(&log);
        bus.subscribe(move |v| l2.borrow_mut().push(format!("b{v}")));
        bus.emit(&1);
        bus.emit(&2);
        assert_eq!(*log.borrow(), vec!["a1", "b1", "a2", "b2"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::<()>::new();
        let c1 = Rc::clone(&count);
        let id = bus.subscribe(move |_| *c1.borrow_mut() += 1);
        let c2 = Rc::clone(&count);
        bus.subscribe(move |_| *c2.borrow_mut() += 10);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&());
        assert_eq!(*count.borrow(), 10);
        assert_eq!(bus.len(), 1);
    }
}
