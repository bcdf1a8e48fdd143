//! Change-notification channels with explicit subscription handles.
//!
//! Each [`EventChannel`] broadcasts a value to its listeners in subscription
//! order. Subscribing returns a [`Subscription`]; dropping it (or calling
//! [`Subscription::cancel`]) removes the listener, so every registration has
//! an owner and leaks show up in [`EventChannel::listener_count`].
//!
//! Channels are `Rc`-based and therefore `!Send`: listeners live on the
//! thread that owns the channel. Work originating on other threads must be
//! handed back to that thread before it touches anything here.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Registry<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
}

impl<T> Registry<T> {
    fn contains(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(lid, _)| *lid == id)
    }
}

/// Type-erased removal so [`Subscription`] is not generic over the payload.
trait Unsubscribe {
    fn remove(&self, id: u64);
}

impl<T> Unsubscribe for Registry<T> {
    fn remove(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

/// Broadcasts values of type `T` to registered listeners.
pub struct EventChannel<T> {
    registry: Rc<Registry<T>>,
}

impl<T: 'static> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.registry.listeners.borrow().len())
            .finish()
    }
}

impl<T: 'static> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register `listener`. It stays registered while the returned handle lives.
    #[must_use = "dropping the Subscription immediately unsubscribes the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);

        let listener: Listener<T> = Rc::new(RefCell::new(listener));
        self.registry.listeners.borrow_mut().push((id, listener));

        let registry: Rc<dyn Unsubscribe> = self.registry.clone();
        Subscription {
            id,
            registry: Some(Rc::downgrade(&registry)),
        }
    }

    /// Deliver `value` to every listener, in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while the broadcast runs.
    /// Listeners added during the broadcast first hear the next one; listeners
    /// removed during it are skipped if they have not been reached yet.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self
            .registry
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.registry.contains(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut callback) => callback(value),
                Err(_) => log::warn!("Skipping re-entrant notification for listener {}", id),
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.listeners.borrow().len()
    }

    pub fn has_listeners(&self) -> bool {
        self.listener_count() > 0
    }
}

/// Handle that keeps a listener registered.
///
/// Dropping the handle unsubscribes. A handle outliving its channel is inert.
pub struct Subscription {
    id: u64,
    registry: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.unsubscribe();
    }

    /// Keep the listener registered for the rest of the channel's life.
    pub fn detach(mut self) {
        self.registry = None;
    }

    /// Whether the listener is still registered with a live channel.
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    fn unsubscribe(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.remove(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_listeners_in_order() {
        let channel = EventChannel::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s1 = {
            let seen = Rc::clone(&seen);
            channel.subscribe(move |v| seen.borrow_mut().push(("first", *v)))
        };
        let s2 = {
            let seen = Rc::clone(&seen);
            channel.subscribe(move |v| seen.borrow_mut().push(("second", *v)))
        };

        channel.emit(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
        drop((s1, s2));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let channel = EventChannel::<()>::new();
        let count = Rc::new(Cell::new(0));

        let sub = {
            let count = Rc::clone(&count);
            channel.subscribe(move |_| count.set(count.get() + 1))
        };
        assert_eq!(channel.listener_count(), 1);
        channel.emit(&());
        drop(sub);
        assert_eq!(channel.listener_count(), 0);
        channel.emit(&());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_cancel_and_detach() {
        let channel = EventChannel::<()>::new();
        let cancelled = channel.subscribe(|_| {});
        let detached = channel.subscribe(|_| {});
        assert_eq!(channel.listener_count(), 2);

        cancelled.cancel();
        detached.detach();
        assert_eq!(channel.listener_count(), 1);
    }

    #[test]
    fn test_subscription_outlives_channel() {
        let channel = EventChannel::<()>::new();
        let sub = channel.subscribe(|_| {});
        assert!(sub.is_active());
        drop(channel);
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_unsubscribe_during_emit_skips_pending_listener() {
        let channel = Rc::new(EventChannel::<()>::new());
        let later_calls = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let _remover = {
            let victim = Rc::clone(&victim);
            channel.subscribe(move |_| {
                victim.borrow_mut().take();
            })
        };
        let sub = {
            let later_calls = Rc::clone(&later_calls);
            channel.subscribe(move |_| later_calls.set(later_calls.get() + 1))
        };
        *victim.borrow_mut() = Some(sub);

        channel.emit(&());
        assert_eq!(later_calls.get(), 0);
        assert_eq!(channel.listener_count(), 1);
    }

    #[test]
    fn test_subscribe_during_emit_waits_for_next_broadcast() {
        let channel = Rc::new(EventChannel::<()>::new());
        let added: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
        let calls = Rc::new(Cell::new(0));

        let _adder = {
            let weak = Rc::downgrade(&channel);
            let added = Rc::clone(&added);
            let calls = Rc::clone(&calls);
            channel.subscribe(move |_| {
                let Some(channel) = weak.upgrade() else { return };
                if !added.borrow().is_empty() {
                    return;
                }
                let calls = Rc::clone(&calls);
                let sub = channel.subscribe(move |_| calls.set(calls.get() + 1));
                added.borrow_mut().push(sub);
            })
        };

        channel.emit(&());
        assert_eq!(calls.get(), 0);
        channel.emit(&());
        assert_eq!(calls.get(), 1);
    }
}
