use crate::utils::observable::{Observable, SubscriptionId};
use std::rc::{Rc, Weak};

type KeyListener = dyn Fn(&KeyEvent);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn escape() -> Self {
        Self::new("Escape")
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape" || self.key == "Esc"
    }
}

/// Process-wide key channel.
///
/// Cloning yields another handle to the same channel.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    listeners: Rc<Observable<KeyListener>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&KeyEvent) + 'static) -> KeySubscription {
        let id = self.listeners.subscribe(Rc::new(listener));
        tracing::debug!(listeners = self.listeners.len(), "Key listener subscribed");
        KeySubscription {
            hub: Rc::downgrade(&self.listeners),
            id: Some(id),
        }
    }

    pub fn dispatch(&self, event: &KeyEvent) {
        for listener in self.listeners.snapshot() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Live key subscription.
///
/// Released by [`KeySubscription::unsubscribe`], or on drop if still held.
pub struct KeySubscription {
    hub: Weak<Observable<KeyListener>>,
    id: Option<SubscriptionId>,
}

impl KeySubscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.hub.strong_count() > 0
    }

    fn release(&mut self) {
        if let (Some(id), Some(hub)) = (self.id.take(), self.hub.upgrade()) {
            hub.unsubscribe(id);
            tracing::debug!(listeners = hub.len(), "Key listener unsubscribed");
        }
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_escape_names() {
        assert!(KeyEvent::new("Escape").is_escape());
        assert!(KeyEvent::new("Esc").is_escape());
        assert!(!KeyEvent::new("Enter").is_escape());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let hub = KeyboardHub::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let subscription = hub.subscribe(move |_| counter.set(counter.get() + 1));

        hub.dispatch(&KeyEvent::escape());
        assert_eq!(hits.get(), 1);
        assert!(subscription.is_active());

        subscription.unsubscribe();
        hub.dispatch(&KeyEvent::escape());
        assert_eq!(hits.get(), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_drop_releases_listener() {
        let hub = KeyboardHub::new();
        {
            let _subscription = hub.subscribe(|_| {});
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
    }
}
