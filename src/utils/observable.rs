use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of subscribers for a single-threaded publisher.
///
/// Publishers call [`Observable::snapshot`] and invoke the returned listeners after releasing
/// their own borrows, so a listener may subscribe or unsubscribe while being notified.
pub struct Observable<F: ?Sized> {
    listeners: RefCell<Vec<(SubscriptionId, Rc<F>)>>,
    next_id: Cell<u64>,
}

impl<F: ?Sized> Observable<F> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn subscribe(&self, listener: Rc<F>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn snapshot(&self) -> Vec<Rc<F>> {
        self.listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl<F: ?Sized> Default for Observable<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Listener = dyn Fn(u32);

    #[test]
    fn test_subscribe_and_notify_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let observable: Observable<Listener> = Observable::new();

        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            observable.subscribe(Rc::new(move |n: u32| seen.borrow_mut().push(format!("{tag}{n}"))));
        }

        for listener in observable.snapshot() {
            listener(7);
        }

        assert_eq!(*seen.borrow(), vec!["a7".to_string(), "b7".to_string()]);
    }

    #[test]
    fn test_unsubscribe() {
        let observable: Observable<Listener> = Observable::new();
        let id = observable.subscribe(Rc::new(|_: u32| {}));
        assert_eq!(observable.len(), 1);
        assert!(observable.unsubscribe(id));
        assert!(!observable.unsubscribe(id));
        assert!(observable.is_empty());
    }

    #[test]
    fn test_unsubscribe_during_notification() {
        let observable: Rc<Observable<Listener>> = Rc::new(Observable::new());
        let own_id = Rc::new(Cell::new(None));

        let handle = Rc::clone(&observable);
        let id_slot = Rc::clone(&own_id);
        let id = observable.subscribe(Rc::new(move |_: u32| {
            if let Some(id) = id_slot.get() {
                handle.unsubscribe(id);
            }
        }));
        own_id.set(Some(id));

        for listener in observable.snapshot() {
            listener(1);
        }
        assert!(observable.is_empty());
    }
}
