use crate::domain::events::{ModelEvent, UserAction};
use crate::domain::model::PointId;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Everything a presenter can raise for the board to route.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    /// A row entered edit mode; every other row must go back to its card.
    ModeChange(PointId),
    /// A row or the creation form wants the store mutated.
    ViewAction(UserAction),
    /// The store committed a mutation.
    ModelUpdate(ModelEvent),
    /// The escape key was pressed while the creation form was listening.
    CancelCreation,
}

/// FIFO mailbox shared by everything that raises presenter events.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<PresenterEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: PresenterEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    pub fn pop(&self) -> Option<PresenterEvent> {
        self.inner.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}
