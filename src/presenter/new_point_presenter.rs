use crate::domain::events::{UpdateType, UserAction};
use crate::domain::model::{Destination, OfferGroup, Point, PointDraft, PointId};
use crate::presenter::events::{EventQueue, PresenterEvent};
use crate::presenter::keyboard::{KeyEvent, KeySubscription, KeyboardHub};
use crate::utils::error::Result;
use crate::view::{Component, Container, EditPointView, NodeId, RenderPosition, SharedView};

type DestroyCallback = Box<dyn FnMut()>;

/// Owns the single transient "new point" form.
///
/// Closed until [`NewPointPresenter::init`] mounts the form; every way of closing it goes
/// through [`NewPointPresenter::destroy`], which runs the caller's destroy callback.
pub struct NewPointPresenter {
    container: NodeId,
    view: SharedView,
    events: EventQueue,
    keyboard: KeyboardHub,
    form_node: Option<NodeId>,
    destroy_callback: Option<DestroyCallback>,
    escape_subscription: Option<KeySubscription>,
}

impl NewPointPresenter {
    pub fn new(container: NodeId, view: SharedView, events: EventQueue, keyboard: KeyboardHub) -> Self {
        Self {
            container,
            view,
            events,
            keyboard,
            form_node: None,
            destroy_callback: None,
            escape_subscription: None,
        }
    }

    /// Opens the form at the head of the list. No-op while a form is already open.
    pub fn init(
        &mut self,
        on_destroy: impl FnMut() + 'static,
        offers: Vec<OfferGroup>,
        destinations: Vec<Destination>,
        cities: Vec<String>,
    ) -> Result<()> {
        if self.form_node.is_some() {
            return Ok(());
        }

        let form = EditPointView::blank(cities, offers, destinations);
        let node = self.view.borrow_mut().mount(
            Component::EditPoint(form),
            Container::Node(self.container),
            RenderPosition::AfterBegin,
        )?;

        let sink = self.events.clone();
        self.escape_subscription = Some(self.keyboard.subscribe(move |event: &KeyEvent| {
            if event.is_escape() {
                sink.push(PresenterEvent::CancelCreation);
            }
        }));
        self.destroy_callback = Some(Box::new(on_destroy));
        self.form_node = Some(node);

        tracing::debug!("Creation form opened");
        Ok(())
    }

    pub fn destroy(&mut self) -> Result<()> {
        let Some(node) = self.form_node.take() else {
            return Ok(());
        };

        if let Some(mut callback) = self.destroy_callback.take() {
            callback();
        }

        let removed = self.view.borrow_mut().remove(node);
        if let Some(subscription) = self.escape_subscription.take() {
            subscription.unsubscribe();
        }

        tracing::debug!("Creation form closed");
        removed
    }

    /// Assigns a fresh id, asks the list to add the point, then closes the form.
    pub fn handle_form_submit(&mut self, draft: PointDraft) -> Result<()> {
        if !self.is_open() {
            return Ok(());
        }

        let point = Point::from_draft(PointId::generate(), draft);
        tracing::debug!(id = %point.id, "Submitting new point");
        self.events.push(PresenterEvent::ViewAction(UserAction::AddPoint {
            update_type: UpdateType::Minor,
            point,
        }));
        self.destroy()
    }

    pub fn handle_cancel_click(&mut self) -> Result<()> {
        self.destroy()
    }

    pub fn is_open(&self) -> bool {
        self.form_node.is_some()
    }

    pub fn form_node(&self) -> Option<NodeId> {
        self.form_node
    }
}
