use crate::domain::events::SortType;
use crate::domain::model::{PointDraft, PointId};
use crate::domain::ports::PointsStore;
use crate::presenter::events::{EventQueue, PresenterEvent};
use crate::presenter::keyboard::{KeyEvent, KeyboardHub};
use crate::presenter::new_point_presenter::NewPointPresenter;
use crate::presenter::point_presenter::RowInput;
use crate::presenter::trip_presenter::TripPresenter;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use crate::view::{Container, SharedView, ViewTree};
use std::rc::Rc;

/// Wires the list and creation presenters to one store, view tree and key channel, and runs
/// the event loop.
///
/// Every public entry point drains the event queue before returning, so an action, the store
/// notification it causes, and the resulting re-render all complete inside one call.
pub struct TripBoard<S: PointsStore> {
    view: SharedView,
    store: Rc<S>,
    events: EventQueue,
    keyboard: KeyboardHub,
    trip: TripPresenter<S>,
    new_point: NewPointPresenter,
}

impl<S: PointsStore> TripBoard<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self::with_view(ViewTree::shared(), Container::Root, store, KeyboardHub::new())
    }

    pub fn with_view(view: SharedView, container: Container, store: Rc<S>, keyboard: KeyboardHub) -> Self {
        let events = EventQueue::new();
        let trip = TripPresenter::new(container, Rc::clone(&view), Rc::clone(&store), events.clone());
        let new_point = NewPointPresenter::new(
            trip.list_node(),
            Rc::clone(&view),
            events.clone(),
            keyboard.clone(),
        );

        Self {
            view,
            store,
            events,
            keyboard,
            trip,
            new_point,
        }
    }

    pub fn init(&mut self) -> Result<()> {
        self.trip.init()?;
        self.process_events()
    }

    /// Opens the creation form. `on_destroy` runs whenever that form closes.
    pub fn create_point(&mut self, on_destroy: impl FnMut() + 'static) -> Result<()> {
        if self.new_point.is_open() {
            return Ok(());
        }

        self.trip.open_list_for_creation()?;
        self.new_point.init(
            on_destroy,
            self.store.offers(),
            self.store.destinations(),
            self.store.cities(),
        )?;
        self.process_events()
    }

    /// Validates the form fields, then hands them to the creation presenter.
    pub fn submit_new_point(&mut self, draft: PointDraft) -> Result<()> {
        draft.validate()?;
        self.new_point.handle_form_submit(draft)?;
        let processed = self.process_events();
        self.trip.handle_creation_closed()?;
        processed
    }

    pub fn cancel_new_point(&mut self) -> Result<()> {
        self.new_point.handle_cancel_click()?;
        self.trip.handle_creation_closed()?;
        self.process_events()
    }

    pub fn press_key(&mut self, event: KeyEvent) -> Result<()> {
        self.keyboard.dispatch(&event);
        self.process_events()
    }

    pub fn row_input(&mut self, id: &PointId, input: RowInput) -> Result<()> {
        self.trip.handle_row_input(id, input)?;
        self.process_events()
    }

    pub fn change_sort(&mut self, sort_type: SortType) -> Result<()> {
        self.trip.handle_sort_type_change(sort_type)?;
        self.process_events()
    }

    /// Drains the queue, including events raised while draining. Keeps going after a failure
    /// and reports the first one.
    pub fn process_events(&mut self) -> Result<()> {
        let mut first_error = None;
        while let Some(event) = self.events.pop() {
            if let Err(err) = self.dispatch(event) {
                tracing::warn!(
                    error = %err,
                    store_rejection = err.is_store_rejection(),
                    "Presenter event failed"
                );
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn dispatch(&mut self, event: PresenterEvent) -> Result<()> {
        match event {
            PresenterEvent::ModeChange(id) => self.trip.handle_mode_change(&id),
            PresenterEvent::ViewAction(action) => self.trip.handle_view_action(action),
            PresenterEvent::ModelUpdate(update) => self.trip.handle_model_event(update),
            PresenterEvent::CancelCreation => {
                self.new_point.destroy()?;
                self.trip.handle_creation_closed()
            }
        }
    }

    pub fn trip(&self) -> &TripPresenter<S> {
        &self.trip
    }

    pub fn new_point(&self) -> &NewPointPresenter {
        &self.new_point
    }

    pub fn view(&self) -> SharedView {
        Rc::clone(&self.view)
    }

    pub fn store(&self) -> &Rc<S> {
        &self.store
    }

    pub fn keyboard(&self) -> &KeyboardHub {
        &self.keyboard
    }

    pub fn outline(&self) -> String {
        self.view.borrow().outline()
    }
}
