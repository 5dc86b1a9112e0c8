use crate::core::sort::sort_points;
use crate::domain::events::{ModelEvent, SortType, UpdateType, UserAction};
use crate::domain::model::{Point, PointId};
use crate::domain::ports::PointsStore;
use crate::presenter::events::{EventQueue, PresenterEvent};
use crate::presenter::point_presenter::{PointPresenter, RowInput};
use crate::utils::error::{Result, TripError};
use crate::utils::observable::SubscriptionId;
use crate::view::{Component, Container, NodeId, RenderPosition, SharedView, SortView};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Owns the rendered point list: sort control, list container, empty placeholder and one
/// row presenter per visible point.
pub struct TripPresenter<S: PointsStore> {
    container: Container,
    view: SharedView,
    store: Rc<S>,
    events: EventQueue,
    list_node: NodeId,
    sort_node: Option<NodeId>,
    first_message_node: Option<NodeId>,
    rows: HashMap<PointId, PointPresenter<S>>,
    sort_type: SortType,
    observer: SubscriptionId,
}

impl<S: PointsStore> TripPresenter<S> {
    pub fn new(container: Container, view: SharedView, store: Rc<S>, events: EventQueue) -> Self {
        let list_node = view.borrow_mut().create(Component::TripList);

        let sink = events.clone();
        let observer = store.add_observer(Box::new(move |update_type: UpdateType, point: &Point| {
            sink.push(PresenterEvent::ModelUpdate(ModelEvent {
                update_type,
                point: point.clone(),
            }));
        }));

        Self {
            container,
            view,
            store,
            events,
            list_node,
            sort_node: None,
            first_message_node: None,
            rows: HashMap::new(),
            sort_type: SortType::Day,
            observer,
        }
    }

    /// First render. Call once per presenter.
    pub fn init(&mut self) -> Result<()> {
        self.render_trip()
    }

    /// Store points in the active sort order.
    pub fn points(&self) -> Vec<Point> {
        sort_points(self.store.points(), self.sort_type)
    }

    /// Puts every other row back to its card, then opens the initiator's edit form.
    pub fn handle_mode_change(&mut self, initiator: &PointId) -> Result<()> {
        for (id, row) in self.rows.iter_mut() {
            if id != initiator {
                row.reset_view()?;
            }
        }
        match self.rows.get_mut(initiator) {
            Some(row) => row.open_editor(),
            None => {
                tracing::debug!(id = %initiator, "Mode change for a row that is gone");
                Ok(())
            }
        }
    }

    /// Forwards the action to the store unchanged; store errors come back as-is.
    pub fn handle_view_action(&self, action: UserAction) -> Result<()> {
        tracing::debug!(kind = ?action.kind(), id = %action.point().id, "Forwarding view action");
        match action {
            UserAction::UpdatePoint { update_type, point } => {
                self.store.update_point(update_type, point)
            }
            UserAction::AddPoint { update_type, point } => self.store.add_point(update_type, point),
            UserAction::DeletePoint { update_type, point } => {
                self.store.delete_point(update_type, point)
            }
        }
    }

    pub fn handle_model_event(&mut self, event: ModelEvent) -> Result<()> {
        match event.update_type {
            UpdateType::Patch => {
                let id = event.point.id.clone();
                let row = self
                    .rows
                    .get_mut(&id)
                    .ok_or(TripError::RowNotFound { id: id.clone() })?;
                tracing::debug!(%id, "Patching row");
                row.init(event.point)
            }
            UpdateType::Minor => {
                self.clear_list(false)?;
                self.render_trip()
            }
            UpdateType::Major => {
                self.clear_list(true)?;
                self.render_trip()
            }
        }
    }

    pub fn handle_sort_type_change(&mut self, sort_type: SortType) -> Result<()> {
        if sort_type == self.sort_type {
            return Ok(());
        }

        tracing::debug!(from = %self.sort_type, to = %sort_type, "Sort type changed");
        self.sort_type = sort_type;
        self.clear_list(false)?;
        self.render_trip()
    }

    pub fn handle_row_input(&mut self, id: &PointId, input: RowInput) -> Result<()> {
        self.rows
            .get_mut(id)
            .ok_or_else(|| TripError::RowNotFound { id: id.clone() })?
            .handle(input)
    }

    /// Makes the list container visible for a creation form and closes open row editors.
    pub fn open_list_for_creation(&mut self) -> Result<NodeId> {
        for row in self.rows.values_mut() {
            row.reset_view()?;
        }

        if let Some(node) = self.first_message_node.take() {
            let mut view = self.view.borrow_mut();
            view.remove(node)?;
            view.render(self.list_node, self.container, RenderPosition::BeforeEnd)?;
        }
        Ok(self.list_node)
    }

    /// Brings the empty placeholder back if a creation form closed over an empty list.
    pub fn handle_creation_closed(&mut self) -> Result<()> {
        if self.rows.is_empty() && self.first_message_node.is_none() {
            self.clear_list(false)?;
            self.render_trip()?;
        }
        Ok(())
    }

    pub fn clear_list(&mut self, reset_sort_type: bool) -> Result<()> {
        for (_, mut row) in self.rows.drain() {
            row.destroy()?;
        }

        let mut view = self.view.borrow_mut();
        if let Some(node) = self.sort_node.take() {
            view.remove(node)?;
        }
        if let Some(node) = self.first_message_node.take() {
            view.remove(node)?;
        }
        view.detach(self.list_node)?;

        if reset_sort_type {
            self.sort_type = SortType::Day;
        }
        Ok(())
    }

    fn render_trip(&mut self) -> Result<()> {
        let points = self.points();
        if points.is_empty() {
            return self.render_empty();
        }

        self.render_sort()?;
        self.view
            .borrow_mut()
            .render(self.list_node, self.container, RenderPosition::BeforeEnd)?;
        for point in points {
            self.render_point(point)?;
        }

        tracing::debug!(rows = self.rows.len(), sort = %self.sort_type, "Trip list rendered");
        Ok(())
    }

    /// An open creation form keeps the list container on screen instead of the placeholder.
    fn render_empty(&mut self) -> Result<()> {
        let holds_form = !self
            .view
            .borrow()
            .children(Container::Node(self.list_node))
            .is_empty();
        if holds_form {
            self.view
                .borrow_mut()
                .render(self.list_node, self.container, RenderPosition::BeforeEnd)?;
            tracing::debug!("No points, keeping list container for the open form");
            return Ok(());
        }
        self.render_first_message()
    }

    fn render_first_message(&mut self) -> Result<()> {
        let node = self.view.borrow_mut().mount(
            Component::FirstMessage,
            self.container,
            RenderPosition::BeforeEnd,
        )?;
        self.first_message_node = Some(node);
        tracing::debug!("No points, rendered first message");
        Ok(())
    }

    fn render_sort(&mut self) -> Result<()> {
        let node = self.view.borrow_mut().mount(
            Component::Sort(SortView {
                active: self.sort_type,
            }),
            self.container,
            RenderPosition::BeforeEnd,
        )?;
        self.sort_node = Some(node);
        Ok(())
    }

    fn render_point(&mut self, point: Point) -> Result<()> {
        let mut row = PointPresenter::new(
            self.list_node,
            Rc::clone(&self.view),
            Rc::clone(&self.store),
            self.events.clone(),
        );
        let id = point.id.clone();
        row.init(point)?;
        self.rows.insert(id, row);
        Ok(())
    }

    pub fn sort_type(&self) -> SortType {
        self.sort_type
    }

    pub fn row(&self, id: &PointId) -> Option<&PointPresenter<S>> {
        self.rows.get(id)
    }

    pub fn registry_ids(&self) -> BTreeSet<PointId> {
        self.rows.keys().cloned().collect()
    }

    /// Ids of the points currently mounted in the list container, in display order.
    pub fn rendered_ids(&self) -> Vec<PointId> {
        let view = self.view.borrow();
        if !view.is_mounted(self.list_node) {
            return Vec::new();
        }
        view.children(Container::Node(self.list_node))
            .into_iter()
            .filter_map(|node| match view.component(node) {
                Some(Component::Point(card)) => Some(card.point.id.clone()),
                Some(Component::EditPoint(form)) => form.point.as_ref().map(|p| p.id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn list_node(&self) -> NodeId {
        self.list_node
    }

    pub fn sort_node(&self) -> Option<NodeId> {
        self.sort_node
    }

    pub fn first_message_node(&self) -> Option<NodeId> {
        self.first_message_node
    }
}

impl<S: PointsStore> Drop for TripPresenter<S> {
    fn drop(&mut self) {
        self.store.remove_observer(self.observer);
    }
}
