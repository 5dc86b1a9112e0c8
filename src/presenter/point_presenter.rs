use crate::domain::events::{UpdateType, UserAction};
use crate::domain::model::{Point, PointDraft};
use crate::domain::ports::PointsStore;
use crate::presenter::events::{EventQueue, PresenterEvent};
use crate::utils::error::Result;
use crate::view::{Component, Container, EditPointView, NodeId, PointView, RenderPosition, SharedView};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Default,
    Editing,
}

/// User input aimed at one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowInput {
    OpenEditor,
    CloseEditor,
    Submit(PointDraft),
    Delete,
}

/// Renders one point as a card or an edit form and reports what the user did.
pub struct PointPresenter<S: PointsStore> {
    container: NodeId,
    view: SharedView,
    store: Rc<S>,
    events: EventQueue,
    point: Option<Point>,
    node: Option<NodeId>,
    mode: Mode,
}

impl<S: PointsStore> PointPresenter<S> {
    pub fn new(container: NodeId, view: SharedView, store: Rc<S>, events: EventQueue) -> Self {
        Self {
            container,
            view,
            store,
            events,
            point: None,
            node: None,
            mode: Mode::Default,
        }
    }

    /// First call mounts the card; later calls refresh the current node in place.
    pub fn init(&mut self, point: Point) -> Result<()> {
        let component = self.component_for(&point);
        let node = match self.node {
            None => self.view.borrow_mut().mount(
                component,
                Container::Node(self.container),
                RenderPosition::BeforeEnd,
            )?,
            Some(previous) => self.view.borrow_mut().replace(previous, component)?,
        };

        self.node = Some(node);
        self.point = Some(point);
        Ok(())
    }

    pub fn destroy(&mut self) -> Result<()> {
        if let Some(node) = self.node.take() {
            self.view.borrow_mut().remove(node)?;
        }
        Ok(())
    }

    /// Puts the row back to its card. Raises no events.
    pub fn reset_view(&mut self) -> Result<()> {
        if self.mode == Mode::Editing {
            self.mode = Mode::Default;
            self.refresh()?;
        }
        Ok(())
    }

    /// Swaps the card for the edit form. Raises no events.
    pub fn open_editor(&mut self) -> Result<()> {
        if self.mode == Mode::Default {
            self.mode = Mode::Editing;
            self.refresh()?;
        }
        Ok(())
    }

    pub fn handle(&mut self, input: RowInput) -> Result<()> {
        let Some(current) = self.point.clone() else {
            return Ok(());
        };

        match input {
            RowInput::OpenEditor => {
                if self.mode == Mode::Editing {
                    return Ok(());
                }
                // The list switches this row once every other row is back to its card.
                self.events.push(PresenterEvent::ModeChange(current.id));
            }
            RowInput::CloseEditor => self.reset_view()?,
            RowInput::Submit(draft) => {
                let updated = Point::from_draft(current.id.clone(), draft);
                let update_type = if current.differs_in_ordering(&updated) {
                    UpdateType::Minor
                } else {
                    UpdateType::Patch
                };
                self.reset_view()?;
                self.events.push(PresenterEvent::ViewAction(UserAction::UpdatePoint {
                    update_type,
                    point: updated,
                }));
            }
            RowInput::Delete => {
                self.events.push(PresenterEvent::ViewAction(UserAction::DeletePoint {
                    update_type: UpdateType::Minor,
                    point: current,
                }));
            }
        }
        Ok(())
    }

    pub fn point(&self) -> Option<&Point> {
        self.point.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn refresh(&mut self) -> Result<()> {
        if let (Some(point), Some(previous)) = (self.point.clone(), self.node) {
            let component = self.component_for(&point);
            self.node = Some(self.view.borrow_mut().replace(previous, component)?);
        }
        Ok(())
    }

    fn component_for(&self, point: &Point) -> Component {
        match self.mode {
            Mode::Default => Component::Point(PointView {
                point: point.clone(),
            }),
            Mode::Editing => Component::EditPoint(EditPointView::for_point(
                point.clone(),
                self.store.offers(),
                self.store.destinations(),
            )),
        }
    }
}
