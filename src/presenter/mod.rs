// Presenters: list orchestration, the creation form, rows, and the event loop tying them together.

pub mod board;
pub mod events;
pub mod keyboard;
pub mod new_point_presenter;
pub mod point_presenter;
pub mod trip_presenter;

pub use board::TripBoard;
pub use events::{EventQueue, PresenterEvent};
pub use keyboard::{KeyEvent, KeySubscription, KeyboardHub};
pub use new_point_presenter::NewPointPresenter;
pub use point_presenter::{Mode, PointPresenter, RowInput};
pub use trip_presenter::TripPresenter;
