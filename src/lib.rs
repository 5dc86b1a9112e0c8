pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod presenter;
pub mod utils;
pub mod view;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::PointsModel;
pub use config::TripConfig;
pub use domain::events::{ModelEvent, SortType, UpdateType, UserAction};
pub use domain::model::{Point, PointDraft, PointId, PointType};
pub use domain::ports::PointsStore;
pub use presenter::{KeyEvent, RowInput, TripBoard};
pub use utils::error::{Result, TripError};
