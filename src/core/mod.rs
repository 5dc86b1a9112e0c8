pub mod sort;

pub use crate::domain::events::{ModelEvent, SortType, UpdateType, UserAction};
pub use crate::domain::model::{Point, PointId};
pub use crate::domain::ports::PointsStore;
pub use crate::utils::error::Result;
