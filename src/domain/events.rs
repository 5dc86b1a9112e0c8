use crate::domain::model::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering criterion of the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    #[default]
    Day,
    Time,
    Price,
}

impl SortType {
    pub const ALL: [SortType; 3] = [SortType::Day, SortType::Time, SortType::Price];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortType::Day => "day",
            SortType::Time => "time",
            SortType::Price => "price",
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(SortType::Day),
            "time" => Ok(SortType::Time),
            "price" => Ok(SortType::Price),
            other => Err(format!("unknown sort type: {other}")),
        }
    }
}

/// How much of the rendered list has to change after a store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateType {
    /// One point changed in place.
    Patch,
    /// Membership or ordering changed; sort is kept.
    Minor,
    /// Reset-worthy change; sort goes back to day.
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Update,
    Add,
    Delete,
}

/// A mutation a presenter asks the store to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    UpdatePoint { update_type: UpdateType, point: Point },
    AddPoint { update_type: UpdateType, point: Point },
    DeletePoint { update_type: UpdateType, point: Point },
}

impl UserAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            UserAction::UpdatePoint { .. } => ActionKind::Update,
            UserAction::AddPoint { .. } => ActionKind::Add,
            UserAction::DeletePoint { .. } => ActionKind::Delete,
        }
    }

    pub fn update_type(&self) -> UpdateType {
        match self {
            UserAction::UpdatePoint { update_type, .. }
            | UserAction::AddPoint { update_type, .. }
            | UserAction::DeletePoint { update_type, .. } => *update_type,
        }
    }

    pub fn point(&self) -> &Point {
        match self {
            UserAction::UpdatePoint { point, .. }
            | UserAction::AddPoint { point, .. }
            | UserAction::DeletePoint { point, .. } => point,
        }
    }
}

/// Notification sent by the store after a committed mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvent {
    pub update_type: UpdateType,
    pub point: Point,
}
