use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque point identifier, assigned once when the point is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointType {
    Taxi,
    Bus,
    Train,
    Ship,
    Drive,
    Flight,
    CheckIn,
    Sightseeing,
    Restaurant,
}

impl PointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::Taxi => "taxi",
            PointType::Bus => "bus",
            PointType::Train => "train",
            PointType::Ship => "ship",
            PointType::Drive => "drive",
            PointType::Flight => "flight",
            PointType::CheckIn => "check-in",
            PointType::Sightseeing => "sightseeing",
            PointType::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: u32,
    pub title: String,
    pub price: u32,
}

/// Offers available for one point type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferGroup {
    #[serde(rename = "type")]
    pub point_type: PointType,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Field set submitted by an edit form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDraft {
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    pub destination: String,
    #[serde(default)]
    pub offers: BTreeSet<u32>,
    #[serde(rename = "type")]
    pub point_type: PointType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    pub destination: String,
    #[serde(default)]
    pub offers: BTreeSet<u32>,
    #[serde(rename = "type")]
    pub point_type: PointType,
}

impl Point {
    pub fn from_draft(id: PointId, draft: PointDraft) -> Self {
        Self {
            id,
            date_from: draft.date_from,
            date_to: draft.date_to,
            base_price: draft.base_price,
            destination: draft.destination,
            offers: draft.offers,
            point_type: draft.point_type,
        }
    }

    pub fn duration(&self) -> Duration {
        self.date_to - self.date_from
    }

    /// True when `other` differs in a field the list is ordered by.
    pub fn differs_in_ordering(&self, other: &Point) -> bool {
        self.date_from != other.date_from
            || self.date_to != other.date_to
            || self.base_price != other.base_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Point {
        Point {
            id: PointId::new("p1"),
            date_from: Utc.with_ymd_and_hms(2026, 7, 10, 10, 0, 0).unwrap(),
            date_to: Utc.with_ymd_and_hms(2026, 7, 10, 11, 30, 0).unwrap(),
            base_price: 120,
            destination: "Geneva".to_string(),
            offers: BTreeSet::from([1, 3]),
            point_type: PointType::Taxi,
        }
    }

    #[test]
    fn test_duration() {
        assert_eq!(sample().duration(), Duration::minutes(90));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(PointId::generate(), PointId::generate());
    }

    #[test]
    fn test_differs_in_ordering() {
        let point = sample();
        let mut renamed = point.clone();
        renamed.destination = "Chamonix".to_string();
        assert!(!point.differs_in_ordering(&renamed));

        let mut repriced = point.clone();
        repriced.base_price = 10;
        assert!(point.differs_in_ordering(&repriced));
    }

    #[test]
    fn test_point_type_serializes_kebab_case() {
        let json = serde_json::to_string(&PointType::CheckIn).unwrap();
        assert_eq!(json, "\"check-in\"");
    }
}
