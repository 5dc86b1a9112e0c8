use crate::adapters::PointsModel;
use crate::domain::events::SortType;
use crate::domain::model::{Destination, OfferGroup, Point, PointDraft, PointId, PointType};
use crate::utils::error::{Result, TripError};
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripConfig {
    pub board: BoardConfig,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub offers: Vec<OfferGroup>,
    #[serde(default)]
    pub points: Vec<PointConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub title: Option<String>,
    pub sort: Option<SortType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointConfig {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    pub destination: String,
    #[serde(default)]
    pub offers: BTreeSet<u32>,
}

impl PointConfig {
    pub fn to_draft(&self) -> PointDraft {
        PointDraft {
            date_from: self.date_from,
            date_to: self.date_to,
            base_price: self.base_price,
            destination: self.destination.clone(),
            offers: self.offers.clone(),
            point_type: self.point_type,
        }
    }

    /// Points without an explicit id get a generated one.
    pub fn to_point(&self) -> Point {
        let id = self
            .id
            .as_deref()
            .map(PointId::new)
            .unwrap_or_else(PointId::generate);
        Point::from_draft(id, self.to_draft())
    }
}

impl TripConfig {
    /// Loads and parses a trip file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value, leaving unknown variables as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TripError::ConfigError {
            message: format!("invalid substitution pattern: {e}"),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(title) = &self.board.title {
            validation::validate_non_empty_string("board.title", title)?;
        }

        if let Some(name) = validation::find_duplicate(self.destinations.iter().map(|d| &d.name)) {
            return Err(TripError::InvalidConfigValueError {
                field: "destinations.name".to_string(),
                value: name.clone(),
                reason: "Duplicate destination".to_string(),
            });
        }

        let explicit_ids: Vec<&String> = self.points.iter().filter_map(|p| p.id.as_ref()).collect();
        if let Some(id) = validation::find_duplicate(explicit_ids) {
            return Err(TripError::InvalidConfigValueError {
                field: "points.id".to_string(),
                value: id.clone(),
                reason: "Duplicate point id".to_string(),
            });
        }

        let known: HashSet<&str> = self.destinations.iter().map(|d| d.name.as_str()).collect();
        for point in &self.points {
            point.to_draft().validate()?;

            if !known.contains(point.destination.as_str()) {
                return Err(TripError::InvalidConfigValueError {
                    field: "points.destination".to_string(),
                    value: point.destination.clone(),
                    reason: "Unknown destination".to_string(),
                });
            }

            let offered: HashSet<u32> = self
                .offers
                .iter()
                .filter(|group| group.point_type == point.point_type)
                .flat_map(|group| group.offers.iter().map(|o| o.id))
                .collect();
            if let Some(missing) = point.offers.iter().find(|id| !offered.contains(*id)) {
                return Err(TripError::InvalidConfigValueError {
                    field: "points.offers".to_string(),
                    value: missing.to_string(),
                    reason: format!("Offer not available for type {}", point.point_type),
                });
            }
        }

        Ok(())
    }

    pub fn title(&self) -> &str {
        self.board.title.as_deref().unwrap_or("Trip")
    }

    pub fn initial_sort(&self) -> SortType {
        self.board.sort.unwrap_or_default()
    }

    /// Validates the config and seeds an in-memory store from it.
    pub fn into_store(self) -> Result<PointsModel> {
        self.validate_config()?;
        let points = self.points.iter().map(PointConfig::to_point).collect();
        PointsModel::new(points, self.offers, self.destinations)
    }
}

impl Validate for TripConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
