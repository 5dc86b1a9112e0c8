use crate::domain::model::PointDraft;
use crate::utils::error::{Result, TripError};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::hash::Hash;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TripError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_date_range(
    field_name: &str,
    date_from: DateTime<Utc>,
    date_to: DateTime<Utc>,
) -> Result<()> {
    if date_to < date_from {
        return Err(TripError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{} .. {}", date_from.to_rfc3339(), date_to.to_rfc3339()),
            reason: "End time is before start time".to_string(),
        });
    }
    Ok(())
}

/// Returns the first value that occurs more than once.
pub fn find_duplicate<'a, T, I>(values: I) -> Option<&'a T>
where
    T: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    values.into_iter().find(|value| !seen.insert(*value))
}

impl Validate for PointDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("destination", &self.destination)?;
        validate_date_range("date_to", self.date_from, self.date_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PointType;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn draft() -> PointDraft {
        PointDraft {
            date_from: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            date_to: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
            base_price: 100,
            destination: "Amsterdam".to_string(),
            offers: BTreeSet::new(),
            point_type: PointType::Taxi,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_reversed_dates() {
        let mut reversed = draft();
        std::mem::swap(&mut reversed.date_from, &mut reversed.date_to);
        assert!(reversed.validate().is_err());
    }

    #[test]
    fn test_draft_rejects_blank_destination() {
        let mut blank = draft();
        blank.destination = "  ".to_string();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_find_duplicate() {
        let ids = ["a", "b", "a"];
        assert_eq!(find_duplicate(ids.iter()), Some(&"a"));
        assert_eq!(find_duplicate(["a", "b"].iter()), None);
    }
}
