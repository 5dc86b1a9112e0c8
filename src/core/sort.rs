use crate::domain::events::SortType;
use crate::domain::model::Point;
use std::cmp::Ordering;

fn by_day(a: &Point, b: &Point) -> Ordering {
    a.date_from.cmp(&b.date_from)
}

/// Chronological by start time.
pub fn sort_by_day(points: &mut [Point]) {
    points.sort_by(by_day);
}

/// Shortest first; start time breaks ties.
pub fn sort_by_time(points: &mut [Point]) {
    points.sort_by(|a, b| a.duration().cmp(&b.duration()).then_with(|| by_day(a, b)));
}

/// Most expensive first; start time breaks ties.
pub fn sort_by_price(points: &mut [Point]) {
    points.sort_by(|a, b| b.base_price.cmp(&a.base_price).then_with(|| by_day(a, b)));
}

pub fn sort_points(mut points: Vec<Point>, sort_type: SortType) -> Vec<Point> {
    match sort_type {
        SortType::Day => sort_by_day(&mut points),
        SortType::Time => sort_by_time(&mut points),
        SortType::Price => sort_by_price(&mut points),
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PointId, PointType};
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::BTreeSet;

    fn point(id: &str, start_hour: u32, minutes: i64, price: u32) -> Point {
        let date_from = Utc.with_ymd_and_hms(2026, 5, 1, start_hour, 0, 0).unwrap();
        Point {
            id: PointId::new(id),
            date_from,
            date_to: date_from + Duration::minutes(minutes),
            base_price: price,
            destination: "Rome".to_string(),
            offers: BTreeSet::new(),
            point_type: PointType::Bus,
        }
    }

    fn ids(points: &[Point]) -> Vec<&str> {
        points.iter().map(|p| p.id.as_str()).collect()
    }

    fn fixture() -> Vec<Point> {
        vec![
            point("c", 12, 30, 50),
            point("a", 8, 120, 300),
            point("b", 10, 30, 50),
            point("d", 9, 45, 300),
        ]
    }

    #[test]
    fn test_sort_by_day_is_chronological() {
        let sorted = sort_points(fixture(), SortType::Day);
        assert_eq!(ids(&sorted), vec!["a", "d", "b", "c"]);
        assert!(sorted.windows(2).all(|w| w[0].date_from <= w[1].date_from));
    }

    #[test]
    fn test_sort_by_time_ties_fall_back_to_day() {
        let sorted = sort_points(fixture(), SortType::Time);
        assert_eq!(ids(&sorted), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_sort_by_price_descending() {
        let sorted = sort_points(fixture(), SortType::Price);
        assert_eq!(ids(&sorted), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_sorting_is_deterministic() {
        for sort_type in SortType::ALL {
            let once = sort_points(fixture(), sort_type);
            let twice = sort_points(once.clone(), sort_type);
            assert_eq!(once, twice, "{sort_type} ordering changed on re-sort");
        }
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let mut same_start = vec![point("x", 9, 30, 10), point("y", 9, 30, 10)];
        sort_by_day(&mut same_start);
        assert_eq!(ids(&same_start), vec!["x", "y"]);
        sort_by_price(&mut same_start);
        assert_eq!(ids(&same_start), vec!["x", "y"]);
    }
}
