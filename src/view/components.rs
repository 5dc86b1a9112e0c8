use crate::domain::events::SortType;
use crate::domain::model::{Destination, OfferGroup, Point};
use std::fmt;

pub const FIRST_MESSAGE: &str = "Click New Event to create your first point";

#[derive(Debug, Clone, PartialEq)]
pub struct SortView {
    pub active: SortType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointView {
    pub point: Point,
}

/// Edit form; `point` is `None` while creating a new point.
#[derive(Debug, Clone, PartialEq)]
pub struct EditPointView {
    pub point: Option<Point>,
    pub cities: Vec<String>,
    pub offers: Vec<OfferGroup>,
    pub destinations: Vec<Destination>,
}

impl EditPointView {
    pub fn for_point(point: Point, offers: Vec<OfferGroup>, destinations: Vec<Destination>) -> Self {
        let cities = destinations.iter().map(|d| d.name.clone()).collect();
        Self {
            point: Some(point),
            cities,
            offers,
            destinations,
        }
    }

    pub fn blank(cities: Vec<String>, offers: Vec<OfferGroup>, destinations: Vec<Destination>) -> Self {
        Self {
            point: None,
            cities,
            offers,
            destinations,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Sort(SortView),
    TripList,
    FirstMessage,
    Point(PointView),
    EditPoint(EditPointView),
}

impl Component {
    pub fn is_edit_form(&self) -> bool {
        matches!(self, Component::EditPoint(_))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Sort(sort) => {
                let labels: Vec<String> = SortType::ALL
                    .iter()
                    .map(|t| {
                        if *t == sort.active {
                            format!("[{t}]")
                        } else {
                            t.to_string()
                        }
                    })
                    .collect();
                write!(f, "sort: {}", labels.join(" "))
            }
            Component::TripList => write!(f, "trip-list"),
            Component::FirstMessage => write!(f, "message: {FIRST_MESSAGE}"),
            Component::Point(view) => {
                let p = &view.point;
                write!(
                    f,
                    "point {} | {} {} | {} - {} | {}",
                    p.id,
                    p.point_type,
                    p.destination,
                    p.date_from.format("%b %d %H:%M"),
                    p.date_to.format("%H:%M"),
                    p.base_price
                )
            }
            Component::EditPoint(form) => match &form.point {
                Some(p) => write!(f, "edit-form {} | {} {}", p.id, p.point_type, p.destination),
                None => write!(f, "edit-form new | {} cities", form.cities.len()),
            },
        }
    }
}
