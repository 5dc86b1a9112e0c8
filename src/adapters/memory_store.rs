use crate::domain::events::UpdateType;
use crate::domain::model::{Destination, OfferGroup, Point, PointId};
use crate::domain::ports::{Observer, PointsStore};
use crate::utils::error::{Result, TripError};
use crate::utils::observable::{Observable, SubscriptionId};
use crate::utils::validation::find_duplicate;
use std::cell::RefCell;
use std::rc::Rc;

type Listener = dyn Fn(UpdateType, &Point);

/// In-memory point store.
///
/// Keeps points in insertion order; ordering for display is the list presenter's job.
pub struct PointsModel {
    points: RefCell<Vec<Point>>,
    offers: Vec<OfferGroup>,
    destinations: Vec<Destination>,
    observers: Observable<Listener>,
}

impl std::fmt::Debug for PointsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointsModel")
            .field("points", &self.points)
            .field("offers", &self.offers)
            .field("destinations", &self.destinations)
            .finish_non_exhaustive()
    }
}

impl PointsModel {
    /// Fails with `DuplicatePoint` when two seed points share an id.
    pub fn new(
        points: Vec<Point>,
        offers: Vec<OfferGroup>,
        destinations: Vec<Destination>,
    ) -> Result<Self> {
        if let Some(id) = find_duplicate(points.iter().map(|p| &p.id)) {
            return Err(TripError::DuplicatePoint { id: id.clone() });
        }

        Ok(Self {
            points: RefCell::new(points),
            offers,
            destinations,
            observers: Observable::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.borrow().is_empty()
    }

    pub fn get(&self, id: &PointId) -> Option<Point> {
        self.points.borrow().iter().find(|p| &p.id == id).cloned()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&self, update_type: UpdateType, point: &Point) {
        // Borrow on `points` is released by the callers before this runs.
        for observer in self.observers.snapshot() {
            observer(update_type, point);
        }
    }

    fn position(&self, point: &Point) -> Option<usize> {
        self.points.borrow().iter().position(|p| p.id == point.id)
    }
}

impl PointsStore for PointsModel {
    fn points(&self) -> Vec<Point> {
        self.points.borrow().clone()
    }

    fn offers(&self) -> Vec<OfferGroup> {
        self.offers.clone()
    }

    fn destinations(&self) -> Vec<Destination> {
        self.destinations.clone()
    }

    fn update_point(&self, update_type: UpdateType, point: Point) -> Result<()> {
        let Some(index) = self.position(&point) else {
            tracing::warn!(id = %point.id, "Rejected update of unknown point");
            return Err(TripError::PointNotFound { id: point.id });
        };

        self.points.borrow_mut()[index] = point.clone();
        tracing::debug!(id = %point.id, ?update_type, "Point updated");
        self.notify(update_type, &point);
        Ok(())
    }

    fn add_point(&self, update_type: UpdateType, point: Point) -> Result<()> {
        if self.position(&point).is_some() {
            tracing::warn!(id = %point.id, "Rejected add of existing point");
            return Err(TripError::DuplicatePoint { id: point.id });
        }

        self.points.borrow_mut().insert(0, point.clone());
        tracing::debug!(id = %point.id, ?update_type, "Point added");
        self.notify(update_type, &point);
        Ok(())
    }

    fn delete_point(&self, update_type: UpdateType, point: Point) -> Result<()> {
        let Some(index) = self.position(&point) else {
            tracing::warn!(id = %point.id, "Rejected delete of unknown point");
            return Err(TripError::PointNotFound { id: point.id });
        };

        self.points.borrow_mut().remove(index);
        tracing::debug!(id = %point.id, ?update_type, "Point deleted");
        self.notify(update_type, &point);
        Ok(())
    }

    fn add_observer(&self, observer: Observer) -> SubscriptionId {
        self.observers.subscribe(Rc::from(observer))
    }

    fn remove_observer(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PointType;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn point(id: &str, price: u32) -> Point {
        Point {
            id: PointId::new(id),
            date_from: Utc.with_ymd_and_hms(2026, 1, 2, 8, 0, 0).unwrap(),
            date_to: Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap(),
            base_price: price,
            destination: "Oslo".to_string(),
            offers: BTreeSet::new(),
            point_type: PointType::Train,
        }
    }

    fn recording_model(points: Vec<Point>) -> (PointsModel, Rc<RefCell<Vec<(UpdateType, String)>>>) {
        let model = PointsModel::new(points, vec![], vec![]).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        model.add_observer(Box::new(move |update_type: UpdateType, point: &Point| {
            sink.borrow_mut().push((update_type, point.id.to_string()));
        }));
        (model, log)
    }

    #[test]
    fn test_update_notifies_after_commit() {
        let (model, log) = recording_model(vec![point("a", 10)]);
        model.update_point(UpdateType::Patch, point("a", 99)).unwrap();

        assert_eq!(model.get(&PointId::new("a")).unwrap().base_price, 99);
        assert_eq!(*log.borrow(), vec![(UpdateType::Patch, "a".to_string())]);
    }

    #[test]
    fn test_observer_sees_committed_state() {
        let model = Rc::new(PointsModel::new(vec![], vec![], vec![]).unwrap());
        let seen = Rc::new(RefCell::new(0));
        let handle = Rc::downgrade(&model);
        let counter = Rc::clone(&seen);
        model.add_observer(Box::new(move |_: UpdateType, _: &Point| {
            if let Some(model) = handle.upgrade() {
                *counter.borrow_mut() = model.points().len();
            }
        }));

        model.add_point(UpdateType::Minor, point("n", 5)).unwrap();
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn test_unknown_point_is_rejected_without_notification() {
        let (model, log) = recording_model(vec![point("a", 10)]);

        let err = model.update_point(UpdateType::Patch, point("zzz", 1)).unwrap_err();
        assert!(matches!(err, TripError::PointNotFound { .. }));
        assert!(model.delete_point(UpdateType::Minor, point("zzz", 1)).is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_duplicate_seed_ids_are_rejected() {
        let result = PointsModel::new(vec![point("a", 10), point("a", 20)], vec![], vec![]);
        assert!(matches!(result, Err(TripError::DuplicatePoint { id }) if id == PointId::new("a")));
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let (model, _log) = recording_model(vec![point("a", 10)]);
        let err = model.add_point(UpdateType::Minor, point("a", 10)).unwrap_err();
        assert!(err.is_store_rejection());
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_delete_and_remove_observer() {
        let (model, log) = recording_model(vec![point("a", 10), point("b", 20)]);
        model.delete_point(UpdateType::Minor, point("a", 10)).unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(log.borrow().len(), 1);

        let id = model.add_observer(Box::new(|_: UpdateType, _: &Point| {}));
        assert_eq!(model.observer_count(), 2);
        assert!(model.remove_observer(id));
        assert_eq!(model.observer_count(), 1);
    }
}
