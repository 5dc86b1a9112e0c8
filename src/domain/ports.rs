use crate::domain::events::UpdateType;
use crate::domain::model::{Destination, OfferGroup, Point};
use crate::utils::error::Result;
use crate::utils::observable::SubscriptionId;

/// Callback invoked after every committed store mutation.
pub type Observer = Box<dyn Fn(UpdateType, &Point)>;

/// The point data store the presenters read from and mutate through.
///
/// Mutations take `&self`: the store is shared between the list presenter and every row
/// presenter, and notifies observers synchronously once the change has been committed.
pub trait PointsStore {
    fn points(&self) -> Vec<Point>;
    fn offers(&self) -> Vec<OfferGroup>;
    fn destinations(&self) -> Vec<Destination>;

    fn update_point(&self, update_type: UpdateType, point: Point) -> Result<()>;
    fn add_point(&self, update_type: UpdateType, point: Point) -> Result<()>;
    fn delete_point(&self, update_type: UpdateType, point: Point) -> Result<()>;

    fn add_observer(&self, observer: Observer) -> SubscriptionId;
    fn remove_observer(&self, id: SubscriptionId) -> bool;

    fn cities(&self) -> Vec<String> {
        self.destinations().into_iter().map(|d| d.name).collect()
    }
}
