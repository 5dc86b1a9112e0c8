// Domain layer: itinerary entities, the action/update vocabulary and the store port.

pub mod events;
pub mod model;
pub mod ports;
