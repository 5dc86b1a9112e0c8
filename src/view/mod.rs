// Rendering primitives and the components the presenters mount.

pub mod components;
pub mod render;

pub use components::{Component, EditPointView, PointView, SortView};
pub use render::{Container, NodeId, RenderPosition, SharedView, ViewTree};
