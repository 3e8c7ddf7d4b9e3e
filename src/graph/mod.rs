//! Core graph data structures

mod model;
mod orientation;

pub use model::{GraphModel, InputEdge, Neighbor};
pub use orientation::Orientation;
