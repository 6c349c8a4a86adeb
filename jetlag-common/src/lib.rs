//! jetlag-common - pure data structures shared by the map core
//!
//! Nothing in here touches a map, a list widget, or the filesystem.

pub mod coordinate;
pub mod overlap;
pub mod reselect_policy;
pub mod selection;

pub use coordinate::Coordinate;
pub use overlap::{resolve_overlaps, OverlapResolver, Positioned};
pub use reselect_policy::ReselectPolicy;
pub use selection::{ActiveSelection, SelectionChange};
