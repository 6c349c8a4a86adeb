//! jetlag-core - map state for the travel game video archive
//!
//! Turns an immutable [`Catalog`] of video records into a filtered list and a
//! set of map markers, and keeps one active record in sync between the two.
//! The real map widget and list widget are driven through [`MapSurface`] and
//! [`ListView`].

pub mod catalog;
pub mod config;
pub mod filter;
pub mod groups;
pub mod map;
pub mod record;
pub mod selection_sync;
pub mod view;

pub use catalog::{Catalog, CatalogError};
pub use config::{Config, ConfigError};
pub use filter::{compute_displayed_set, DisplayedSet, FilterState, FilteredView};
pub use groups::{GroupDirectory, GroupOption};
pub use map::markers::{LayerPhase, MarkerHandle, MarkerLayer, RebuildReport};
pub use map::{MapEvent, MapSurface, MarkerSpec, Popup, TileLayer, Viewport};
pub use record::{VideoRecord, UNKNOWN_GROUP, UNKNOWN_GROUP_LABEL};
pub use selection_sync::{
    ListFocus, ListView, MapFocus, ScrollBehavior, ScrollBlock, ScrollOptions, SelectionObserver,
    SelectionSynchronizer,
};
pub use view::{ListRow, MapView};

pub use jetlag_common::{Coordinate, ReselectPolicy, SelectionChange};
