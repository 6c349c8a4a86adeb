//! Narrow interface to the map widget
//!
//! The core never talks to a tile library directly. Everything it needs from
//! the map goes through [`MapSurface`], which a real widget or a test fake
//! implements.

pub mod markers;

use jetlag_common::Coordinate;

/// Event a marker hands back to the view when it is clicked
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapEvent {
    MarkerClicked(String),
}

/// Popup content bound to a marker
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub title: String,
    /// Video player URL shown inside the popup
    pub embed_url: String,
}

/// Everything the surface needs to put one marker on the map
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    /// Record id, also used to address the marker later
    pub id: String,
    pub coordinate: Coordinate,
    pub popup: Popup,
    /// Event to deliver back through `MapView::handle_event` on click
    pub on_click: MapEvent,
}

/// Map center and zoom
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Tile provider settings for the base layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayer {
    pub url: String,
    pub max_zoom: u8,
    pub attribution: String,
}

/// Operations the core drives on the map widget.
///
/// Only [`markers::MarkerLayer`] places or removes markers.
pub trait MapSurface {
    fn place_marker(&mut self, marker: &MarkerSpec);

    /// Move an already placed marker.
    fn move_marker(&mut self, id: &str, coordinate: Coordinate);

    /// Remove every marker and line placed so far.
    fn remove_all_markers(&mut self);

    /// Draw a line through `path`. Surfaces without line support ignore it.
    fn draw_polyline(&mut self, _group: &str, _path: &[Coordinate]) {}

    fn open_popup(&mut self, id: &str);

    /// Recenter without changing the zoom.
    fn pan_to(&mut self, coordinate: Coordinate);

    fn fit_bounds(&mut self, coordinates: &[Coordinate]);
}
