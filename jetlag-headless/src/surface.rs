//! Map surface and list view that only log what a real widget would do

use std::collections::HashMap;

use jetlag_core::{Coordinate, ListView, MapSurface, MarkerSpec, ScrollOptions};
use tracing::{debug, info};

/// Keeps track of placed markers and logs every operation.
#[derive(Default)]
pub struct TracingSurface {
    markers: HashMap<String, Coordinate>,
    lines: usize,
    open_popup: Option<String>,
    center: Option<Coordinate>,
}

impl TracingSurface {
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn popup(&self) -> Option<&str> {
        self.open_popup.as_deref()
    }

    pub fn center(&self) -> Option<Coordinate> {
        self.center
    }
}

impl MapSurface for TracingSurface {
    fn place_marker(&mut self, marker: &MarkerSpec) {
        debug!(
            "marker {} at {} ({})",
            marker.id,
            marker.coordinate.readout(),
            marker.popup.embed_url
        );
        self.markers.insert(marker.id.clone(), marker.coordinate);
    }

    fn move_marker(&mut self, id: &str, coordinate: Coordinate) {
        debug!("marker {} moved to {}", id, coordinate.readout());
        if let Some(position) = self.markers.get_mut(id) {
            *position = coordinate;
        }
    }

    fn remove_all_markers(&mut self) {
        debug!("removing {} markers and {} lines", self.markers.len(), self.lines);
        self.markers.clear();
        self.lines = 0;
        self.open_popup = None;
    }

    fn draw_polyline(&mut self, group: &str, path: &[Coordinate]) {
        debug!("line for {} through {} points", group, path.len());
        self.lines += 1;
    }

    fn open_popup(&mut self, id: &str) {
        info!("popup open for {}", id);
        self.open_popup = Some(id.to_string());
    }

    fn pan_to(&mut self, coordinate: Coordinate) {
        info!("pan to {}", coordinate.readout());
        self.center = Some(coordinate);
    }

    fn fit_bounds(&mut self, coordinates: &[Coordinate]) {
        let Some(first) = coordinates.first() else {
            return;
        };
        let (mut south, mut west) = (first.lat, first.lng);
        let (mut north, mut east) = (first.lat, first.lng);
        for c in coordinates {
            south = south.min(c.lat);
            north = north.max(c.lat);
            west = west.min(c.lng);
            east = east.max(c.lng);
        }
        info!("fit bounds {south:.4},{west:.4} .. {north:.4},{east:.4}");
        self.center = Some(Coordinate {
            lat: (south + north) / 2.0,
            lng: (west + east) / 2.0,
        });
    }
}

/// Logs scroll requests for the sidebar.
#[derive(Default)]
pub struct TracingList {
    last_scrolled: Option<String>,
}

impl TracingList {
    pub fn last_scrolled(&self) -> Option<&str> {
        self.last_scrolled.as_deref()
    }
}

impl ListView for TracingList {
    fn scroll_into_view(&mut self, id: &str, options: ScrollOptions) {
        debug!("scroll {} into view ({:?})", id, options);
        self.last_scrolled = Some(id.to_string());
    }
}
