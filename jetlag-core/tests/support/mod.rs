#![allow(dead_code)]

use jetlag_core::{
    Catalog, Coordinate, GroupDirectory, ListView, MapSurface, MarkerSpec, ScrollOptions,
    VideoRecord,
};
use std::collections::HashMap;

/// Every call the core made on the map, in order
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    Place(String, Coordinate),
    Move(String, Coordinate),
    RemoveAll,
    Polyline(String, Vec<Coordinate>),
    OpenPopup(String),
    PanTo(Coordinate),
    FitBounds(Vec<Coordinate>),
}

/// Fake map that records calls and tracks what is currently placed
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub markers: HashMap<String, MarkerSpec>,
    pub lines: Vec<(String, Vec<Coordinate>)>,
}

impl RecordingSurface {
    pub fn position(&self, id: &str) -> Option<Coordinate> {
        self.markers.get(id).map(|m| m.coordinate)
    }

    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl MapSurface for RecordingSurface {
    fn place_marker(&mut self, marker: &MarkerSpec) {
        self.calls.push(SurfaceCall::Place(marker.id.clone(), marker.coordinate));
        self.markers.insert(marker.id.clone(), marker.clone());
    }

    fn move_marker(&mut self, id: &str, coordinate: Coordinate) {
        self.calls.push(SurfaceCall::Move(id.to_string(), coordinate));
        if let Some(marker) = self.markers.get_mut(id) {
            marker.coordinate = coordinate;
        }
    }

    fn remove_all_markers(&mut self) {
        self.calls.push(SurfaceCall::RemoveAll);
        self.markers.clear();
        self.lines.clear();
    }

    fn draw_polyline(&mut self, group: &str, path: &[Coordinate]) {
        self.calls.push(SurfaceCall::Polyline(group.to_string(), path.to_vec()));
        self.lines.push((group.to_string(), path.to_vec()));
    }

    fn open_popup(&mut self, id: &str) {
        self.calls.push(SurfaceCall::OpenPopup(id.to_string()));
    }

    fn pan_to(&mut self, coordinate: Coordinate) {
        self.calls.push(SurfaceCall::PanTo(coordinate));
    }

    fn fit_bounds(&mut self, coordinates: &[Coordinate]) {
        self.calls.push(SurfaceCall::FitBounds(coordinates.to_vec()));
    }
}

/// Fake sidebar that records scroll requests
#[derive(Default)]
pub struct RecordingList {
    pub scrolled: Vec<(String, ScrollOptions)>,
}

impl ListView for RecordingList {
    fn scroll_into_view(&mut self, id: &str, options: ScrollOptions) {
        self.scrolled.push((id.to_string(), options));
    }
}

pub fn video(id: &str, title: &str, group: &str, coordinate: Option<(f64, f64)>) -> VideoRecord {
    VideoRecord::new(id, title)
        .with_group(group, None)
        .with_coordinate(coordinate.and_then(|(lat, lng)| Coordinate::new(lat, lng)))
}

pub fn catalog(records: Vec<VideoRecord>) -> Catalog {
    Catalog::new(records, GroupDirectory::default())
}

pub fn approx(a: Coordinate, lat: f64, lng: f64) -> bool {
    (a.lat - lat).abs() < 1e-9 && (a.lng - lng).abs() < 1e-9
}
