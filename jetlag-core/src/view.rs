//! The map view as the UI shell sees it
//!
//! [`MapView`] owns the map surface and the list widget handle, and is the
//! only thing that mutates either. Filter setters recompute the displayed set
//! and rebuild the markers when (and only when) the set changed; selection
//! setters run the synchronizer with both views as observers.

use jetlag_common::{Coordinate, SelectionChange};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::filter::{DisplayedSet, FilterState, FilteredView};
use crate::groups::GroupOption;
use crate::map::markers::{MarkerLayer, RebuildReport};
use crate::map::{MapEvent, MapSurface, TileLayer, Viewport};
use crate::record::VideoRecord;
use crate::selection_sync::{ListFocus, ListView, MapFocus, ScrollOptions, SelectionSynchronizer};

/// One sidebar row
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub title: String,
    pub group_label: String,
    /// Coordinate formatted for display, `None` when the record is not on the map
    pub location: Option<String>,
    pub coordinate: Option<[f64; 2]>,
    pub active: bool,
}

pub struct MapView<S: MapSurface, L: ListView> {
    view: FilteredView,
    markers: MarkerLayer,
    selection: SelectionSynchronizer,
    surface: S,
    list: L,
    viewport: Viewport,
    tiles: TileLayer,
    scroll: ScrollOptions,
}

impl<S: MapSurface, L: ListView> MapView<S, L> {
    /// Build the view and place the initial markers.
    pub fn new(catalog: Catalog, config: &Config, surface: S, list: L) -> Self {
        let mut view = Self {
            view: FilteredView::new(catalog, FilterState::new(config.match_group_labels)),
            markers: MarkerLayer::new(
                config.overlap,
                config.connect_groups,
                config.embed_url_base.clone(),
            ),
            selection: SelectionSynchronizer::new(config.reselect),
            surface,
            list,
            viewport: config.viewport(),
            tiles: config.tile_layer(),
            scroll: ScrollOptions::default(),
        };
        info!(
            "Map view ready with {} of {} videos",
            view.view.displayed().len(),
            view.view.catalog().len()
        );
        view.refresh();
        view
    }

    pub fn set_group_filter<I, T>(&mut self, groups: I) -> Option<RebuildReport>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        if self.view.set_group_filter(groups) {
            self.refresh()
        } else {
            None
        }
    }

    pub fn set_text_filter(&mut self, text: &str) -> Option<RebuildReport> {
        if self.view.set_text_filter(text) {
            self.refresh()
        } else {
            None
        }
    }

    /// Replace the record snapshot, e.g. after the data provider reloaded.
    pub fn set_catalog(&mut self, catalog: Catalog) -> Option<RebuildReport> {
        if self.view.set_catalog(catalog) {
            self.refresh()
        } else {
            None
        }
    }

    /// Rebuild markers if the displayed set moved past what is on the map.
    pub fn refresh(&mut self) -> Option<RebuildReport> {
        self.markers.rebuild(&mut self.surface, self.view.displayed())
    }

    pub fn displayed_set(&self) -> &DisplayedSet {
        self.view.displayed()
    }

    pub fn filter(&self) -> &FilterState {
        self.view.filter()
    }

    /// Hidden ids are stored without scrolling the list or moving the map.
    pub fn set_active(&mut self, id: &str) -> SelectionChange {
        let mut map = MapFocus::new(&self.markers, &mut self.surface);
        if !self.view.displayed().contains(id) {
            debug!("Selecting {} which is not displayed", id);
            return self.selection.set_active(id, &mut [&mut map]);
        }
        let mut list = ListFocus::new(&mut self.list, self.scroll);
        self.selection.set_active(id, &mut [&mut list, &mut map])
    }

    pub fn clear_active(&mut self) -> SelectionChange {
        let mut list = ListFocus::new(&mut self.list, self.scroll);
        let mut map = MapFocus::new(&self.markers, &mut self.surface);
        self.selection.clear(&mut [&mut list, &mut map])
    }

    pub fn active(&self) -> Option<&str> {
        self.selection.active()
    }

    pub fn active_record(&self) -> Option<&VideoRecord> {
        self.active().and_then(|id| self.view.catalog().get(id))
    }

    /// Zoom the map onto the active marker. Returns false when there is no
    /// active marker on the map.
    pub fn focus_active(&mut self) -> bool {
        let Some(position) = self.active().and_then(|id| self.markers.position_of(id)) else {
            return false;
        };
        self.surface.fit_bounds(&[position]);
        true
    }

    /// Zoom the map out to every placed marker.
    pub fn fit_all(&mut self) -> bool {
        let positions: Vec<Coordinate> = self
            .markers
            .handles()
            .iter()
            .map(|h| h.position())
            .collect();
        if positions.is_empty() {
            return false;
        }
        self.surface.fit_bounds(&positions);
        true
    }

    /// Deliver an event raised by the map surface.
    pub fn handle_event(&mut self, event: MapEvent) -> SelectionChange {
        match event {
            MapEvent::MarkerClicked(id) => self.set_active(&id),
        }
    }

    pub fn list_rows(&self) -> Vec<ListRow> {
        self.view
            .displayed()
            .iter()
            .map(|record| ListRow {
                id: record.id.clone(),
                title: record.title.clone(),
                group_label: record.group_label.clone(),
                location: record.coordinate.map(|c| c.label()),
                coordinate: record.coordinate.map(Into::into),
                active: self.selection.is_active(&record.id),
            })
            .collect()
    }

    pub fn groups(&self) -> Vec<GroupOption> {
        self.view.catalog().group_options()
    }

    pub fn initial_viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tile_layer(&self) -> &TileLayer {
        &self.tiles
    }

    /// Marker position on the map, after overlap resolution.
    pub fn marker_position(&self, id: &str) -> Option<Coordinate> {
        self.markers.position_of(id)
    }

    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    /// Tear down: retire all markers and hand back the widgets.
    pub fn unmount(mut self) -> (S, L) {
        self.markers.unmount(&mut self.surface);
        (self.surface, self.list)
    }
}
