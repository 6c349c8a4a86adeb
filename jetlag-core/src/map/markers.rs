//! Marker lifecycle: clear, place, deduplicate

use std::collections::HashMap;

use jetlag_common::{Coordinate, OverlapResolver, Positioned};
use tracing::{debug, info, trace};

use super::{MapEvent, MapSurface, MarkerSpec, Popup};
use crate::filter::DisplayedSet;
use crate::record::UNKNOWN_GROUP;

/// Where a rebuild currently is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerPhase {
    #[default]
    Idle,
    Clearing,
    Placing,
    Deduplicating,
}

/// Binding between a record and the marker placed for it
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerHandle {
    record_id: String,
    group_key: String,
    /// Coordinate from the record
    origin: Coordinate,
    /// Coordinate on the map after overlap resolution
    position: Coordinate,
}

impl MarkerHandle {
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn is_offset(&self) -> bool {
        self.origin != self.position
    }
}

impl Positioned for MarkerHandle {
    fn position(&self) -> Option<Coordinate> {
        Some(self.position)
    }

    fn set_position(&mut self, position: Coordinate) {
        self.position = position;
    }
}

/// Summary of one rebuild
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RebuildReport {
    pub revision: u64,
    pub placed: usize,
    /// Records left off the map for lack of a coordinate
    pub skipped: Vec<String>,
    /// Markers moved apart by overlap resolution
    pub offset: usize,
    pub lines: usize,
}

/// Owns every marker on the map.
///
/// Each rebuild retires all markers of the previous pass before placing the
/// new ones, so handles never outlive the next rebuild.
#[derive(Debug)]
pub struct MarkerLayer {
    handles: Vec<MarkerHandle>,
    by_id: HashMap<String, usize>,
    resolver: OverlapResolver,
    connect_groups: bool,
    embed_url_base: String,
    phase: LayerPhase,
    rendered_revision: Option<u64>,
}

impl MarkerLayer {
    pub fn new(
        resolver: OverlapResolver,
        connect_groups: bool,
        embed_url_base: impl Into<String>,
    ) -> Self {
        Self {
            handles: Vec::new(),
            by_id: HashMap::new(),
            resolver,
            connect_groups,
            embed_url_base: embed_url_base.into(),
            phase: LayerPhase::Idle,
            rendered_revision: None,
        }
    }

    /// Bring the map in line with `displayed`.
    ///
    /// Returns `None` when this revision is already on the map.
    pub fn rebuild<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        displayed: &DisplayedSet,
    ) -> Option<RebuildReport> {
        if self.rendered_revision == Some(displayed.revision()) {
            trace!("Revision {} already rendered", displayed.revision());
            return None;
        }
        Some(self.force_rebuild(surface, displayed))
    }

    /// Rebuild unconditionally.
    pub fn force_rebuild<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        displayed: &DisplayedSet,
    ) -> RebuildReport {
        let mut report = RebuildReport {
            revision: displayed.revision(),
            ..RebuildReport::default()
        };

        self.enter(LayerPhase::Clearing);
        self.clear(surface);

        self.enter(LayerPhase::Placing);
        for record in displayed.iter() {
            let Some(coordinate) = record.coordinate.filter(Coordinate::is_placeable) else {
                debug!("Skipping marker for {}: no coordinate", record.id);
                report.skipped.push(record.id.clone());
                continue;
            };
            surface.place_marker(&MarkerSpec {
                id: record.id.clone(),
                coordinate,
                popup: Popup {
                    title: record.title.clone(),
                    embed_url: record.embed_url(&self.embed_url_base),
                },
                on_click: MapEvent::MarkerClicked(record.id.clone()),
            });
            self.by_id.insert(record.id.clone(), self.handles.len());
            self.handles.push(MarkerHandle {
                record_id: record.id.clone(),
                group_key: record.group_key.clone(),
                origin: coordinate,
                position: coordinate,
            });
        }
        report.placed = self.handles.len();

        self.enter(LayerPhase::Deduplicating);
        report.offset = self.resolver.resolve(&mut self.handles);
        for handle in self.handles.iter().filter(|h| h.is_offset()) {
            surface.move_marker(&handle.record_id, handle.position);
        }

        if self.connect_groups {
            report.lines = self.connect(surface);
        }

        self.rendered_revision = Some(displayed.revision());
        self.enter(LayerPhase::Idle);
        info!(
            "Placed {} markers ({} offset, {} without coordinate)",
            report.placed,
            report.offset,
            report.skipped.len()
        );
        report
    }

    /// Retire every marker, e.g. when the view goes away.
    pub fn unmount<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        self.clear(surface);
        self.rendered_revision = None;
    }

    pub fn position_of(&self, id: &str) -> Option<Coordinate> {
        self.by_id.get(id).map(|&i| self.handles[i].position)
    }

    pub fn handles(&self) -> &[MarkerHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn phase(&self) -> LayerPhase {
        self.phase
    }

    pub fn rendered_revision(&self) -> Option<u64> {
        self.rendered_revision
    }

    fn enter(&mut self, phase: LayerPhase) {
        trace!("Marker layer {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn clear<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.remove_all_markers();
        self.handles.clear();
        self.by_id.clear();
    }

    /// One line per group through its markers in list order. Returns the
    /// number of lines drawn.
    fn connect<S: MapSurface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut groups: Vec<(&str, Vec<Coordinate>)> = Vec::new();
        for handle in self.handles.iter().filter(|h| h.group_key != UNKNOWN_GROUP) {
            let key = handle.group_key.as_str();
            match groups.iter_mut().find(|(group, _)| *group == key) {
                Some((_, path)) => path.push(handle.position),
                None => groups.push((key, vec![handle.position])),
            }
        }

        let mut lines = 0;
        for (group, path) in groups.iter().filter(|(_, path)| path.len() > 1) {
            surface.draw_polyline(group, path);
            lines += 1;
        }
        lines
    }
}
