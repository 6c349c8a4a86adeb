//! Immutable snapshot of every record, built once at startup

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use jetlag_common::Coordinate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::groups::{GroupDirectory, GroupOption};
use crate::record::VideoRecord;

/// Catalog loading errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Entry shape of the site's `data.json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVideoEntry {
    video_id: String,
    title: String,
    #[serde(default)]
    playlist: Option<String>,
    /// `[lat, lng]`, `[]` or `null`
    #[serde(default)]
    geocode: Option<serde_json::Value>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

impl RawVideoEntry {
    fn into_record(self, directory: &GroupDirectory) -> VideoRecord {
        let coordinate = self.geocode.as_ref().and_then(parse_geocode);
        if coordinate.is_none() {
            debug!("Video {} has no usable coordinate, keeping it off the map", self.video_id);
        }

        let group_key = self.playlist.unwrap_or_default();
        let group_label = directory.label_for(&group_key);
        let mut record = VideoRecord::new(self.video_id, self.title)
            .with_group(group_key, Some(group_label))
            .with_coordinate(coordinate);
        record.published_at = self.published_at;
        record.location = self.location;
        record
    }
}

/// Read a `[lat, lng]` pair. Anything else (empty array, strings, nested
/// objects, `(0, 0)`) yields `None`.
fn parse_geocode(value: &serde_json::Value) -> Option<Coordinate> {
    let pair = value
        .as_array()?
        .iter()
        .map(serde_json::Value::as_f64)
        .collect::<Option<Vec<f64>>>()?;
    Coordinate::from_pair(&pair)
}

/// The full record set. Cloning shares the same allocation.
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Arc<[VideoRecord]>,
    index: Arc<HashMap<String, usize>>,
    directory: Arc<GroupDirectory>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new(), GroupDirectory::default())
    }
}

impl Catalog {
    /// Build a catalog, keeping the first record for any repeated id.
    pub fn new(records: Vec<VideoRecord>, directory: GroupDirectory) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());
        for record in records {
            if index.contains_key(&record.id) {
                warn!("Duplicate video id {}, keeping the first entry", record.id);
                continue;
            }
            index.insert(record.id.clone(), unique.len());
            unique.push(record);
        }

        Self {
            records: unique.into(),
            index: Arc::new(index),
            directory: Arc::new(directory),
        }
    }

    /// Parse the site's `data.json` format.
    pub fn from_json_str(json: &str, directory: GroupDirectory) -> Result<Self, CatalogError> {
        let entries: Vec<RawVideoEntry> = serde_json::from_str(json)?;
        let records = entries
            .into_iter()
            .map(|entry| entry.into_record(&directory))
            .collect();
        Ok(Self::new(records, directory))
    }

    pub fn load(path: &Path, directory: GroupDirectory) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json, directory)?;
        info!(
            "Loaded {} videos ({} placeable) from {}",
            catalog.len(),
            catalog.placeable_count(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&VideoRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that can go on the map.
    pub fn placeable_count(&self) -> usize {
        self.records.iter().filter(|r| r.coordinate.is_some()).count()
    }

    pub fn directory(&self) -> &GroupDirectory {
        &self.directory
    }

    /// Dropdown entries: the directory's groups first, then any group that
    /// only shows up in the records, in order of first appearance.
    pub fn group_options(&self) -> Vec<GroupOption> {
        let mut options = self.directory.options().to_vec();
        for record in self.records.iter() {
            if !options.iter().any(|o| o.key == record.group_key) {
                options.push(GroupOption {
                    key: record.group_key.clone(),
                    label: record.group_label.clone(),
                });
            }
        }
        options
    }

    /// Whether both catalogs are the same snapshot.
    pub fn ptr_eq(&self, other: &Catalog) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geocode_shapes() {
        assert_eq!(
            parse_geocode(&serde_json::json!([47.37, 8.54])),
            Some(Coordinate {
                lat: 47.37,
                lng: 8.54
            })
        );
        assert_eq!(parse_geocode(&serde_json::json!([])), None);
        assert_eq!(parse_geocode(&serde_json::json!([0, 0])), None);
        assert_eq!(parse_geocode(&serde_json::json!(["47", "8"])), None);
        assert_eq!(parse_geocode(&serde_json::json!({"type": "FeatureCollection"})), None);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = Catalog::new(
            vec![
                VideoRecord::new("a", "First"),
                VideoRecord::new("b", "Other"),
                VideoRecord::new("a", "Second"),
            ],
            GroupDirectory::default(),
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().title, "First");
    }

    #[test]
    fn test_clones_share_snapshot() {
        let catalog = Catalog::new(vec![VideoRecord::new("a", "A")], GroupDirectory::default());
        let other = Catalog::new(vec![VideoRecord::new("a", "A")], GroupDirectory::default());
        assert!(catalog.ptr_eq(&catalog.clone()));
        assert!(!catalog.ptr_eq(&other));
    }

    #[test]
    fn test_group_options_append_unlisted_groups() {
        let dir = GroupDirectory::empty().with_group("s1", "Connect 4");
        let catalog = Catalog::new(
            vec![
                VideoRecord::new("a", "A").with_group("s1", Some("Connect 4".into())),
                VideoRecord::new("b", "B").with_group("bonus", None),
                VideoRecord::new("c", "C"),
            ],
            dir,
        );
        let keys: Vec<_> = catalog.group_options().into_iter().map(|o| o.key).collect();
        assert_eq!(keys, vec!["s1", "bonus", "unknown"]);
    }
}
