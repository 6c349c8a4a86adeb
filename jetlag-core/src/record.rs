//! Video records as the data provider hands them over

use jetlag_common::Coordinate;

/// Group key for records that belong to no playlist
pub const UNKNOWN_GROUP: &str = "unknown";
/// Label shown for [`UNKNOWN_GROUP`]
pub const UNKNOWN_GROUP_LABEL: &str = "Unknown";

/// One video in the archive. Immutable once the catalog is built.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoRecord {
    /// Stable id (the YouTube video id)
    pub id: String,
    pub title: String,
    /// Playlist the video belongs to, or [`UNKNOWN_GROUP`]
    pub group_key: String,
    /// Human-readable playlist name
    pub group_label: String,
    /// Where the video was filmed; `None` keeps it off the map
    pub coordinate: Option<Coordinate>,
    pub published_at: Option<String>,
    /// Free-text place name the coordinate was geocoded from
    pub location: Option<String>,
}

impl VideoRecord {
    /// A record in the unknown group with no coordinate.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            group_key: UNKNOWN_GROUP.to_string(),
            group_label: UNKNOWN_GROUP_LABEL.to_string(),
            coordinate: None,
            published_at: None,
            location: None,
        }
    }

    /// Assign a group. The label falls back to the key itself, and an empty
    /// key means the unknown group.
    pub fn with_group(mut self, key: impl Into<String>, label: Option<String>) -> Self {
        let key = key.into();
        if key.trim().is_empty() || key == UNKNOWN_GROUP {
            self.group_key = UNKNOWN_GROUP.to_string();
            self.group_label = label.unwrap_or_else(|| UNKNOWN_GROUP_LABEL.to_string());
        } else {
            self.group_label = label.unwrap_or_else(|| key.clone());
            self.group_key = key;
        }
        self
    }

    /// Attach a coordinate. Unplaceable values (non-finite, `(0, 0)`) are dropped.
    pub fn with_coordinate(mut self, coordinate: Option<Coordinate>) -> Self {
        self.coordinate = coordinate.filter(Coordinate::is_placeable);
        self
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Case-insensitive substring match. `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str, include_group_label: bool) -> bool {
        self.title.to_lowercase().contains(needle)
            || (include_group_label && self.group_label.to_lowercase().contains(needle))
    }

    /// Embed URL for the popup player.
    pub fn embed_url(&self, base: &str) -> String {
        format!("{}{}", base, self.id)
    }
}
