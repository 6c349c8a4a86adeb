//! Playlist directory: group keys and their display names

use serde::Serialize;

use crate::record::{UNKNOWN_GROUP, UNKNOWN_GROUP_LABEL};

/// Playlists of the archive, in the order the dropdown lists them
const SEASONS: &[(&str, &str)] = &[
    ("s1", "Connect 4"),
    ("s2", "Circumnavigation"),
    ("s3", "Tag EUR It"),
    ("s4", "Battle 4 America"),
    ("s5", "Race to the End of the World"),
    ("s6", "Capture the Flag"),
    ("s7", "Tag EUR It 2"),
    ("s8", "Arctic Escape"),
    ("s9", "Hide + Seek: Switzerland"),
    ("s10", "Au$tralia"),
    ("s11", "Tag EUR It 3"),
    ("s12", "Hide + Seek: Japan"),
    ("s13", "Schengen Showdown"),
];

/// One entry of the group dropdown
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupOption {
    pub key: String,
    pub label: String,
}

/// Ordered lookup from group key to label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupDirectory {
    entries: Vec<GroupOption>,
}

impl Default for GroupDirectory {
    fn default() -> Self {
        SEASONS
            .iter()
            .fold(Self::empty(), |dir, (key, label)| dir.with_group(*key, *label))
    }
}

impl GroupDirectory {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or relabel a group. New groups go to the end.
    pub fn with_group(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        let key = key.into();
        let label = label.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => existing.label = label,
            None => self.entries.push(GroupOption { key, label }),
        }
        self
    }

    /// Label for `key`, if the directory knows it.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.label.as_str())
    }

    /// Label for `key`, falling back to the key itself.
    pub fn label_for(&self, key: &str) -> String {
        if key.is_empty() || key == UNKNOWN_GROUP {
            return self
                .lookup(UNKNOWN_GROUP)
                .unwrap_or(UNKNOWN_GROUP_LABEL)
                .to_string();
        }
        self.lookup(key).unwrap_or(key).to_string()
    }

    pub fn options(&self) -> &[GroupOption] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
