//! Filtered view: which records the list and the map currently show

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::record::VideoRecord;

/// Active filter predicates.
///
/// The text is stored trimmed and lowercased; blank text means no text filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    groups: BTreeSet<String>,
    text: String,
    match_group_labels: bool,
}

impl FilterState {
    pub fn new(match_group_labels: bool) -> Self {
        Self {
            match_group_labels,
            ..Self::default()
        }
    }

    /// Replace the group filter. Blank keys are ignored. Returns whether it changed.
    pub fn set_groups<I, T>(&mut self, groups: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let groups: BTreeSet<String> = groups
            .into_iter()
            .map(Into::into)
            .filter(|g| !g.trim().is_empty())
            .collect();
        if groups == self.groups {
            return false;
        }
        self.groups = groups;
        true
    }

    /// Replace the text filter. Returns whether the normalized text changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.text.is_empty()
    }

    /// Indices into `all` that pass both predicates, in order.
    fn select(&self, all: &[VideoRecord]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..all.len()).collect();
        if !self.groups.is_empty() {
            indices.retain(|&i| self.groups.contains(&all[i].group_key));
        }
        if !self.text.is_empty() {
            indices.retain(|&i| all[i].matches_text(&self.text, self.match_group_labels));
        }
        indices
    }
}

/// Records of `all` that belong to one of `groups` (when any are given) and
/// whose title contains `text` (when non-blank), in their original order.
pub fn compute_displayed_set<'a>(
    all: &'a [VideoRecord],
    groups: &BTreeSet<String>,
    text: &str,
) -> Vec<&'a VideoRecord> {
    let mut filter = FilterState::default();
    filter.set_groups(groups.iter().cloned());
    filter.set_text(text);
    filter.select(all).into_iter().map(|i| &all[i]).collect()
}

/// The records currently shown. Replaced wholesale, never edited.
///
/// `revision` only moves when the membership changes, so consumers can skip
/// work for a set they have already rendered.
#[derive(Clone, Debug)]
pub struct DisplayedSet {
    catalog: Catalog,
    indices: Arc<[usize]>,
    revision: u64,
}

impl DisplayedSet {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&VideoRecord> {
        self.indices
            .get(position)
            .map(|&i| &self.catalog.records()[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &VideoRecord> + '_ {
        let records = self.catalog.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|r| r.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn to_vec(&self) -> Vec<VideoRecord> {
        self.iter().cloned().collect()
    }

    /// Whether `other` is the very same set (same allocation).
    pub fn same_as(&self, other: &DisplayedSet) -> bool {
        Arc::ptr_eq(&self.indices, &other.indices)
    }
}

/// Memoizing builder for the [`DisplayedSet`].
#[derive(Debug)]
pub struct FilteredView {
    catalog: Catalog,
    filter: FilterState,
    current: DisplayedSet,
}

impl FilteredView {
    pub fn new(catalog: Catalog, filter: FilterState) -> Self {
        let indices: Arc<[usize]> = filter.select(catalog.records()).into();
        let current = DisplayedSet {
            catalog: catalog.clone(),
            indices,
            revision: 0,
        };
        Self {
            catalog,
            filter,
            current,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn displayed(&self) -> &DisplayedSet {
        &self.current
    }

    /// Returns whether the displayed set changed.
    pub fn set_group_filter<I, T>(&mut self, groups: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.filter.set_groups(groups) && self.recompute()
    }

    /// Returns whether the displayed set changed.
    pub fn set_text_filter(&mut self, text: &str) -> bool {
        self.filter.set_text(text) && self.recompute()
    }

    /// Swap in a new snapshot. Returns whether the displayed set changed.
    pub fn set_catalog(&mut self, catalog: Catalog) -> bool {
        if catalog.ptr_eq(&self.catalog) {
            return false;
        }
        self.catalog = catalog;
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let indices = self.filter.select(self.catalog.records());
        let same_source = self.current.catalog.ptr_eq(&self.catalog);
        if same_source && *self.current.indices == *indices {
            debug!("Filter change left the displayed set as it was");
            return false;
        }

        self.current = DisplayedSet {
            catalog: self.catalog.clone(),
            indices: indices.into(),
            revision: self.current.revision + 1,
        };
        debug!(
            "Displayed set revision {} holds {} records",
            self.current.revision,
            self.current.len()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupDirectory;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                VideoRecord::new("1", "Tag EUR It Episode 1").with_group("s3", None),
                VideoRecord::new("2", "Circumnavigation Begins").with_group("s2", None),
                VideoRecord::new("3", "Tag EUR It Finale").with_group("s3", None),
                VideoRecord::new("4", "Bonus"),
            ],
            GroupDirectory::default(),
        )
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let view = FilteredView::new(catalog(), FilterState::default());
        assert_eq!(view.displayed().ids(), vec!["1", "2", "3", "4"]);
        assert_eq!(view.displayed().revision(), 0);
    }

    #[test]
    fn test_blank_text_is_no_filter() {
        let mut filter = FilterState::default();
        assert!(!filter.set_text("   "));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_text_is_normalized() {
        let mut filter = FilterState::default();
        assert!(filter.set_text("  TAG "));
        assert_eq!(filter.text(), "tag");
        assert!(!filter.set_text("tag"));
    }

    #[test]
    fn test_group_then_text_narrows() {
        let mut view = FilteredView::new(catalog(), FilterState::default());
        assert!(view.set_group_filter(["s3"]));
        assert_eq!(view.displayed().ids(), vec!["1", "3"]);
        assert!(view.set_text_filter("finale"));
        assert_eq!(view.displayed().ids(), vec!["3"]);
    }

    #[test]
    fn test_same_filter_keeps_same_set() {
        let mut view = FilteredView::new(catalog(), FilterState::default());
        view.set_text_filter("tag");
        let before = view.displayed().clone();
        assert!(!view.set_text_filter("TAG"));
        assert!(view.displayed().same_as(&before));
    }

    #[test]
    fn test_different_filter_same_result_keeps_revision() {
        let mut view = FilteredView::new(catalog(), FilterState::default());
        view.set_text_filter("tag eur");
        let before = view.displayed().clone();
        assert!(!view.set_text_filter("tag eur it"));
        assert!(view.displayed().same_as(&before));
        assert_eq!(view.displayed().revision(), before.revision());
    }

    #[test]
    fn test_new_catalog_bumps_revision() {
        let mut view = FilteredView::new(catalog(), FilterState::default());
        assert!(view.set_catalog(catalog()));
        assert_eq!(view.displayed().revision(), 1);
        let same = view.catalog().clone();
        assert!(!view.set_catalog(same));
    }

    #[test]
    fn test_label_matching_is_opt_in() {
        let mut view = FilteredView::new(catalog(), FilterState::new(true));
        view.set_text_filter("unknown");
        assert_eq!(view.displayed().ids(), vec!["4"]);

        let mut view = FilteredView::new(catalog(), FilterState::default());
        view.set_text_filter("unknown");
        assert!(view.displayed().is_empty());
    }
}
