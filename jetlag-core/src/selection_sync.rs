//! Selection synchronizer: one active record, fanned out to list and map

use jetlag_common::{ActiveSelection, ReselectPolicy, SelectionChange};
use tracing::debug;

use crate::map::markers::MarkerLayer;
use crate::map::MapSurface;

/// How a list scroll animates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Which edge of the viewport the row aligns to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBlock {
    /// Scroll as little as possible to make the row visible
    #[default]
    Nearest,
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// The sidebar list, as far as the core is concerned.
pub trait ListView {
    /// Bring the row for `id` into view. Must return without waiting for the
    /// scroll to finish.
    fn scroll_into_view(&mut self, id: &str, options: ScrollOptions);
}

/// Reacts to selection changes. Implementations must not block.
pub trait SelectionObserver {
    fn selection_changed(&mut self, change: &SelectionChange);
}

/// Scrolls the list to the newly active row.
pub struct ListFocus<'a, L: ListView + ?Sized> {
    list: &'a mut L,
    options: ScrollOptions,
}

impl<'a, L: ListView + ?Sized> ListFocus<'a, L> {
    pub fn new(list: &'a mut L, options: ScrollOptions) -> Self {
        Self { list, options }
    }
}

impl<L: ListView + ?Sized> SelectionObserver for ListFocus<'_, L> {
    fn selection_changed(&mut self, change: &SelectionChange) {
        if let SelectionChange::Selected(id) = change {
            self.list.scroll_into_view(id, self.options);
        }
    }
}

/// Opens the popup of the newly active marker and pans to it.
pub struct MapFocus<'a, S: MapSurface + ?Sized> {
    markers: &'a MarkerLayer,
    surface: &'a mut S,
}

impl<'a, S: MapSurface + ?Sized> MapFocus<'a, S> {
    pub fn new(markers: &'a MarkerLayer, surface: &'a mut S) -> Self {
        Self { markers, surface }
    }
}

impl<S: MapSurface + ?Sized> SelectionObserver for MapFocus<'_, S> {
    fn selection_changed(&mut self, change: &SelectionChange) {
        let SelectionChange::Selected(id) = change else {
            return;
        };
        match self.markers.position_of(id) {
            Some(position) => {
                self.surface.open_popup(id);
                self.surface.pan_to(position);
            }
            None => debug!("No marker for {}, map stays put", id),
        }
    }
}

/// Holds the active selection and notifies observers when it changes.
#[derive(Debug, Default)]
pub struct SelectionSynchronizer {
    selection: ActiveSelection,
}

impl SelectionSynchronizer {
    pub fn new(policy: ReselectPolicy) -> Self {
        Self {
            selection: ActiveSelection::new(policy),
        }
    }

    pub fn set_active(
        &mut self,
        id: &str,
        observers: &mut [&mut dyn SelectionObserver],
    ) -> SelectionChange {
        let change = self.selection.select(id);
        self.notify(&change, observers);
        change
    }

    pub fn clear(&mut self, observers: &mut [&mut dyn SelectionObserver]) -> SelectionChange {
        let change = self.selection.clear();
        self.notify(&change, observers);
        change
    }

    pub fn active(&self) -> Option<&str> {
        self.selection.active()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.selection.is_active(id)
    }

    pub fn policy(&self) -> ReselectPolicy {
        self.selection.policy()
    }

    fn notify(&self, change: &SelectionChange, observers: &mut [&mut dyn SelectionObserver]) {
        if !change.is_change() {
            return;
        }
        debug!("Selection changed: {:?}", change);
        for observer in observers.iter_mut() {
            observer.selection_changed(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<SelectionChange>,
    }

    impl SelectionObserver for Recorder {
        fn selection_changed(&mut self, change: &SelectionChange) {
            self.seen.push(change.clone());
        }
    }

    #[derive(Default)]
    struct Rows {
        scrolled: Vec<(String, ScrollOptions)>,
    }

    impl ListView for Rows {
        fn scroll_into_view(&mut self, id: &str, options: ScrollOptions) {
            self.scrolled.push((id.to_string(), options));
        }
    }

    #[test]
    fn test_observers_see_every_change() {
        let mut sync = SelectionSynchronizer::default();
        let mut a = Recorder::default();
        let mut b = Recorder::default();

        sync.set_active("x", &mut [&mut a, &mut b]);
        sync.set_active("x", &mut [&mut a, &mut b]);
        sync.clear(&mut [&mut a, &mut b]);

        let expected = vec![SelectionChange::Selected("x".into()), SelectionChange::Cleared];
        assert_eq!(a.seen, expected);
        assert_eq!(b.seen, expected);
    }

    #[test]
    fn test_toggle_policy_notifies_clear() {
        let mut sync = SelectionSynchronizer::new(ReselectPolicy::Toggle);
        let mut rec = Recorder::default();
        sync.set_active("x", &mut [&mut rec]);
        assert_eq!(sync.set_active("x", &mut [&mut rec]), SelectionChange::Cleared);
        assert_eq!(sync.active(), None);
        assert_eq!(rec.seen.len(), 2);
    }

    #[test]
    fn test_list_focus_scrolls_smooth_nearest() {
        let mut sync = SelectionSynchronizer::default();
        let mut rows = Rows::default();
        {
            let mut focus = ListFocus::new(&mut rows, ScrollOptions::default());
            sync.set_active("x", &mut [&mut focus]);
            sync.clear(&mut [&mut focus]);
        }
        assert_eq!(
            rows.scrolled,
            vec![(
                "x".to_string(),
                ScrollOptions {
                    behavior: ScrollBehavior::Smooth,
                    block: ScrollBlock::Nearest,
                }
            )]
        );
    }
}
