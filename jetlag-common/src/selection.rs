use crate::ReselectPolicy;

/// Outcome of a selection request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// A record became active
    Selected(String),
    /// Nothing is active anymore
    Cleared,
    /// The request left the selection as it was
    Unchanged,
}

impl SelectionChange {
    pub fn is_change(&self) -> bool {
        !matches!(self, SelectionChange::Unchanged)
    }
}

/// Pure holder for the single active record id.
///
/// Knows nothing about which records exist; selecting an id that is not
/// displayed anywhere is allowed and simply stored.
#[derive(Debug, Clone, Default)]
pub struct ActiveSelection {
    active: Option<String>,
    policy: ReselectPolicy,
}

impl ActiveSelection {
    pub fn new(policy: ReselectPolicy) -> Self {
        Self {
            active: None,
            policy,
        }
    }

    /// Make `id` the active record. An empty id clears the selection.
    pub fn select(&mut self, id: impl Into<String>) -> SelectionChange {
        let id = id.into();
        if id.is_empty() {
            return self.clear();
        }

        if self.active.as_deref() == Some(id.as_str()) {
            return match self.policy {
                ReselectPolicy::Keep => SelectionChange::Unchanged,
                ReselectPolicy::Toggle => self.clear(),
            };
        }

        self.active = Some(id.clone());
        SelectionChange::Selected(id)
    }

    pub fn clear(&mut self) -> SelectionChange {
        match self.active.take() {
            Some(_) => SelectionChange::Cleared,
            None => SelectionChange::Unchanged,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    pub fn policy(&self) -> ReselectPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let s = ActiveSelection::default();
        assert_eq!(s.active(), None);
        assert_eq!(s.policy(), ReselectPolicy::Keep);
    }

    #[test]
    fn test_select_then_query() {
        let mut s = ActiveSelection::default();
        assert_eq!(s.select("abc"), SelectionChange::Selected("abc".into()));
        assert_eq!(s.active(), Some("abc"));
        assert!(s.is_active("abc"));
        assert!(!s.is_active("xyz"));
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut s = ActiveSelection::default();
        s.select("a");
        assert_eq!(s.select("b"), SelectionChange::Selected("b".into()));
        assert_eq!(s.active(), Some("b"));
    }

    #[test]
    fn test_reselect_keep_is_noop() {
        let mut s = ActiveSelection::new(ReselectPolicy::Keep);
        s.select("a");
        assert_eq!(s.select("a"), SelectionChange::Unchanged);
        assert_eq!(s.active(), Some("a"));
    }

    #[test]
    fn test_reselect_toggle_clears() {
        let mut s = ActiveSelection::new(ReselectPolicy::Toggle);
        s.select("a");
        assert_eq!(s.select("a"), SelectionChange::Cleared);
        assert_eq!(s.active(), None);
        assert_eq!(s.select("a"), SelectionChange::Selected("a".into()));
    }

    #[test]
    fn test_empty_id_clears() {
        let mut s = ActiveSelection::default();
        s.select("a");
        assert_eq!(s.select(""), SelectionChange::Cleared);
        assert_eq!(s.select(""), SelectionChange::Unchanged);
    }

    #[test]
    fn test_clear_when_empty_is_unchanged() {
        let mut s = ActiveSelection::default();
        assert_eq!(s.clear(), SelectionChange::Unchanged);
        assert!(!s.clear().is_change());
    }

    #[test]
    fn test_policy_parses() {
        assert_eq!("keep".parse::<ReselectPolicy>(), Ok(ReselectPolicy::Keep));
        assert_eq!(" Toggle ".parse::<ReselectPolicy>(), Ok(ReselectPolicy::Toggle));
        assert!("flip".parse::<ReselectPolicy>().is_err());
    }
}
