//! View state for the console screens
//!
//! Each screen is a fetched list plus an optional form. The types here hold
//! no I/O: a screen calls [`ListState::begin_load`], awaits the client, and
//! feeds the result to [`ListState::finish`]. The fetched list is the only
//! source of truth and is replaced wholesale on every successful fetch.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::ApiError;
use crate::messages::HasStatus;

// ============================================================================
// Resource list
// ============================================================================

/// Lifecycle of a fetched list
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Idle,
    Loading,
    Loaded(Vec<T>),
    /// Fetch failed; the list is cleared
    Failed(String),
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Idle
    }
}

impl<T> ListState<T> {
    /// Enter `Loading`; valid from any state (mount or manual refresh)
    pub fn begin_load(&mut self) {
        *self = ListState::Loading;
    }

    pub fn finish(&mut self, result: Result<Vec<T>, ApiError>) {
        *self = match result {
            Ok(items) => ListState::Loaded(items),
            Err(e) => ListState::Failed(e.to_string()),
        };
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListState::Loaded(items) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ============================================================================
// Mutation form
// ============================================================================

/// An add form or dialog and its submission state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState<F> {
    pub open: bool,
    pub fields: F,
    pub submitting: bool,
    pub error: Option<String>,
}

impl<F: Default> FormState<F> {
    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    /// Closing keeps whatever was typed so reopening resumes the edit
    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn begin_submit(&mut self) {
        self.submitting = true;
        self.error = None;
    }

    /// Reset fields to their defaults and close
    pub fn succeed(&mut self) {
        self.fields = F::default();
        self.submitting = false;
        self.open = false;
        self.error = None;
    }

    /// Stay open and populated so the user can correct and resubmit
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Set of selected row ids for bulk actions.
///
/// Ids whose rows disappear from the list stay in the set but are inert:
/// no row renders them as checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ids: BTreeSet<i64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id, or remove it if already selected
    pub fn toggle(&mut self, id: i64) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Select-all checkbox: clear when the selection size equals the list
    /// size, otherwise select exactly the listed ids.
    ///
    /// Sizes are compared, not contents, so a stale selection that happens
    /// to match the list length is cleared too.
    pub fn toggle_all(&mut self, all_ids: &[i64]) {
        if self.ids.len() == all_ids.len() {
            self.ids.clear();
        } else {
            self.ids = all_ids.iter().copied().collect();
        }
    }

    /// Whether the header checkbox renders checked
    pub fn covers(&self, all_ids: &[i64]) -> bool {
        !all_ids.is_empty() && self.ids.len() == all_ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }
}

// ============================================================================
// Operation outcomes
// ============================================================================

/// Success count over a list of per-item results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub succeeded: usize,
    pub total: usize,
}

impl Tally {
    pub fn of<R: HasStatus>(results: &[R]) -> Self {
        Self {
            succeeded: results.iter().filter(|r| r.status().is_success()).count(),
            total: results.len(),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.total > 0 && self.succeeded == self.total
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} succeeded", self.succeeded, self.total)
    }
}

/// Single-item operations are judged by the first result alone
pub fn first_succeeded<R: HasStatus>(results: &[R]) -> bool {
    results.first().is_some_and(|r| r.status().is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{ChannelResult, OperationStatus};

    fn result(status: OperationStatus) -> ChannelResult {
        ChannelResult {
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_list_state_transitions() {
        let mut state: ListState<u32> = ListState::default();
        assert!(state.is_empty());
        assert!(!state.is_loading());

        state.begin_load();
        assert!(state.is_loading());

        state.finish(Ok(vec![1, 2, 3]));
        assert_eq!(state.items(), &[1, 2, 3]);

        // Refresh from Loaded, then fail: the old rows are gone
        state.begin_load();
        assert!(state.is_empty());
        state.finish(Err(ApiError::Transport("refused".to_string())));
        assert!(state.is_empty());
        assert_eq!(state.error(), Some("Connection failed: refused"));

        // Refresh from Failed
        state.begin_load();
        assert_eq!(state.error(), None);
        state.finish(Ok(vec![]));
        assert_eq!(state, ListState::Loaded(vec![]));
    }

    #[test]
    fn test_form_failure_keeps_fields() {
        let mut form: FormState<String> = FormState::default();
        form.open();
        form.fields = "typed".to_string();
        form.begin_submit();
        assert!(form.submitting);

        form.fail("Failed to add account");
        assert!(form.open);
        assert!(!form.submitting);
        assert_eq!(form.fields, "typed");
        assert_eq!(form.error.as_deref(), Some("Failed to add account"));

        form.begin_submit();
        assert!(form.error.is_none());
        form.succeed();
        assert!(!form.open);
        assert_eq!(form.fields, "");
    }

    #[test]
    fn test_form_toggle() {
        let mut form: FormState<u8> = FormState::default();
        form.toggle();
        assert!(form.open);
        form.fail("x");
        form.toggle();
        assert!(!form.open);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut selection = Selection::new();
        selection.toggle(3);
        let before = selection.clone();

        for id in [1, 3, 42] {
            selection.toggle(id);
            selection.toggle(id);
            assert_eq!(selection, before);
        }
    }

    #[test]
    fn test_toggle_all_size_rule() {
        let ids = [1, 2, 3];
        let mut selection = Selection::new();

        selection.toggle(2);
        selection.toggle_all(&ids);
        assert_eq!(selection.ids(), vec![1, 2, 3]);
        assert!(selection.covers(&ids));

        selection.toggle_all(&ids);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_compares_sizes_not_contents() {
        let mut selection = Selection::new();
        selection.toggle(7);
        selection.toggle(8);

        // The list shrank and changed, but sizes match: the selection clears
        selection.toggle_all(&[1, 2]);
        assert_eq!(selection.len(), 0);
    }

    #[test]
    fn test_empty_list_never_covered() {
        let mut selection = Selection::new();
        assert!(!selection.covers(&[]));

        // 0 == 0: stays empty
        selection.toggle_all(&[]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_tally_counts_successes() {
        let results = [
            result(OperationStatus::Success),
            result(OperationStatus::Failed),
            result(OperationStatus::Success),
        ];
        let tally = Tally::of(&results);

        assert_eq!(tally, Tally { succeeded: 2, total: 3 });
        assert!(!tally.all_succeeded());
        assert_eq!(tally.to_string(), "2 of 3 succeeded");
    }

    #[test]
    fn test_first_result_decides_single_operations() {
        assert!(first_succeeded(&[result(OperationStatus::Success), result(OperationStatus::Failed)]));
        assert!(!first_succeeded(&[result(OperationStatus::Unknown)]));
        assert!(!first_succeeded::<ChannelResult>(&[]));
    }
}
