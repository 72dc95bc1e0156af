//! Binds a [`ListingState`] to an address bar.
//!
//! [`ListingController`] owns the state for one task-list view and writes
//! every change back through a [`Location`], so a reload or a shared link
//! reproduces the same view. External navigation (back/forward) is picked up
//! with [`ListingController::sync_from_location`].

use crate::listing::{FilterField, ListingIntent, ListingState, SortField};

/// The query-string half of a URL.
pub trait Location {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;
    /// Replace the query string. An empty string clears it.
    fn replace_query(&mut self, query: &str);
}

/// A [`Location`] that only lives in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    query: String,
}

impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Simulate navigation that did not go through the controller.
    pub fn navigate(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
    }
}

/// Single source of truth for the task list's filter/sort/pagination.
#[derive(Debug)]
pub struct ListingController<L> {
    location: L,
    state: ListingState,
}

impl<L: Location> ListingController<L> {
    /// Build a controller whose state is derived from the location.
    pub fn new(location: L) -> Self {
        let state = ListingState::from_query(&location.query());
        Self { location, state }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn into_location(self) -> L {
        self.location
    }

    /// Parse the location without touching the held state.
    pub fn read_state_from_location(&self) -> ListingState {
        ListingState::from_query(&self.location.query())
    }

    /// Overwrite the held state from the location. Returns whether it changed.
    pub fn sync_from_location(&mut self) -> bool {
        let state = self.read_state_from_location();
        if state == self.state {
            return false;
        }
        self.state = state;
        true
    }

    /// Reduce an intent and write the result back to the location.
    pub fn dispatch(&mut self, intent: ListingIntent) -> &ListingState {
        let reset = intent == ListingIntent::Reset;
        self.state = self.state.apply(intent);
        if reset {
            // Full reset clears unmanaged parameters too.
            self.location.replace_query("");
        } else {
            let query = self.state.to_query();
            self.location.replace_query(&query);
        }
        &self.state
    }

    pub fn apply_filter_change(&mut self, field: FilterField, value: &str) -> &ListingState {
        self.dispatch(ListingIntent::Filter(field, value.to_string()))
    }

    pub fn apply_search(&mut self, title: &str, description: &str) -> &ListingState {
        self.dispatch(ListingIntent::Search {
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    pub fn apply_sort_change(&mut self, field: SortField, value: &str) -> &ListingState {
        self.dispatch(ListingIntent::Sort(field, value.to_string()))
    }

    pub fn apply_page_change(&mut self, page: u32) -> &ListingState {
        self.dispatch(ListingIntent::Page(page))
    }

    pub fn reset_all(&mut self) -> &ListingState {
        self.dispatch(ListingIntent::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{SortKey, SortOrder, StatusFilter};
    use crate::models::TaskStatus;

    #[test]
    fn reads_initial_state_from_location() {
        let controller =
            ListingController::new(MemoryLocation::new("status=done&sortBy=title&page=2"));
        let state = controller.state();
        assert_eq!(state.filters.status, StatusFilter::Only(TaskStatus::Done));
        assert_eq!(state.sort.key, SortKey::Title);
        assert_eq!(state.pagination.page, 2);
    }

    #[test]
    fn filter_change_resets_page_and_writes_minimal_query() {
        let mut controller = ListingController::new(MemoryLocation::new("page=4&limit=20"));
        controller.apply_filter_change(FilterField::Title, "report");
        assert_eq!(controller.state().pagination.page, 1);
        assert_eq!(controller.location().query(), "title=report&limit=20");
    }

    #[test]
    fn sort_change_resets_page() {
        let mut controller = ListingController::new(MemoryLocation::new("page=3"));
        controller.apply_sort_change(SortField::SortOrder, "asc");
        assert_eq!(controller.state().sort.order, SortOrder::Asc);
        assert_eq!(controller.location().query(), "sortOrder=asc");
    }

    #[test]
    fn page_change_preserves_filters_in_location() {
        let mut controller = ListingController::new(MemoryLocation::new("status=in_progress"));
        controller.apply_page_change(2);
        assert_eq!(controller.location().query(), "status=in_progress&page=2");
        assert_eq!(
            controller.state().filters.status,
            StatusFilter::Only(TaskStatus::InProgress)
        );
    }

    #[test]
    fn blank_filters_never_reach_location() {
        let mut controller = ListingController::new(MemoryLocation::default());
        controller.apply_filter_change(FilterField::Description, "  ");
        controller.apply_filter_change(FilterField::Status, "all");
        assert_eq!(controller.location().query(), "");
    }

    #[test]
    fn reset_clears_the_whole_query() {
        let mut controller =
            ListingController::new(MemoryLocation::new("title=x&page=2&utm_source=mail"));
        controller.reset_all();
        assert_eq!(controller.state(), &ListingState::default());
        assert_eq!(controller.location().query(), "");
    }

    #[test]
    fn external_navigation_overwrites_state() {
        let mut controller = ListingController::new(MemoryLocation::new("page=2"));
        controller.apply_filter_change(FilterField::Title, "draft");

        controller.location.navigate("page=5");
        assert!(controller.sync_from_location());
        assert_eq!(controller.state().pagination.page, 5);
        assert!(controller.state().filters.title.is_empty());
        assert!(!controller.sync_from_location());

        controller.apply_page_change(1);
        assert_eq!(controller.into_location().query(), "");
    }

    #[test]
    fn search_applies_both_text_filters() {
        let mut controller = ListingController::new(MemoryLocation::new("page=2"));
        controller.apply_search("plan", "budget");
        assert_eq!(
            controller.location().query(),
            "title=plan&description=budget"
        );
    }
}
