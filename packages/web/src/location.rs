//! The router as a [`Location`] for the task list.

use dioxus::prelude::*;
use store::{ListingState, Location};

use crate::Route;

/// Query string of the `/tasks` route. Writes replace the current history
/// entry so filter and page changes do not pile up in back navigation.
pub struct RouterLocation {
    navigator: Navigator,
    query: String,
}

impl RouterLocation {
    pub fn new(navigator: Navigator, query: String) -> Self {
        Self { navigator, query }
    }
}

impl Location for RouterLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.navigator.replace(Route::Tasks {
            query: ListingState::from_query(query),
        });
    }
}
