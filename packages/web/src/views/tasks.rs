//! The task dashboard: summary, filters and the paginated list.

use dioxus::prelude::*;
use store::{ListingController, ListingIntent, ListingState};
use ui::{use_auth, FilterPanel, LogoutButton, Navbar, TaskList, TaskSummary};

use crate::location::RouterLocation;
use crate::Route;

/// `query` is the canonical listing state; every intent is reduced by a
/// [`ListingController`] that writes the result back to the route.
#[component]
pub fn Tasks(query: ListingState) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    if auth().user.is_none() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    let current = query.to_query();
    let on_intent = EventHandler::new(move |intent: ListingIntent| {
        tracing::debug!(?intent, "listing intent");
        let mut controller = ListingController::new(RouterLocation::new(nav, current.clone()));
        controller.dispatch(intent);
    });

    rsx! {
        div {
            class: "page",
            Navbar {
                title: "Tasks",
                LogoutButton { on_logout: move |_| { nav.replace(Route::Login {}); } }
            }
            TaskSummary {}
            FilterPanel { state: query.clone(), on_intent }
            TaskList { state: query, on_intent }
        }
    }
}
