use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::ListingState;
use ui::{use_auth, AuthProvider};
use views::{Login, Register, Tasks};

mod location;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/auth/login")]
    Login {},
    #[route("/auth/register")]
    Register {},
    #[route("/tasks?:..query")]
    Tasks { query: ListingState },
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialise logging: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::UI_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the task list when signed in, to login otherwise.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    if auth().user.is_some() {
        nav.replace(Route::Tasks {
            query: ListingState::default(),
        });
    } else {
        nav.replace(Route::Login {});
    }
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!(path = %segments.join("/"), "unknown route");
    let nav = use_navigator();
    nav.replace(Route::Root {});
    rsx! {}
}
