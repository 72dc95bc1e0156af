use dioxus::prelude::*;

use crate::use_auth;

/// Page header with the signed-in user's name. Trailing actions go in `children`.
#[component]
pub fn Navbar(title: String, children: Element) -> Element {
    let auth = use_auth();
    let username = auth().user.map(|u| u.username).unwrap_or_else(|| "User".to_string());

    rsx! {
        header {
            class: "navbar",
            div {
                h1 { class: "navbar-title", "{title}" }
                p { class: "navbar-subtitle", "Welcome back, {username}!" }
            }
            div { class: "navbar-actions", {children} }
        }
    }
}
