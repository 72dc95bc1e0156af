use dioxus::prelude::*;
use store::TaskStatus;

#[component]
pub fn StatusBadge(status: TaskStatus) -> Element {
    let variant = status.as_str();
    let label = status.label();
    rsx! {
        span { class: "badge badge-{variant}", "{label}" }
    }
}
