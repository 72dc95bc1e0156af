use dioxus::prelude::*;
use store::{FilterField, ListingIntent, ListingState, SortField, SortKey, SortOrder, TaskStatus};

use crate::components::{Button, ButtonVariant};
use crate::icons::{FaMagnifyingGlass, FaRotateLeft};
use crate::Icon;

const PAGE_SIZES: [u32; 3] = [10, 20, 50];

/// Search, filter and sort controls for the task list.
///
/// Select and date inputs emit an intent on change. The two text searches are
/// held locally and only applied on Search or Enter.
#[component]
pub fn FilterPanel(state: ListingState, on_intent: EventHandler<ListingIntent>) -> Element {
    let mut title = use_signal(|| state.filters.title.clone());
    let mut description = use_signal(|| state.filters.description.clone());

    // Navigation can change the applied searches underneath the inputs.
    use_effect(use_reactive(
        (&state.filters.title, &state.filters.description),
        move |(applied_title, applied_description)| {
            title.set(applied_title);
            description.set(applied_description);
        },
    ));

    let search = move || {
        on_intent.call(ListingIntent::Search {
            title: title(),
            description: description(),
        });
    };
    let on_key = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter {
            search();
        }
    };

    let status = state.filters.status.as_str();
    let due_date = state.filters.due_date.clone();
    let created_at = state.filters.created_at.clone();
    let sort_by = state.sort.key.as_str();
    let sort_order = state.sort.order.as_str();
    let limit = state.pagination.limit.to_string();

    rsx! {
        section {
            class: "filter-panel",
            h2 { class: "panel-title", "Filters & Search" }

            div {
                class: "filter-grid",
                div {
                    class: "field",
                    label { class: "field-label", r#for: "title-search", "Search Title" }
                    input {
                        id: "title-search",
                        class: "input",
                        r#type: "text",
                        placeholder: "Search by title...",
                        value: title(),
                        oninput: move |evt: FormEvent| title.set(evt.value()),
                        onkeydown: on_key,
                    }
                }
                div {
                    class: "field",
                    label { class: "field-label", r#for: "description-search", "Search Description" }
                    input {
                        id: "description-search",
                        class: "input",
                        r#type: "text",
                        placeholder: "Search by description...",
                        value: description(),
                        oninput: move |evt: FormEvent| description.set(evt.value()),
                        onkeydown: on_key,
                    }
                }
                Button {
                    class: "filter-search",
                    onclick: move |_| search(),
                    Icon { width: 14, height: 14, fill: "currentColor", icon: FaMagnifyingGlass }
                    " Search"
                }
            }

            div {
                class: "filter-grid",
                div {
                    class: "field",
                    label { class: "field-label", r#for: "status-filter", "Status" }
                    select {
                        id: "status-filter",
                        class: "input",
                        value: "{status}",
                        onchange: move |evt: FormEvent| {
                            on_intent.call(ListingIntent::Filter(FilterField::Status, evt.value()))
                        },
                        option { value: "all", selected: status == "all", "All Statuses" }
                        for s in TaskStatus::ALL {
                            option {
                                key: "{s.as_str()}",
                                value: "{s.as_str()}",
                                selected: status == s.as_str(),
                                "{s.label()}"
                            }
                        }
                    }
                }
                div {
                    class: "field",
                    label { class: "field-label", r#for: "due-date", "Due Date" }
                    input {
                        id: "due-date",
                        class: "input",
                        r#type: "date",
                        value: "{due_date}",
                        onchange: move |evt: FormEvent| {
                            on_intent.call(ListingIntent::Filter(FilterField::DueDate, evt.value()))
                        },
                    }
                }
                div {
                    class: "field",
                    label { class: "field-label", r#for: "created-date", "Created Date" }
                    input {
                        id: "created-date",
                        class: "input",
                        r#type: "date",
                        value: "{created_at}",
                        onchange: move |evt: FormEvent| {
                            on_intent.call(ListingIntent::Filter(FilterField::CreatedAt, evt.value()))
                        },
                    }
                }
            }

            div {
                class: "filter-grid",
                div {
                    class: "field",
                    label { class: "field-label", r#for: "sort-by", "Sort by" }
                    select {
                        id: "sort-by",
                        class: "input",
                        value: "{sort_by}",
                        onchange: move |evt: FormEvent| {
                            on_intent.call(ListingIntent::Sort(SortField::SortBy, evt.value()))
                        },
                        for key in SortKey::ALL {
                            option {
                                key: "{key.as_str()}",
                                value: "{key.as_str()}",
                                selected: sort_by == key.as_str(),
                                "{key.label()}"
                            }
                        }
                    }
                }
                div {
                    class: "field",
                    label { class: "field-label", r#for: "sort-order", "Order" }
                    select {
                        id: "sort-order",
                        class: "input",
                        value: "{sort_order}",
                        onchange: move |evt: FormEvent| {
                            on_intent.call(ListingIntent::Sort(SortField::SortOrder, evt.value()))
                        },
                        for order in [SortOrder::Desc, SortOrder::Asc] {
                            option {
                                key: "{order.as_str()}",
                                value: "{order.as_str()}",
                                selected: sort_order == order.as_str(),
                                "{order.label()}"
                            }
                        }
                    }
                }
                div {
                    class: "field",
                    label { class: "field-label", r#for: "page-size", "Per page" }
                    select {
                        id: "page-size",
                        class: "input",
                        value: "{limit}",
                        onchange: move |evt: FormEvent| {
                            if let Ok(limit) = evt.value().parse::<u32>() {
                                on_intent.call(ListingIntent::Limit(limit));
                            }
                        },
                        for size in PAGE_SIZES {
                            option {
                                key: "{size}",
                                value: "{size}",
                                selected: limit == size.to_string(),
                                "{size}"
                            }
                        }
                    }
                }
            }

            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| {
                    title.set(String::new());
                    description.set(String::new());
                    on_intent.call(ListingIntent::Reset);
                },
                Icon { width: 14, height: 14, fill: "currentColor", icon: FaRotateLeft }
                " Reset Filters"
            }
        }
    }
}
