use dioxus::prelude::*;
use store::{ListingIntent, ListingState, Task, TaskPage};

use crate::components::{Alert, Button, ButtonVariant};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::{
    use_queries, use_task_revision, CreateTaskDialog, DeleteTaskDialog, EditTaskDialog, Icon,
    StatusBadge,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which dialog is open over the list.
#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Create,
    Edit(String),
    Delete(String),
}

/// Paginated task table for the given listing state.
///
/// The list is fetched through the query cache keyed by the state's API
/// parameters. A newer state restarts the resource, so a response for a
/// superseded page is dropped.
#[component]
pub fn TaskList(state: ListingState, on_intent: EventHandler<ListingIntent>) -> Element {
    let queries = use_queries();
    let revision = use_task_revision();
    let mut dialog = use_signal(|| Option::<Dialog>::None);

    let params = state.to_params();
    let page = use_resource(use_reactive((&params,), move |(params,)| {
        let queries = queries.clone();
        revision.get();
        async move {
            let result = queries.tasks.list(&params).await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "failed to load tasks");
            }
            result
        }
    }));

    let current = page.read().clone();
    let (total, caption) = match &current {
        Some(Ok(page)) => (
            page.total,
            format!("Showing {} of {} tasks", page.tasks.len(), page.total),
        ),
        _ => (0, "Loading tasks...".to_string()),
    };

    rsx! {
        section {
            class: "task-list",
            div {
                class: "task-list-header",
                div {
                    h2 { class: "panel-title", "Your Tasks ({total})" }
                    p { class: "panel-caption", "{caption}" }
                }
                Button {
                    onclick: move |_| dialog.set(Some(Dialog::Create)),
                    Icon { width: 14, height: 14, fill: "currentColor", icon: FaPlus }
                    " New Task"
                }
            }

            {match current {
                None => rsx! { div { class: "spinner" } },
                Some(Err(e)) => rsx! { Alert { message: e.to_string() } },
                Some(Ok(page)) if page.tasks.is_empty() => rsx! {
                    p { class: "empty", "No tasks found" }
                },
                Some(Ok(page)) => rsx! {
                    TaskTable {
                        tasks: page.tasks.clone(),
                        on_edit: move |id| dialog.set(Some(Dialog::Edit(id))),
                        on_delete: move |id| dialog.set(Some(Dialog::Delete(id))),
                    }
                    Pagination { page, on_intent }
                },
            }}
        }

        {match dialog() {
            Some(Dialog::Create) => rsx! {
                CreateTaskDialog { on_close: move |_| dialog.set(None) }
            },
            Some(Dialog::Edit(id)) => rsx! {
                EditTaskDialog { task_id: id, on_close: move |_| dialog.set(None) }
            },
            Some(Dialog::Delete(id)) => rsx! {
                DeleteTaskDialog { task_id: id, on_close: move |_| dialog.set(None) }
            },
            None => rsx! {},
        }}
    }
}

#[component]
fn TaskTable(tasks: Vec<Task>, on_edit: EventHandler<String>, on_delete: EventHandler<String>) -> Element {
    rsx! {
        table {
            class: "task-table",
            thead {
                tr {
                    th { "Title" }
                    th { "Description" }
                    th { "Status" }
                    th { "Due Date" }
                    th { "Created" }
                    th { class: "actions", "Actions" }
                }
            }
            tbody {
                for task in tasks {
                    TaskRow { key: "{task.id}", task: task.clone(), on_edit, on_delete }
                }
            }
        }
    }
}

#[component]
fn TaskRow(task: Task, on_edit: EventHandler<String>, on_delete: EventHandler<String>) -> Element {
    let edit_id = task.id.clone();
    let delete_id = task.id.clone();
    let due = task.due_date.map(|d| d.format(DATE_FORMAT).to_string());
    let created = task.created_at.format(DATE_FORMAT).to_string();

    rsx! {
        tr {
            td { class: "cell-title", "{task.title}" }
            td {
                if let Some(description) = task.description.clone().filter(|d| !d.is_empty()) {
                    span { class: "cell-muted", "{description}" }
                } else {
                    span { class: "cell-muted cell-empty", "No description" }
                }
            }
            td { StatusBadge { status: task.status } }
            td {
                if let Some(due) = due {
                    span { "{due}" }
                } else {
                    span { class: "cell-muted cell-empty", "No due date" }
                }
            }
            td { span { class: "cell-muted", "{created}" } }
            td {
                class: "actions",
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    onclick: move |_| on_edit.call(edit_id.clone()),
                    Icon { width: 14, height: 14, fill: "currentColor", icon: FaPen }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    class: "danger",
                    title: "Delete",
                    onclick: move |_| on_delete.call(delete_id.clone()),
                    Icon { width: 14, height: 14, fill: "currentColor", icon: FaTrash }
                }
            }
        }
    }
}

#[component]
fn Pagination(page: TaskPage, on_intent: EventHandler<ListingIntent>) -> Element {
    if page.total_pages <= 1 {
        return rsx! {};
    }
    let current = page.page;
    let last = page.total_pages;

    rsx! {
        div {
            class: "pagination",
            span { "Page {current} of {last} ({page.total} total tasks)" }
            div {
                class: "pagination-buttons",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: current <= 1,
                    onclick: move |_| on_intent.call(ListingIntent::Page(current.saturating_sub(1))),
                    "Previous"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: current >= last,
                    onclick: move |_| on_intent.call(ListingIntent::Page(current + 1)),
                    "Next"
                }
            }
        }
    }
}
