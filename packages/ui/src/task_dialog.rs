//! Create and edit dialogs for a single task.

use dioxus::prelude::*;
use store::{Task, TaskForm, TaskStatus, ValidationErrors};

use crate::components::{Alert, Button, ButtonVariant, Field};
use crate::{use_queries, use_task_revision, ModalOverlay};

/// Inline form for creating a new task.
#[component]
pub fn CreateTaskDialog(on_close: EventHandler<()>) -> Element {
    let queries = use_queries();
    let revision = use_task_revision();
    let form = use_signal(TaskForm::default);
    let mut errors = use_signal(ValidationErrors::default);
    let mut api_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let create = match form.read().to_create() {
            Ok(create) => create,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(ValidationErrors::default());
        let queries = queries.clone();
        spawn(async move {
            api_error.set(None);
            saving.set(true);
            match queries.tasks.create(&create).await {
                Ok(_) => {
                    revision.bump();
                    on_close.call(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "create task failed");
                    api_error.set(Some(e.to_string()));
                    saving.set(false);
                }
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: "Create New Task",
            on_close: move |_| on_close.call(()),
            form {
                class: "task-form",
                onsubmit: handle_submit,
                if let Some(err) = api_error() {
                    Alert { message: err }
                }
                TaskFields { form, errors: errors() }
                div {
                    class: "dialog-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Creating..." } else { "Create Task" }
                    }
                }
            }
        }
    }
}

/// Loads the task through the detail cache, then shows the edit form.
#[component]
pub fn EditTaskDialog(task_id: String, on_close: EventHandler<()>) -> Element {
    let queries = use_queries();
    let detail = use_resource(use_reactive((&task_id,), move |(id,)| {
        let queries = queries.clone();
        async move { queries.tasks.detail(&id).await }
    }));

    let current = detail.read().clone();
    match current {
        None => rsx! {
            ModalOverlay {
                title: "Loading Task...",
                on_close: move |_| on_close.call(()),
                div { class: "spinner" }
            }
        },
        Some(Err(e)) => rsx! {
            ModalOverlay {
                title: "Edit Task",
                on_close: move |_| on_close.call(()),
                Alert { message: e.to_string() }
                div {
                    class: "dialog-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        },
        Some(Ok(task)) => rsx! {
            EditTaskForm { task, on_close }
        },
    }
}

#[component]
fn EditTaskForm(task: Task, on_close: EventHandler<()>) -> Element {
    let queries = use_queries();
    let revision = use_task_revision();
    let form = use_signal({
        let task = task.clone();
        move || TaskForm::from_task(&task)
    });
    let mut errors = use_signal(ValidationErrors::default);
    let mut api_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let changes = match form.read().diff(&task) {
            Ok(changes) => changes,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(ValidationErrors::default());
        if changes.is_empty() {
            on_close.call(());
            return;
        }
        let queries = queries.clone();
        let id = task.id.clone();
        spawn(async move {
            api_error.set(None);
            saving.set(true);
            match queries.tasks.update(&id, &changes).await {
                Ok(_) => {
                    revision.bump();
                    on_close.call(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, %id, "update task failed");
                    api_error.set(Some(e.to_string()));
                    saving.set(false);
                }
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: "Edit Task",
            on_close: move |_| on_close.call(()),
            form {
                class: "task-form",
                onsubmit: handle_submit,
                if let Some(err) = api_error() {
                    Alert { message: err }
                }
                TaskFields { form, errors: errors() }
                div {
                    class: "dialog-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save Changes" }
                    }
                }
            }
        }
    }
}

#[component]
fn TaskFields(form: Signal<TaskForm>, errors: ValidationErrors) -> Element {
    let mut form = form;
    let values = form();
    let current_status = values.status;

    rsx! {
        Field {
            label: "Title",
            html_for: "task-title",
            error: errors.get("title").map(str::to_string),
            input {
                id: "task-title",
                class: "input",
                r#type: "text",
                placeholder: "Enter task title",
                value: "{values.title}",
                oninput: move |evt: FormEvent| form.write().title = evt.value(),
            }
        }
        Field {
            label: "Description",
            html_for: "task-description",
            error: errors.get("description").map(str::to_string),
            textarea {
                id: "task-description",
                class: "input",
                rows: 3,
                placeholder: "Enter task description (optional)",
                value: "{values.description}",
                oninput: move |evt: FormEvent| form.write().description = evt.value(),
            }
        }
        Field {
            label: "Status",
            html_for: "task-status",
            error: errors.get("status").map(str::to_string),
            select {
                id: "task-status",
                class: "input",
                value: "{current_status.as_str()}",
                onchange: move |evt: FormEvent| {
                    if let Ok(status) = evt.value().parse::<TaskStatus>() {
                        form.write().status = status;
                    }
                },
                for status in TaskStatus::ALL {
                    option {
                        key: "{status.as_str()}",
                        value: "{status.as_str()}",
                        selected: status == current_status,
                        "{status.label()}"
                    }
                }
            }
        }
        Field {
            label: "Due Date",
            html_for: "task-due-date",
            error: errors.get("dueDate").map(str::to_string),
            input {
                id: "task-due-date",
                class: "input",
                r#type: "date",
                value: "{values.due_date}",
                oninput: move |evt: FormEvent| form.write().due_date = evt.value(),
            }
        }
    }
}
