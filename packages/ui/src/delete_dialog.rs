use dioxus::prelude::*;

use crate::components::{Alert, Button, ButtonVariant};
use crate::{use_queries, use_task_revision, ModalOverlay};

#[component]
pub fn DeleteTaskDialog(task_id: String, on_close: EventHandler<()>) -> Element {
    let queries = use_queries();
    let revision = use_task_revision();
    let mut deleting = use_signal(|| false);
    let mut api_error = use_signal(|| Option::<String>::None);

    let handle_delete = move |_| {
        let queries = queries.clone();
        let id = task_id.clone();
        spawn(async move {
            api_error.set(None);
            deleting.set(true);
            match queries.tasks.delete(&id).await {
                Ok(()) => {
                    revision.bump();
                    on_close.call(());
                }
                Err(e) => {
                    tracing::error!(error = %e, %id, "failed to delete task");
                    api_error.set(Some(e.to_string()));
                    deleting.set(false);
                }
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: "Delete Task",
            on_close: move |_| on_close.call(()),
            p {
                class: "dialog-description",
                "Are you sure you want to delete this task? This action cannot be undone."
            }
            if let Some(err) = api_error() {
                Alert { message: err }
            }
            div {
                class: "dialog-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: deleting(),
                    onclick: handle_delete,
                    if deleting() { "Deleting..." } else { "Delete" }
                }
            }
        }
    }
}
