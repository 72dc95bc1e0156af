//! This crate contains all shared UI for the task client.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod auth;
pub use auth::{
    use_auth, use_queries, use_task_revision, AuthProvider, AuthState, LogoutButton, TaskRevision,
};

mod navbar;
pub use navbar::Navbar;

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod status_badge;
pub use status_badge::StatusBadge;

mod filter_panel;
pub use filter_panel::FilterPanel;

mod task_summary;
pub use task_summary::TaskSummary;

mod task_list;
pub use task_list::TaskList;

mod task_dialog;
pub use task_dialog::{CreateTaskDialog, EditTaskDialog};

mod delete_dialog;
pub use delete_dialog::DeleteTaskDialog;
