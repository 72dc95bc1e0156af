//! Framework-free core of the task client: domain models, the task list's
//! filter/sort/pagination state and its URL form, session persistence and
//! form validation.

pub mod listing;
pub mod location;
pub mod models;
pub mod session;
pub mod validation;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use listing::{
    FilterField, Filters, ListingIntent, ListingState, Pagination, Sort, SortField, SortKey,
    SortOrder, StatusFilter, TaskQueryParams,
};
pub use location::{ListingController, Location, MemoryLocation};
pub use models::{CreateTask, StatusCounts, Task, TaskPage, TaskStats, TaskStatus, UpdateTask, User};
pub use session::{Session, SessionContext, SessionError, SessionStatus, SessionStore};
pub use validation::{Credentials, LoginForm, RegisterForm, TaskForm, ValidationErrors};
