//! # HTTP client for the task API
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | base URL from `TASKDECK_API_URL` |
//! | [`error`] | [`ApiError`], the one failure type of every call |
//! | [`client`] | authenticated JSON transport and envelope decoding |
//! | [`auth`], [`tasks`] | one method per REST endpoint |
//! | [`cache`] | keyed result cache with in-flight request sharing |
//! | [`queries`] | cached reads and mutations that invalidate them |
//!
//! UI code normally only touches [`Queries`].

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod queries;
pub mod tasks;

pub use auth::{AuthPayload, AuthService};
pub use cache::{CacheConfig, Clock, QueryCache, SystemClock};
pub use client::{ApiResponse, HttpClient};
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiErrorKind, FieldError};
pub use queries::{AuthQueries, Queries, TaskQueries};
pub use tasks::TaskService;
