//! Client-side form validation.
//!
//! Each form struct holds the raw input strings of one form and validates
//! them into the request body the API expects. Failures are collected per
//! field in [`ValidationErrors`] and rendered inline; they never leave the
//! form layer.

use std::fmt;

use chrono::{DateTime, NaiveDate};

use crate::models::{CreateTask, Task, TaskStatus, UpdateTask};

pub const TITLE_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 6;

/// Field-scoped validation failures, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// First message for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// Username/password pair sent to login and register.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.username.trim().is_empty() {
            errors.add("username", "Username is required");
        }
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result(|| Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.username.trim().is_empty() {
            errors.add("username", "Username is required");
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            errors.add(
                "password",
                format!("Password must be at least {PASSWORD_MIN_LEN} characters"),
            );
        }
        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.add("confirmPassword", "Passwords don't match");
        }
        errors.into_result(|| Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Raw inputs of the create and edit task dialogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// `YYYY-MM-DD` from a date input, or empty.
    pub due_date: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::NotStarted,
            due_date: String::new(),
        }
    }
}

impl TaskForm {
    /// Prefill the edit dialog from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            due_date: task.due_date_input(),
        }
    }

    fn check(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", "Title is required");
        } else if title.chars().count() > TITLE_MAX_LEN {
            errors.add("title", "Title must be less than 255 characters");
        }
        if !self.due_date.trim().is_empty() && !is_valid_date(self.due_date.trim()) {
            errors.add("dueDate", "Invalid date format");
        }
        errors
    }

    /// Body for a create request; empty optionals are left out.
    pub fn to_create(&self) -> Result<CreateTask, ValidationErrors> {
        self.check().into_result(|| CreateTask {
            title: self.title.trim().to_string(),
            description: non_empty(&self.description),
            status: Some(self.status),
            due_date: non_empty(&self.due_date),
        })
    }

    /// Body for a partial update holding only the fields that differ from `task`.
    ///
    /// A cleared description or due date is left out rather than sent empty;
    /// the API has no way to unset them.
    pub fn diff(&self, task: &Task) -> Result<UpdateTask, ValidationErrors> {
        self.check().into_result(|| {
            let title = self.title.trim();
            let description = self.description.trim();
            let due_date = self.due_date.trim();
            UpdateTask {
                title: (title != task.title.trim()).then(|| title.to_string()),
                description: (description != task.description.as_deref().unwrap_or_default())
                    .then(|| non_empty(description))
                    .flatten(),
                status: (self.status != task.status).then_some(self.status),
                due_date: (due_date != task.due_date_input())
                    .then(|| non_empty(due_date))
                    .flatten(),
            }
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task() -> Task {
        let at = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
        Task {
            id: "t-1".to_string(),
            title: "Write report".to_string(),
            description: None,
            status: TaskStatus::NotStarted,
            due_date: Some(Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap()),
            created_by: "u-1".to_string(),
            created_at: at,
            updated_at: at,
            user: None,
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let creds = LoginForm {
            username: " alice ".to_string(),
            password: "secret1".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(creds.username, "alice");
    }

    #[test]
    fn register_checks_password_rules() {
        let form = RegisterForm {
            username: "alice".to_string(),
            password: "short".to_string(),
            confirm_password: "other".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get("confirmPassword"), Some("Passwords don't match"));

        let ok = RegisterForm {
            username: "alice".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn task_title_is_required_and_bounded() {
        let errors = TaskForm::default().to_create().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.to_string(), "title: Title is required");

        let long = TaskForm {
            title: "x".repeat(256),
            ..TaskForm::default()
        };
        assert!(long.to_create().unwrap_err().get("title").is_some());
    }

    #[test]
    fn invalid_due_date_is_rejected() {
        let form = TaskForm {
            title: "t".to_string(),
            due_date: "31/12/2026".to_string(),
            ..TaskForm::default()
        };
        assert_eq!(
            form.to_create().unwrap_err().get("dueDate"),
            Some("Invalid date format")
        );
    }

    #[test]
    fn create_omits_empty_optionals() {
        let form = TaskForm {
            title: "Write report".to_string(),
            ..TaskForm::default()
        };
        let create = form.to_create().unwrap();
        assert_eq!(create.title, "Write report");
        assert_eq!(create.status, Some(TaskStatus::NotStarted));
        assert!(create.description.is_none());
        assert!(create.due_date.is_none());
    }

    #[test]
    fn diff_contains_only_changes() {
        let task = task();
        let unchanged = TaskForm::from_task(&task).diff(&task).unwrap();
        assert!(unchanged.is_empty());

        let mut form = TaskForm::from_task(&task);
        form.status = TaskStatus::Done;
        form.description = "details".to_string();
        let update = form.diff(&task).unwrap();
        assert_eq!(update.status, Some(TaskStatus::Done));
        assert_eq!(update.description.as_deref(), Some("details"));
        assert!(update.title.is_none());
        assert!(update.due_date.is_none());

        let mut cleared = TaskForm::from_task(&task);
        cleared.due_date = String::new();
        assert!(cleared.diff(&task).unwrap().is_empty());
    }

    #[test]
    fn stored_title_whitespace_is_not_a_change() {
        let task = Task {
            title: "  Write report ".to_string(),
            ..task()
        };
        assert!(TaskForm::from_task(&task).diff(&task).unwrap().is_empty());

        let mut renamed = TaskForm::from_task(&task);
        renamed.title = "Write memo".to_string();
        assert_eq!(
            renamed.diff(&task).unwrap().title.as_deref(),
            Some("Write memo")
        );
    }
}
