//! # Listing state: filter, sort and pagination for the task list
//!
//! [`ListingState`] answers "which tasks, in what order, on what page". It is
//! the canonical in-memory form of the task list's query string: given one,
//! the other can be fully reconstructed, with defaults standing in for absent
//! parameters.
//!
//! ## Query string format
//!
//! | Key | Meaning | Default (omitted when equal) |
//! |-----|---------|------------------------------|
//! | `title`, `description` | substring filters | empty |
//! | `status` | `not_started` / `in_progress` / `done` | `all` |
//! | `dueDate`, `createdAt` | `YYYY-MM-DD` date filters | empty |
//! | `sortBy` | `createdAt` / `dueDate` / `title` / `status` | `createdAt` |
//! | `sortOrder` | `asc` / `desc` | `desc` |
//! | `page`, `limit` | 1-based page and page size | `1`, `10` |
//!
//! Parsing never fails. Any parameter that does not coerce to its type falls
//! back to its default, so a hand-edited or truncated link still renders.
//!
//! ## Reducer
//!
//! All changes go through [`ListingState::apply`] with a [`ListingIntent`].
//! Filter, sort and page-size changes reset the page to 1; a page change
//! leaves filters and sort untouched; [`ListingIntent::Reset`] restores every
//! default.

use std::fmt;

use chrono::NaiveDate;
use url::form_urlencoded;

use crate::models::TaskStatus;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Status criterion: every status, or exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Unknown values, including `"all"`, mean "no filter".
    pub fn parse(value: &str) -> Self {
        value
            .trim()
            .parse::<TaskStatus>()
            .map(Self::Only)
            .unwrap_or(Self::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn status(&self) -> Option<TaskStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(*status),
        }
    }
}

/// One of the five filter inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Description,
    Status,
    DueDate,
    CreatedAt,
}

impl FilterField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::DueDate => "dueDate",
            Self::CreatedAt => "createdAt",
        }
    }
}

/// Current search criteria. Text fields hold the value as typed; blank means absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pub title: String,
    pub description: String,
    pub status: StatusFilter,
    pub due_date: String,
    pub created_at: String,
}

impl Filters {
    fn set(&mut self, field: FilterField, value: &str) {
        match field {
            FilterField::Title => self.title = normalize_text(value),
            FilterField::Description => self.description = normalize_text(value),
            FilterField::Status => self.status = StatusFilter::parse(value),
            FilterField::DueDate => self.due_date = normalize_date(value),
            FilterField::CreatedAt => self.created_at = normalize_date(value),
        }
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Ordering key for the listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    CreatedAt,
    DueDate,
    Title,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::CreatedAt, Self::DueDate, Self::Title, Self::Status];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "createdAt" => Some(Self::CreatedAt),
            "dueDate" => Some(Self::DueDate),
            "title" => Some(Self::Title),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::DueDate => "dueDate",
            Self::Title => "title",
            Self::Status => "status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Created Date",
            Self::DueDate => "Due Date",
            Self::Title => "Title",
            Self::Status => "Status",
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Asc => "Ascending",
            Self::Desc => "Descending",
        }
    }
}

/// Which half of the sort state a select widget edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    SortBy,
    SortOrder,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pagination {
    /// 1-based.
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A user intent against the listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingIntent {
    /// Set one filter from its raw input value.
    Filter(FilterField, String),
    /// Apply both text searches at once (the search button).
    Search { title: String, description: String },
    SortBy(SortKey),
    SortOrder(SortOrder),
    /// Sort change from a raw select value; unrecognised values are ignored.
    Sort(SortField, String),
    Page(u32),
    Limit(u32),
    Reset,
}

/// The full filter/sort/pagination state of the task list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingState {
    pub filters: Filters,
    pub sort: Sort,
    pub pagination: Pagination,
}

impl ListingState {
    /// Rebuild the state from a query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let mut state = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            // First occurrence wins, like URLSearchParams::get.
            if seen.iter().any(|k| *k == key) {
                continue;
            }
            seen.push(key.to_string());

            match key.as_ref() {
                "title" => state.filters.set(FilterField::Title, &value),
                "description" => state.filters.set(FilterField::Description, &value),
                "status" => state.filters.set(FilterField::Status, &value),
                "dueDate" => state.filters.set(FilterField::DueDate, &value),
                "createdAt" => state.filters.set(FilterField::CreatedAt, &value),
                "sortBy" => state.sort.key = SortKey::parse(&value).unwrap_or_default(),
                "sortOrder" => state.sort.order = SortOrder::parse(&value).unwrap_or_default(),
                "page" => state.pagination.page = parse_positive(&value, DEFAULT_PAGE),
                "limit" => state.pagination.limit = parse_positive(&value, DEFAULT_LIMIT),
                _ => {}
            }
        }

        state
    }

    /// Minimal query string: only fields that differ from their default.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.query_pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let filters = &self.filters;

        for (field, value) in [
            (FilterField::Title, filters.title.as_str()),
            (FilterField::Description, filters.description.as_str()),
            (FilterField::Status, filters.status.as_str()),
            (FilterField::DueDate, filters.due_date.as_str()),
            (FilterField::CreatedAt, filters.created_at.as_str()),
        ] {
            let is_all_status =
                field == FilterField::Status && value == StatusFilter::All.as_str();
            if !value.trim().is_empty() && !is_all_status {
                pairs.push((field.key(), value.to_string()));
            }
        }

        if self.sort.key != SortKey::default() {
            pairs.push(("sortBy", self.sort.key.as_str().to_string()));
        }
        if self.sort.order != SortOrder::default() {
            pairs.push(("sortOrder", self.sort.order.as_str().to_string()));
        }
        if self.pagination.page != DEFAULT_PAGE {
            pairs.push(("page", self.pagination.page.to_string()));
        }
        if self.pagination.limit != DEFAULT_LIMIT {
            pairs.push(("limit", self.pagination.limit.to_string()));
        }

        pairs
    }

    /// Parameters for the listing endpoint, normalised for use as a cache key.
    pub fn to_params(&self) -> TaskQueryParams {
        TaskQueryParams {
            title: non_blank(&self.filters.title),
            description: non_blank(&self.filters.description),
            status: self.filters.status.status(),
            due_date: non_blank(&self.filters.due_date),
            created_at: non_blank(&self.filters.created_at),
            page: self.pagination.page,
            limit: self.pagination.limit,
            sort_by: self.sort.key,
            sort_order: self.sort.order,
        }
    }

    /// Reduce an intent into the next state.
    pub fn apply(&self, intent: ListingIntent) -> Self {
        let mut next = self.clone();
        match intent {
            ListingIntent::Filter(field, value) => {
                next.filters.set(field, &value);
                next.pagination.page = DEFAULT_PAGE;
            }
            ListingIntent::Search { title, description } => {
                next.filters.set(FilterField::Title, &title);
                next.filters.set(FilterField::Description, &description);
                next.pagination.page = DEFAULT_PAGE;
            }
            ListingIntent::SortBy(key) => {
                next.sort.key = key;
                next.pagination.page = DEFAULT_PAGE;
            }
            ListingIntent::SortOrder(order) => {
                next.sort.order = order;
                next.pagination.page = DEFAULT_PAGE;
            }
            ListingIntent::Sort(field, value) => {
                let parsed = match field {
                    SortField::SortBy => SortKey::parse(&value).map(ListingIntent::SortBy),
                    SortField::SortOrder => SortOrder::parse(&value).map(ListingIntent::SortOrder),
                };
                match parsed {
                    Some(intent) => return self.apply(intent),
                    None => tracing::debug!(?field, %value, "ignoring unrecognised sort value"),
                }
            }
            ListingIntent::Page(page) => {
                next.pagination.page = page.max(DEFAULT_PAGE);
            }
            ListingIntent::Limit(limit) => {
                next.pagination.limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
                next.pagination.page = DEFAULT_PAGE;
            }
            ListingIntent::Reset => next = Self::default(),
        }
        next
    }
}

impl fmt::Display for ListingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

impl From<&str> for ListingState {
    fn from(query: &str) -> Self {
        Self::from_query(query)
    }
}

/// Normalised query for the listing endpoint. Equal parameter sets compare
/// and hash equal regardless of how they were built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TaskQueryParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<String>,
    pub created_at: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl TaskQueryParams {
    /// Key/value pairs in wire order. Absent filters are left out.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let optional = [
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("status", self.status.map(|s| s.as_str().to_string())),
            ("dueDate", self.due_date.clone()),
            ("createdAt", self.created_at.clone()),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                pairs.push((key, value));
            }
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("sortBy", self.sort_by.as_str().to_string()));
        pairs.push(("sortOrder", self.sort_order.as_str().to_string()));
        pairs
    }

    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.to_pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }
}

fn normalize_text(value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        value.to_string()
    }
}

fn normalize_date(value: &str) -> String {
    let value = value.trim();
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => date.format(DATE_FORMAT).to_string(),
        Err(_) => String::new(),
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_positive(value: &str, default: u32) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_state() -> ListingState {
        ListingState {
            filters: Filters {
                title: "report".to_string(),
                description: "q3 & q4".to_string(),
                status: StatusFilter::Only(TaskStatus::InProgress),
                due_date: "2026-11-01".to_string(),
                created_at: "2026-10-01".to_string(),
            },
            sort: Sort {
                key: SortKey::Title,
                order: SortOrder::Asc,
            },
            pagination: Pagination { page: 3, limit: 25 },
        }
    }

    #[test]
    fn empty_query_is_default() {
        let state = ListingState::from_query("");
        assert_eq!(state, ListingState::default());
        assert_eq!(state.sort.key, SortKey::CreatedAt);
        assert_eq!(state.sort.order, SortOrder::Desc);
        assert_eq!(state.pagination, Pagination { page: 1, limit: 10 });
        assert_eq!(state.to_query(), "");
    }

    #[test]
    fn round_trips_through_query() {
        let state = busy_state();
        let query = state.to_query();
        assert_eq!(ListingState::from_query(&query), state);
        assert_eq!(ListingState::from_query(&format!("?{query}")), state);
    }

    #[test]
    fn round_trips_each_single_change() {
        let base = ListingState::default();
        let intents = vec![
            ListingIntent::Filter(FilterField::Title, "a b".to_string()),
            ListingIntent::Filter(FilterField::Status, "done".to_string()),
            ListingIntent::Filter(FilterField::DueDate, "2026-01-31".to_string()),
            ListingIntent::SortBy(SortKey::DueDate),
            ListingIntent::SortOrder(SortOrder::Asc),
            ListingIntent::Page(7),
            ListingIntent::Limit(50),
        ];
        for intent in intents {
            let state = base.apply(intent.clone());
            assert_eq!(
                ListingState::from_query(&state.to_query()),
                state,
                "round trip failed for {intent:?}"
            );
        }
    }

    #[test]
    fn query_omits_defaults_and_blank_filters() {
        let state = ListingState::default()
            .apply(ListingIntent::Filter(FilterField::Title, "   ".to_string()))
            .apply(ListingIntent::Filter(FilterField::Status, "all".to_string()))
            .apply(ListingIntent::Filter(FilterField::Description, "".to_string()));
        assert_eq!(state.to_query(), "");

        let params = state.to_params();
        assert!(params.title.is_none());
        assert!(params.status.is_none());
        let pairs = params.to_pairs();
        assert!(pairs.iter().all(|(k, _)| *k != "title" && *k != "status"));
        assert!(pairs.iter().all(|(_, v)| !v.is_empty() && v != "all"));
    }

    #[test]
    fn query_uses_wire_keys() {
        let query = busy_state().to_query();
        assert_eq!(
            query,
            "title=report&description=q3+%26+q4&status=in_progress&dueDate=2026-11-01\
             &createdAt=2026-10-01&sortBy=title&sortOrder=asc&page=3&limit=25"
        );
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let state = ListingState::from_query(
            "status=archived&sortBy=priority&sortOrder=sideways&page=abc&limit=-5&dueDate=tomorrow",
        );
        assert_eq!(state, ListingState::default());

        let zeroes = ListingState::from_query("page=0&limit=0");
        assert_eq!(zeroes.pagination, Pagination::default());
    }

    #[test]
    fn unknown_keys_are_ignored_and_first_value_wins() {
        let state = ListingState::from_query("utm=x&title=first&title=second");
        assert_eq!(state.filters.title, "first");
        assert_eq!(state.to_query(), "title=first");
    }

    #[test]
    fn filter_and_sort_changes_reset_page() {
        let on_page_four = busy_state().apply(ListingIntent::Page(4));
        assert_eq!(on_page_four.pagination.page, 4);

        let intents = vec![
            ListingIntent::Filter(FilterField::Title, "new".to_string()),
            ListingIntent::Filter(FilterField::Status, "done".to_string()),
            ListingIntent::Filter(FilterField::CreatedAt, String::new()),
            ListingIntent::Search {
                title: "x".to_string(),
                description: String::new(),
            },
            ListingIntent::SortBy(SortKey::Status),
            ListingIntent::SortOrder(SortOrder::Desc),
            ListingIntent::Sort(SortField::SortBy, "dueDate".to_string()),
            ListingIntent::Limit(20),
        ];
        for intent in intents {
            let next = on_page_four.apply(intent.clone());
            assert_eq!(next.pagination.page, 1, "page not reset for {intent:?}");
        }
    }

    #[test]
    fn page_change_keeps_filters_and_sort() {
        let state = busy_state();
        let next = state.apply(ListingIntent::Page(9));
        assert_eq!(next.filters, state.filters);
        assert_eq!(next.sort, state.sort);
        assert_eq!(next.pagination.limit, state.pagination.limit);
        assert_eq!(next.pagination.page, 9);

        assert_eq!(state.apply(ListingIntent::Page(0)).pagination.page, 1);
    }

    #[test]
    fn unrecognised_sort_value_is_ignored() {
        let state = busy_state();
        let next = state.apply(ListingIntent::Sort(SortField::SortOrder, "up".to_string()));
        assert_eq!(next, state);
    }

    #[test]
    fn reset_restores_defaults() {
        let next = busy_state().apply(ListingIntent::Reset);
        assert_eq!(next, ListingState::default());
        assert_eq!(next.to_query(), "");
    }

    #[test]
    fn params_are_trimmed_and_explicit() {
        let state = ListingState::from_query("title=%20report%20");
        assert_eq!(state.filters.title, " report ");
        let params = state.to_params();
        assert_eq!(params.title.as_deref(), Some("report"));
        assert_eq!(
            params.to_query(),
            "title=report&page=1&limit=10&sortBy=createdAt&sortOrder=desc"
        );
    }

    #[test]
    fn equivalent_states_share_params() {
        let a = ListingState::from_query("status=done&title=x");
        let b = ListingState::from_query("title=x&status=done&page=1");
        assert_eq!(a.to_params(), b.to_params());
    }

    #[test]
    fn display_and_from_str_match_query_helpers() {
        let state = busy_state();
        assert_eq!(state.to_string(), state.to_query());
        assert_eq!(ListingState::from(state.to_string().as_str()), state);
    }
}
