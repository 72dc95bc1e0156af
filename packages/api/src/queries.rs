//! Cached reads and cache-aware mutations.
//!
//! Reads go through a [`QueryCache`] per resource. A successful create,
//! update or delete invalidates every cached list and the stats; an update
//! also seeds the detail entry with the server's copy and a delete evicts it.
//! Signing in or out drops all cached task data.

use store::{
    CreateTask, Credentials, SessionContext, Task, TaskPage, TaskQueryParams, TaskStats,
    UpdateTask, User,
};

use crate::auth::AuthService;
use crate::cache::{CacheConfig, QueryCache};
use crate::client::HttpClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::tasks::TaskService;

#[derive(Debug, Clone)]
pub struct TaskQueries {
    service: TaskService,
    lists: QueryCache<TaskQueryParams, TaskPage>,
    details: QueryCache<String, Task>,
    stats: QueryCache<(), TaskStats>,
}

impl TaskQueries {
    pub fn new(service: TaskService, config: CacheConfig) -> Self {
        Self {
            service,
            lists: QueryCache::new(config),
            details: QueryCache::new(config),
            stats: QueryCache::new(config),
        }
    }

    pub async fn list(&self, params: &TaskQueryParams) -> Result<TaskPage, ApiError> {
        let service = self.service.clone();
        let params = params.clone();
        self.lists
            .get_or_fetch(params.clone(), move || async move { service.list(&params).await })
            .await
    }

    pub async fn detail(&self, id: &str) -> Result<Task, ApiError> {
        let service = self.service.clone();
        let id = id.to_string();
        self.details
            .get_or_fetch(id.clone(), move || async move { service.get(&id).await })
            .await
    }

    pub async fn stats(&self) -> Result<TaskStats, ApiError> {
        let service = self.service.clone();
        self.stats
            .get_or_fetch((), move || async move { service.stats().await })
            .await
    }

    /// Fresh detail entry, if any, without touching the network.
    pub fn cached_detail(&self, id: &str) -> Option<Task> {
        self.details.get(&id.to_string())
    }

    pub async fn create(&self, task: &CreateTask) -> Result<Task, ApiError> {
        let created = self.service.create(task).await?;
        self.invalidate_collections();
        Ok(created)
    }

    pub async fn update(&self, id: &str, changes: &UpdateTask) -> Result<Task, ApiError> {
        let updated = self.service.update(id, changes).await?;
        self.invalidate_collections();
        self.details.seed(updated.id.clone(), updated.clone());
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.service.delete(id).await?;
        self.invalidate_collections();
        self.details.remove(&id.to_string());
        Ok(())
    }

    /// Forget everything, e.g. when the signed-in user changes.
    pub fn clear(&self) {
        self.lists.invalidate_all();
        self.details.invalidate_all();
        self.stats.invalidate_all();
    }

    fn invalidate_collections(&self) {
        self.lists.invalidate_all();
        self.stats.invalidate_all();
    }
}

/// Authentication flows bound to the session.
#[derive(Debug, Clone)]
pub struct AuthQueries {
    service: AuthService,
    session: SessionContext,
    profile: QueryCache<(), User>,
    tasks: TaskQueries,
}

impl AuthQueries {
    pub fn new(
        service: AuthService,
        session: SessionContext,
        tasks: TaskQueries,
        config: CacheConfig,
    ) -> Self {
        Self {
            service,
            session,
            profile: QueryCache::new(config),
            tasks,
        }
    }

    /// Log in and start a session. Returns the signed-in user.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let payload = self.service.login(credentials).await?;
        Ok(self.start(payload.into()))
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let payload = self.service.register(credentials).await?;
        Ok(self.start(payload.into()))
    }

    pub fn logout(&self) {
        self.session.end();
        self.forget();
        tracing::info!("logged out");
    }

    /// Profile of the signed-in user; `None` without a session.
    pub async fn profile(&self) -> Result<Option<User>, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        let service = self.service.clone();
        let user = self
            .profile
            .get_or_fetch((), move || async move { service.profile().await })
            .await?;
        Ok(Some(user))
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn start(&self, session: store::Session) -> User {
        let user = session.user.clone();
        self.forget();
        self.session.begin(session);
        user
    }

    fn forget(&self) {
        self.profile.invalidate_all();
        self.tasks.clear();
    }
}

/// Everything the UI needs to talk to the API, sharing one session.
#[derive(Debug, Clone)]
pub struct Queries {
    pub tasks: TaskQueries,
    pub auth: AuthQueries,
}

impl Queries {
    pub fn new(config: ApiConfig, session: SessionContext) -> Self {
        Self::with_cache_config(config, session, CacheConfig::default())
    }

    pub fn with_cache_config(
        config: ApiConfig,
        session: SessionContext,
        cache: CacheConfig,
    ) -> Self {
        let client = HttpClient::new(config, session.clone());
        let tasks = TaskQueries::new(TaskService::new(client.clone()), cache);
        let auth = AuthQueries::new(AuthService::new(client), session, tasks.clone(), cache);
        Self { tasks, auth }
    }
}

impl PartialEq for Queries {
    fn eq(&self, other: &Self) -> bool {
        self.auth.session == other.auth.session
    }
}
