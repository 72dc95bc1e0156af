//! Session, API and refresh contexts for the UI.
//!
//! [`AuthProvider`] owns the platform session store, restores the persisted
//! session once on mount and hands out three contexts: the [`AuthState`]
//! signal, the shared [`Queries`] and the [`TaskRevision`] counter.

use api::{ApiConfig, Queries};
use dioxus::prelude::*;
use store::{SessionContext, SessionStatus, User};

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// Stored session data was unreadable and has been discarded.
    pub expired: bool,
}

impl AuthState {
    fn from_status(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Authenticated(user) => Self {
                user: Some(user),
                expired: false,
            },
            SessionStatus::Anonymous => Self::default(),
            SessionStatus::Corrupt => Self {
                user: None,
                expired: true,
            },
        }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            expired: false,
        }
    }
}

/// Bumped after every successful task mutation. Task views read it inside
/// their resources so they re-run against the invalidated cache.
#[derive(Clone, Copy, PartialEq)]
pub struct TaskRevision(Signal<u64>);

impl TaskRevision {
    pub fn get(&self) -> u64 {
        (self.0)()
    }

    pub fn bump(&self) {
        let mut revision = self.0;
        *revision.write() += 1;
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_queries() -> Queries {
    use_context::<Queries>()
}

pub fn use_task_revision() -> TaskRevision {
    use_context::<TaskRevision>()
}

/// Session context over the platform's persistent storage.
fn make_session() -> SessionContext {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionContext::new(store::LocalStorageStore::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        SessionContext::new(store::MemoryStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        SessionContext::new(store::FileStore::in_data_dir())
    }
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let session = use_hook(make_session);
    use_context_provider({
        let session = session.clone();
        move || Signal::new(AuthState::from_status(session.init()))
    });
    let config = use_hook(|| ApiConfig::from_env().map_err(|e| e.to_string()));

    match config {
        Ok(config) => rsx! {
            ApiProvider { config, session, {children} }
        },
        Err(err) => {
            tracing::error!(%err, "invalid API configuration");
            rsx! {
                div { class: "alert alert-error", "Invalid API configuration: {err}" }
            }
        }
    }
}

#[component]
fn ApiProvider(config: ApiConfig, session: SessionContext, children: Element) -> Element {
    use_context_provider(|| Queries::new(config.clone(), session.clone()));
    use_context_provider(|| TaskRevision(Signal::new(0)));

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    on_logout: EventHandler<()>,
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth = use_auth();
    let queries = use_queries();

    let onclick = move |_| {
        queries.auth.logout();
        auth.set(AuthState::default());
        on_logout.call(());
    };

    rsx! {
        button {
            class: "btn btn-outline {class}",
            onclick: onclick,
            "{label}"
        }
    }
}
