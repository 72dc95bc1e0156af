//! Authentication endpoints.

use serde::Deserialize;
use store::{Credentials, Session, User};

use crate::client::HttpClient;
use crate::error::ApiError;

const LOGIN_PATH: &str = "/api/v1/auth/login";
const REGISTER_PATH: &str = "/api/v1/auth/register";
const PROFILE_PATH: &str = "/api/v1/auth/profile";

/// `data` of a login or register response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub access_token: String,
    pub user: User,
}

impl From<AuthPayload> for Session {
    fn from(payload: AuthPayload) -> Self {
        Session {
            access_token: payload.access_token,
            user: payload.user,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthService {
    client: HttpClient,
}

impl AuthService {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        let resp = self.client.post(LOGIN_PATH, credentials).await?;
        tracing::info!(username = %credentials.username, "logged in");
        Ok(resp.data)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        let resp = self.client.post(REGISTER_PATH, credentials).await?;
        tracing::info!(username = %credentials.username, "registered");
        Ok(resp.data)
    }

    /// Current user as the server sees it.
    pub async fn profile(&self) -> Result<User, ApiError> {
        Ok(self.client.get(PROFILE_PATH).await?.data)
    }
}
