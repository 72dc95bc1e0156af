//! Authenticated JSON transport shared by the resource services.
//!
//! Every call attaches `Authorization: Bearer <token>` when the session holds
//! one, decodes the `{message, data, validationErrors?}` envelope and folds
//! every failure into [`ApiError`].

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::SessionContext;

use crate::config::ApiConfig;
use crate::error::{ApiError, FieldError};

/// Decoded success envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    validation_errors: Option<Vec<FieldError>>,
}

#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionContext,
}

impl HttpClient {
    pub fn new(config: ApiConfig, session: SessionContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        let (status, body) = self.send(Method::GET, path, None, None).await?;
        decode(status, &body)
    }

    /// GET with an already-encoded query string (no leading `?`).
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        let (status, body) = self.send(Method::GET, path, Some(query), None).await?;
        decode(status, &body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode(body)?;
        let (status, body) = self.send(Method::POST, path, None, Some(payload)).await?;
        decode(status, &body)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode(body)?;
        let (status, body) = self.send(Method::PATCH, path, None, Some(payload)).await?;
        decode(status, &body)
    }

    /// DELETE; the success body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    /// Issue a request and return the status and raw body of a 2xx response.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<String>,
    ) -> Result<(StatusCode, String), ApiError> {
        let mut url = self.config.endpoint(path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "api request failed");
            transport_error(&e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| transport_error(&e))?;

        if status.is_success() {
            return Ok((status, text));
        }
        let err = ApiError::from_response(status.as_u16(), status_text(status), &text);
        tracing::warn!(%method, %url, status = status.as_u16(), error = %err, "api error response");
        Err(err)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url.as_str())
            .finish()
    }
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

fn transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_builder() || err.is_decode() {
        ApiError::unknown(err.to_string())
    } else {
        ApiError::network()
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::unknown(e.to_string()))
}

/// Decode a 2xx envelope. Non-empty `validationErrors` turn the response into
/// an error even though the status was successful.
fn decode<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<ApiResponse<T>, ApiError> {
    let raw: RawEnvelope = serde_json::from_str(body)
        .map_err(|e| ApiError::unknown(format!("invalid response body: {e}")))?;

    if let Some(errors) = raw.validation_errors.filter(|e| !e.is_empty()) {
        return Err(ApiError::Validation {
            status: status.as_u16(),
            status_text: status_text(status).to_string(),
            errors,
        });
    }

    let data = serde_json::from_value(raw.data.unwrap_or(Value::Null))
        .map_err(|e| ApiError::unknown(format!("unexpected response data: {e}")))?;
    Ok(ApiResponse {
        message: raw.message.unwrap_or_default(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;

    #[test]
    fn decodes_envelope_data() {
        let resp: ApiResponse<Vec<u32>> =
            decode(StatusCode::OK, r#"{"message":"ok","data":[1,2,3]}"#).unwrap();
        assert_eq!(resp.message, "ok");
        assert_eq!(resp.data, vec![1, 2, 3]);
    }

    #[test]
    fn success_with_validation_errors_is_an_error() {
        let err = decode::<Value>(
            StatusCode::CREATED,
            r#"{"message":"x","validationErrors":[{"property":"title","message":"Title is required"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.to_string(), "Validation failed: title: Title is required");
        assert_eq!(err.status(), 201);
        assert_eq!(err.status_text(), "Created");
    }

    #[test]
    fn undecodable_body_is_unknown() {
        let err = decode::<Vec<u32>>(StatusCode::OK, "<html>").unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Unknown);
        let err = decode::<Vec<u32>>(StatusCode::OK, r#"{"data":{"a":1}}"#).unwrap_err();
        assert_eq!(err.status(), 0);
    }
}
