//! HttpRemoteStore - reqwest implementation of the remote store.
//!
//! Talks to the task API over HTTP and normalizes every failure mode
//! (transport, non-2xx, malformed payload) into a single
//! `TaskpadError::Remote` shape carrying the failing action's name.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::env;
use std::time::Duration;
use taskpad_core::error::{Result, TaskpadError};
use taskpad_core::task::model::{Comment, CommentDraft, Task, TaskDraft, TaskPatch};
use taskpad_core::task::store::RemoteStore;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the API base endpoint.
pub const API_URL_ENV: &str = "TASKPAD_API_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote store client backed by the task API over HTTP.
///
/// Holds no state beyond the connection pool and the base URL; every
/// operation is a single request against the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: Client,
    base_url: String,
}

/// Body for `POST /comments`. The API takes the owning task in the payload
/// rather than in the path.
#[derive(Debug, Serialize)]
struct CreateCommentRequest<'a> {
    content: &'a str,
    task_id: i64,
}

impl HttpRemoteStore {
    /// Creates a client against an explicit base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        tracing::debug!("[HttpRemoteStore] Using API endpoint: {}", base_url);
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Creates a client from the `TASKPAD_API_URL` environment variable,
    /// falling back to `http://localhost:5000/api`.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Maps a transport-level failure into the uniform remote error.
    fn transport_err(action: &'static str, err: reqwest::Error) -> TaskpadError {
        tracing::warn!("[HttpRemoteStore] {} transport failure: {}", action, err);
        TaskpadError::remote(action, err.to_string())
    }

    /// Rejects non-2xx responses, folding the response body into the error
    /// message when one is available.
    async fn check_status(
        action: &'static str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!("[HttpRemoteStore] {} failed with {}: {}", action, status, body);
        Err(TaskpadError::remote(
            action,
            format!("{}: {}", status, body),
        ))
    }

    /// Decodes a JSON response body, normalizing decode failures too.
    async fn decode<T: serde::de::DeserializeOwned>(
        action: &'static str,
        response: reqwest::Response,
    ) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| TaskpadError::remote(action, format!("malformed payload: {}", e)))
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        const ACTION: &str = "list_tasks";
        let response = self
            .client
            .get(self.url("tasks"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        let response = Self::check_status(ACTION, response).await?;
        Self::decode(ACTION, response).await
    }

    async fn get_task(&self, task_id: i64) -> Result<Task> {
        const ACTION: &str = "get_task";
        let response = self
            .client
            .get(self.url(&format!("tasks/{}", task_id)))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        let response = Self::check_status(ACTION, response).await?;
        Self::decode(ACTION, response).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        const ACTION: &str = "create_task";
        let response = self
            .client
            .post(self.url("tasks"))
            .json(draft)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        let response = Self::check_status(ACTION, response).await?;
        Self::decode(ACTION, response).await
    }

    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> Result<Task> {
        const ACTION: &str = "update_task";
        let response = self
            .client
            .put(self.url(&format!("tasks/{}", task_id)))
            .json(patch)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        let response = Self::check_status(ACTION, response).await?;
        Self::decode(ACTION, response).await
    }

    async fn delete_task(&self, task_id: i64) -> Result<()> {
        const ACTION: &str = "delete_task";
        let response = self
            .client
            .delete(self.url(&format!("tasks/{}", task_id)))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        Self::check_status(ACTION, response).await?;
        Ok(())
    }

    async fn create_comment(&self, task_id: i64, draft: &CommentDraft) -> Result<Comment> {
        const ACTION: &str = "create_comment";
        let body = CreateCommentRequest {
            content: &draft.content,
            task_id,
        };
        let response = self
            .client
            .post(self.url("comments"))
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        let response = Self::check_status(ACTION, response).await?;
        Self::decode(ACTION, response).await
    }

    async fn update_comment(&self, comment_id: i64, draft: &CommentDraft) -> Result<Comment> {
        const ACTION: &str = "update_comment";
        let response = self
            .client
            .put(self.url(&format!("comments/{}", comment_id)))
            .json(draft)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        let response = Self::check_status(ACTION, response).await?;
        Self::decode(ACTION, response).await
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        const ACTION: &str = "delete_comment";
        let response = self
            .client
            .delete(self.url(&format!("comments/{}", comment_id)))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        Self::check_status(ACTION, response).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        const ACTION: &str = "health_check";
        let response = self
            .client
            .get(self.url("health"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_err(ACTION, e))?;
        Self::check_status(ACTION, response).await?;
        Ok(())
    }
}
