/// HTTP repository implementation
///
/// Talks to the backend over its JSON API:
///
/// ```text
/// GET    /tasks/                  → ordered task list
/// GET    /tasks/{id}              → task detail or 404
/// POST   /tasks/                  → { id }
/// PATCH  /tasks/{id}/status       → { status: "updated" }
/// PATCH  /tasks/{id}              → { status: "updated" }
/// GET    /statuses/               → ordered vocabulary
/// GET    /tasks/{id}/messages/    → ordered message list
/// POST   /tasks/{id}/messages/    → { id }
/// GET    /users/                  → user list
/// ```
///
/// The credential is attached as a bearer token and never interpreted
/// here; rejections carry the backend's `detail` field through verbatim.

use async_trait::async_trait;
use serde::Deserialize;

use boardsync_shared::models::{Message, Status, Task, User};

use super::{NewTask, RepositoryError, RepositoryResult, TaskPatch, TaskRepository};

/// Backend error body shape
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Id-only response returned by the create endpoints
#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: i64,
}

/// HTTP-backed task repository
pub struct HttpTaskRepository {
    client: reqwest::Client,
    base_url: String,
    credential: Option<String>,
}

impl HttpTaskRepository {
    /// Creates a repository against the given base URL
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend origin, e.g. `http://localhost:8000`
    /// * `credential` - Bearer credential for the Authorization header
    pub fn new(base_url: impl Into<String>, credential: Option<String>) -> Self {
        HttpTaskRepository {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(credential) = &self.credential {
            builder = builder.bearer_auth(credential);
        }
        builder
    }

    /// Converts a non-success response into a repository error, pulling
    /// the backend's `detail` out of the body when it parses
    async fn rejection(response: reqwest::Response) -> RepositoryError {
        let status = response.status().as_u16();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);

        RepositoryError::Rejected { status, detail }
    }

    async fn expect_success(response: reqwest::Response) -> RepositoryResult<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::rejection(response).await)
        }
    }
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    async fn fetch_tasks(&self) -> RepositoryResult<Vec<Task>> {
        let response = self.request(reqwest::Method::GET, "/tasks/").send().await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn fetch_task(&self, task_id: i64) -> RepositoryResult<Task> {
        let response = self
            .request(reqwest::Method::GET, &format!("/tasks/{}", task_id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound(task_id));
        }
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn create_task(&self, payload: NewTask) -> RepositoryResult<i64> {
        let response = self
            .request(reqwest::Method::POST, "/tasks/")
            .json(&payload)
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let created: CreatedBody = response.json().await?;

        tracing::info!(task_id = created.id, "task created");
        Ok(created.id)
    }

    async fn update_task_status(&self, task_id: i64, status: &str) -> RepositoryResult<()> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/tasks/{}/status", task_id))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        Self::expect_success(response).await?;

        tracing::info!(task_id, status, "task status patched");
        Ok(())
    }

    async fn update_task(&self, task_id: i64, patch: TaskPatch) -> RepositoryResult<()> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/tasks/{}", task_id))
            .json(&patch)
            .send()
            .await?;
        Self::expect_success(response).await?;

        tracing::info!(task_id, "task fields patched");
        Ok(())
    }

    async fn fetch_statuses(&self) -> RepositoryResult<Vec<Status>> {
        let response = self
            .request(reqwest::Method::GET, "/statuses/")
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn fetch_messages(&self, task_id: i64) -> RepositoryResult<Vec<Message>> {
        let response = self
            .request(reqwest::Method::GET, &format!("/tasks/{}/messages/", task_id))
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn post_message(&self, task_id: i64, content: &str) -> RepositoryResult<i64> {
        let response = self
            .request(reqwest::Method::POST, &format!("/tasks/{}/messages/", task_id))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let created: CreatedBody = response.json().await?;
        Ok(created.id)
    }

    async fn fetch_users(&self) -> RepositoryResult<Vec<User>> {
        let response = self.request(reqwest::Method::GET, "/users/").send().await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }
}
