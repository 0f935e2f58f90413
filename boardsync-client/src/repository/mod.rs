/// Task repository boundary
///
/// This module defines the contract the workflow controller consumes. The
/// HTTP implementation talks to the authoritative backend; the mock keeps
/// everything in memory and records calls for assertions.
///
/// # Repository Contract
///
/// All implementations must:
/// 1. Return collections in the backend's own order (the core imposes no
///    sort of its own)
/// 2. Map backend rejections to `RepositoryError::Rejected` carrying the
///    human-readable `detail` when the backend supplied one
/// 3. Map a missing task to `RepositoryError::NotFound`
///
/// # Example
///
/// ```no_run
/// use boardsync_client::repository::{HttpTaskRepository, TaskRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = HttpTaskRepository::new("http://localhost:8000", Some("token".into()));
/// let tasks = repo.fetch_tasks().await?;
/// println!("{} tasks on the board", tasks.len());
/// # Ok(())
/// # }
/// ```

pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::{Serialize, Serializer};

use boardsync_shared::models::{Message, Status, Task, User};

pub use http::HttpTaskRepository;
pub use mock::MockRepository;

/// Repository error types
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Backend rejected the request (4xx/5xx), optionally with a
    /// human-readable detail message
    #[error("Backend rejected the request with status {status}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Human-readable detail from the response body, if present
        detail: Option<String>,
    },

    /// Task does not exist
    #[error("Task not found: {0}")]
    NotFound(i64),

    /// Transport-level failure (connection refused, timeout, bad body)
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RepositoryError {
    /// The backend's human-readable detail, when it sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            RepositoryError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Repository result type alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Payload for creating a task
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Card summary
    pub short_description: String,

    /// Long description (may be empty)
    pub description: String,

    /// Status the task starts in, by vocabulary id
    pub status_id: i64,

    /// Assignee user id, `None` to leave unassigned
    pub assignee_id: Option<i64>,
}

/// Tri-state assignee change for a task patch
///
/// "Unassign" must be expressible and distinct from "leave unchanged":
/// the wire encoding omits the field for `Keep` and sends `0` for
/// `Unassign`, which the backend interprets as clearing the assignee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssigneePatch {
    /// Leave the assignee unchanged (field omitted from the payload)
    #[default]
    Keep,

    /// Clear the assignee (sent as `0`)
    Unassign,

    /// Assign to the given user id
    Assign(i64),
}

impl AssigneePatch {
    fn is_keep(&self) -> bool {
        matches!(self, AssigneePatch::Keep)
    }

    fn serialize_wire<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Keep is skipped at the field level and never reaches here.
        match self {
            AssigneePatch::Keep | AssigneePatch::Unassign => serializer.serialize_i64(0),
            AssigneePatch::Assign(id) => serializer.serialize_i64(*id),
        }
    }
}

/// Partial task update
///
/// Unset fields are omitted from the outgoing payload entirely, so the
/// backend only touches what the caller actually changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New card summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// New long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New status, by vocabulary id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,

    /// Assignee change
    #[serde(
        rename = "assignee_id",
        skip_serializing_if = "AssigneePatch::is_keep",
        serialize_with = "AssigneePatch::serialize_wire"
    )]
    pub assignee: AssigneePatch,
}

impl TaskPatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.short_description.is_none()
            && self.description.is_none()
            && self.status_id.is_none()
            && self.assignee.is_keep()
    }
}

/// CRUD and status-patch operations against the backend
///
/// The workflow controller only ever consumes this contract; swapping the
/// HTTP implementation for the mock (or a future transport) never touches
/// callers.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fetches all tasks visible to the session, in backend order
    async fn fetch_tasks(&self) -> RepositoryResult<Vec<Task>>;

    /// Fetches one task by id, with detail fields populated
    async fn fetch_task(&self, task_id: i64) -> RepositoryResult<Task>;

    /// Creates a task, returning the new task id
    async fn create_task(&self, payload: NewTask) -> RepositoryResult<i64>;

    /// Patches a task's status by name
    async fn update_task_status(&self, task_id: i64, status: &str) -> RepositoryResult<()>;

    /// Patches task fields
    async fn update_task(&self, task_id: i64, patch: TaskPatch) -> RepositoryResult<()>;

    /// Fetches the status vocabulary, in column order
    async fn fetch_statuses(&self) -> RepositoryResult<Vec<Status>>;

    /// Fetches a task's messages in ascending creation order
    async fn fetch_messages(&self, task_id: i64) -> RepositoryResult<Vec<Message>>;

    /// Posts a message to a task's discussion, returning the message id
    async fn post_message(&self, task_id: i64, content: &str) -> RepositoryResult<i64>;

    /// Fetches all users (for assignee options)
    async fn fetch_users(&self) -> RepositoryResult<Vec<User>>;
}
