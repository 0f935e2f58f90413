/// Task workflow controller
///
/// Orchestrates every board mutation: applies the authorization policy,
/// validates input, calls the repository, and triggers the reconciliation
/// reload that re-derives the board projection.
///
/// # Consistency
///
/// There is no optimistic local insert or patch-merge. After every
/// confirmed mutation the controller re-fetches the full task collection
/// and replaces its copy wholesale, so the rendered board always reflects
/// the backend's view at the cost of one extra round trip per mutation.
///
/// # Ordering
///
/// Within one operation the mutating call always precedes its reload.
/// Independent operations (a move racing a poll tick) interleave
/// arbitrarily; both sides only issue idempotent reads after the write,
/// so the race is harmless. Concurrent moves from two sessions are
/// last-write-wins at the backend with no conflict signal.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use boardsync_client::repository::MockRepository;
/// use boardsync_client::workflow::TaskWorkflowController;
/// use boardsync_shared::models::Role;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = Arc::new(MockRepository::new());
/// let mut controller = TaskWorkflowController::new(repo, Role::Manager);
///
/// controller.load_board().await?;
/// let outcome = controller.move_task(10, Some("в работе")).await?;
/// println!("{:?}", outcome);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use validator::Validate;

use boardsync_shared::auth::policy;
use boardsync_shared::board::projection::{self, BoardColumn};
use boardsync_shared::board::resolver;
use boardsync_shared::models::{Message, Role, Status, Task, User};

use crate::repository::{NewTask, RepositoryError, TaskPatch, TaskRepository};

/// Localized user-facing failure messages
mod messages {
    pub const CREATE_FAILED: &str = "Не удалось создать задачу";
    pub const MOVE_FAILED: &str = "Не удалось обновить статус задачи";
    pub const UPDATE_FAILED: &str = "Не удалось обновить задачу";
    pub const MESSAGE_FAILED: &str = "Не удалось отправить сообщение";
    pub const BOARD_LOAD_FAILED: &str = "Не удалось загрузить задачи";
    pub const DETAIL_LOAD_FAILED: &str =
        "Не удалось загрузить задачу. Проверьте, что бэкенд запущен и токен валиден.";
    pub const REQUIRED_FIELDS: &str =
        "Заполните обязательные поля: заголовок, краткое описание и статус.";
}

/// Workflow error, always carrying a user-facing message
///
/// Backend rejections surface the backend's detail verbatim when present,
/// otherwise the operation's localized generic message. Nothing here is
/// fatal: every failure resolves to a displayable state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The policy denies this action for the session's role
    #[error("Access denied")]
    Forbidden,

    /// Input failed validation before any network call
    #[error("{0}")]
    Validation(String),

    /// The repository call failed; the message is displayable as-is
    #[error("{0}")]
    Backend(String),
}

impl WorkflowError {
    /// Maps a repository error to a displayable message, preferring the
    /// backend's verbatim detail over the generic fallback
    fn from_repository(err: RepositoryError, fallback: &str) -> Self {
        match err.detail() {
            Some(detail) => WorkflowError::Backend(detail.to_string()),
            None => WorkflowError::Backend(fallback.to_string()),
        }
    }
}

/// Workflow result type alias
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Draft for a new task, as entered in the create form
#[derive(Debug, Clone, Default, Validate)]
pub struct TaskDraft {
    /// Task title (required)
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    /// Card summary (required)
    #[validate(length(min = 1, message = "short description is required"))]
    pub short_description: String,

    /// Long description (optional)
    pub description: String,

    /// Status to start in (required)
    #[validate(required(message = "status is required"))]
    pub status_id: Option<i64>,

    /// Assignee (optional)
    pub assignee_id: Option<i64>,
}

impl TaskDraft {
    /// Trims text fields in place before validation
    fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.short_description = self.short_description.trim().to_string();
        self.description = self.description.trim().to_string();
        self
    }
}

/// Outcome of a move operation
///
/// Only `Moved` performed any network traffic; every other variant
/// returned before a repository call was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A status patch was issued and the board reloaded
    Moved(String),

    /// The resolved target equals the task's current status (no-op)
    Unchanged,

    /// The drop target resolved to nothing (aborted or unknown drop)
    NoTarget,

    /// The dragged task is not in the local collection
    UnknownTask,
}

/// Orchestrates create / move / edit / discuss operations
pub struct TaskWorkflowController {
    repo: Arc<dyn TaskRepository>,
    role: Role,
    tasks: Vec<Task>,
    statuses: Vec<Status>,
    users: Vec<User>,
}

impl TaskWorkflowController {
    /// Creates a controller for the given session role
    pub fn new(repo: Arc<dyn TaskRepository>, role: Role) -> Self {
        TaskWorkflowController {
            repo,
            role,
            tasks: Vec::new(),
            statuses: Vec::new(),
            users: Vec::new(),
        }
    }

    /// The last fetched task collection
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The status vocabulary, in column order
    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    /// Users available as assignee options
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Default status for the create form (first vocabulary entry)
    pub fn default_status_id(&self) -> Option<i64> {
        self.statuses.first().map(|s| s.id)
    }

    /// Ordered column names for the current collections
    pub fn column_names(&self) -> Vec<String> {
        let vocabulary: Vec<String> = self.statuses.iter().map(|s| s.name.clone()).collect();
        projection::column_names(&self.tasks, &vocabulary)
    }

    /// Derives the board columns from the latest fetched collections
    pub fn columns(&self) -> Vec<BoardColumn> {
        let vocabulary: Vec<String> = self.statuses.iter().map(|s| s.name.clone()).collect();
        projection::project(&self.tasks, &vocabulary)
    }

    /// Loads tasks, statuses, and users for the board view
    ///
    /// Status and user fetch failures are swallowed: the board renders on
    /// the fallback vocabulary and an empty assignee list. Only the task
    /// load failure surfaces, as the retryable board error.
    pub async fn load_board(&mut self) -> WorkflowResult<()> {
        self.load_statuses().await;
        self.load_users().await;
        self.load_tasks().await
    }

    /// Re-fetches the task collection and replaces it wholesale
    pub async fn load_tasks(&mut self) -> WorkflowResult<()> {
        let tasks = self
            .repo
            .fetch_tasks()
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::BOARD_LOAD_FAILED))?;

        tracing::debug!(count = tasks.len(), "task collection replaced");
        self.tasks = tasks;
        Ok(())
    }

    /// Fetches the status vocabulary; failure keeps the fallback
    pub async fn load_statuses(&mut self) {
        match self.repo.fetch_statuses().await {
            Ok(statuses) => self.statuses = statuses,
            Err(e) => {
                tracing::debug!(error = %e, "status fetch failed, keeping fallback vocabulary")
            }
        }
    }

    /// Fetches the user list; failure yields an empty list
    pub async fn load_users(&mut self) {
        match self.repo.fetch_users().await {
            Ok(users) => self.users = users,
            Err(e) => {
                tracing::debug!(error = %e, "user fetch failed, clearing assignee options");
                self.users = Vec::new();
            }
        }
    }

    /// Creates a task and reloads the board
    ///
    /// Requires `can_create_task`. Title, summary, and status are
    /// validated before any network call; the backend's validation detail
    /// is surfaced verbatim when it rejects the payload.
    pub async fn create_task(&mut self, draft: TaskDraft) -> WorkflowResult<i64> {
        if !policy::can_create_task(self.role) {
            return Err(WorkflowError::Forbidden);
        }

        let draft = draft.trimmed();
        let status_id = match (draft.validate(), draft.status_id) {
            (Ok(()), Some(status_id)) => status_id,
            _ => {
                return Err(WorkflowError::Validation(
                    messages::REQUIRED_FIELDS.to_string(),
                ))
            }
        };

        let payload = NewTask {
            title: draft.title,
            short_description: draft.short_description,
            description: draft.description,
            status_id,
            assignee_id: draft.assignee_id,
        };

        let task_id = self
            .repo
            .create_task(payload)
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::CREATE_FAILED))?;

        tracing::info!(task_id, "task created, reloading board");
        self.load_tasks().await?;

        Ok(task_id)
    }

    /// Applies a drag-drop event
    ///
    /// Resolves the drop target, skips unresolvable and same-status drops
    /// without any repository call, and otherwise issues exactly one
    /// status patch followed by a full reload.
    pub async fn move_task(
        &mut self,
        task_id: i64,
        drop_target: Option<&str>,
    ) -> WorkflowResult<MoveOutcome> {
        let columns = self.column_names();
        let target = match resolver::resolve(drop_target, &self.tasks, &columns) {
            Some(target) => target,
            None => return Ok(MoveOutcome::NoTarget),
        };

        let task = match self.tasks.iter().find(|t| t.id == task_id) {
            Some(task) => task,
            None => return Ok(MoveOutcome::UnknownTask),
        };

        // Re-issuing an identical status patch is wasted work and a
        // source of redundant reconciliation races.
        if task.status == target {
            tracing::debug!(task_id, status = %target, "drop on current status, skipping");
            return Ok(MoveOutcome::Unchanged);
        }

        self.repo
            .update_task_status(task_id, &target)
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::MOVE_FAILED))?;

        tracing::info!(task_id, status = %target, "task moved, reloading board");
        self.load_tasks().await?;

        Ok(MoveOutcome::Moved(target))
    }

    /// Patches task fields and refreshes the task
    ///
    /// Requires `can_edit_task`. Text fields are trimmed, unset fields
    /// stay out of the payload, and the assignee patch keeps "unassign"
    /// distinct from "leave unchanged". On success the task is re-fetched
    /// and replaced in the local collection.
    pub async fn update_task(&mut self, task_id: i64, patch: TaskPatch) -> WorkflowResult<Task> {
        if !policy::can_edit_task(self.role) {
            return Err(WorkflowError::Forbidden);
        }

        let patch = TaskPatch {
            title: patch.title.map(|s| s.trim().to_string()),
            short_description: patch.short_description.map(|s| s.trim().to_string()),
            description: patch.description.map(|s| s.trim().to_string()),
            ..patch
        };

        self.repo
            .update_task(task_id, patch)
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::UPDATE_FAILED))?;

        let task = self
            .repo
            .fetch_task(task_id)
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::UPDATE_FAILED))?;

        if let Some(local) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            *local = task.clone();
        }

        tracing::info!(task_id, "task updated");
        Ok(task)
    }

    /// Posts a discussion message and returns the refreshed list
    ///
    /// Empty content is ignored (`Ok(None)`) without any network call.
    /// Message posting is open to every authenticated role.
    pub async fn post_message(
        &self,
        task_id: i64,
        content: &str,
    ) -> WorkflowResult<Option<Vec<Message>>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        self.repo
            .post_message(task_id, content)
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::MESSAGE_FAILED))?;

        let refreshed = self
            .repo
            .fetch_messages(task_id)
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::MESSAGE_FAILED))?;

        Ok(Some(refreshed))
    }

    /// Initial load for a task-detail view: the task plus its messages
    ///
    /// Unlike background polling, a failure here is surfaced as the
    /// retryable detail-view error.
    pub async fn load_task_detail(&self, task_id: i64) -> WorkflowResult<(Task, Vec<Message>)> {
        let task = self
            .repo
            .fetch_task(task_id)
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::DETAIL_LOAD_FAILED))?;

        let messages = self
            .repo
            .fetch_messages(task_id)
            .await
            .map_err(|e| WorkflowError::from_repository(e, messages::DETAIL_LOAD_FAILED))?;

        Ok((task, messages))
    }
}
