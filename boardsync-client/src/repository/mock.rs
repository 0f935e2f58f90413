/// Mock repository for testing
///
/// An in-memory `TaskRepository` that mimics the backend: statuses are
/// reference data, tasks move between them by name, and messages append
/// in creation order. Every mutating and status-patch call is recorded so
/// tests can assert on exactly which network traffic a workflow operation
/// produced (or, for the no-op law, did not produce).
///
/// # Failure injection
///
/// - `fail_statuses` / `fail_tasks` / `fail_messages`: flip reads into
///   transport-style rejections
/// - `reject_create(detail)`: create returns a backend rejection with an
///   optional human-readable detail
///
/// # Example
///
/// ```
/// use boardsync_client::repository::{MockRepository, TaskRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = MockRepository::new();
/// repo.seed_status(1, "сделать");
/// repo.seed_task(10, "Настроить CI", "сделать");
///
/// let tasks = repo.fetch_tasks().await?;
/// assert_eq!(tasks.len(), 1);
/// # Ok(())
/// # }
/// ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use boardsync_shared::models::{Message, Role, Status, Task, User};

use super::{NewTask, RepositoryError, RepositoryResult, TaskPatch, TaskRepository};

#[derive(Debug, Default)]
struct MockState {
    tasks: Vec<Task>,
    statuses: Vec<Status>,
    users: Vec<User>,
    messages: HashMap<i64, Vec<Message>>,

    created: Vec<NewTask>,
    status_patches: Vec<(i64, String)>,
    field_patches: Vec<(i64, TaskPatch)>,
    posted_messages: Vec<(i64, String)>,

    task_fetches: u32,
    message_fetches: HashMap<i64, u32>,

    reject_create_detail: Option<Option<String>>,
}

/// In-memory mock repository
pub struct MockRepository {
    state: Mutex<MockState>,
    next_id: AtomicI64,
    fail_statuses: AtomicBool,
    fail_tasks: AtomicBool,
    fail_messages: AtomicBool,
    fail_users: AtomicBool,
    message_delay_ms: AtomicU64,
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRepository {
    /// Creates an empty mock repository
    pub fn new() -> Self {
        MockRepository {
            state: Mutex::new(MockState::default()),
            next_id: AtomicI64::new(100),
            fail_statuses: AtomicBool::new(false),
            fail_tasks: AtomicBool::new(false),
            fail_messages: AtomicBool::new(false),
            fail_users: AtomicBool::new(false),
            message_delay_ms: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    fn rejected(status: u16, detail: Option<String>) -> RepositoryError {
        RepositoryError::Rejected { status, detail }
    }

    /// Seeds a status vocabulary entry
    pub fn seed_status(&self, id: i64, name: &str) {
        self.lock().statuses.push(Status {
            id,
            name: name.to_string(),
        });
    }

    /// Seeds a task in the given status
    pub fn seed_task(&self, id: i64, title: &str, status: &str) {
        self.lock().tasks.push(Task {
            id,
            title: title.to_string(),
            short_description: format!("{} (кратко)", title),
            description: None,
            status: status.to_string(),
            assignee: None,
            assignee_id: None,
            assignee_role: None,
            created_by: Some("admin".to_string()),
            is_mine: true,
            is_lower: false,
            created_at: Some(Utc::now()),
            updated_at: None,
        });
    }

    /// Seeds a user
    pub fn seed_user(&self, id: i64, username: &str, role: Role) {
        self.lock().users.push(User {
            id,
            username: username.to_string(),
            role,
            created_at: Some(Utc::now()),
        });
    }

    /// Appends a message to a task's discussion
    pub fn seed_message(&self, task_id: i64, user: &str, content: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.lock().messages.entry(task_id).or_default().push(Message {
            id,
            user: user.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        });
    }

    /// Makes status fetches fail
    pub fn fail_statuses(&self, fail: bool) {
        self.fail_statuses.store(fail, Ordering::SeqCst);
    }

    /// Makes task fetches fail
    pub fn fail_tasks(&self, fail: bool) {
        self.fail_tasks.store(fail, Ordering::SeqCst);
    }

    /// Makes message fetches fail
    pub fn fail_messages(&self, fail: bool) {
        self.fail_messages.store(fail, Ordering::SeqCst);
    }

    /// Makes user fetches fail
    pub fn fail_users(&self, fail: bool) {
        self.fail_users.store(fail, Ordering::SeqCst);
    }

    /// Makes message fetches take this long (simulated in-flight time)
    pub fn delay_messages(&self, delay: Duration) {
        self.message_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Makes the next create calls return a backend rejection
    pub fn reject_create(&self, detail: Option<&str>) {
        self.lock().reject_create_detail = Some(detail.map(|d| d.to_string()));
    }

    /// Status patches issued so far, in call order
    pub fn status_patches(&self) -> Vec<(i64, String)> {
        self.lock().status_patches.clone()
    }

    /// Field patches issued so far
    pub fn field_patches(&self) -> Vec<(i64, TaskPatch)> {
        self.lock().field_patches.clone()
    }

    /// Create payloads received so far
    pub fn created_tasks(&self) -> Vec<NewTask> {
        self.lock().created.clone()
    }

    /// Messages posted so far
    pub fn posted_messages(&self) -> Vec<(i64, String)> {
        self.lock().posted_messages.clone()
    }

    /// How many times the full task list was fetched
    pub fn task_fetch_count(&self) -> u32 {
        self.lock().task_fetches
    }

    /// How many times the given task's messages were fetched
    pub fn message_fetch_count(&self, task_id: i64) -> u32 {
        self.lock().message_fetches.get(&task_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl TaskRepository for MockRepository {
    async fn fetch_tasks(&self) -> RepositoryResult<Vec<Task>> {
        if self.fail_tasks.load(Ordering::SeqCst) {
            return Err(Self::rejected(503, None));
        }
        let mut state = self.lock();
        state.task_fetches += 1;
        Ok(state.tasks.clone())
    }

    async fn fetch_task(&self, task_id: i64) -> RepositoryResult<Task> {
        if self.fail_tasks.load(Ordering::SeqCst) {
            return Err(Self::rejected(503, None));
        }
        self.lock()
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or(RepositoryError::NotFound(task_id))
    }

    async fn create_task(&self, payload: NewTask) -> RepositoryResult<i64> {
        let mut state = self.lock();

        if let Some(detail) = state.reject_create_detail.clone() {
            return Err(Self::rejected(400, detail));
        }

        let status_name = state
            .statuses
            .iter()
            .find(|s| s.id == payload.status_id)
            .map(|s| s.name.clone())
            .ok_or_else(|| Self::rejected(400, Some("Invalid status_id".to_string())))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        state.tasks.push(Task {
            id,
            title: payload.title.clone(),
            short_description: payload.short_description.clone(),
            description: Some(payload.description.clone()),
            status: status_name,
            assignee: None,
            assignee_id: payload.assignee_id,
            assignee_role: None,
            created_by: Some("admin".to_string()),
            is_mine: true,
            is_lower: false,
            created_at: Some(Utc::now()),
            updated_at: None,
        });
        state.created.push(payload);

        Ok(id)
    }

    async fn update_task_status(&self, task_id: i64, status: &str) -> RepositoryResult<()> {
        let mut state = self.lock();

        if !state.statuses.is_empty() && !state.statuses.iter().any(|s| s.name == status) {
            return Err(Self::rejected(400, Some("Invalid status".to_string())));
        }

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(RepositoryError::NotFound(task_id))?;
        task.status = status.to_string();

        state.status_patches.push((task_id, status.to_string()));
        Ok(())
    }

    async fn update_task(&self, task_id: i64, patch: TaskPatch) -> RepositoryResult<()> {
        let mut state = self.lock();

        let status_name = match patch.status_id {
            Some(status_id) => Some(
                state
                    .statuses
                    .iter()
                    .find(|s| s.id == status_id)
                    .map(|s| s.name.clone())
                    .ok_or_else(|| Self::rejected(400, Some("Invalid status_id".to_string())))?,
            ),
            None => None,
        };

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(RepositoryError::NotFound(task_id))?;

        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(short) = &patch.short_description {
            task.short_description = short.clone();
        }
        if let Some(description) = &patch.description {
            task.description = Some(description.clone());
        }
        if let Some(name) = status_name {
            task.status = name;
        }
        match patch.assignee {
            super::AssigneePatch::Keep => {}
            super::AssigneePatch::Unassign => {
                task.assignee = None;
                task.assignee_id = None;
            }
            super::AssigneePatch::Assign(user_id) => {
                task.assignee_id = Some(user_id);
            }
        }

        state.field_patches.push((task_id, patch));
        Ok(())
    }

    async fn fetch_statuses(&self) -> RepositoryResult<Vec<Status>> {
        if self.fail_statuses.load(Ordering::SeqCst) {
            return Err(Self::rejected(503, None));
        }
        Ok(self.lock().statuses.clone())
    }

    async fn fetch_messages(&self, task_id: i64) -> RepositoryResult<Vec<Message>> {
        let delay_ms = self.message_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if self.fail_messages.load(Ordering::SeqCst) {
            return Err(Self::rejected(503, None));
        }
        let mut state = self.lock();
        *state.message_fetches.entry(task_id).or_insert(0) += 1;
        Ok(state.messages.get(&task_id).cloned().unwrap_or_default())
    }

    async fn post_message(&self, task_id: i64, content: &str) -> RepositoryResult<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();

        if !state.tasks.iter().any(|t| t.id == task_id) {
            return Err(RepositoryError::NotFound(task_id));
        }

        state.messages.entry(task_id).or_default().push(Message {
            id,
            user: "tester".to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        });
        state.posted_messages.push((task_id, content.to_string()));
        Ok(id)
    }

    async fn fetch_users(&self) -> RepositoryResult<Vec<User>> {
        if self.fail_users.load(Ordering::SeqCst) {
            return Err(Self::rejected(503, None));
        }
        Ok(self.lock().users.clone())
    }
}
