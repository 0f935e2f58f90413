/// Common test utilities for integration tests
///
/// Provides a seeded board (statuses, tasks, users, messages) behind the
/// mock repository, plus a workflow controller for the requested role.

use std::sync::Arc;

use boardsync_client::repository::MockRepository;
use boardsync_client::workflow::TaskWorkflowController;
use boardsync_shared::models::Role;

/// Test context: a seeded mock backend and a controller bound to it
pub struct TestBoard {
    pub repo: Arc<MockRepository>,
    pub controller: TaskWorkflowController,
}

impl TestBoard {
    /// Creates a board with the standard four-column vocabulary and two
    /// tasks in "сделать"
    pub async fn seeded(role: Role) -> Self {
        init_tracing();

        let repo = Arc::new(MockRepository::new());
        repo.seed_status(1, "сделать");
        repo.seed_status(2, "в работе");
        repo.seed_status(3, "на проверке");
        repo.seed_status(4, "готово");

        repo.seed_task(10, "Первая задача", "сделать");
        repo.seed_task(11, "Вторая задача", "сделать");

        repo.seed_user(1, "admin", Role::Admin);
        repo.seed_user(2, "worker", Role::Employee);

        let mut controller = TaskWorkflowController::new(repo.clone(), role);
        controller
            .load_board()
            .await
            .expect("seeded board must load");

        TestBoard { repo, controller }
    }

    /// Creates a board whose status fetch fails (fallback vocabulary)
    pub async fn without_statuses(role: Role) -> Self {
        init_tracing();

        let repo = Arc::new(MockRepository::new());
        repo.fail_statuses(true);

        let mut controller = TaskWorkflowController::new(repo.clone(), role);
        controller
            .load_board()
            .await
            .expect("board must load without statuses");

        TestBoard { repo, controller }
    }
}

/// Initializes tracing once for the whole test binary
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boardsync_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
