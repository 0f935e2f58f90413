/// Live message poller
///
/// Keeps an open task-detail view fresh by re-fetching the task's message
/// list on a fixed interval and delivering each result wholesale over a
/// channel. Polling is the chosen transport: a push-based replacement
/// would slot in behind the same spawn/handle/receiver contract without
/// touching callers.
///
/// # Lifecycle
///
/// The poller's effect is scoped to the lifetime of the open detail view:
/// dropping the handle (or calling `stop`) cancels the loop, and a stale
/// in-flight fetch that completes after cancellation never delivers.
/// Switching to another task means dropping this handle and spawning a
/// new poller.
///
/// # Failure semantics
///
/// Transient fetch failures are logged at debug and swallowed — the loop
/// keeps ticking and the view keeps its last good list. Only the initial
/// detail load (outside this module) surfaces an error state; this
/// asymmetry avoids flicker from momentary network blips.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use boardsync_client::poller::MessagePoller;
/// use boardsync_client::repository::MockRepository;
///
/// # async fn example() {
/// let repo = Arc::new(MockRepository::new());
/// let (poller, mut updates) = MessagePoller::spawn(repo, 10, Duration::from_secs(5));
///
/// while let Some(messages) = updates.recv().await {
///     println!("{} messages", messages.len());
/// }
/// drop(poller); // view closed
/// # }
/// ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use boardsync_shared::models::Message;

use crate::repository::TaskRepository;

/// Handle to a running message poll loop
///
/// Dropping the handle cancels the loop.
pub struct MessagePoller {
    task_id: i64,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl MessagePoller {
    /// Spawns a poll loop for the given task
    ///
    /// The first fetch happens one full interval after spawn — the
    /// detail view has just loaded its initial list separately.
    ///
    /// # Arguments
    ///
    /// * `repo` - Repository to fetch through
    /// * `task_id` - Task whose discussion to follow
    /// * `interval` - Fixed delay between fetches
    ///
    /// # Returns
    ///
    /// The handle and the receiver the full message list arrives on.
    pub fn spawn(
        repo: Arc<dyn TaskRepository>,
        task_id: i64,
        interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Vec<Message>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let loop_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The interval's first tick completes immediately; consume it
            // so delivery starts one interval after the view opened.
            ticker.tick().await;

            tracing::debug!(task_id, "message poller started");

            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => break,
                    _ = ticker.tick() => {
                        match repo.fetch_messages(task_id).await {
                            Ok(messages) => {
                                // The view may have closed while the fetch
                                // was in flight; a stale result must not
                                // update state.
                                if loop_token.is_cancelled() {
                                    break;
                                }
                                if tx.send(messages).is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::debug!(task_id, error = %e, "message poll failed, will retry");
                            }
                        }
                    }
                }
            }

            tracing::debug!(task_id, "message poller stopped");
        });

        (
            MessagePoller {
                task_id,
                token,
                handle,
            },
            rx,
        )
    }

    /// The task this poller follows
    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    /// Stops the loop; idempotent
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// True once the loop has been asked to stop
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for MessagePoller {
    fn drop(&mut self) {
        self.token.cancel();
        self.handle.abort();
    }
}
