/// Integration tests for the live message poller
///
/// Time is paused and advanced manually, so the fixed-interval loop runs
/// deterministically:
/// - each interval delivers the full, freshly fetched message list
/// - closing the view before the next tick prevents that tick's result
///   from ever updating state, including a fetch already in flight
/// - transient fetch failures are swallowed and the loop keeps ticking

mod common;

use std::sync::Arc;
use std::time::Duration;

use boardsync_client::poller::MessagePoller;
use boardsync_client::repository::MockRepository;

const POLL_INTERVAL: Duration = Duration::from_secs(5);

fn seeded_repo() -> Arc<MockRepository> {
    common::init_tracing();

    let repo = Arc::new(MockRepository::new());
    repo.seed_status(1, "сделать");
    repo.seed_task(10, "задача", "сделать");
    repo.seed_message(10, "alice", "первое сообщение");
    repo
}

#[tokio::test(start_paused = true)]
async fn test_each_tick_delivers_the_full_list() {
    let repo = seeded_repo();
    let (_poller, mut updates) = MessagePoller::spawn(repo.clone(), 10, POLL_INTERVAL);

    tokio::time::sleep(POLL_INTERVAL + Duration::from_millis(10)).await;
    let first = updates.recv().await.unwrap();
    assert_eq!(first.len(), 1);

    // A message lands between ticks; the next delivery replaces the
    // list wholesale.
    repo.seed_message(10, "bob", "второе сообщение");
    tokio::time::sleep(POLL_INTERVAL).await;
    let second = updates.recv().await.unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[1].content, "второе сообщение");
}

#[tokio::test(start_paused = true)]
async fn test_no_delivery_before_the_first_interval() {
    let repo = seeded_repo();
    let (_poller, mut updates) = MessagePoller::spawn(repo.clone(), 10, POLL_INTERVAL);

    tokio::time::sleep(POLL_INTERVAL / 2).await;
    assert!(updates.try_recv().is_err());
    assert_eq!(repo.message_fetch_count(10), 0);
}

/// Scenario E: the view closes before the next tick; nothing from that
/// tick ever arrives
#[tokio::test(start_paused = true)]
async fn test_closing_the_view_stops_delivery() {
    let repo = seeded_repo();
    let (poller, mut updates) = MessagePoller::spawn(repo.clone(), 10, POLL_INTERVAL);

    poller.stop();
    assert!(poller.is_stopped());

    tokio::time::sleep(POLL_INTERVAL * 3).await;
    assert!(updates.recv().await.is_none());
}

/// A fetch already in flight when the view closes must not update state
#[tokio::test(start_paused = true)]
async fn test_stale_in_flight_fetch_never_delivers() {
    let repo = seeded_repo();
    repo.delay_messages(Duration::from_secs(2));

    let (poller, mut updates) = MessagePoller::spawn(repo.clone(), 10, POLL_INTERVAL);

    // Land inside the in-flight window: past the tick, before the fetch
    // resolves.
    tokio::time::sleep(POLL_INTERVAL + Duration::from_secs(1)).await;
    assert_eq!(repo.message_fetch_count(10), 0); // still sleeping in-flight
    poller.stop();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(updates.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_transient_failures_are_swallowed_and_polling_continues() {
    let repo = seeded_repo();
    let (_poller, mut updates) = MessagePoller::spawn(repo.clone(), 10, POLL_INTERVAL);

    repo.fail_messages(true);
    tokio::time::sleep(POLL_INTERVAL * 2 + Duration::from_millis(10)).await;
    assert!(updates.try_recv().is_err());

    // Network recovers; the loop never terminated.
    repo.fail_messages(false);
    tokio::time::sleep(POLL_INTERVAL).await;
    let delivered = updates.recv().await.unwrap();
    assert_eq!(delivered.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_handle_cancels_the_loop() {
    let repo = seeded_repo();
    let (poller, mut updates) = MessagePoller::spawn(repo.clone(), 10, POLL_INTERVAL);
    assert_eq!(poller.task_id(), 10);

    drop(poller);
    tokio::time::sleep(POLL_INTERVAL * 2).await;
    assert!(updates.recv().await.is_none());
}
