/// Drag-transition resolver
///
/// Interprets a drag-drop event into a target status. The drop target
/// identifier is ambiguous by construction: dropping on empty column
/// space yields the column name, while dropping onto or near another card
/// yields that card's task id.
///
/// # Resolution
///
/// 1. The identifier matches a known column name → that is the target
/// 2. Else it parses as a task id and that task exists → the task's
///    current status is the target
/// 3. Else (unknown id, aborted drag) → `None`, and the caller performs
///    no mutation
///
/// Resolving to the dragged task's own current status is a valid result;
/// the workflow controller is responsible for skipping the network call
/// in that case.

use crate::models::Task;

/// Resolves a drop target into a target status name
///
/// # Example
///
/// ```
/// use boardsync_shared::board::resolver::resolve;
///
/// let columns = vec!["сделать".to_string(), "готово".to_string()];
/// assert_eq!(resolve(Some("готово"), &[], &columns).as_deref(), Some("готово"));
/// assert_eq!(resolve(None, &[], &columns), None);
/// ```
pub fn resolve(drop_target: Option<&str>, tasks: &[Task], columns: &[String]) -> Option<String> {
    let target = drop_target?;
    if target.is_empty() {
        return None;
    }

    if columns.iter().any(|c| c == target) {
        return Some(target.to_string());
    }

    let task_id: i64 = target.parse().ok()?;
    tasks
        .iter()
        .find(|t| t.id == task_id)
        .map(|t| t.status.clone())
}
