/// Board projection
///
/// Derives the column layout (status → ordered task list) from a flat
/// task collection and the status vocabulary.
///
/// # Column set resolution
///
/// 1. The explicit vocabulary from configuration, when non-empty
/// 2. Else the distinct status values observed in the tasks, first-seen
///    order
/// 3. Else a fixed four-stage fallback, so the board renders even when
///    the status fetch failed and no tasks exist yet
///
/// Within a column, tasks keep repository fetch order — the core imposes
/// no sort of its own, so stability across reloads is the repository's
/// ordering guarantee.
///
/// # Example
///
/// ```
/// use boardsync_shared::board::projection::{project, FALLBACK_STATUSES};
///
/// let columns = project(&[], &[]);
/// assert_eq!(columns.len(), FALLBACK_STATUSES.len());
/// ```

use serde::Serialize;

use crate::models::Task;

/// Fallback status vocabulary used when neither configuration nor the
/// task collection yields any columns
pub const FALLBACK_STATUSES: [&str; 4] = ["сделать", "в работе", "на проверке", "готово"];

/// One rendered board column
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    /// Column label (status name)
    pub status: String,

    /// Tasks in this column, in repository fetch order
    pub tasks: Vec<Task>,
}

/// Resolves the ordered column name set for the given collections
pub fn column_names(tasks: &[Task], vocabulary: &[String]) -> Vec<String> {
    if !vocabulary.is_empty() {
        return vocabulary.to_vec();
    }

    let mut observed: Vec<String> = Vec::new();
    for task in tasks {
        if !task.status.is_empty() && !observed.contains(&task.status) {
            observed.push(task.status.clone());
        }
    }
    if !observed.is_empty() {
        return observed;
    }

    FALLBACK_STATUSES.iter().map(|s| s.to_string()).collect()
}

/// Projects the flat task collection onto ordered columns
///
/// A task whose status is a member of the column set appears in exactly
/// one column; a task with a status outside the set (stale vocabulary)
/// is not rendered at all, matching the backend-authoritative view.
pub fn project(tasks: &[Task], vocabulary: &[String]) -> Vec<BoardColumn> {
    column_names(tasks, vocabulary)
        .into_iter()
        .map(|status| {
            let column_tasks = tasks
                .iter()
                .filter(|t| t.status == status)
                .cloned()
                .collect();
            BoardColumn {
                status,
                tasks: column_tasks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, status: &str) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            short_description: String::new(),
            description: None,
            status: status.to_string(),
            assignee: None,
            assignee_id: None,
            assignee_role: None,
            created_by: None,
            is_mine: false,
            is_lower: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn vocab(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_every_task_lands_in_exactly_one_matching_column() {
        let tasks = vec![task(1, "сделать"), task(2, "в работе"), task(3, "сделать")];
        let columns = project(&tasks, &vocab(&["сделать", "в работе", "готово"]));

        for t in &tasks {
            let holders: Vec<&BoardColumn> = columns
                .iter()
                .filter(|c| c.tasks.iter().any(|ct| ct.id == t.id))
                .collect();
            assert_eq!(holders.len(), 1);
            assert_eq!(holders[0].status, t.status);
        }
    }

    #[test]
    fn test_explicit_vocabulary_wins() {
        let tasks = vec![task(1, "другое")];
        let columns = project(&tasks, &vocab(&["a", "b"]));
        let names: Vec<&str> = columns.iter().map(|c| c.status.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_observed_statuses_preserve_first_seen_order() {
        let tasks = vec![task(1, "b"), task(2, "a"), task(3, "b"), task(4, "c")];
        assert_eq!(column_names(&tasks, &[]), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_fallback_vocabulary_when_everything_is_empty() {
        let columns = project(&[], &[]);
        let names: Vec<&str> = columns.iter().map(|c| c.status.as_str()).collect();
        assert_eq!(names, FALLBACK_STATUSES.to_vec());
    }

    #[test]
    fn test_column_order_follows_fetch_order() {
        let tasks = vec![task(3, "a"), task(1, "a"), task(2, "a")];
        let columns = project(&tasks, &vocab(&["a"]));
        let ids: Vec<i64> = columns[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_task_outside_vocabulary_is_not_rendered() {
        let tasks = vec![task(1, "призрак")];
        let columns = project(&tasks, &vocab(&["сделать"]));
        assert!(columns[0].tasks.is_empty());
    }
}
