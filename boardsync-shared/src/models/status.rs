/// Status vocabulary entry
///
/// Statuses are effectively static reference data: the backend serves them
/// ordered by their column position and the client fetches them once per
/// session. When the fetch fails or the set is empty, the board falls back
/// to `crate::board::projection::FALLBACK_STATUSES`.

use serde::{Deserialize, Serialize};

/// A single named status (board column label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Unique status ID, used when creating tasks
    pub id: i64,

    /// Unique human-readable column label
    pub name: String,
}
