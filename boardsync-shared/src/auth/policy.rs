/// Authorization policy
///
/// The single role → permitted-action table for the board. Every screen
/// consults these predicates before rendering a mutating control, and the
/// workflow controller consults them again before issuing the call —
/// defense in depth, with the backend holding the authoritative rule.
///
/// # Permission Table
///
/// | Action          | employee | manager | ceo | admin | unknown |
/// |-----------------|----------|---------|-----|-------|---------|
/// | create task     |          | ✓       | ✓   | ✓     |         |
/// | edit task       |          | ✓       | ✓   | ✓     |         |
/// | manage users    |          |         | ✓   | ✓     |         |
/// | post message    | ✓        | ✓       | ✓   | ✓     | ✓       |
///
/// # Example
///
/// ```
/// use boardsync_shared::auth::policy::can_create_task;
/// use boardsync_shared::models::Role;
///
/// assert!(can_create_task(Role::Manager));
/// assert!(!can_create_task(Role::Employee));
/// ```

use crate::models::Role;

/// Checks if the role may create tasks
pub fn can_create_task(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Ceo | Role::Manager)
}

/// Checks if the role may edit task fields
pub fn can_edit_task(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Ceo | Role::Manager)
}

/// Checks if the role may manage user accounts
pub fn can_manage_users(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Ceo)
}
