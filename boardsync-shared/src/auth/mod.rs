/// Session and authorization utilities
///
/// # Modules
///
/// - [`session`]: Bearer credential decoding and the process-wide session
///   lifecycle (login / logout / persisted restore)
/// - [`policy`]: The role → permitted-action table
///
/// The session decode is deliberately unverified: this layer gates what
/// the UI offers, while the backend remains the authoritative enforcement
/// point for every mutation.
pub mod policy;
pub mod session;

pub use policy::{can_create_task, can_edit_task, can_manage_users};
pub use session::{decode_identity, CredentialStore, Identity, MemoryCredentialStore, SessionContext};
