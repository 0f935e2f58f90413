/// Data models for the BoardSync core
///
/// These are the wire shapes the backend returns, kept flat and
/// denormalized the way the API serves them. The client replaces whole
/// collections after each confirmed round trip, so none of these types
/// carry interior mutability.
///
/// # Models
///
/// - `task`: Board tasks, denormalized with their status name
/// - `status`: The status vocabulary (ordered column labels)
/// - `user`: User accounts and their roles
/// - `message`: Append-only discussion messages attached to a task
pub mod message;
pub mod status;
pub mod task;
pub(crate) mod timestamp;
pub mod user;

pub use message::Message;
pub use status::Status;
pub use task::Task;
pub use user::{Role, User};
