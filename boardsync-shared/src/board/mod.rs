/// Board derivation logic
///
/// # Modules
///
/// - [`projection`]: Derives the column layout from a flat task
///   collection and the status vocabulary
/// - [`resolver`]: Interprets a drag-drop target into a target status
///
/// Both modules are pure: they are recomputed from the latest fetched
/// collections on every render and never touch the network.
pub mod projection;
pub mod resolver;

pub use projection::{project, BoardColumn, FALLBACK_STATUSES};
pub use resolver::resolve;
