//! Built-in benchmark checks
//!
//! Each check is a pure function over the target snapshot, registered by
//! name so profiles can select them individually.

mod container;
mod daemon;
mod host;
mod network;

use super::registry::CheckRegistry;

/// Register the full built-in catalogue.
pub fn register_all(registry: &mut CheckRegistry) {
    host::register(registry);
    network::register(registry);
    daemon::register(registry);
    container::register(registry);
}
