//! Container identity: a named namespace for blobs inside the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Build a process-unique name from a fixed prefix.
///
/// Repeated demo runs (and repeated operations within one run) must never
/// collide on container or blob names, so every generated name carries a
/// fresh UUID v4 suffix.
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// A generated container name.
///
/// Containers here are ephemeral namespaces: each demonstration operation
/// creates its own container and normally removes it before returning.
/// The name doubles as the path prefix under which the container's blobs
/// live in the backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContainerName(String);

impl ContainerName {
    /// Generate a fresh, unique name under `prefix`.
    pub fn generate(prefix: &str) -> Self {
        Self(unique_name(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
