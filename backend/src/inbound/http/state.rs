//! Shared state for HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;

/// Handler state carrying the directory driving port.
///
/// Handlers depend on the port trait, never a concrete service, so gateway
/// tests can substitute any [`UserDirectory`] implementation.
#[derive(Clone)]
pub struct HttpState {
    directory: Arc<dyn UserDirectory>,
}

impl HttpState {
    /// Build handler state over a directory implementation.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Access the directory port.
    pub fn directory(&self) -> &dyn UserDirectory {
        self.directory.as_ref()
    }
}
