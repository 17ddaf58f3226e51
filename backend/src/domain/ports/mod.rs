//! Domain ports for the hexagonal boundary.
//!
//! `user_directory` is the driving port (the typed remote-call interface
//! transports consume); `user_store` is the driven port the orchestrator
//! persists through.

mod user_directory;
mod user_store;

pub use user_directory::{CreateUserRequest, UpdateUserRequest, UserDirectory};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{NewUser, UserStore, UserStoreError};
