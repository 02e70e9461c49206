//! Collaborator interfaces the core defines but does not require.

pub mod token;

pub use token::{MemoryRevocationStore, RevocationStore};
