//! Domain layer: token entities and the authenticated principal.

pub mod entities;

pub use entities::*;
