mod memory;
mod store;


pub use memory::MemoryRevocationStore;
pub use store::RevocationStore;
