//! Ephemeral artifact storage
//!
//! Generated binary output is cached on local disk under an opaque id so it
//! can be served by URL, and evicted once it outlives its TTL.

pub mod store;
pub mod sweeper;

pub use store::ArtifactStore;
pub use sweeper::Sweeper;
