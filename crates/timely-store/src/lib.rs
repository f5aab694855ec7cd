// crates/timely-store/src/lib.rs
//
// timely-store: Storage layer for the Timely Reward vesting engine.
//
// Provides an in-memory table store for tests and embedding, a RocksDB-backed
// persistent store, and `StagedState`, the write-staging overlay that lets an
// action read its own pending writes and commit them as one atomic batch.

pub mod memory;
pub mod rocks;
pub mod staged;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::MemoryStore;
pub use rocks::RocksStore;
pub use staged::StagedState;
