//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable storage contract the stores write through.
//! - Isolate SQLite query details from store/business orchestration.
//!
//! # Invariants
//! - Repositories only accept connections with migrations applied.

pub mod state_repo;
