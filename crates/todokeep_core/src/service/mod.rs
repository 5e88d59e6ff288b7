//! Core state containers.
//!
//! # Responsibility
//! - Own in-memory state and orchestrate repository writes after each change.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod reorder;
pub mod theme_store;
pub mod todo_store;
