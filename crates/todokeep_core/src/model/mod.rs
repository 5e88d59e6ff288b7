//! Domain model for the folder → checklist → task hierarchy.
//!
//! # Responsibility
//! - Define canonical data structures owned by `TodoStore`.
//! - Define the persisted wire shape (camelCase JSON) of those structures.
//! - Hold static presentation data the core hands out (folder palette, themes).
//!
//! # Invariants
//! - Every entity is identified by an opaque string id unique within its kind.
//! - Children are owned by value; deleting a parent drops all descendants.

pub mod palette;
pub mod theme;
pub mod timestamp;
pub mod todo;
