//! Read-only projections derived from the folder tree.
//!
//! # Responsibility
//! - Compute completion counts and display ordering on demand.
//! - Never mutate the tree; callers re-run projections after each change.

pub mod progress;
pub mod task_view;
