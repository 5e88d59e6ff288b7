//! Search over the in-memory folder tree.
//!
//! # Responsibility
//! - Derive search hits from the tree on demand.
//! - Keep result shaping inside core so every shell renders the same hits.

pub mod tree_search;
