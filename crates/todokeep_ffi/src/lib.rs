//! Flutter bridge for todokeep core.

pub mod api;
