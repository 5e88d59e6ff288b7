//! Core state management for todokeep.
//! This crate is the single source of truth for the folder/checklist/task tree.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{
    LogConfig, StoreConfig, DATA_STORAGE_KEY, DEFAULT_DB_FILE_NAME, THEME_STORAGE_KEY,
};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status};
pub use model::palette::{is_palette_color, DEFAULT_FOLDER_COLOR, FOLDER_COLORS};
pub use model::theme::{Theme, ThemeColors, ThemeId, ThemeParseError, THEMES};
pub use model::timestamp::{format_due_date, parse_due_date};
pub use model::todo::{Checklist, ChecklistId, Folder, FolderId, Task, TaskId};
pub use projection::progress::{
    checklist_progress, folder_progress, total_progress, ProgressStats,
};
pub use projection::task_view::{due_status, tasks_for_display, DueStatus};
pub use repo::state_repo::{
    SqliteStateRepository, StateRepoError, StateRepoResult, StateRepository,
};
pub use search::tree_search::{search_tree, SearchHit, SearchHitKind};
pub use service::theme_store::ThemeStore;
pub use service::todo_store::{StoreError, TodoStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
