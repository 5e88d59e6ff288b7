//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the folder/checklist/task store to Dart via FRB.
//! - Flatten core state into plain DTOs the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - A `TodoSession` is the only handle to store state; there is no global.
//! - Dates cross the boundary as `YYYY-MM-DD` text.

use chrono::{Local, NaiveDate};
use flutter_rust_bridge::frb;
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use todokeep_core::db::open_db;
use todokeep_core::{
    checklist_progress, core_version as core_version_inner, due_status, folder_progress,
    format_due_date, init_logging as init_logging_inner, parse_due_date, ping as ping_inner,
    tasks_for_display, Checklist, DueStatus, Folder, SearchHit, SearchHitKind,
    SqliteStateRepository, StoreConfig, Task, ThemeId, ThemeStore, TodoStore,
    DEFAULT_DB_FILE_NAME,
};

type SessionRepo = SqliteStateRepository<Connection>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// `YYYY-MM-DD`, absent when no due date is set.
    pub due_date: Option<String>,
    /// `none|overdue|past|today|tomorrow|upcoming`, relative to local today.
    pub due_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    pub folder_id: String,
    pub completed_count: usize,
    pub total_count: usize,
    /// Incomplete tasks first, each group in manual order.
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderItem {
    pub id: String,
    pub name: String,
    pub color: String,
    pub completed_count: usize,
    pub total_count: usize,
    pub checklists: Vec<ChecklistItem>,
}

/// Full render state for one frame of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub folders: Vec<FolderItem>,
    pub selected_folder_id: Option<String>,
    pub selected_checklist_id: Option<String>,
    pub search_query: String,
}

/// Search item returned by [`TodoSession::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySearchItem {
    /// `folder|checklist|task`.
    pub kind: String,
    pub id: String,
    pub name: String,
    pub color: String,
    pub parent_id: Option<String>,
    pub grand_parent_id: Option<String>,
}

/// Generic action response envelope for create calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the created entity.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

struct SessionState {
    todos: TodoStore<SessionRepo>,
    theme: ThemeStore<SessionRepo>,
}

/// Open store handle owned by the Dart side.
#[frb(opaque)]
pub struct TodoSession {
    state: Mutex<SessionState>,
}

impl TodoSession {
    /// Opens (creating if needed) the database at `db_path`.
    ///
    /// A blank path resolves to `TODOKEEP_DB_PATH`, then to the system temp
    /// directory.
    #[frb(sync)]
    pub fn open(db_path: String) -> Result<TodoSession, String> {
        let config = StoreConfig::from_env();
        let path = resolve_db_path(&db_path, &config);
        let (todo_repo, theme_repo) = match open_repo(&path).and_then(|todo_repo| {
            open_repo(&path).map(|theme_repo| (todo_repo, theme_repo))
        }) {
            Ok(repos) => repos,
            Err(err) => {
                error!("event=session_open module=ffi status=error error={err}");
                return Err(err);
            }
        };
        let todos = TodoStore::load_with_config(todo_repo, &config);
        let theme = ThemeStore::load_with_config(theme_repo, &config);
        info!(
            "event=session_open module=ffi status=ok folders={}",
            todos.folders().len()
        );
        Ok(Self {
            state: Mutex::new(SessionState { todos, theme }),
        })
    }

    #[frb(sync)]
    pub fn snapshot(&self) -> TreeSnapshot {
        let state = self.lock();
        let today = Local::now().date_naive();
        TreeSnapshot {
            folders: state
                .todos
                .folders()
                .iter()
                .map(|folder| to_folder_item(folder, today))
                .collect(),
            selected_folder_id: state.todos.selected_folder_id().map(str::to_string),
            selected_checklist_id: state.todos.selected_checklist_id().map(str::to_string),
            search_query: state.todos.search_query().to_string(),
        }
    }

    // Folders

    #[frb(sync)]
    pub fn add_folder(&self, name: String, color: String) -> EntryActionResponse {
        let name = name.trim();
        if name.is_empty() {
            return EntryActionResponse::failure("Folder name must not be empty.");
        }
        let folder_id = self.lock().todos.add_folder(name, color);
        EntryActionResponse::success("Folder created.", folder_id)
    }

    #[frb(sync)]
    pub fn delete_folder(&self, folder_id: String) {
        self.lock().todos.delete_folder(&folder_id);
    }

    #[frb(sync)]
    pub fn rename_folder(&self, folder_id: String, name: String) {
        let name = name.trim();
        if !name.is_empty() {
            self.lock().todos.rename_folder(&folder_id, name);
        }
    }

    #[frb(sync)]
    pub fn update_folder_color(&self, folder_id: String, color: String) {
        self.lock().todos.update_folder_color(&folder_id, color);
    }

    #[frb(sync)]
    pub fn select_folder(&self, folder_id: Option<String>) {
        self.lock().todos.select_folder(folder_id.as_deref());
    }

    #[frb(sync)]
    pub fn reorder_folders(&self, active_id: String, over_id: String) {
        self.lock().todos.reorder_folders(&active_id, &over_id);
    }

    // Checklists

    #[frb(sync)]
    pub fn add_checklist(&self, folder_id: String, name: String) -> EntryActionResponse {
        let name = name.trim();
        if name.is_empty() {
            return EntryActionResponse::failure("Checklist name must not be empty.");
        }
        match self.lock().todos.add_checklist(&folder_id, name) {
            Some(checklist_id) => EntryActionResponse::success("Checklist created.", checklist_id),
            None => EntryActionResponse::failure("Folder not found."),
        }
    }

    #[frb(sync)]
    pub fn delete_checklist(&self, folder_id: String, checklist_id: String) {
        self.lock().todos.delete_checklist(&folder_id, &checklist_id);
    }

    #[frb(sync)]
    pub fn rename_checklist(&self, folder_id: String, checklist_id: String, name: String) {
        let name = name.trim();
        if !name.is_empty() {
            self.lock()
                .todos
                .rename_checklist(&folder_id, &checklist_id, name);
        }
    }

    #[frb(sync)]
    pub fn select_checklist(&self, checklist_id: Option<String>) {
        self.lock().todos.select_checklist(checklist_id.as_deref());
    }

    #[frb(sync)]
    pub fn reorder_checklists(&self, folder_id: String, active_id: String, over_id: String) {
        self.lock()
            .todos
            .reorder_checklists(&folder_id, &active_id, &over_id);
    }

    // Tasks

    /// Adds a task; `due_date` is `YYYY-MM-DD` or blank.
    #[frb(sync)]
    pub fn add_task(
        &self,
        folder_id: String,
        checklist_id: String,
        title: String,
        due_date: Option<String>,
    ) -> EntryActionResponse {
        let title = title.trim();
        if title.is_empty() {
            return EntryActionResponse::failure("Task title must not be empty.");
        }
        let due_date = match parse_due_input(due_date.as_deref()) {
            Ok(due_date) => due_date,
            Err(response) => return response,
        };
        match self
            .lock()
            .todos
            .add_task(&folder_id, &checklist_id, title, due_date)
        {
            Some(task_id) => EntryActionResponse::success("Task created.", task_id),
            None => EntryActionResponse::failure("Checklist not found."),
        }
    }

    #[frb(sync)]
    pub fn delete_task(&self, folder_id: String, checklist_id: String, task_id: String) {
        self.lock()
            .todos
            .delete_task(&folder_id, &checklist_id, &task_id);
    }

    #[frb(sync)]
    pub fn toggle_task(&self, folder_id: String, checklist_id: String, task_id: String) {
        self.lock()
            .todos
            .toggle_task(&folder_id, &checklist_id, &task_id);
    }

    /// Sets the due date; `None` or blank text clears it.
    ///
    /// Unparseable text is rejected and leaves the current date unchanged.
    #[frb(sync)]
    pub fn update_task_due_date(
        &self,
        folder_id: String,
        checklist_id: String,
        task_id: String,
        due_date: Option<String>,
    ) -> EntryActionResponse {
        let due_date = match parse_due_input(due_date.as_deref()) {
            Ok(due_date) => due_date,
            Err(response) => return response,
        };
        let mut state = self.lock();
        if state
            .todos
            .checklist(&folder_id, &checklist_id)
            .and_then(|checklist| checklist.task(&task_id))
            .is_none()
        {
            return EntryActionResponse::failure("Task not found.");
        }
        state
            .todos
            .update_task_due_date(&folder_id, &checklist_id, &task_id, due_date);
        EntryActionResponse::success("Due date updated.", task_id)
    }

    #[frb(sync)]
    pub fn reorder_tasks(
        &self,
        folder_id: String,
        checklist_id: String,
        active_id: String,
        over_id: String,
    ) {
        self.lock()
            .todos
            .reorder_tasks(&folder_id, &checklist_id, &active_id, &over_id);
    }

    // Search

    /// Stores `query` as the live query and returns its hits.
    #[frb(sync)]
    pub fn search(&self, query: String) -> Vec<EntrySearchItem> {
        let mut state = self.lock();
        state.todos.set_search_query(query);
        state
            .todos
            .search_results()
            .into_iter()
            .map(to_entry_search_item)
            .collect()
    }

    /// Selects the entity behind `item` and clears the live query.
    ///
    /// Items with an unknown kind only clear the query.
    #[frb(sync)]
    pub fn open_search_hit(&self, item: EntrySearchItem) {
        let mut state = self.lock();
        match to_search_hit(item) {
            Some(hit) => state.todos.open_search_hit(&hit),
            None => state.todos.set_search_query(String::new()),
        }
    }

    // Theme

    #[frb(sync)]
    pub fn theme(&self) -> String {
        self.lock().theme.theme_id().as_str().to_string()
    }

    /// Switches theme; returns empty string on success and error message on
    /// unknown ids.
    #[frb(sync)]
    pub fn set_theme(&self, theme_id: String) -> String {
        match theme_id.parse::<ThemeId>() {
            Ok(theme_id) => {
                self.lock().theme.set_theme(theme_id);
                String::new()
            }
            Err(err) => err.to_string(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Blank or missing input means "no due date"; other text must parse.
fn parse_due_input(raw: Option<&str>) -> Result<Option<NaiveDate>, EntryActionResponse> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_due_date(raw)
            .map(Some)
            .ok_or_else(|| EntryActionResponse::failure("Due date must be YYYY-MM-DD.")),
    }
}

fn resolve_db_path(raw: &str, config: &StoreConfig) -> PathBuf {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        return PathBuf::from(trimmed);
    }
    config.db_path_or(std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

fn open_repo(path: &Path) -> Result<SessionRepo, String> {
    let conn = open_db(path).map_err(|err| format!("session DB open failed: {err}"))?;
    SqliteStateRepository::try_new(conn).map_err(|err| format!("session repo init failed: {err}"))
}

fn to_folder_item(folder: &Folder, today: NaiveDate) -> FolderItem {
    let progress = folder_progress(folder);
    FolderItem {
        id: folder.id.clone(),
        name: folder.name.clone(),
        color: folder.color.clone(),
        completed_count: progress.completed,
        total_count: progress.total,
        checklists: folder
            .checklists
            .iter()
            .map(|checklist| to_checklist_item(checklist, today))
            .collect(),
    }
}

fn to_checklist_item(checklist: &Checklist, today: NaiveDate) -> ChecklistItem {
    let progress = checklist_progress(checklist);
    ChecklistItem {
        id: checklist.id.clone(),
        name: checklist.name.clone(),
        folder_id: checklist.folder_id.clone(),
        completed_count: progress.completed,
        total_count: progress.total,
        tasks: tasks_for_display(checklist)
            .into_iter()
            .map(|task| to_task_item(task, today))
            .collect(),
    }
}

fn to_task_item(task: &Task, today: NaiveDate) -> TaskItem {
    TaskItem {
        id: task.id.clone(),
        title: task.title.clone(),
        completed: task.completed,
        due_date: task.due_date.map(format_due_date),
        due_status: due_status_label(due_status(task, today)).to_string(),
    }
}

fn due_status_label(status: DueStatus) -> &'static str {
    match status {
        DueStatus::None => "none",
        DueStatus::Overdue => "overdue",
        DueStatus::Past => "past",
        DueStatus::Today => "today",
        DueStatus::Tomorrow => "tomorrow",
        DueStatus::Upcoming => "upcoming",
    }
}

fn to_entry_search_item(hit: SearchHit) -> EntrySearchItem {
    EntrySearchItem {
        kind: hit.kind.as_str().to_string(),
        id: hit.id,
        name: hit.name,
        color: hit.color,
        parent_id: hit.parent_id,
        grand_parent_id: hit.grand_parent_id,
    }
}

fn to_search_hit(item: EntrySearchItem) -> Option<SearchHit> {
    let kind = match item.kind.as_str() {
        "folder" => SearchHitKind::Folder,
        "checklist" => SearchHitKind::Checklist,
        "task" => SearchHitKind::Task,
        _ => return None,
    };
    Some(SearchHit {
        kind,
        id: item.id,
        name: item.name,
        color: item.color,
        parent_id: item.parent_id,
        grand_parent_id: item.grand_parent_id,
    })
}
