//! Folder/checklist/task state container.
//!
//! # Responsibility
//! - Own the folder tree, selection state and live search query.
//! - Apply every mutation in place and write the whole tree back afterwards.
//! - Load the tree once at construction, falling back to empty on any failure.
//!
//! # Invariants
//! - Operations addressing an unknown id path are silent no-ops.
//! - `selected_folder_id` is `None` or names an existing folder.
//! - `selected_checklist_id` is `None` or names a checklist inside the
//!   selected folder.
//! - Save failures never roll back in-memory state.

use crate::config::StoreConfig;
use crate::model::todo::{Checklist, ChecklistId, Folder, FolderId, Task, TaskId};
use crate::repo::state_repo::{StateRepoError, StateRepository};
use crate::search::tree_search::{search_tree, SearchHit, SearchHitKind};
use crate::service::reorder::move_by_id;
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors surfaced by explicit [`TodoStore::flush`] calls.
#[derive(Debug)]
pub enum StoreError {
    /// Tree could not be encoded.
    Encode(serde_json::Error),
    /// Durable storage rejected the write.
    Repo(StateRepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode folder tree: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<StateRepoError> for StoreError {
    fn from(value: StateRepoError) -> Self {
        Self::Repo(value)
    }
}

/// Single source of truth for the folder hierarchy.
pub struct TodoStore<R: StateRepository> {
    repo: R,
    data_key: String,
    folders: Vec<Folder>,
    selected_folder_id: Option<FolderId>,
    selected_checklist_id: Option<ChecklistId>,
    search_query: String,
}

impl<R: StateRepository> TodoStore<R> {
    /// Loads the tree stored under the default data key.
    pub fn load(repo: R) -> Self {
        Self::load_with_config(repo, &StoreConfig::default())
    }

    /// Loads the tree stored under `config.data_key`.
    pub fn load_with_config(repo: R, config: &StoreConfig) -> Self {
        let folders = load_folders(&repo, &config.data_key);
        Self {
            repo,
            data_key: config.data_key.clone(),
            folders,
            selected_folder_id: None,
            selected_checklist_id: None,
            search_query: String::new(),
        }
    }

    /// Writes the current tree to durable storage.
    pub fn flush(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&self.folders)?;
        self.repo.set_item(&self.data_key, &payload)?;
        Ok(())
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn folder(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == folder_id)
    }

    pub fn checklist(&self, folder_id: &str, checklist_id: &str) -> Option<&Checklist> {
        self.folder(folder_id)?.checklist(checklist_id)
    }

    pub fn selected_folder_id(&self) -> Option<&str> {
        self.selected_folder_id.as_deref()
    }

    pub fn selected_checklist_id(&self) -> Option<&str> {
        self.selected_checklist_id.as_deref()
    }

    pub fn selected_folder(&self) -> Option<&Folder> {
        self.folder(self.selected_folder_id.as_deref()?)
    }

    pub fn selected_checklist(&self) -> Option<&Checklist> {
        self.selected_folder()?
            .checklist(self.selected_checklist_id.as_deref()?)
    }

    // Folder operations

    /// Appends a new empty folder and returns its id.
    ///
    /// Names are stored as given; trimming and rejecting blanks is the
    /// caller's job.
    pub fn add_folder(&mut self, name: impl Into<String>, color: impl Into<String>) -> FolderId {
        let folder = Folder::new(name, color);
        let folder_id = folder.id.clone();
        self.folders.push(folder);
        self.commit("folder_add");
        folder_id
    }

    /// Removes a folder with all of its checklists and tasks.
    pub fn delete_folder(&mut self, folder_id: &str) {
        let before = self.folders.len();
        self.folders.retain(|folder| folder.id != folder_id);
        if self.folders.len() == before {
            return;
        }
        if self.selected_folder_id.as_deref() == Some(folder_id) {
            self.selected_folder_id = None;
            self.selected_checklist_id = None;
        }
        self.commit("folder_delete");
    }

    pub fn rename_folder(&mut self, folder_id: &str, name: impl Into<String>) {
        if let Some(folder) = self.folder_mut(folder_id) {
            folder.name = name.into();
            self.commit("folder_rename");
        }
    }

    pub fn update_folder_color(&mut self, folder_id: &str, color: impl Into<String>) {
        if let Some(folder) = self.folder_mut(folder_id) {
            folder.color = color.into();
            self.commit("folder_recolor");
        }
    }

    /// Selects a folder (or clears with `None`); always resets checklist focus.
    ///
    /// Unknown ids clear the folder selection.
    pub fn select_folder(&mut self, folder_id: Option<&str>) {
        self.selected_folder_id = folder_id
            .filter(|id| self.folder(id).is_some())
            .map(str::to_string);
        self.selected_checklist_id = None;
    }

    /// Moves folder `active_id` into the slot currently held by `over_id`.
    pub fn reorder_folders(&mut self, active_id: &str, over_id: &str) {
        if move_by_id(&mut self.folders, active_id, over_id, |folder| {
            folder.id.as_str()
        }) {
            self.commit("folder_reorder");
        }
    }

    // Checklist operations

    /// Appends a new empty checklist; `None` when the folder does not exist.
    pub fn add_checklist(
        &mut self,
        folder_id: &str,
        name: impl Into<String>,
    ) -> Option<ChecklistId> {
        let folder = self.folder_mut(folder_id)?;
        let checklist = Checklist::new(folder_id, name);
        let checklist_id = checklist.id.clone();
        folder.checklists.push(checklist);
        self.commit("checklist_add");
        Some(checklist_id)
    }

    /// Removes a checklist and its tasks.
    pub fn delete_checklist(&mut self, folder_id: &str, checklist_id: &str) {
        let Some(folder) = self.folder_mut(folder_id) else {
            return;
        };
        let before = folder.checklists.len();
        folder
            .checklists
            .retain(|checklist| checklist.id != checklist_id);
        if folder.checklists.len() == before {
            return;
        }
        if self.selected_checklist_id.as_deref() == Some(checklist_id) {
            self.selected_checklist_id = None;
        }
        self.commit("checklist_delete");
    }

    pub fn rename_checklist(
        &mut self,
        folder_id: &str,
        checklist_id: &str,
        name: impl Into<String>,
    ) {
        if let Some(checklist) = self.checklist_mut(folder_id, checklist_id) {
            checklist.name = name.into();
            self.commit("checklist_rename");
        }
    }

    /// Selects a checklist of the selected folder without touching folder
    /// selection.
    ///
    /// Ids outside the selected folder clear the checklist selection.
    pub fn select_checklist(&mut self, checklist_id: Option<&str>) {
        self.selected_checklist_id = checklist_id
            .filter(|id| {
                self.selected_folder()
                    .is_some_and(|folder| folder.checklist(id).is_some())
            })
            .map(str::to_string);
    }

    pub fn reorder_checklists(&mut self, folder_id: &str, active_id: &str, over_id: &str) {
        let Some(folder) = self.folder_mut(folder_id) else {
            return;
        };
        if move_by_id(&mut folder.checklists, active_id, over_id, |checklist| {
            checklist.id.as_str()
        }) {
            self.commit("checklist_reorder");
        }
    }

    // Task operations

    /// Appends a new incomplete task; `None` when the path does not resolve.
    pub fn add_task(
        &mut self,
        folder_id: &str,
        checklist_id: &str,
        title: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> Option<TaskId> {
        let checklist = self.checklist_mut(folder_id, checklist_id)?;
        let task = Task::new(title, due_date);
        let task_id = task.id.clone();
        checklist.tasks.push(task);
        self.commit("task_add");
        Some(task_id)
    }

    pub fn delete_task(&mut self, folder_id: &str, checklist_id: &str, task_id: &str) {
        let Some(checklist) = self.checklist_mut(folder_id, checklist_id) else {
            return;
        };
        let before = checklist.tasks.len();
        checklist.tasks.retain(|task| task.id != task_id);
        if checklist.tasks.len() != before {
            self.commit("task_delete");
        }
    }

    /// Flips the completion flag of one task.
    pub fn toggle_task(&mut self, folder_id: &str, checklist_id: &str, task_id: &str) {
        if let Some(task) = self.task_mut(folder_id, checklist_id, task_id) {
            task.completed = !task.completed;
            self.commit("task_toggle");
        }
    }

    /// Sets (`Some`) or clears (`None`) the due date of one task.
    pub fn update_task_due_date(
        &mut self,
        folder_id: &str,
        checklist_id: &str,
        task_id: &str,
        due_date: Option<NaiveDate>,
    ) {
        if let Some(task) = self.task_mut(folder_id, checklist_id, task_id) {
            task.due_date = due_date;
            self.commit("task_due_date");
        }
    }

    /// Stable move within one checklist's underlying task sequence.
    ///
    /// Completed/incomplete bucketing is a display concern; see
    /// [`crate::projection::task_view::tasks_for_display`].
    pub fn reorder_tasks(
        &mut self,
        folder_id: &str,
        checklist_id: &str,
        active_id: &str,
        over_id: &str,
    ) {
        let Some(checklist) = self.checklist_mut(folder_id, checklist_id) else {
            return;
        };
        if move_by_id(&mut checklist.tasks, active_id, over_id, |task| task.id.as_str()) {
            self.commit("task_reorder");
        }
    }

    // Search

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Hits for the live query against the current tree.
    pub fn search_results(&self) -> Vec<SearchHit> {
        search_tree(&self.folders, &self.search_query)
    }

    /// Focuses the entity behind a search hit and clears the live query.
    pub fn open_search_hit(&mut self, hit: &SearchHit) {
        match hit.kind {
            SearchHitKind::Folder => self.select_folder(Some(&hit.id)),
            SearchHitKind::Checklist => {
                self.select_folder(hit.parent_id.as_deref());
                self.select_checklist(Some(&hit.id));
            }
            SearchHitKind::Task => {
                self.select_folder(hit.grand_parent_id.as_deref());
                self.select_checklist(hit.parent_id.as_deref());
            }
        }
        self.search_query.clear();
    }

    fn folder_mut(&mut self, folder_id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|folder| folder.id == folder_id)
    }

    fn checklist_mut(&mut self, folder_id: &str, checklist_id: &str) -> Option<&mut Checklist> {
        self.folder_mut(folder_id)?.checklist_mut(checklist_id)
    }

    fn task_mut(
        &mut self,
        folder_id: &str,
        checklist_id: &str,
        task_id: &str,
    ) -> Option<&mut Task> {
        self.checklist_mut(folder_id, checklist_id)?
            .task_mut(task_id)
    }

    fn commit(&self, op: &'static str) {
        let started_at = Instant::now();
        match self.flush() {
            Ok(()) => debug!(
                "event=state_save module=store status=ok op={} folders={} duration_ms={}",
                op,
                self.folders.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=state_save module=store status=error op={} error_code=save_failed error={}",
                op, err
            ),
        }
    }
}

fn load_folders<R: StateRepository>(repo: &R, key: &str) -> Vec<Folder> {
    let started_at = Instant::now();
    let payload = match repo.get_item(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            info!("event=state_load module=store status=empty key={key}");
            return Vec::new();
        }
        Err(err) => {
            error!(
                "event=state_load module=store status=error key={} error_code=read_failed error={}",
                key, err
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Folder>>(&payload) {
        Ok(folders) => {
            info!(
                "event=state_load module=store status=ok key={} folders={} duration_ms={}",
                key,
                folders.len(),
                started_at.elapsed().as_millis()
            );
            folders
        }
        Err(err) => {
            // Message text can quote payload content; keep position only.
            warn!(
                "event=state_load module=store status=discarded key={} error_code=malformed_payload category={:?} line={} column={}",
                key,
                err.classify(),
                err.line(),
                err.column()
            );
            Vec::new()
        }
    }
}
