//! Folder, checklist and task records.
//!
//! # Responsibility
//! - Define the three entity kinds and their constructors.
//! - Keep serde field names aligned with the persisted `todolist-data` payload.
//!
//! # Invariants
//! - Ids are generated once at construction and never reassigned.
//! - `Checklist::folder_id` is informational; ownership is by nesting.
//! - Sequence order of `checklists` and `tasks` is user-controlled.

use crate::model::timestamp::{created_at_format, due_date_format};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque folder identifier.
pub type FolderId = String;
/// Opaque checklist identifier.
pub type ChecklistId = String;
/// Opaque task identifier.
pub type TaskId = String;

/// Generates a fresh collision-resistant entity id.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Single actionable item inside a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Calendar date only; serialized as `YYYY-MM-DD`, omitted when absent.
    #[serde(
        default,
        with = "due_date_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(with = "created_at_format")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an incomplete task with a generated id.
    pub fn new(title: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: new_entity_id(),
            title: title.into(),
            completed: false,
            due_date,
            created_at: Utc::now(),
        }
    }
}

/// Named ordered collection of tasks within a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: ChecklistId,
    pub name: String,
    /// Back-reference written for external readers of the payload.
    pub folder_id: FolderId,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(with = "created_at_format")]
    pub created_at: DateTime<Utc>,
}

impl Checklist {
    /// Creates an empty checklist owned by `folder_id`.
    pub fn new(folder_id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            folder_id: folder_id.into(),
            tasks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub(crate) fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }
}

/// Top-level grouping entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    /// Hex swatch; usually one of `FOLDER_COLORS` but not restricted to it.
    pub color: String,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(with = "created_at_format")]
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Creates an empty folder with a generated id.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            color: color.into(),
            checklists: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn checklist(&self, checklist_id: &str) -> Option<&Checklist> {
        self.checklists
            .iter()
            .find(|checklist| checklist.id == checklist_id)
    }

    pub(crate) fn checklist_mut(&mut self, checklist_id: &str) -> Option<&mut Checklist> {
        self.checklists
            .iter_mut()
            .find(|checklist| checklist.id == checklist_id)
    }
}
