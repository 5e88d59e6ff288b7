//! Case-insensitive substring search across folders, checklists and tasks.
//!
//! # Responsibility
//! - Match the query against folder names, checklist names and task titles.
//! - Carry enough ancestry on each hit to restore selection from it.
//!
//! # Invariants
//! - Blank queries yield no hits.
//! - Hits follow depth-first tree order: folder, then each checklist followed
//!   by its tasks. There is no relevance ranking.

use crate::model::todo::Folder;
use serde::{Deserialize, Serialize};

/// Entity kind a search hit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchHitKind {
    Folder,
    Checklist,
    Task,
}

impl SearchHitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Checklist => "checklist",
            Self::Task => "task",
        }
    }
}

/// Single search hit returned by [`search_tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: SearchHitKind,
    pub id: String,
    /// Folder/checklist name or task title.
    pub name: String,
    /// Color of the owning folder, for visual tagging.
    pub color: String,
    /// Folder id for checklist hits, checklist id for task hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Folder id for task hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_parent_id: Option<String>,
}

/// Searches the tree and returns hits in depth-first order.
pub fn search_tree(folders: &[Folder], query: &str) -> Vec<SearchHit> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    // Blank-ness is judged on trimmed text; matching keeps surrounding spaces.
    let needle = query.to_lowercase();
    let matches = |text: &str| text.to_lowercase().contains(&needle);
    let mut hits = Vec::new();

    for folder in folders {
        if matches(&folder.name) {
            hits.push(SearchHit {
                kind: SearchHitKind::Folder,
                id: folder.id.clone(),
                name: folder.name.clone(),
                color: folder.color.clone(),
                parent_id: None,
                grand_parent_id: None,
            });
        }

        for checklist in &folder.checklists {
            if matches(&checklist.name) {
                hits.push(SearchHit {
                    kind: SearchHitKind::Checklist,
                    id: checklist.id.clone(),
                    name: checklist.name.clone(),
                    color: folder.color.clone(),
                    parent_id: Some(folder.id.clone()),
                    grand_parent_id: None,
                });
            }

            hits.extend(
                checklist
                    .tasks
                    .iter()
                    .filter(|task| matches(&task.title))
                    .map(|task| SearchHit {
                        kind: SearchHitKind::Task,
                        id: task.id.clone(),
                        name: task.title.clone(),
                        color: folder.color.clone(),
                        parent_id: Some(checklist.id.clone()),
                        grand_parent_id: Some(folder.id.clone()),
                    }),
            );
        }
    }

    hits
}
