//! Completion counters for checklists, folders and the whole tree.

use crate::model::todo::{Checklist, Folder};
use std::fmt::{Display, Formatter};
use std::ops::Add;

/// Completed vs. total task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressStats {
    pub completed: usize,
    pub total: usize,
}

impl ProgressStats {
    /// Whole-number completion percentage; `0` for an empty set.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl Add for ProgressStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            completed: self.completed + rhs.completed,
            total: self.total + rhs.total,
        }
    }
}

impl Display for ProgressStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

pub fn checklist_progress(checklist: &Checklist) -> ProgressStats {
    ProgressStats {
        completed: checklist.tasks.iter().filter(|task| task.completed).count(),
        total: checklist.tasks.len(),
    }
}

pub fn folder_progress(folder: &Folder) -> ProgressStats {
    folder
        .checklists
        .iter()
        .map(checklist_progress)
        .fold(ProgressStats::default(), |acc, stats| acc + stats)
}

/// Progress across every folder.
pub fn total_progress(folders: &[Folder]) -> ProgressStats {
    folders
        .iter()
        .map(folder_progress)
        .fold(ProgressStats::default(), |acc, stats| acc + stats)
}
