//! Shared screen types

use proffy::model::{FavoriteIds, Teacher};

/// One rendered row: a teacher and whether it is a favorite
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherItem {
    pub teacher: Teacher,
    pub favorited: bool,
}

impl TeacherItem {
    /// Rows for `teachers`, flagged against `favorites`
    pub fn list(teachers: &[Teacher], favorites: &FavoriteIds) -> Vec<TeacherItem> {
        teachers
            .iter()
            .map(|teacher| TeacherItem {
                favorited: favorites.contains(teacher.id),
                teacher: teacher.clone(),
            })
            .collect()
    }
}

/// Search result sent back from a worker thread
pub(crate) struct SearchEvent {
    pub generation: u64,
    pub result: Result<Vec<Teacher>, String>,
}

/// What happened to a search result once it reached the screen
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The list was replaced with this many teachers
    Applied(usize),
    /// The search failed; the previous list is still shown
    Failed(String),
    /// A newer search was submitted (or the screen went away) first
    Stale,
}
