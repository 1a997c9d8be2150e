//! Classes API trait

use crate::error::Result;
use proffy::model::{FilterCriteria, Teacher};

/// Source of teachers matching a search filter
///
/// Implementations are called from worker threads.
pub trait ClassesApi: Send + Sync {
    /// Teachers with a class matching `criteria`
    fn search_classes(&self, criteria: &FilterCriteria) -> Result<Vec<Teacher>>;
}
