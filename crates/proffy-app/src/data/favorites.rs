//! Favorites
//!
//! The favorites list lives in the key-value store under a single key as a
//! JSON array of teachers. `FavoritesStore` reads and writes that key;
//! `Favorites` is the in-memory copy a screen renders from.

use crate::data::store::KeyValueStore;
use crate::error::{AppError, Result};
use proffy::config::storage::FAVORITES_KEY;
use proffy::model::{FavoriteIds, Teacher, TeacherId};
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// FavoritesStore
// =============================================================================

/// Access to the stored favorites list
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read and validate the stored list
    ///
    /// Returns `None` when nothing (or only whitespace) is stored.
    pub fn load(&self) -> Result<Option<Vec<Teacher>>> {
        let raw = self
            .store
            .get(FAVORITES_KEY)
            .map_err(|e| AppError::Favorites(e.to_string()))?;

        match raw {
            Some(json) if !json.trim().is_empty() => Teacher::list_from_json(&json)
                .map(Some)
                .map_err(|e| AppError::Favorites(e.to_string())),
            _ => Ok(None),
        }
    }

    /// Add the teacher if absent, remove it if present
    ///
    /// Returns `true` when the teacher is a favorite afterwards.
    pub fn toggle(&self, teacher: &Teacher) -> Result<bool> {
        let mut list = self.load()?.unwrap_or_default();

        let now_favorite = match list.iter().position(|t| t.id == teacher.id) {
            Some(index) => {
                list.remove(index);
                false
            }
            None => {
                list.push(teacher.clone());
                true
            }
        };

        self.save(&list)?;
        info!(teacher_id = teacher.id, favorite = now_favorite, "toggled favorite");
        Ok(now_favorite)
    }

    /// Replace the stored list
    pub fn save(&self, list: &[Teacher]) -> Result<()> {
        let json = Teacher::list_to_json(list)?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

// =============================================================================
// Favorites
// =============================================================================

/// In-memory favorites list owned by a screen
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Favorites {
    teachers: Vec<Teacher>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from the store
    ///
    /// A stored list replaces the current one entirely; nothing stored leaves
    /// it as it is. A read or parse failure clears the list and is returned so
    /// the caller can show it.
    pub fn reload(&mut self, store: &FavoritesStore) -> Result<()> {
        match store.load() {
            Ok(Some(list)) => {
                debug!(count = list.len(), "favorites loaded");
                self.teachers = list;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                warn!(error = %e, "discarding unreadable favorites");
                self.teachers.clear();
                Err(e)
            }
        }
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Identifier set for membership checks
    pub fn ids(&self) -> FavoriteIds {
        FavoriteIds::from_teachers(&self.teachers)
    }

    pub fn contains(&self, id: TeacherId) -> bool {
        self.teachers.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.teachers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty()
    }
}
