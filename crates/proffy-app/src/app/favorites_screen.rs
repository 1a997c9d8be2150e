//! Favorites screen
//!
//! Renders the stored favorites, re-read every time the screen gains focus.

use crate::data::{Favorites, FavoritesStore};
use proffy::model::Teacher;
use tracing::warn;

use super::lifecycle::{Route, Screen};
use super::state::TeacherItem;

pub struct FavoritesScreen {
    store: FavoritesStore,
    favorites: Favorites,
    /// Last favorites read/write failure, for display
    notice: Option<String>,
}

impl FavoritesScreen {
    pub fn new(store: FavoritesStore) -> Self {
        Self {
            store,
            favorites: Favorites::new(),
            notice: None,
        }
    }

    /// Re-read the favorites list
    pub fn reload(&mut self) {
        self.notice = self.favorites.reload(&self.store).err().map(|e| e.to_string());
    }

    pub fn teachers(&self) -> &[Teacher] {
        self.favorites.teachers()
    }

    /// Rows to render; every entry here is a favorite by definition
    pub fn items(&self) -> Vec<TeacherItem> {
        self.favorites
            .teachers()
            .iter()
            .map(|teacher| TeacherItem {
                teacher: teacher.clone(),
                favorited: true,
            })
            .collect()
    }

    /// Unfavorite the teacher at `index`
    ///
    /// Returns whether the teacher is still a favorite, or `None` when the
    /// index is out of range or the store could not be written.
    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        let teacher = self.favorites.teachers().get(index)?.clone();
        match self.store.toggle(&teacher) {
            Ok(favorited) => {
                self.reload();
                Some(favorited)
            }
            Err(e) => {
                warn!(teacher_id = teacher.id, error = %e, "could not update favorites");
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

impl Screen for FavoritesScreen {
    fn route(&self) -> Route {
        Route::Favorites
    }

    fn on_focus(&mut self) {
        self.reload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{KeyValueStore, MemoryStore};
    use proffy::config::storage::FAVORITES_KEY;
    use std::sync::Arc;

    fn screen_with(backing: Arc<MemoryStore>) -> (FavoritesScreen, FavoritesStore) {
        let store = FavoritesStore::new(backing);
        (FavoritesScreen::new(store.clone()), store)
    }

    #[test]
    fn test_empty_store_renders_nothing() {
        let (mut screen, _) = screen_with(Arc::new(MemoryStore::new()));
        screen.on_focus();
        assert!(screen.items().is_empty());
        assert_eq!(screen.notice(), None);
    }

    #[test]
    fn test_items_are_all_favorited() {
        let (mut screen, store) = screen_with(Arc::new(MemoryStore::new()));
        store
            .save(&[Teacher::new(1, "A", "x"), Teacher::new(2, "B", "y")])
            .unwrap();

        screen.on_focus();
        let items = screen.items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.favorited));
        assert_eq!(items[0].teacher.id, 1);
        assert_eq!(items[1].teacher.id, 2);
    }

    #[test]
    fn test_focus_picks_up_changes_made_elsewhere() {
        let (mut screen, store) = screen_with(Arc::new(MemoryStore::new()));
        screen.on_focus();
        assert!(screen.teachers().is_empty());

        store.toggle(&Teacher::new(3, "C", "z")).unwrap();
        screen.on_focus();
        assert_eq!(screen.teachers().len(), 1);
    }

    #[test]
    fn test_malformed_favorites_show_notice() {
        let backing = Arc::new(MemoryStore::new());
        let (mut screen, store) = screen_with(backing.clone());
        store.save(&[Teacher::new(1, "A", "x")]).unwrap();
        screen.on_focus();
        assert_eq!(screen.teachers().len(), 1);

        backing.set(FAVORITES_KEY, "[{\"id\": \"one\"}]").unwrap();
        screen.on_focus();
        assert!(screen.items().is_empty());
        assert!(screen.notice().unwrap().starts_with("Could not read favorites"));

        backing.set(FAVORITES_KEY, "[]").unwrap();
        screen.on_focus();
        assert_eq!(screen.notice(), None);
    }

    #[test]
    fn test_toggle_removes_and_reloads() {
        let (mut screen, store) = screen_with(Arc::new(MemoryStore::new()));
        store
            .save(&[Teacher::new(1, "A", "x"), Teacher::new(2, "B", "y")])
            .unwrap();
        screen.on_focus();

        assert_eq!(screen.toggle_favorite(0), Some(false));
        let ids: Vec<_> = screen.teachers().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(store.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let (mut screen, _) = screen_with(Arc::new(MemoryStore::new()));
        screen.on_focus();
        assert_eq!(screen.toggle_favorite(5), None);
        assert_eq!(screen.notice(), None);
    }
}
