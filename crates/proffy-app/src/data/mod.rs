//! Data persistence
//!
//! Key-value store, favorites, and settings.

pub mod favorites;
pub mod settings;
pub mod storage;
pub mod store;

// Re-export common types
pub use favorites::{Favorites, FavoritesStore};
pub use settings::Settings;
pub use storage::{config_dir, ensure_config_dir};
pub use store::{FileStore, KeyValueStore, MemoryStore};
