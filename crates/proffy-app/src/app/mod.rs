//! Screen state
//!
//! Each screen owns its state and is driven by the frontend on the UI
//! thread. `Navigator` delivers focus events as the user moves between them.

pub mod favorites_screen;
pub mod lifecycle;
pub mod state;
pub mod teacher_list;

pub use favorites_screen::FavoritesScreen;
pub use lifecycle::{Navigator, Route, Screen};
pub use state::{SearchOutcome, TeacherItem};
pub use teacher_list::TeacherListScreen;
