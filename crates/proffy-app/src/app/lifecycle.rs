//! Navigation focus lifecycle
//!
//! Screens subscribe to focus explicitly: the navigator calls `on_blur` on
//! the screen being left and `on_focus` on the one becoming active, every
//! time the active route changes.

use tracing::debug;

/// Navigable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    TeacherList,
    Favorites,
}

impl Route {
    /// Tab order
    pub const ALL: [Route; 2] = [Route::TeacherList, Route::Favorites];

    /// Screen title
    pub fn title(self) -> &'static str {
        match self {
            Route::TeacherList => "Proffys disponíveis",
            Route::Favorites => "Meus proffys favoritos",
        }
    }

    /// The other tab
    pub fn next(self) -> Self {
        match self {
            Route::TeacherList => Route::Favorites,
            Route::Favorites => Route::TeacherList,
        }
    }
}

/// A screen that reacts to gaining and losing focus
pub trait Screen {
    fn route(&self) -> Route;

    /// Called each time the screen becomes active
    fn on_focus(&mut self);

    /// Called each time the screen stops being active
    fn on_blur(&mut self) {}
}

/// Tracks the active route and delivers focus events
#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.current
    }

    /// Make `to` the active route
    ///
    /// Returns `false` without firing anything when `to` is already active.
    pub fn navigate(&mut self, to: Route, screens: &mut [&mut dyn Screen]) -> bool {
        if self.current == Some(to) {
            return false;
        }

        if let Some(from) = self.current {
            for screen in screens.iter_mut().filter(|s| s.route() == from) {
                screen.on_blur();
            }
        }
        self.current = Some(to);
        for screen in screens.iter_mut().filter(|s| s.route() == to) {
            screen.on_focus();
        }

        debug!(route = ?to, "navigated");
        true
    }

    /// Re-deliver focus to the active screen, e.g. when the app resumes
    pub fn refocus(&self, screens: &mut [&mut dyn Screen]) {
        let Some(current) = self.current else {
            return;
        };
        for screen in screens.iter_mut().filter(|s| s.route() == current) {
            screen.on_focus();
        }
    }
}
