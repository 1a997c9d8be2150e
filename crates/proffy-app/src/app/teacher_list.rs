//! Teacher-list screen
//!
//! A collapsible filter form (subject, week day, time) over the search
//! results. Searches run on a worker thread and report back through a
//! channel; each submission bumps a generation counter so only the latest
//! one is ever applied.
//!
//! Losing focus does not cancel a search: the screen stays owned while
//! another tab is active, so a result that lands meanwhile is applied and
//! shown on return. Only `unmount` discards late results.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveTime;
use crossbeam_channel::{Receiver, Sender};
use proffy::model::{FilterCriteria, Teacher, WeekDay};
use tracing::{debug, info, warn};

use crate::api::ClassesApi;
use crate::data::{Favorites, FavoritesStore};

use super::lifecycle::{Route, Screen};
use super::state::{SearchEvent, SearchOutcome, TeacherItem};

pub struct TeacherListScreen {
    api: Arc<dyn ClassesApi>,
    store: FavoritesStore,
    favorites: Favorites,
    criteria: FilterCriteria,
    filters_visible: bool,
    time_picker_visible: bool,
    teachers: Vec<Teacher>,
    /// Monotonically increasing counter to discard stale search results
    generation: u64,
    /// Generation of the search still in flight, if any
    pending: Option<u64>,
    event_tx: Sender<SearchEvent>,
    event_rx: Receiver<SearchEvent>,
    /// Last search failure, cleared by the next successful search
    error: Option<String>,
    /// Last favorites read/write failure
    notice: Option<String>,
}

impl TeacherListScreen {
    pub fn new(api: Arc<dyn ClassesApi>, store: FavoritesStore) -> Self {
        Self::with_criteria(api, store, FilterCriteria::default())
    }

    /// Screen whose form starts from `criteria`
    pub fn with_criteria(
        api: Arc<dyn ClassesApi>,
        store: FavoritesStore,
        criteria: FilterCriteria,
    ) -> Self {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        Self {
            api,
            store,
            favorites: Favorites::new(),
            criteria,
            filters_visible: false,
            time_picker_visible: false,
            teachers: Vec::new(),
            generation: 0,
            pending: None,
            event_tx,
            event_rx,
            error: None,
            notice: None,
        }
    }

    // -------------------------------------------------------------------------
    // Filter form
    // -------------------------------------------------------------------------

    pub fn is_filters_visible(&self) -> bool {
        self.filters_visible
    }

    pub fn toggle_filters_visible(&mut self) {
        self.filters_visible = !self.filters_visible;
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.criteria.subject = subject.into();
    }

    pub fn set_week_day(&mut self, week_day: WeekDay) {
        self.criteria.week_day = week_day;
    }

    pub fn is_time_picker_visible(&self) -> bool {
        self.time_picker_visible
    }

    /// Open the time picker
    pub fn focus_time_field(&mut self) {
        self.time_picker_visible = true;
    }

    /// Close the time picker, keeping the previous time if nothing was picked
    pub fn select_time(&mut self, time: Option<NaiveTime>) {
        self.time_picker_visible = false;
        if let Some(time) = time {
            self.criteria.time = time;
        }
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Reload favorites and search with the current form
    ///
    /// Returns the generation tagged on the request.
    pub fn submit_filters(&mut self) -> u64 {
        self.reload_favorites();

        self.generation += 1;
        let generation = self.generation;
        self.pending = Some(generation);

        let api = Arc::clone(&self.api);
        let criteria = self.criteria.clone();
        let tx = self.event_tx.clone();

        info!(
            generation,
            subject = %criteria.subject,
            week_day = criteria.week_day.number(),
            time = %criteria.formatted_time(),
            "submitting search"
        );

        let spawned = std::thread::Builder::new()
            .name("classes-search".into())
            .spawn(move || {
                let result = api.search_classes(&criteria).map_err(|e| e.to_string());
                let _ = tx.send(SearchEvent { generation, result });
            });

        if let Err(e) = spawned {
            warn!(error = %e, "could not start search");
            self.pending = None;
            self.error = Some(format!("Could not start search: {e}"));
        }
        generation
    }

    /// True while the latest search has not answered yet
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply every result that has arrived; returns how many were received
    pub fn poll(&mut self) -> usize {
        let mut received = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply(event);
            received += 1;
        }
        received
    }

    /// Block up to `timeout` for the next result and apply it
    pub fn wait(&mut self, timeout: Duration) -> Option<SearchOutcome> {
        let event = self.event_rx.recv_timeout(timeout).ok()?;
        Some(self.apply(event))
    }

    fn apply(&mut self, event: SearchEvent) -> SearchOutcome {
        if event.generation != self.generation {
            debug!(
                generation = event.generation,
                current = self.generation,
                "discarding stale search result"
            );
            return SearchOutcome::Stale;
        }
        self.pending = None;

        match event.result {
            Ok(teachers) => {
                let count = teachers.len();
                self.teachers = teachers;
                self.filters_visible = false;
                self.error = None;
                SearchOutcome::Applied(count)
            }
            Err(message) => {
                warn!(error = %message, "search failed");
                self.error = Some(message.clone());
                SearchOutcome::Failed(message)
            }
        }
    }

    /// Forget any search in flight; its result will be discarded
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    // -------------------------------------------------------------------------
    // Results
    // -------------------------------------------------------------------------

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Rows to render, flagged against the current favorites
    pub fn items(&self) -> Vec<TeacherItem> {
        TeacherItem::list(&self.teachers, &self.favorites.ids())
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Favorite or unfavorite the teacher at `index`
    ///
    /// Returns whether the teacher is a favorite afterwards, or `None` when the
    /// index is out of range or the store could not be written.
    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        let teacher = self.teachers.get(index)?.clone();
        match self.store.toggle(&teacher) {
            Ok(favorited) => {
                self.reload_favorites();
                Some(favorited)
            }
            Err(e) => {
                warn!(teacher_id = teacher.id, error = %e, "could not update favorites");
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    fn reload_favorites(&mut self) {
        self.notice = self.favorites.reload(&self.store).err().map(|e| e.to_string());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

impl Screen for TeacherListScreen {
    fn route(&self) -> Route {
        Route::TeacherList
    }

    fn on_focus(&mut self) {
        self.reload_favorites();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{KeyValueStore, MemoryStore};
    use crate::error::{AppError, Result};
    use proffy::config::storage::FAVORITES_KEY;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const WAIT: Duration = Duration::from_secs(5);

    /// Canned responses keyed by subject, optionally held back until released
    #[derive(Default)]
    struct MockApi {
        calls: Mutex<Vec<FilterCriteria>>,
        responses: Mutex<HashMap<String, std::result::Result<Vec<Teacher>, u16>>>,
        gates: Mutex<HashMap<String, Receiver<()>>>,
    }

    impl MockApi {
        fn respond(&self, subject: &str, teachers: Vec<Teacher>) {
            self.responses.lock().unwrap().insert(subject.to_string(), Ok(teachers));
        }

        fn fail(&self, subject: &str, status: u16) {
            self.responses.lock().unwrap().insert(subject.to_string(), Err(status));
        }

        /// Hold the response for `subject` until the returned sender fires
        fn gate(&self, subject: &str) -> Sender<()> {
            let (tx, rx) = crossbeam_channel::bounded(1);
            self.gates.lock().unwrap().insert(subject.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<FilterCriteria> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ClassesApi for MockApi {
        fn search_classes(&self, criteria: &FilterCriteria) -> Result<Vec<Teacher>> {
            self.calls.lock().unwrap().push(criteria.clone());
            let gate = self.gates.lock().unwrap().remove(&criteria.subject);
            if let Some(gate) = gate {
                let _ = gate.recv();
            }
            match self.responses.lock().unwrap().get(&criteria.subject) {
                Some(Ok(teachers)) => Ok(teachers.clone()),
                Some(Err(status)) => Err(AppError::Api { status: *status }),
                None => Ok(Vec::new()),
            }
        }
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn setup() -> (TeacherListScreen, Arc<MockApi>, Arc<MemoryStore>) {
        let api = Arc::new(MockApi::default());
        let backing = Arc::new(MemoryStore::new());
        let screen = TeacherListScreen::with_criteria(
            api.clone(),
            FavoritesStore::new(backing.clone()),
            FilterCriteria::new("Matemática", WeekDay::Sunday, hm(8, 0)),
        );
        (screen, api, backing)
    }

    fn ids(screen: &TeacherListScreen) -> Vec<i64> {
        screen.teachers().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_initial_state() {
        let (screen, api, _) = setup();
        assert!(!screen.is_filters_visible());
        assert!(!screen.is_time_picker_visible());
        assert!(screen.teachers().is_empty());
        assert!(!screen.is_loading());
        assert_eq!(screen.error(), None);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_toggle_filters_twice_restores() {
        let (mut screen, _, _) = setup();
        screen.toggle_filters_visible();
        assert!(screen.is_filters_visible());
        screen.toggle_filters_visible();
        assert!(!screen.is_filters_visible());
    }

    #[test]
    fn test_time_picker() {
        let (mut screen, _, _) = setup();

        screen.focus_time_field();
        assert!(screen.is_time_picker_visible());
        screen.select_time(Some(hm(14, 15)));
        assert!(!screen.is_time_picker_visible());
        assert_eq!(screen.criteria().formatted_time(), "14:15");

        screen.focus_time_field();
        screen.select_time(None);
        assert!(!screen.is_time_picker_visible());
        assert_eq!(screen.criteria().formatted_time(), "14:15");
    }

    #[test]
    fn test_submit_sends_form_values() {
        let (mut screen, api, _) = setup();
        screen.toggle_filters_visible();
        screen.set_subject("Matemática");
        screen.set_week_day(WeekDay::Monday);
        screen.select_time(Some(hm(9, 30)));

        screen.submit_filters();
        assert!(screen.is_loading());
        assert_eq!(screen.wait(WAIT), Some(SearchOutcome::Applied(0)));

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].query_params(),
            vec![
                ("subject", "Matemática".to_string()),
                ("week_day", "2".to_string()),
                ("time", "09:30".to_string()),
            ]
        );
    }

    #[test]
    fn test_success_replaces_list_and_collapses_panel() {
        let (mut screen, api, _) = setup();
        api.respond("Química", vec![Teacher::new(3, "C", "Química")]);
        api.respond("Física", vec![Teacher::new(1, "A", "Física"), Teacher::new(2, "B", "Física")]);

        screen.set_subject("Química");
        screen.submit_filters();
        screen.wait(WAIT);
        assert_eq!(ids(&screen), vec![3]);

        screen.toggle_filters_visible();
        screen.set_subject("Física");
        screen.submit_filters();
        assert_eq!(screen.wait(WAIT), Some(SearchOutcome::Applied(2)));
        assert_eq!(ids(&screen), vec![1, 2]);
        assert!(!screen.is_filters_visible());
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_failure_keeps_previous_list() {
        let (mut screen, api, _) = setup();
        api.respond("Química", vec![Teacher::new(3, "C", "Química")]);
        api.fail("Física", 500);

        screen.set_subject("Química");
        screen.submit_filters();
        screen.wait(WAIT);

        screen.toggle_filters_visible();
        screen.set_subject("Física");
        screen.submit_filters();
        let outcome = screen.wait(WAIT);
        assert!(matches!(outcome, Some(SearchOutcome::Failed(_))));

        assert_eq!(ids(&screen), vec![3]);
        assert!(screen.is_filters_visible());
        assert_eq!(screen.error(), Some("Search failed: server responded with 500"));

        screen.set_subject("Química");
        screen.submit_filters();
        screen.wait(WAIT);
        assert_eq!(screen.error(), None);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (mut screen, api, _) = setup();
        api.respond("Física", vec![Teacher::new(1, "A", "Física")]);
        api.respond("Química", vec![Teacher::new(2, "B", "Química")]);
        let release = api.gate("Física");

        screen.set_subject("Física");
        let first = screen.submit_filters();
        screen.set_subject("Química");
        let second = screen.submit_filters();
        assert!(second > first);

        assert_eq!(screen.wait(WAIT), Some(SearchOutcome::Applied(1)));
        assert_eq!(ids(&screen), vec![2]);

        release.send(()).unwrap();
        assert_eq!(screen.wait(WAIT), Some(SearchOutcome::Stale));
        assert_eq!(ids(&screen), vec![2]);
    }

    #[test]
    fn test_response_after_unmount_is_discarded() {
        let (mut screen, api, _) = setup();
        api.respond("Matemática", vec![Teacher::new(1, "A", "Matemática")]);
        let release = api.gate("Matemática");

        screen.submit_filters();
        screen.unmount();
        assert!(!screen.is_loading());

        release.send(()).unwrap();
        assert_eq!(screen.wait(WAIT), Some(SearchOutcome::Stale));
        assert!(screen.teachers().is_empty());
    }

    #[test]
    fn test_result_applied_while_blurred() {
        use crate::app::lifecycle::Navigator;

        struct Other;
        impl Screen for Other {
            fn route(&self) -> Route {
                Route::Favorites
            }
            fn on_focus(&mut self) {}
        }

        let (mut screen, api, _) = setup();
        api.respond("Matemática", vec![Teacher::new(1, "A", "Matemática")]);
        let release = api.gate("Matemática");
        let mut other = Other;
        let mut nav = Navigator::new();

        nav.navigate(Route::TeacherList, &mut [&mut screen as &mut dyn Screen, &mut other]);
        screen.submit_filters();
        nav.navigate(Route::Favorites, &mut [&mut screen as &mut dyn Screen, &mut other]);

        release.send(()).unwrap();
        assert_eq!(screen.wait(WAIT), Some(SearchOutcome::Applied(1)));

        nav.navigate(Route::TeacherList, &mut [&mut screen as &mut dyn Screen, &mut other]);
        assert_eq!(ids(&screen), vec![1]);
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_poll_applies_arrived_results() {
        let (mut screen, api, _) = setup();
        api.respond("Matemática", vec![Teacher::new(1, "A", "Matemática")]);

        screen.submit_filters();
        let deadline = std::time::Instant::now() + WAIT;
        while screen.poll() == 0 && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(ids(&screen), vec![1]);
        assert_eq!(screen.poll(), 0);
    }

    #[test]
    fn test_items_follow_favorites() {
        let (mut screen, api, backing) = setup();
        api.respond(
            "Matemática",
            vec![Teacher::new(1, "A", "Matemática"), Teacher::new(2, "B", "Matemática")],
        );
        FavoritesStore::new(backing.clone())
            .save(&[Teacher::new(2, "B", "Matemática")])
            .unwrap();

        screen.submit_filters();
        screen.wait(WAIT);

        let flags: Vec<_> = screen.items().iter().map(|item| item.favorited).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn test_focus_reloads_favorites() {
        let (mut screen, api, backing) = setup();
        api.respond("Matemática", vec![Teacher::new(1, "A", "Matemática")]);
        screen.submit_filters();
        screen.wait(WAIT);
        assert!(!screen.items()[0].favorited);

        FavoritesStore::new(backing.clone())
            .save(&[Teacher::new(1, "A", "Matemática")])
            .unwrap();
        assert!(!screen.items()[0].favorited);
        screen.on_focus();
        assert!(screen.items()[0].favorited);
    }

    #[test]
    fn test_toggle_favorite() {
        let (mut screen, api, backing) = setup();
        api.respond("Matemática", vec![Teacher::new(1, "A", "Matemática")]);
        screen.submit_filters();
        screen.wait(WAIT);

        assert_eq!(screen.toggle_favorite(0), Some(true));
        assert!(screen.items()[0].favorited);
        assert!(backing.get(FAVORITES_KEY).unwrap().unwrap().contains("\"id\":1"));

        assert_eq!(screen.toggle_favorite(0), Some(false));
        assert!(!screen.items()[0].favorited);
        assert_eq!(screen.toggle_favorite(9), None);
    }

    #[test]
    fn test_malformed_favorites_fail_closed() {
        let (mut screen, api, backing) = setup();
        api.respond("Matemática", vec![Teacher::new(1, "A", "Matemática")]);
        FavoritesStore::new(backing.clone())
            .save(&[Teacher::new(1, "A", "Matemática")])
            .unwrap();
        screen.on_focus();

        backing.set(FAVORITES_KEY, "{broken").unwrap();
        screen.submit_filters();
        screen.wait(WAIT);

        assert_eq!(ids(&screen), vec![1]);
        assert!(screen.favorites().is_empty());
        assert!(!screen.items()[0].favorited);
        assert!(screen.notice().is_some());
    }
}
