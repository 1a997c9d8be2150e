//! Proffy CLI: browse tutors and keep favorites from the terminal

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clap::Parser;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use proffy::model::{parse_time, FilterCriteria, Teacher};
use proffy_app::api::HttpClassesApi;
use proffy_app::app::{FavoritesScreen, Navigator, Route, Screen, TeacherItem, TeacherListScreen};
use proffy_app::config::files::LOG_FILE;
use proffy_app::data::{ensure_config_dir, FavoritesStore, FileStore, KeyValueStore, Settings};

#[derive(Parser)]
#[command(name = "proffy", about = "Browse tutors and keep your favorites", version)]
struct Cli {
    /// Backend base URL (overrides the saved setting)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Directory for favorites and settings
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log destination (defaults to proffy.log in the data directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Form field under the cursor while the filter panel is open
#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Subject,
    WeekDay,
    Time,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Subject => Field::WeekDay,
            Field::WeekDay => Field::Time,
            Field::Time => Field::Subject,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Subject => Field::Time,
            Field::WeekDay => Field::Subject,
            Field::Time => Field::WeekDay,
        }
    }
}

struct App {
    nav: Navigator,
    list: TeacherListScreen,
    favorites: FavoritesScreen,
    list_state: ListState,
    favorites_state: ListState,
    field: Field,
    /// Time picker input, `HH:MM`
    time_input: String,
    status: Option<String>,
    running: bool,
}

impl App {
    fn new(list: TeacherListScreen, favorites: FavoritesScreen) -> Self {
        let mut app = Self {
            nav: Navigator::new(),
            list,
            favorites,
            list_state: ListState::default(),
            favorites_state: ListState::default(),
            field: Field::Subject,
            time_input: String::new(),
            status: None,
            running: true,
        };
        app.navigate(Route::TeacherList);
        app
    }

    fn route(&self) -> Route {
        self.nav.current().unwrap_or(Route::TeacherList)
    }

    fn navigate(&mut self, to: Route) {
        let screens: &mut [&mut dyn Screen] = &mut [&mut self.list, &mut self.favorites];
        self.nav.navigate(to, screens);
        self.status = None;
        self.clamp_selection();
    }

    fn refocus(&mut self) {
        let screens: &mut [&mut dyn Screen] = &mut [&mut self.list, &mut self.favorites];
        self.nav.refocus(screens);
        self.clamp_selection();
    }

    fn tick(&mut self) {
        if self.list.poll() > 0 {
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        clamp(&mut self.list_state, self.list.teachers().len());
        clamp(&mut self.favorites_state, self.favorites.teachers().len());
    }

    fn state_mut(&mut self) -> &mut ListState {
        match self.route() {
            Route::TeacherList => &mut self.list_state,
            Route::Favorites => &mut self.favorites_state,
        }
    }

    fn len(&self) -> usize {
        match self.route() {
            Route::TeacherList => self.list.teachers().len(),
            Route::Favorites => self.favorites.teachers().len(),
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let state = self.state_mut();
        let next = match (state.selected(), down) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(len - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        state.select(Some(next));
    }

    fn toggle_selected_favorite(&mut self) {
        let result = match self.route() {
            Route::TeacherList => self
                .list_state
                .selected()
                .and_then(|i| self.list.toggle_favorite(i)),
            Route::Favorites => self
                .favorites_state
                .selected()
                .and_then(|i| self.favorites.toggle_favorite(i)),
        };
        self.status = result.map(|now| {
            if now {
                "Adicionado aos favoritos".to_string()
            } else {
                "Removido dos favoritos".to_string()
            }
        });
        self.clamp_selection();
    }

    fn submit(&mut self) {
        self.status = None;
        self.list.submit_filters();
    }

    fn handle_key(&mut self, code: KeyCode) {
        if self.route() == Route::TeacherList {
            if self.list.is_time_picker_visible() {
                self.handle_time_picker_key(code);
                return;
            }
            if self.list.is_filters_visible() {
                self.handle_filter_key(code);
                return;
            }
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Tab | KeyCode::BackTab => self.navigate(self.route().next()),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char('s') | KeyCode::Char(' ') => self.toggle_selected_favorite(),
            KeyCode::Char('r') => self.refocus(),
            KeyCode::Char('f') if self.route() == Route::TeacherList => {
                self.list.toggle_filters_visible();
                self.field = Field::Subject;
            }
            KeyCode::Enter if self.route() == Route::TeacherList => self.submit(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.list.toggle_filters_visible(),
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.previous(),
            KeyCode::Enter if self.field == Field::Time => self.open_time_picker(),
            KeyCode::Enter => self.submit(),
            KeyCode::Left if self.field == Field::WeekDay => {
                let day = self.list.criteria().week_day.previous();
                self.list.set_week_day(day);
            }
            KeyCode::Right if self.field == Field::WeekDay => {
                let day = self.list.criteria().week_day.next();
                self.list.set_week_day(day);
            }
            KeyCode::Char(c) if self.field == Field::Subject => {
                let mut subject = self.list.criteria().subject.clone();
                subject.push(c);
                self.list.set_subject(subject);
            }
            KeyCode::Backspace if self.field == Field::Subject => {
                let mut subject = self.list.criteria().subject.clone();
                subject.pop();
                self.list.set_subject(subject);
            }
            KeyCode::Char(' ') if self.field == Field::Time => self.open_time_picker(),
            _ => {}
        }
    }

    fn open_time_picker(&mut self) {
        self.time_input = self.list.criteria().formatted_time();
        self.list.focus_time_field();
    }

    fn handle_time_picker_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.list.select_time(None),
            KeyCode::Enter => match parse_time(&self.time_input) {
                Ok(time) => {
                    self.list.select_time(Some(time));
                    self.status = None;
                }
                Err(e) => {
                    self.list.select_time(None);
                    self.status = Some(e.to_string());
                }
            },
            KeyCode::Backspace => {
                self.time_input.pop();
            }
            KeyCode::Char(c) if (c.is_ascii_digit() || c == ':') && self.time_input.len() < 5 => {
                self.time_input.push(c);
            }
            _ => {}
        }
    }
}

fn clamp(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        None => state.select(Some(0)),
        Some(i) if i >= len => state.select(Some(len - 1)),
        Some(_) => {}
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => {
            fs::create_dir_all(&dir)?;
            dir
        }
        None => ensure_config_dir()?,
    };
    let log_path = cli.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE));
    init_logging(&log_path)?;

    let mut settings = Settings::load_or_default(&data_dir);
    if let Some(url) = cli.api_url.as_deref() {
        settings.set_api_base_url(url)?;
    }
    info!(data_dir = %data_dir.display(), api = %settings.api_base_url, "starting");

    let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::in_dir(&data_dir));
    let store = FavoritesStore::new(kv);
    let api = Arc::new(HttpClassesApi::with_base_url(settings.api_base_url.clone())?);
    let criteria = FilterCriteria::default()
        .with_subject(settings.default_subject.clone())
        .with_week_day(settings.default_week_day);

    let mut app = App::new(
        TeacherListScreen::with_criteria(api, store.clone(), criteria),
        FavoritesScreen::new(store),
    );

    // Enter TUI
    terminal::enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    let result = (|| -> io::Result<()> {
        while app.running {
            terminal.draw(|f| draw_ui(f, &mut app))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                app.tick();
            }
        }
        Ok(())
    })();

    // Restore terminal
    terminal::disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    app.list.unmount();
    info!("exiting");
    Ok(result?)
}

// =============================================================================
// Drawing
// =============================================================================

fn draw_ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let outer = Block::default()
        .title(format!(" Proffy v{} ", env!("CARGO_PKG_VERSION")))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let route = app.route();
    let panel_height = if route == Route::TeacherList && app.list.is_filters_visible() {
        5
    } else {
        0
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),            // tabs
        Constraint::Length(panel_height), // filter form
        Constraint::Length(1),            // banner
        Constraint::Min(0),               // results
        Constraint::Length(1),            // help bar
    ])
    .split(inner);

    draw_tabs(f, route, chunks[0]);
    if panel_height > 0 {
        draw_filters(f, app, chunks[1]);
    }
    draw_banner(f, app, chunks[2]);
    match route {
        Route::TeacherList => {
            let items = app.list.items();
            let empty = "Nenhum proffy encontrado. Use 'f' para filtrar e Enter para buscar.";
            draw_teachers(f, &items, empty, chunks[3], &mut app.list_state);
        }
        Route::Favorites => {
            let items = app.favorites.items();
            let empty = "Nenhum favorito ainda.";
            draw_teachers(f, &items, empty, chunks[3], &mut app.favorites_state);
        }
    }
    draw_help(f, app, chunks[4]);
}

fn draw_tabs(f: &mut Frame, route: Route, area: Rect) {
    let selected = Route::ALL.iter().position(|r| *r == route).unwrap_or(0);
    let tabs = Tabs::new(Route::ALL.iter().map(|r| r.title()))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::White).bold());
    f.render_widget(tabs, area);
}

fn draw_filters(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Filtrar por dia, hora e matéria ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let criteria = app.list.criteria();
    let label = |field: Field, text: &'static str| {
        let style = if app.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(text, style)
    };
    let time = if app.list.is_time_picker_visible() {
        Span::styled(
            format!("{}_", app.time_input),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    } else {
        Span::styled(criteria.formatted_time(), Style::default().fg(Color::White))
    };

    let lines = vec![
        Line::from(vec![
            label(Field::Subject, "  Matéria: "),
            Span::styled(criteria.subject.as_str(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            label(Field::WeekDay, "  Dia da semana: "),
            Span::styled(
                format!("< {} >", criteria.week_day),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![label(Field::Time, "  Horário: "), time]),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_banner(f: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match app.route() {
        Route::TeacherList => {
            if let Some(error) = app.list.error() {
                (error.to_string(), Color::Red)
            } else if let Some(notice) = app.list.notice() {
                (notice.to_string(), Color::Yellow)
            } else if app.list.is_loading() {
                ("Buscando...".to_string(), Color::Cyan)
            } else {
                (app.status.clone().unwrap_or_default(), Color::Green)
            }
        }
        Route::Favorites => match app.favorites.notice() {
            Some(notice) => (notice.to_string(), Color::Yellow),
            None => (app.status.clone().unwrap_or_default(), Color::Green),
        },
    };
    let line = Line::from(Span::styled(format!("  {text}"), Style::default().fg(color)));
    f.render_widget(Paragraph::new(line), area);
}

fn draw_teachers(
    f: &mut Frame,
    items: &[TeacherItem],
    empty: &str,
    area: Rect,
    state: &mut ListState,
) {
    if items.is_empty() {
        let text = Line::from(Span::styled(
            format!("  {empty}"),
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(Paragraph::new(text), area);
        return;
    }

    let rows: Vec<ListItem> = items.iter().map(teacher_row).collect();
    let list = List::new(rows)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, state);
}

fn teacher_row(item: &TeacherItem) -> ListItem<'static> {
    let teacher: &Teacher = &item.teacher;
    let heart = if item.favorited {
        Span::styled("♥ ", Style::default().fg(Color::Red))
    } else {
        Span::styled("♡ ", Style::default().fg(Color::DarkGray))
    };

    let mut lines = vec![Line::from(vec![
        heart,
        Span::styled(teacher.name.clone(), Style::default().fg(Color::White).bold()),
        Span::raw("  "),
        Span::styled(teacher.subject.clone(), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(format_cost(teacher.cost), Style::default().fg(Color::Yellow)),
    ])];
    if let Some(bio) = teacher.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("    {}", bio.trim()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(whatsapp) = teacher.whatsapp.as_deref() {
        lines.push(Line::from(Span::styled(
            format!("    WhatsApp: {whatsapp}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    ListItem::new(lines)
}

fn format_cost(cost: f64) -> String {
    format!("R$ {:.2}/hora", cost).replace('.', ",")
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let spans = match app.route() {
        Route::TeacherList if app.list.is_time_picker_visible() => vec![
            key("  HH:MM "),
            Span::raw("type time  |  "),
            key("Enter "),
            Span::raw("confirm  |  "),
            key("Esc "),
            Span::raw("keep previous"),
        ],
        Route::TeacherList if app.list.is_filters_visible() => vec![
            key("  ↑/↓ "),
            Span::raw("field  |  "),
            key("←/→ "),
            Span::raw("day  |  "),
            key("Enter "),
            Span::raw("search / pick time  |  "),
            key("Esc "),
            Span::raw("hide filters"),
        ],
        Route::TeacherList => vec![
            key("  'q' "),
            Span::raw("quit  |  "),
            key("Tab "),
            Span::raw("favorites  |  "),
            key("'f' "),
            Span::raw("filters  |  "),
            key("Enter "),
            Span::raw("search  |  "),
            key("'s' "),
            Span::raw("favorite"),
        ],
        Route::Favorites => vec![
            key("  'q' "),
            Span::raw("quit  |  "),
            key("Tab "),
            Span::raw("proffys  |  "),
            key("'s' "),
            Span::raw("unfavorite  |  "),
            key("'r' "),
            Span::raw("reload"),
        ],
    };
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
