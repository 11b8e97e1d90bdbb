//! Main application state and TUI event loop for the dashboard.
//!
//! [`App`] owns the theme, the active screen and the explorer session. It
//! drives a synchronous crossterm event loop: every key press mutates the
//! session, and the next frame re-renders from the recomputed view.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::Text,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use adspend_core::models::Platform;
use adspend_data::view::DashboardView;
use adspend_runtime::session::{ExplorerSession, SessionState};

use crate::charts;
use crate::components::header::build_header_lines;
use crate::components::share_bar::PlatformShareBar;
use crate::kpi_view;
use crate::table_view;
use crate::themes::Theme;

// ── Screen ────────────────────────────────────────────────────────────────────

/// Which screen the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// KPI strip plus the visual analysis charts.
    Charts,
    /// KPI strip plus the detailed records table.
    Records,
}

impl Screen {
    /// Parse a CLI `--view` value; unknown names fall back to the charts
    /// screen.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "records" | "table" => Screen::Records,
            _ => Screen::Charts,
        }
    }

    /// Display label shown in the header.
    fn label(self) -> &'static str {
        match self {
            Screen::Charts => "Gráficos",
            Screen::Records => "Registros",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Screen::Charts => Screen::Records,
            Screen::Records => Screen::Charts,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current screen.
    pub screen: Screen,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Scroll offset into the records table.
    pub scroll: usize,
    /// Explorer session owning the dataset, filters and view.
    pub session: ExplorerSession,
}

impl App {
    /// Construct the application with the given theme name and start screen.
    pub fn new(theme_name: &str, screen: Screen, session: ExplorerSession) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            screen,
            should_quit: false,
            scroll: 0,
            session,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// the loop keeps redrawing at a steady rate even without input.
    ///
    /// The loop exits on `q`, `Q`, or `Ctrl+C`.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input handling ────────────────────────────────────────────────────────

    /// Apply a single key event to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.screen = self.screen.toggled(),
            KeyCode::Char('1') => self.session.toggle_platform(Platform::GoogleAds),
            KeyCode::Char('2') => self.session.toggle_platform(Platform::FacebookAds),
            KeyCode::Char('3') => self.session.toggle_platform(Platform::LinkedinAds),
            KeyCode::Char('a') => self.session.select_all_platforms(),
            KeyCode::Char('x') => self.session.clear_platforms(),
            KeyCode::Char('[') => self.session.shift_start(-1),
            KeyCode::Char(']') => self.session.shift_start(1),
            KeyCode::Char('{') => self.session.shift_end(-1),
            KeyCode::Char('}') => self.session.shift_end(1),
            KeyCode::Char('r') => self.session.reset_filters(),
            KeyCode::Char('R') => self.session.refresh(true),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll += 1,
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll += 10,
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        self.clamp_scroll();
    }

    /// Keep the scroll offset within the working set, which may have just
    /// shrunk from a filter change.
    fn clamp_scroll(&mut self) {
        let len = self.session.view().map(|v| v.records.len()).unwrap_or(0);
        self.scroll = self.scroll.min(len.saturating_sub(1));
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let (Some(view), Some(filters)) = (self.session.view(), self.session.filters()) else {
            match self.session.state() {
                SessionState::Missing => {
                    table_view::render_missing_data(frame, area, self.session.path(), &self.theme);
                }
                _ => {
                    let message = self
                        .session
                        .last_error_message()
                        .unwrap_or_else(|| "erro desconhecido".to_string());
                    table_view::render_load_error(frame, area, &message, &self.theme);
                }
            }
            return;
        };

        let source = self
            .session
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.session.path().display().to_string());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Length(2), // filter bar
                Constraint::Length(3), // KPI strip
                Constraint::Min(0),    // screen body
            ])
            .split(area);

        let banner = build_header_lines(self.screen.label(), &source, &self.theme);
        frame.render_widget(Paragraph::new(Text::from(banner)), rows[0]);
        kpi_view::render_filter_bar(frame, rows[1], filters, &self.theme);
        kpi_view::render_kpi_row(frame, rows[2], &view.totals, &self.theme);

        match self.screen {
            Screen::Charts => self.render_charts(frame, rows[3], view),
            Screen::Records => table_view::render_records_table(
                frame,
                rows[3],
                &view.records,
                &view.totals,
                self.scroll,
                &self.theme,
            ),
        }
    }

    /// Charts screen: daily cost on top, platform share and efficiency
    /// scatter side by side below.
    fn render_charts(&self, frame: &mut Frame, area: Rect, view: &DashboardView) {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        charts::render_daily_cost_chart(frame, halves[0], &view.daily_cost, &self.theme);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(halves[1]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.separator)
            .title(" Custo Total por Plataforma (%) ");
        let inner = block.inner(bottom[0]);
        frame.render_widget(block, bottom[0]);
        let share = PlatformShareBar::new(&view.platform_cost, &self.theme);
        frame.render_widget(Paragraph::new(Text::from(share.to_lines())), inner);

        charts::render_efficiency_chart(frame, bottom[1], &view.efficiency, &self.theme);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
