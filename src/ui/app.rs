use crate::calc::{CaseMode, DerivedView, FilterState, MAX_STARS, cycle_range};
use crate::data::{AppSettings, Catalog, ClimbStorage, ClimbStore, Peak};
use crate::ui::map_view::MapView;
use crate::ui::{ACCENT_COLOR, CLIMBED_COLOR, bold_fg, list_panel, stats_panel};
use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, TableState},
};
use std::io::Stdout;
use std::time::Duration as StdDuration;
use tracing::info;

const PAGE_SIZE: usize = 10;
const HEADER_BG: Color = Color::Rgb(6, 95, 70);
const FOOTER_BG: Color = Color::Rgb(15, 23, 42);

#[derive(Debug, PartialEq)]
enum Mode {
    Normal,
    Search,
}

/// Top-level coordinator: owns the filter, the store and the map, and keeps
/// the derived view current after every mutation.
pub struct App<'a, S: ClimbStorage> {
    catalog: &'a Catalog,
    store: ClimbStore<S>,
    filter: FilterState,
    case: CaseMode,
    view: DerivedView<'a>,
    map: MapView,
    mode: Mode,
    table_state: TableState,
}

impl<'a, S: ClimbStorage> App<'a, S> {
    pub fn new(catalog: &'a Catalog, store: ClimbStore<S>, settings: &AppSettings) -> Self {
        let filter = FilterState::default();
        let case = CaseMode::from_sensitive(settings.case_sensitive_search);
        let view = DerivedView::compute(catalog, store.state(), &filter, case);
        let mut map = MapView::new(settings.map.clone());
        map.mount();
        map.sync(catalog.peaks(), store.state());
        let mut app = App {
            catalog,
            store,
            filter,
            case,
            view,
            map,
            mode: Mode::Normal,
            table_state: TableState::default(),
        };
        app.reset_selection();
        app
    }

    /// Recomputes every derived output from the current inputs.
    fn refresh(&mut self) {
        self.view = DerivedView::compute(self.catalog, self.store.state(), &self.filter, self.case);
        let len = self.view.peaks.len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
        self.sync_popup();
    }

    fn on_filter_changed(&mut self) {
        self.refresh();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        let first = if self.view.peaks.is_empty() { None } else { Some(0) };
        self.table_state.select(first);
        self.sync_popup();
    }

    fn sync_popup(&mut self) {
        let id = self.selected_peak().map(|p| p.id.as_str());
        self.map.select(id);
    }

    pub fn selected_peak(&self) -> Option<&'a Peak> {
        self.table_state
            .selected()
            .and_then(|i| self.view.peaks.get(i).copied())
    }

    pub fn toggle_selected(&mut self) {
        let Some(peak) = self.selected_peak() else {
            return;
        };
        let climbed = self.store.toggle(&peak.id);
        info!(id = %peak.id, name = %peak.name, climbed, "climb status changed");
        self.refresh();
        self.map.sync(self.catalog.peaks(), self.store.state());
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.view.peaks.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.table_state.select(Some(next));
        self.sync_popup();
    }

    /// Tears down the map widget. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.map.unmount();
    }

    pub fn store(&self) -> &ClimbStore<S> {
        &self.store
    }

    pub fn view(&self) -> &DerivedView<'a> {
        &self.view
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }

        match self.mode {
            Mode::Search => {
                match code {
                    KeyCode::Char(c)
                        if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
                    {
                        self.filter.search.push(c);
                        self.on_filter_changed();
                    }
                    KeyCode::Backspace => {
                        if self.filter.search.pop().is_some() {
                            self.on_filter_changed();
                        }
                    }
                    KeyCode::Enter => self.mode = Mode::Normal,
                    KeyCode::Esc => {
                        self.filter.search.clear();
                        self.mode = Mode::Normal;
                        self.on_filter_changed();
                    }
                    _ => {}
                }
                false
            }

            Mode::Normal => {
                match code {
                    KeyCode::Char('q') => return true,
                    KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
                    KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
                    KeyCode::PageUp => self.move_selection(-(PAGE_SIZE as isize)),
                    KeyCode::PageDown => self.move_selection(PAGE_SIZE as isize),
                    KeyCode::Home | KeyCode::Char('g') => self.move_selection(isize::MIN / 2),
                    KeyCode::End | KeyCode::Char('G') => self.move_selection(isize::MAX / 2),
                    KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
                    KeyCode::Char('/') => self.mode = Mode::Search,
                    KeyCode::Char('r') => {
                        self.filter.range =
                            cycle_range(&self.view.ranges, &self.filter.range, true);
                        self.on_filter_changed();
                    }
                    KeyCode::Char('R') => {
                        self.filter.range =
                            cycle_range(&self.view.ranges, &self.filter.range, false);
                        self.on_filter_changed();
                    }
                    KeyCode::Esc => {
                        if self.filter.is_active() {
                            self.filter.clear();
                            self.on_filter_changed();
                        }
                    }
                    _ => {}
                }
                false
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(10),   // panels
                Constraint::Length(1), // footer
            ])
            .split(f.area());

        self.render_header(f, rows[0]);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(45),
                Constraint::Percentage(30),
            ])
            .split(rows[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(4), Constraint::Length(6)])
            .split(cols[0]);

        stats_panel::render(f, left[0], &self.view);
        list_panel::render_filters(
            f,
            left[1],
            &self.filter,
            self.mode == Mode::Search,
            self.case,
        );
        stats_panel::render_tip(f, left[2]);
        self.map.render(f, cols[1]);
        list_panel::render_list(
            f,
            cols[2],
            &self.view.peaks,
            self.store.state(),
            &mut self.table_state,
        );

        self.render_footer(f, rows[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" ▲ Taiwan 100 Peaks ", bold_fg(ACCENT_COLOR)),
            Span::raw("  "),
            Span::styled("Level: ", Style::default().fg(Color::Gray)),
            Span::styled(self.view.tier.label(), bold_fg(Color::White)),
            Span::styled(
                "   / search · r range · Esc clear · q quit",
                Style::default().fg(Color::Gray),
            ),
        ]);
        f.render_widget(Paragraph::new(line).style(Style::default().bg(HEADER_BG)), area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let stats = &self.view.stats;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Min(10),
                Constraint::Length(13),
            ])
            .split(area);

        let count = Line::from(vec![
            Span::styled(format!(" {}", stats.climbed), bold_fg(CLIMBED_COLOR)),
            Span::styled(format!(" / {}", stats.total), Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(count).style(Style::default().bg(FOOTER_BG)), cols[0]);

        match self.store.last_save_error() {
            Some(err) => {
                let warn = Paragraph::new(format!("not saved: {err}"))
                    .style(Style::default().fg(Color::Red).bg(FOOTER_BG));
                f.render_widget(warn, cols[1]);
            }
            None => {
                let ratio = if stats.total == 0 {
                    0.0
                } else {
                    stats.climbed as f64 / stats.total as f64
                };
                let gauge = Gauge::default()
                    .gauge_style(Style::default().fg(CLIMBED_COLOR).bg(FOOTER_BG))
                    .ratio(ratio.clamp(0.0, 1.0))
                    .label(format!("{}%", stats.percentage));
                f.render_widget(gauge, cols[1]);
            }
        }

        let stars: Vec<Span> = (0..MAX_STARS)
            .map(|i| {
                let color = if i < self.view.stars { ACCENT_COLOR } else { Color::DarkGray };
                Span::styled(" ★", Style::default().fg(color))
            })
            .collect();
        let stars = Paragraph::new(Line::from(stars)).style(Style::default().bg(FOOTER_BG));
        f.render_widget(stars, cols[2]);
    }
}

#[cfg(test)]
impl<S: ClimbStorage> App<'_, S> {
    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app<S: ClimbStorage>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    app.shutdown();
    Ok(())
}
