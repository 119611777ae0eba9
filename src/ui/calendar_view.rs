use crate::calc::dates::weekday_from_index;
use crate::calc::{
    build_window, derive_temporal_status, list_campaigns, summarize, CalendarWindow, DayCell,
    Granularity, ViewState,
};
use crate::data::{AppSettings, Campaign, CampaignStatus, CampaignStore};
use crate::ui::palette::{campaign_color, status_style};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

// Header bar background
const SECTION_BG: Color = Color::Rgb(40, 44, 52);

#[derive(PartialEq, Default, Debug, Clone, Copy)]
enum ViewMode {
    #[default]
    Calendar,
    List,
}

pub struct App<'a> {
    store: &'a CampaignStore,
    settings: AppSettings,
    view: ViewState,
    today: NaiveDate,
    mode: ViewMode,
    /// Selected row in the list view.
    list_cursor: usize,
}

impl<'a> App<'a> {
    pub fn new(store: &'a CampaignStore, settings: AppSettings, today: NaiveDate) -> Self {
        let view = ViewState::new(today, settings.default_view, settings.week_start);
        App {
            store,
            settings,
            view,
            today,
            mode: ViewMode::Calendar,
            list_cursor: 0,
        }
    }

    fn window(&self) -> CalendarWindow<'a> {
        build_window(self.store.campaigns(), &self.view, self.today)
    }

    fn listed(&self) -> Vec<&'a Campaign> {
        list_campaigns(self.store.campaigns(), &self.view.status_filter)
    }

    fn selected_campaign(&self) -> Option<&'a Campaign> {
        self.listed().get(self.list_cursor).copied()
    }

    /// Keeps the list cursor on a real row after the filter shrinks the list.
    fn clamp_cursor(&mut self) {
        let len = self.listed().len();
        if self.list_cursor >= len {
            self.list_cursor = len.saturating_sub(1);
        }
    }

    fn toggle_status(&mut self, status: CampaignStatus) {
        self.view.status_filter.toggle(status);
        tracing::debug!(filter = %self.view.status_filter.label(), "status filter changed");
        self.clamp_cursor();
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Left | KeyCode::Char('p') => self.view.previous(),
            KeyCode::Right | KeyCode::Char('n') => self.view.next(),
            KeyCode::Char('t') => self.view.go_to_today(self.today),
            KeyCode::Char('m') => self.view.set_granularity(Granularity::Month),
            KeyCode::Char('w') => self.view.set_granularity(Granularity::Week),
            KeyCode::Char('d') => self.view.set_granularity(Granularity::Day),
            KeyCode::Char(c @ '0'..='6') => {
                let index = c as u8 - b'0';
                if let Ok(weekday) = weekday_from_index(index) {
                    self.view.set_weekday_filter(Some(weekday));
                }
            }
            KeyCode::Char('x') => self.view.set_weekday_filter(None),
            KeyCode::Char('P') => self.toggle_status(CampaignStatus::Planned),
            KeyCode::Char('L') => self.toggle_status(CampaignStatus::Live),
            KeyCode::Char('C') => self.toggle_status(CampaignStatus::Completed),
            KeyCode::Char('A') => {
                self.view.status_filter.clear();
                self.clamp_cursor();
            }
            KeyCode::Char('l') => {
                self.mode = match self.mode {
                    ViewMode::Calendar => ViewMode::List,
                    ViewMode::List => ViewMode::Calendar,
                };
                self.clamp_cursor();
            }
            KeyCode::Up if self.mode == ViewMode::List => {
                self.list_cursor = self.list_cursor.saturating_sub(1);
            }
            KeyCode::Down if self.mode == ViewMode::List => {
                if self.list_cursor + 1 < self.listed().len() {
                    self.list_cursor += 1;
                }
            }
            _ => {}
        }
        false
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // range label, filters, counters
                Constraint::Min(10),   // calendar or list
                Constraint::Length(2), // key hints
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.mode {
            ViewMode::Calendar => {
                let window = self.window();
                match window.granularity {
                    Granularity::Month | Granularity::Week => {
                        self.render_grid(f, chunks[1], &window)
                    }
                    Granularity::Day => self.render_days(f, chunks[1], &window),
                }
            }
            ViewMode::List => self.render_list(f, chunks[1]),
        }
        self.render_help(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let counts = summarize(self.store.campaigns(), self.today);
        let mut counters: Vec<Span> = Vec::new();
        for status in CampaignStatus::SELECTABLE {
            let style = status_style(status);
            let marker = if self.view.status_filter.contains(status) {
                "●"
            } else {
                " "
            };
            counters.push(Span::styled(
                format!("{}{} {} {}  ", marker, style.glyph, style.label, counts.get(status)),
                Style::default().fg(style.color),
            ));
        }

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" ◀ {} ▶ ", self.view.range_label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  View: {:?}   Filter: {}",
                    self.view.granularity,
                    self.view.status_filter.label()
                )),
            ]),
            Line::from(counters),
        ];
        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .style(Style::default().bg(SECTION_BG)),
        );
        f.render_widget(p, area);
    }

    fn render_grid(&self, f: &mut Frame, area: Rect, window: &CalendarWindow) {
        let max = self.settings.max_per_cell;
        let header = Row::new(
            self.view
                .week_start
                .day_headers()
                .iter()
                .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
        );
        let row_height = grid_row_height(max);
        let rows: Vec<Row> = window
            .weeks()
            .map(|week| {
                Row::new(week.iter().map(|cell| Cell::from(cell_text(cell, max, self.today))))
                    .height(row_height)
            })
            .collect();

        let table = Table::new(rows, [Constraint::Ratio(1, 7); 7])
            .header(header)
            .column_spacing(1)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", window.label)),
            );
        f.render_widget(table, area);
    }

    /// Day granularity has room for every campaign plus its details.
    fn render_days(&self, f: &mut Frame, area: Rect, window: &CalendarWindow) {
        let mut lines: Vec<Line> = Vec::new();
        for cell in &window.cells {
            let mut title = cell.date.format("%A, %b %-d, %Y").to_string();
            if cell.is_today {
                title.push_str("  (today)");
            }
            lines.push(Line::from(Span::styled(
                title,
                day_number_style(cell.in_focus_month, cell.is_today, cell.is_past)
                    .add_modifier(Modifier::UNDERLINED),
            )));
            if cell.campaigns.is_empty() {
                lines.push(Line::from(Span::styled(
                    "  No campaigns",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for c in &cell.campaigns {
                lines.extend(campaign_detail_lines(c, self.today));
            }
            lines.push(Line::from(""));
        }
        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", window.label)),
        );
        f.render_widget(p, area);
    }

    fn render_list(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // campaign table
                Constraint::Length(6), // selected campaign details
            ])
            .split(area);

        let listed = self.listed();
        let header = Row::new(vec![
            Cell::from("Status").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Title").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Dates").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Description").style(Style::default().add_modifier(Modifier::BOLD)),
        ]);
        let rows: Vec<Row> = listed
            .iter()
            .map(|c| {
                let derived = derive_temporal_status(c, self.today);
                let style = status_style(derived);
                Row::new(vec![
                    Cell::from(format!("{} {}", style.glyph, style.label))
                        .style(Style::default().fg(style.color)),
                    Cell::from(c.title.clone())
                        .style(Style::default().fg(campaign_color(&c.color, derived))),
                    Cell::from(c.date_range_label()),
                    Cell::from(c.description.clone()),
                ])
            })
            .collect();

        let mut table_state = TableState::default();
        if !listed.is_empty() {
            table_state.select(Some(self.list_cursor));
        }

        let table = Table::new(
            rows,
            [
                Constraint::Length(13),
                Constraint::Length(22),
                Constraint::Length(24),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Campaigns "))
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(table, chunks[0], &mut table_state);

        let detail: Vec<Line> = match self.selected_campaign() {
            Some(c) => campaign_detail_lines(c, self.today),
            None => vec![Line::from(Span::styled(
                "No campaigns found with the selected filter",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        let p = Paragraph::new(detail).block(Block::default().borders(Borders::NONE));
        f.render_widget(p, chunks[1]);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let hints = match self.mode {
            ViewMode::Calendar => {
                "←/→=prev/next  t=today  m/w/d=month/week/day  0-6=weekday  x=clear weekday  \
                 P/L/C=toggle status  A=all  l=list  q=quit"
            }
            ViewMode::List => "↑↓=move  P/L/C=toggle status  A=all  l=calendar  q=quit",
        };
        let p = Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(p, area);
    }
}

/// Title, status and range lines for one campaign.
fn campaign_detail_lines(c: &Campaign, today: NaiveDate) -> Vec<Line<'static>> {
    let derived = derive_temporal_status(c, today);
    let style = status_style(derived);
    let mut status_text = style.label.to_string();
    if derived != c.status {
        status_text.push_str(&format!(" (stored: {})", c.status));
    }
    vec![
        Line::from(vec![
            Span::styled(
                format!("  {} {}", style.glyph, c.title),
                Style::default()
                    .fg(campaign_color(&c.color, derived))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", status_text), Style::default().fg(style.color)),
        ]),
        Line::from(format!("    {}", c.description)),
        Line::from(Span::styled(
            format!("    {}", c.date_range_label()),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]
}

/// Lines for one grid cell: the day number, at most `max` campaigns, then
/// "+N more" when some did not fit.
fn cell_text(cell: &DayCell, max: usize, today: NaiveDate) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(
        cell.date.format("%e").to_string(),
        day_number_style(cell.in_focus_month, cell.is_today, cell.is_past),
    ))];
    for c in cell.shown(max) {
        let derived = derive_temporal_status(c, today);
        let style = status_style(derived);
        lines.push(Line::from(Span::styled(
            format!("{} {}", style.glyph, c.title),
            Style::default().fg(campaign_color(&c.color, derived)),
        )));
    }
    let more = cell.overflow(max);
    if more > 0 {
        lines.push(Line::from(Span::styled(
            format!("+{} more", more),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    Text::from(lines)
}

/// Day number, capped campaigns and the overflow line, saturating at the
/// largest height a row can take.
fn grid_row_height(max_per_cell: usize) -> u16 {
    u16::try_from(max_per_cell.saturating_add(2)).unwrap_or(u16::MAX)
}

/// Style for a cell's day number.
pub(crate) fn day_number_style(in_focus_month: bool, is_today: bool, is_past: bool) -> Style {
    if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if !in_focus_month {
        Style::default().add_modifier(Modifier::DIM)
    } else if is_past {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}
