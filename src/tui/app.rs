//! Main application state and rendering

use crate::analysis::{average_scores, registry_stats};
use crate::console::{Console, PROMPT_PATH};
use crate::data::{case_files, AlignmentScore, CaseFile};
use crate::tui::widgets::{ScoreBar, StarRating};
use crate::tui::{
    alignment_color, centered_rect, classification_color, create_body_layout, create_main_layout,
    create_side_layout, score_color, status_color, styled_block, Theme, HELP_TEXT, SUBTITLE, TITLE,
};
use crate::{AppError, Result};
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const POLL_TIMEOUT: Duration = Duration::from_millis(50);
const CLOCK_TICK: Duration = Duration::from_secs(1);
const GLITCH_INTERVAL: Duration = Duration::from_secs(8);
const GLITCH_PULSE: Duration = Duration::from_millis(200);

const ZOOM_MIN: u16 = 50;
const ZOOM_MAX: u16 = 200;
const ZOOM_STEP: u16 = 25;
const ZOOM_DEFAULT: u16 = 100;

/// Current screen being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Console,
}

/// Whether keys edit the console input or drive the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Input,
}

/// Tabs of the case file modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTab {
    Briefing,
    Methodology,
    Conclusions,
    Review,
}

impl ModalTab {
    pub const ALL: [ModalTab; 4] = [
        ModalTab::Briefing,
        ModalTab::Methodology,
        ModalTab::Conclusions,
        ModalTab::Review,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ModalTab::Briefing => "EXECUTIVE BRIEFING",
            ModalTab::Methodology => "METHODOLOGY ANALYSIS",
            ModalTab::Conclusions => "FINDINGS REPORT",
            ModalTab::Review => "PEER REVIEW",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ModalTab::Briefing => 0,
            ModalTab::Methodology => 1,
            ModalTab::Conclusions => 2,
            ModalTab::Review => 3,
        }
    }

    pub fn from_key(key: char) -> Option<ModalTab> {
        match key {
            '1' => Some(ModalTab::Briefing),
            '2' => Some(ModalTab::Methodology),
            '3' => Some(ModalTab::Conclusions),
            '4' => Some(ModalTab::Review),
            _ => None,
        }
    }
}

/// Load state of the document viewer. Always resolves to an explicit
/// outcome; there is no indefinite loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded(String),
    Failed(String),
}

/// Document viewer overlay state
#[derive(Debug)]
pub struct DocumentViewer {
    pub path: String,
    pub zoom: u16,
    pub state: LoadState,
}

impl DocumentViewer {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            zoom: ZOOM_DEFAULT,
            state: LoadState::Loading,
        }
    }

    /// Resolve the pending load into `Loaded` or `Failed`.
    pub fn load(&mut self) {
        self.state = match std::fs::read_to_string(&self.path) {
            Ok(text) => LoadState::Loaded(text),
            Err(err) => LoadState::Failed(err.to_string()),
        };
    }

    pub fn file_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.path.as_str())
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn zoom_reset(&mut self) {
        self.zoom = ZOOM_DEFAULT;
    }
}

/// Application state
pub struct App {
    pub cases: Vec<CaseFile>,
    pub console: Console,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub input_mode: InputMode,
    pub selected_case: Option<usize>,
    pub modal_tab: ModalTab,
    pub viewer: Option<DocumentViewer>,
    pub status_line: Option<String>,
    clock: DateTime<Local>,
    clock_next_at: Instant,
    glitch_next_at: Instant,
    glitch_until: Option<Instant>,
}

impl App {
    pub fn new() -> Self {
        Self::with_start(Instant::now())
    }

    fn with_start(now: Instant) -> Self {
        Self {
            cases: case_files(),
            console: Console::new(),
            theme: Theme::default(),
            running: true,
            show_help: false,
            input_mode: InputMode::Normal,
            selected_case: None,
            modal_tab: ModalTab::Briefing,
            viewer: None,
            status_line: None,
            clock: Local::now(),
            clock_next_at: now + CLOCK_TICK,
            glitch_next_at: now + GLITCH_INTERVAL,
            glitch_until: None,
        }
    }

    /// The active screen, derived from the console fullscreen flag
    pub fn screen(&self) -> Screen {
        if self.console.fullscreen() {
            Screen::Console
        } else {
            Screen::Dashboard
        }
    }

    pub fn glitch_active(&self) -> bool {
        self.glitch_until.is_some()
    }

    /// Poll for one keyboard event and route it
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code, Instant::now());
                }
            }
        }
        Ok(self.running)
    }

    /// Route one key press.
    ///
    /// Focused input swallows every printable key, so the global
    /// shortcuts (`f`, Space, digits, `q`) only fire in normal mode.
    /// Overlays are handled innermost first: viewer, then modal.
    pub fn handle_key(&mut self, code: KeyCode, now: Instant) {
        if self.input_mode == InputMode::Input {
            match code {
                KeyCode::Enter => self.console.submit_input(now),
                KeyCode::Esc => {
                    self.console.clear_input();
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Backspace => self.console.input_backspace(),
                KeyCode::Char(c) => self.console.input_push(c),
                _ => {}
            }
            return;
        }

        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if self.viewer.is_some() {
            match code {
                KeyCode::Esc => self.viewer = None,
                KeyCode::Char('+' | '=') => {
                    if let Some(viewer) = self.viewer.as_mut() {
                        viewer.zoom_in();
                    }
                }
                KeyCode::Char('-') => {
                    if let Some(viewer) = self.viewer.as_mut() {
                        viewer.zoom_out();
                    }
                }
                KeyCode::Char('0') => {
                    if let Some(viewer) = self.viewer.as_mut() {
                        viewer.zoom_reset();
                    }
                }
                KeyCode::Char('d') => self.download_document(),
                KeyCode::Char('o') => self.open_document_external(),
                _ => {}
            }
            return;
        }

        if self.selected_case.is_some() {
            match code {
                KeyCode::Esc => {
                    self.selected_case = None;
                    self.modal_tab = ModalTab::Briefing;
                }
                KeyCode::Char(c @ '1'..='4') => {
                    if let Some(tab) = ModalTab::from_key(c) {
                        self.modal_tab = tab;
                    }
                }
                KeyCode::Char('v') | KeyCode::Enter => self.open_document_inline(),
                KeyCode::Char('d') => self.download_document(),
                KeyCode::Char('o') => self.open_document_external(),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') if self.screen() == Screen::Dashboard => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc => {
                if self.screen() == Screen::Console {
                    self.console.toggle_fullscreen();
                }
            }
            KeyCode::Char(' ') => {
                // Focus is refused while a dispatch is pending.
                if !self.console.is_busy() {
                    self.input_mode = InputMode::Input;
                }
            }
            KeyCode::Char('f') => self.console.toggle_fullscreen(),
            KeyCode::Char(c @ '1'..='9') => {
                if self.screen() == Screen::Dashboard {
                    self.select_case_by_key(c);
                }
            }
            _ => {}
        }
    }

    /// Advance the page-root timers and the console dispatch machinery
    pub fn on_tick(&mut self, now: Instant) {
        if now >= self.clock_next_at {
            self.clock = Local::now();
            self.clock_next_at = now + CLOCK_TICK;
        }

        if self.glitch_until.is_some_and(|until| now >= until) {
            self.glitch_until = None;
        }
        if now >= self.glitch_next_at {
            self.glitch_until = Some(now + GLITCH_PULSE);
            self.glitch_next_at = now + GLITCH_INTERVAL;
        }

        self.console.tick(now);
    }

    fn select_case_by_key(&mut self, key: char) {
        let Some(digit) = key.to_digit(10) else {
            return;
        };
        let idx = digit as usize - 1;
        if idx < self.cases.len() {
            self.selected_case = Some(idx);
            self.modal_tab = ModalTab::Briefing;
            self.status_line = None;
        }
    }

    /// The document path the open overlay (or selected case) refers to
    fn active_document_path(&self) -> Option<String> {
        if let Some(viewer) = &self.viewer {
            return Some(viewer.path.clone());
        }
        self.selected_case
            .and_then(|idx| self.cases.get(idx))
            .and_then(|case| case.document_path.clone())
    }

    fn open_document_inline(&mut self) {
        let Some(path) = self.active_document_path() else {
            self.status_line = Some("No document attached to this case".to_string());
            return;
        };
        let mut viewer = DocumentViewer::new(&path);
        viewer.load();
        self.viewer = Some(viewer);
    }

    fn download_document(&mut self) {
        let Some(path) = self.active_document_path() else {
            self.status_line = Some("No document attached to this case".to_string());
            return;
        };
        self.status_line = Some(match download_copy(&path) {
            Ok(dest) => format!("Saved copy to {}", dest.display()),
            Err(err) => format!("Download failed: {err}"),
        });
    }

    fn open_document_external(&mut self) {
        let Some(path) = self.active_document_path() else {
            self.status_line = Some("No document attached to this case".to_string());
            return;
        };
        self.status_line = Some(match open_external(&path) {
            Ok(()) => format!("Opened {path} externally"),
            Err(err) => format!("Open failed: {err}"),
        });
    }

    /// Render the current frame
    pub fn render(&self, frame: &mut Frame) {
        match self.screen() {
            Screen::Dashboard => self.render_dashboard(frame),
            Screen::Console => self.render_console_pane(frame, frame.size(), true),
        }

        if let Some(idx) = self.selected_case {
            self.render_case_modal(frame, idx);
        }
        if self.viewer.is_some() {
            self.render_document_viewer(frame);
        }
        if self.show_help {
            self.render_help(frame);
        }
    }

    fn render_dashboard(&self, frame: &mut Frame) {
        let chunks = create_main_layout(frame.size());
        self.render_header(frame, chunks[0]);

        let body = create_body_layout(chunks[1]);
        self.render_case_list(frame, body[0]);

        let side = create_side_layout(body[1]);
        self.render_alignment_radar(frame, side[0]);
        self.render_system_status(frame, side[1]);

        self.render_console_pane(frame, chunks[2], false);
        self.render_status_bar(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        if self.glitch_active() {
            block = block.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(32)])
            .split(inner);

        let title = Line::from(vec![
            Span::styled(
                TITLE,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(SUBTITLE, Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(title), halves[0]);

        let clock = Line::from(vec![
            Span::styled("● SYSTEM ACTIVE", Style::default().fg(self.theme.success)),
            Span::raw("  "),
            Span::styled(
                self.clock.format("%H:%M:%S").to_string(),
                Style::default().fg(self.theme.fg),
            ),
        ]);
        frame.render_widget(Paragraph::new(clock).alignment(Alignment::Right), halves[1]);
    }

    fn render_case_list(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .cases
            .iter()
            .enumerate()
            .map(|(i, case)| {
                let header = Line::from(vec![
                    Span::styled(
                        case.id.clone(),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        case.classification.to_string(),
                        Style::default().fg(classification_color(&case.classification)),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("● {}", case.status),
                        Style::default().fg(status_color(&case.status)),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("{} ALIGNMENT: {}", case.alignment.symbol(), case.alignment),
                        Style::default().fg(alignment_color(&case.alignment)),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("[Press {}]", i + 1),
                        Style::default().fg(self.theme.muted),
                    ),
                ]);
                let title = Line::from(Span::styled(
                    format!("  {}", case.title),
                    Style::default().fg(self.theme.fg),
                ));
                let meta = Line::from(Span::styled(
                    format!("  Agent: {}   Last Access: {}", case.agent, case.last_accessed),
                    Style::default().fg(self.theme.muted),
                ));
                ListItem::new(vec![header, title, meta, Line::default()])
            })
            .collect();

        let list = List::new(items).block(styled_block(
            "COMPLETED CASE FILES :: CLEARANCE LEVEL ALPHA",
            &self.theme,
        ));
        frame.render_widget(list, area);
    }

    fn render_alignment_radar(&self, frame: &mut Frame, area: Rect) {
        let block = styled_block("ALIGNMENT RADAR", &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match average_scores(&self.cases) {
            Ok(agg) => {
                for (i, (label, value)) in agg.fields().iter().enumerate() {
                    let y = inner.y + i as u16;
                    if y >= inner.bottom() {
                        break;
                    }
                    let row = Rect::new(inner.x, y, inner.width, 1);
                    frame.render_widget(ScoreBar::new(label, *value), row);
                }

                let overall_y = inner.y + 6;
                if overall_y < inner.bottom() {
                    let row = Rect::new(inner.x, overall_y, inner.width, 1);
                    let line = Line::from(vec![
                        Span::styled(
                            "Average Alignment: ",
                            Style::default().fg(self.theme.muted),
                        ),
                        Span::styled(
                            format!("{:.1}%", agg.overall()),
                            Style::default()
                                .fg(score_color(agg.overall()))
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]);
                    frame.render_widget(Paragraph::new(line), row);
                }
            }
            Err(err) => {
                frame.render_widget(
                    Paragraph::new(format!("chart unavailable: {err}"))
                        .style(Style::default().fg(self.theme.alert)),
                    inner,
                );
            }
        }
    }

    fn render_system_status(&self, frame: &mut Frame, area: Rect) {
        let stats = registry_stats(&self.cases);
        let avg_text = match average_scores(&self.cases) {
            Ok(agg) => format!("{:.1}%", agg.overall()),
            Err(_) => "--".to_string(),
        };

        let kv = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(
                    format!("{:<17}", label),
                    Style::default().fg(self.theme.muted),
                ),
                Span::styled(
                    value,
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let lines = vec![
            kv("Total Cases:", stats.total.to_string()),
            kv("Completed:", stats.completed.to_string()),
            kv("High Alignment:", stats.high_alignment.to_string()),
            kv("Avg. Score:", avg_text),
            Line::from(vec![
                Span::styled(
                    format!("{:<17}", "Review Status:"),
                    Style::default().fg(self.theme.muted),
                ),
                Span::styled(
                    "ALL CLEAR",
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(styled_block("SYSTEM STATUS", &self.theme)),
            area,
        );
    }

    fn render_console_pane(&self, frame: &mut Frame, area: Rect, fullscreen: bool) {
        let title = if fullscreen {
            "RESEARCH TERMINAL :: F TO EXIT FULLSCREEN"
        } else {
            "ANALYSIS TERMINAL"
        };
        let block = styled_block(title, &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let mut lines: Vec<Line> = self
            .console
            .log()
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(self.theme.fg))))
            .collect();
        if let Some(echo) = self.console.in_flight() {
            lines.push(Line::from(Span::styled(
                echo.to_string(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::SLOW_BLINK),
            )));
        }
        let visible = chunks[0].height as usize;
        let skip = lines.len().saturating_sub(visible);
        let tail: Vec<Line> = lines.into_iter().skip(skip).collect();
        frame.render_widget(Paragraph::new(tail), chunks[0]);

        let mut spans = vec![Span::styled(
            format!("{PROMPT_PATH}$ "),
            Style::default().fg(self.theme.accent),
        )];
        if self.input_mode == InputMode::Input {
            spans.push(Span::styled(
                self.console.input().to_string(),
                Style::default().fg(self.theme.fg),
            ));
            spans.push(Span::styled(
                "█",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        } else if self.console.input().is_empty() {
            spans.push(Span::styled(
                "Press SPACE to enter a command...",
                Style::default().fg(self.theme.muted),
            ));
        } else {
            spans.push(Span::styled(
                self.console.input().to_string(),
                Style::default().fg(self.theme.muted),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = match &self.status_line {
            Some(status) => Line::from(Span::styled(
                status.clone(),
                Style::default().fg(self.theme.warning),
            )),
            None => Line::from(Span::styled(
                "1-3 open case  •  SPACE console  •  f fullscreen  •  ? help  •  q quit",
                Style::default().fg(self.theme.muted),
            )),
        };
        frame.render_widget(Paragraph::new(text), inner);
    }

    fn render_case_modal(&self, frame: &mut Frame, idx: usize) {
        let Some(case) = self.cases.get(idx) else {
            return;
        };
        let area = centered_rect(86, 86, frame.size());
        frame.render_widget(Clear, area);

        let block = styled_block(&format!("CASE FILE :: {}", case.id), &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        let header = vec![
            Line::from(vec![
                Span::styled(
                    case.classification.to_string(),
                    Style::default()
                        .fg(classification_color(&case.classification))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{} ALIGNMENT: {}", case.alignment.symbol(), case.alignment),
                    Style::default().fg(alignment_color(&case.alignment)),
                ),
                Span::raw("  "),
                Span::styled("[CASE CLOSED]", Style::default().fg(self.theme.success)),
            ]),
            Line::from(Span::styled(
                case.title.clone(),
                Style::default()
                    .fg(self.theme.fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Agent: {}   Last Access: {}", case.agent, case.last_accessed),
                Style::default().fg(self.theme.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let titles: Vec<String> = ModalTab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| format!("[{}] {}", i + 1, tab.title()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.modal_tab.index())
            .style(Style::default().fg(self.theme.muted))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[1]);

        let content = self.modal_tab_content(case);
        frame.render_widget(Paragraph::new(content).wrap(Wrap { trim: false }), chunks[2]);

        let footer = if case.document_path.is_some() {
            "ESC close  •  1-4 tabs  •  v view document  •  d download  •  o open external"
        } else {
            "ESC close  •  1-4 tabs  •  no attached document"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                footer,
                Style::default().fg(self.theme.muted),
            ))),
            chunks[3],
        );
    }

    fn modal_tab_content(&self, case: &CaseFile) -> Vec<Line<'static>> {
        let section = |title: &str| {
            Line::from(Span::styled(
                title.to_string(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
        };
        let body = |text: &str| {
            Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(self.theme.fg),
            ))
        };
        let badge = |text: &str| {
            Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(self.theme.success),
            ))
        };

        match self.modal_tab {
            ModalTab::Briefing => {
                let mut lines = vec![
                    section("RESEARCH FOCUS"),
                    body(&case.focus),
                    Line::default(),
                    section("RESEARCH GAPS STATUS"),
                    body(&case.gaps),
                    Line::default(),
                    section("ALIGNMENT METRICS"),
                ];
                for (label, value) in AlignmentScore::LABELS.iter().zip(case.score.as_array()) {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  {:<14}", format!("{label}:")),
                            Style::default().fg(self.theme.muted),
                        ),
                        Span::styled(
                            format!("{value}%"),
                            Style::default()
                                .fg(score_color(value as f64))
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]));
                }
                lines.push(Line::default());
                lines.push(section("CASE STATUS"));
                lines.push(body(&format!("  Status:          {}", case.status)));
                lines.push(body(&format!("  Classification:  {}", case.classification)));
                lines.push(badge("  Priority:        RESOLVED"));
                lines
            }

            ModalTab::Methodology => {
                let mut lines = vec![section("METHODOLOGY VALIDATION")];
                for method in &case.methodology {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  {} ", StarRating::new(4).as_string()),
                            Style::default().fg(self.theme.success),
                        ),
                        Span::styled(method.clone(), Style::default().fg(self.theme.fg)),
                    ]));
                }
                lines.push(Line::default());
                lines.push(section("QUALITY ASSURANCE"));
                lines.push(badge("  ✓ METHODOLOGY APPROVED"));
                lines.push(body("    All research methods validated through peer review"));
                lines.push(badge("  ✓ STATISTICAL VALIDATION"));
                lines.push(body("    Statistical significance achieved across all primary metrics"));
                lines.push(badge("  ✓ REPLICATION READY"));
                lines.push(body("    Methodology documented for independent replication"));
                lines
            }

            ModalTab::Conclusions => vec![
                Line::from(vec![
                    Span::styled(
                        "FINAL VERDICT  ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        "[HIGH CONFIDENCE]",
                        Style::default().fg(self.theme.success),
                    ),
                ]),
                body(&case.conclusions),
                Line::default(),
                badge("  ✓ VALIDATED        Research complete"),
                badge("  ✓ OBJECTIVES MET   All goals achieved"),
                badge("  ✓ PEER APPROVED    Review complete"),
            ],

            ModalTab::Review => vec![
                section("PEER REVIEW SUMMARY"),
                badge("  LEAD REVIEWER"),
                body("    \"Exceptional research quality. Methodology is robust and findings"),
                body("    are statistically significant. Recommend for publication"),
                body("    consideration. All AP Research standards exceeded.\""),
                Line::default(),
                badge("  METHODOLOGY EXPERT"),
                body("    \"Research design is exemplary. Statistical analysis appropriate"),
                body("    and thorough. Gap identification and addressing demonstrates"),
                body("    advanced research maturity.\""),
                Line::default(),
                badge("  ACADEMIC ADVISOR"),
                body("    \"Outstanding work that demonstrates mastery of research process."),
                body("    Clear contribution to field knowledge. Presentation and"),
                body("    documentation meet professional standards.\""),
                Line::default(),
                section("FINAL ASSESSMENT"),
                body("  Research Quality:        EXCEPTIONAL"),
                body("  AP Standards Alignment:  EXCEEDS EXPECTATIONS"),
                body("  Peer Review Status:      APPROVED"),
                badge("  Recommendation:          PUBLICATION READY"),
            ],
        }
    }

    fn render_document_viewer(&self, frame: &mut Frame) {
        let Some(viewer) = &self.viewer else {
            return;
        };
        let area = centered_rect(90, 90, frame.size());
        frame.render_widget(Clear, area);

        let block = styled_block(&format!("DOCUMENT :: {}", viewer.file_name()), &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(
                    "CLASSIFIED DOCUMENT • AUTHORIZED ACCESS ONLY • Zoom: {}%",
                    viewer.zoom
                ),
                Style::default().fg(self.theme.muted),
            ))),
            chunks[0],
        );

        match &viewer.state {
            LoadState::Loading => {
                frame.render_widget(
                    Paragraph::new("Loading document...")
                        .style(Style::default().fg(self.theme.muted)),
                    chunks[1],
                );
            }
            LoadState::Loaded(text) => {
                // Zoom narrows the text column; fewer columns read larger.
                let max = chunks[1].width as u32;
                let width = ((max * 100) / viewer.zoom as u32).min(max).max(1) as u16;
                let column = Rect::new(chunks[1].x, chunks[1].y, width, chunks[1].height);
                frame.render_widget(
                    Paragraph::new(text.clone())
                        .wrap(Wrap { trim: false })
                        .style(Style::default().fg(self.theme.fg)),
                    column,
                );
            }
            LoadState::Failed(reason) => {
                let lines = vec![
                    Line::from(Span::styled(
                        "■ DOCUMENT LOAD FAILED",
                        Style::default()
                            .fg(self.theme.alert)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        reason.clone(),
                        Style::default().fg(self.theme.fg),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        "The source could not be read. Press o to open it externally, or ESC to close.",
                        Style::default().fg(self.theme.muted),
                    )),
                ];
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[1]);
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "ESC to close  •  +/- to zoom  •  0 to reset",
                Style::default().fg(self.theme.muted),
            ))),
            chunks[2],
        );
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(64, 80, frame.size());
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(HELP_TEXT)
                .style(Style::default().fg(self.theme.fg))
                .alignment(Alignment::Center),
            area,
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn download_copy(path: &str) -> Result<PathBuf> {
    let name = Path::new(path)
        .file_name()
        .ok_or_else(|| AppError::DocumentUnavailable(path.to_string()))?;
    let dest = std::env::current_dir()?.join(name);
    std::fs::copy(path, &dest)?;
    Ok(dest)
}

fn open_external(path: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    const OPENER: &str = "open";
    #[cfg(not(target_os = "macos"))]
    const OPENER: &str = "xdg-open";

    std::process::Command::new(OPENER).arg(path).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> (App, Instant) {
        let t0 = Instant::now();
        (App::with_start(t0), t0)
    }

    #[test]
    fn digit_opens_case_modal_on_briefing_tab() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char('2'), t0);
        assert_eq!(app.selected_case, Some(1));
        assert_eq!(app.modal_tab, ModalTab::Briefing);
    }

    #[test]
    fn digit_out_of_range_selects_nothing() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char('9'), t0);
        assert_eq!(app.selected_case, None);
    }

    #[test]
    fn digits_switch_tabs_while_modal_open() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char('1'), t0);
        app.handle_key(KeyCode::Char('2'), t0);
        assert_eq!(app.selected_case, Some(0), "selection unchanged");
        assert_eq!(app.modal_tab, ModalTab::Methodology);
        app.handle_key(KeyCode::Char('4'), t0);
        assert_eq!(app.modal_tab, ModalTab::Review);
    }

    #[test]
    fn esc_closes_innermost_overlay_first() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char('1'), t0);
        app.handle_key(KeyCode::Char('v'), t0);
        assert!(app.viewer.is_some());
        assert!(app.selected_case.is_some());

        app.handle_key(KeyCode::Esc, t0);
        assert!(app.viewer.is_none(), "viewer closes first");
        assert!(app.selected_case.is_some(), "modal stays open");

        app.handle_key(KeyCode::Esc, t0);
        assert!(app.selected_case.is_none());
    }

    #[test]
    fn zoom_clamps_and_resets() {
        let mut viewer = DocumentViewer::new("missing.txt");
        assert_eq!(viewer.zoom, 100);

        for _ in 0..10 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.zoom, 200);

        for _ in 0..10 {
            viewer.zoom_out();
        }
        assert_eq!(viewer.zoom, 50);

        viewer.zoom_in();
        assert_eq!(viewer.zoom, 75);
        viewer.zoom_reset();
        assert_eq!(viewer.zoom, 100);
    }

    #[test]
    fn zoom_keys_route_to_open_viewer() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char('1'), t0);
        app.handle_key(KeyCode::Char('v'), t0);

        app.handle_key(KeyCode::Char('+'), t0);
        assert_eq!(app.viewer.as_ref().map(|v| v.zoom), Some(125));
        app.handle_key(KeyCode::Char('-'), t0);
        app.handle_key(KeyCode::Char('-'), t0);
        assert_eq!(app.viewer.as_ref().map(|v| v.zoom), Some(75));
        app.handle_key(KeyCode::Char('0'), t0);
        assert_eq!(app.viewer.as_ref().map(|v| v.zoom), Some(100));
    }

    #[test]
    fn viewer_load_fails_visibly_for_missing_file() {
        let mut viewer = DocumentViewer::new("no/such/file.txt");
        assert_eq!(viewer.state, LoadState::Loading);
        viewer.load();
        assert!(matches!(viewer.state, LoadState::Failed(_)));
    }

    #[test]
    fn fullscreen_toggle_scoped_to_unfocused_input() {
        let (mut app, t0) = app();

        app.handle_key(KeyCode::Char(' '), t0);
        assert_eq!(app.input_mode, InputMode::Input);

        app.handle_key(KeyCode::Char('f'), t0);
        assert_eq!(app.screen(), Screen::Dashboard, "typing f must not toggle");
        assert_eq!(app.console.input(), "f");

        app.handle_key(KeyCode::Esc, t0);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.console.input(), "");

        app.handle_key(KeyCode::Char('f'), t0);
        assert_eq!(app.screen(), Screen::Console);
        app.handle_key(KeyCode::Char('f'), t0);
        assert_eq!(app.screen(), Screen::Dashboard);
    }

    #[test]
    fn space_focus_refused_while_dispatch_pending() {
        let (mut app, t0) = app();
        app.console.submit("help", t0);
        assert!(app.console.is_busy());

        app.handle_key(KeyCode::Char(' '), t0);
        assert_eq!(app.input_mode, InputMode::Normal);

        app.on_tick(t0 + Duration::from_millis(300));
        assert!(!app.console.is_busy());
        app.handle_key(KeyCode::Char(' '), t0);
        assert_eq!(app.input_mode, InputMode::Input);
    }

    #[test]
    fn case_selection_inactive_while_input_focused() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char(' '), t0);
        app.handle_key(KeyCode::Char('1'), t0);
        assert_eq!(app.selected_case, None);
        assert_eq!(app.console.input(), "1");
    }

    #[test]
    fn typed_input_submits_through_console() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char(' '), t0);
        for c in "status".chars() {
            app.handle_key(KeyCode::Char(c), t0);
        }
        app.handle_key(KeyCode::Enter, t0);
        assert!(app.console.is_busy());

        app.on_tick(t0 + Duration::from_millis(300));
        assert!(app
            .console
            .log()
            .iter()
            .any(|l| l == "~/research-intel$ status"));
    }

    #[test]
    fn quit_only_from_dashboard() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char('f'), t0);
        app.handle_key(KeyCode::Char('q'), t0);
        assert!(app.running, "q is inert in fullscreen console");

        app.handle_key(KeyCode::Esc, t0);
        assert_eq!(app.screen(), Screen::Dashboard);
        app.handle_key(KeyCode::Char('q'), t0);
        assert!(!app.running);
    }

    #[test]
    fn glitch_pulse_sets_then_clears() {
        let (mut app, t0) = app();
        assert!(!app.glitch_active());

        app.on_tick(t0 + Duration::from_secs(8));
        assert!(app.glitch_active());

        app.on_tick(t0 + Duration::from_secs(8) + Duration::from_millis(200));
        assert!(!app.glitch_active());

        app.on_tick(t0 + Duration::from_secs(16));
        assert!(app.glitch_active());
    }

    #[test]
    fn help_overlay_swallows_keys_until_dismissed() {
        let (mut app, t0) = app();
        app.handle_key(KeyCode::Char('?'), t0);
        assert!(app.show_help);

        app.handle_key(KeyCode::Char('1'), t0);
        assert_eq!(app.selected_case, None);

        app.handle_key(KeyCode::Esc, t0);
        assert!(!app.show_help);
    }

    #[test]
    fn document_ops_without_attachment_report_status() {
        let (mut app, t0) = app();
        // CASE-002 carries no document.
        app.handle_key(KeyCode::Char('2'), t0);
        app.handle_key(KeyCode::Char('v'), t0);
        assert!(app.viewer.is_none());
        assert_eq!(
            app.status_line.as_deref(),
            Some("No document attached to this case")
        );
    }
}
