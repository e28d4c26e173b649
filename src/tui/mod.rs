//! Terminal User Interface
//!
//! Dashboard, overlays, and the analysis console rendered with ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use crate::data::{Alignment, CaseStatus, Classification};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the dashboard
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::Green,
            accent: Color::LightGreen,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            info: Color::Blue,
            border: Color::DarkGray,
            muted: Color::Gray,
        }
    }
}

/// Color for a classification marking
pub fn classification_color(classification: &Classification) -> Color {
    match classification {
        Classification::TopSecret => Color::Red,
        Classification::Classified => Color::Yellow,
        Classification::Confidential => Color::Blue,
    }
}

/// Color for a case status
pub fn status_color(status: &CaseStatus) -> Color {
    match status {
        CaseStatus::Active => Color::Green,
        CaseStatus::UnderReview => Color::Yellow,
        CaseStatus::Completed => Color::Blue,
    }
}

/// Color for an alignment verdict
pub fn alignment_color(alignment: &Alignment) -> Color {
    match alignment {
        Alignment::High => Color::Green,
        Alignment::Partial => Color::Yellow,
        Alignment::Low => Color::Red,
    }
}

/// Color for a 0-100 score value
pub fn score_color(score: f64) -> Color {
    if score >= 85.0 {
        Color::Green
    } else if score >= 70.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// Header title
pub const TITLE: &str = "RESEARCH INTELLIGENCE";

/// Header subtitle
pub const SUBTITLE: &str = "CASE FILE ANALYSIS SYSTEM";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  1-3    Open case file by position                            ║
║  Esc    Close overlay (innermost first) / leave fullscreen    ║
║  Space  Focus the console input                               ║
║  f      Toggle fullscreen console                             ║
║  ?      Toggle this help                                      ║
║  q      Quit                                                  ║
╠═══════════════════════════════════════════════════════════════╣
║                     CASE FILE MODAL                           ║
╠═══════════════════════════════════════════════════════════════╣
║  1-4    Switch tab (briefing/methodology/findings/review)     ║
║  v      View attached document                                ║
║  d      Download attached document                            ║
║  o      Open attached document externally                     ║
╠═══════════════════════════════════════════════════════════════╣
║                    DOCUMENT VIEWER                            ║
╠═══════════════════════════════════════════════════════════════╣
║  + / =  Zoom in         - Zoom out         0 Reset zoom       ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the dashboard layout (header / body / console / status bar)
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(12),    // Case list + side panels
            Constraint::Length(12), // Inline console
            Constraint::Length(3),  // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the body layout (case list + side column)
pub fn create_body_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(62), // Case files
            Constraint::Percentage(38), // Radar + system status
        ])
        .split(area)
        .to_vec()
}

/// Create the side column layout (alignment radar + system status)
pub fn create_side_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(9),    // Alignment radar
            Constraint::Length(8), // System status
        ])
        .split(area)
        .to_vec()
}

/// Centered overlay rect, as a percentage of the parent area
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
