//! Custom widgets for the dashboard

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::tui::score_color;

/// A labelled 0-100 bar, used for the aggregate alignment chart
pub struct ScoreBar {
    label: String,
    value: f64,
    label_width: u16,
}

impl ScoreBar {
    pub fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value: value.clamp(0.0, 100.0),
            label_width: 12,
        }
    }

    pub fn label_width(mut self, width: u16) -> Self {
        self.label_width = width;
        self
    }
}

impl Widget for ScoreBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Needs room for label, brackets, and the value readout.
        if area.width < self.label_width + 10 || area.height < 1 {
            return;
        }

        let color = score_color(self.value);

        let label = format!("{:<width$}", self.label, width = self.label_width as usize);
        buf.set_string(area.x, area.y, &label, Style::default().fg(color));

        let value_text = format!("{:>5.1}", self.value);
        let bar_x = area.x + self.label_width;
        let bar_width = area.width - self.label_width - value_text.len() as u16 - 3;
        let filled = ((self.value / 100.0) * bar_width as f64).round() as u16;

        buf.set_string(bar_x, area.y, "[", Style::default());
        for x in 0..bar_width {
            let (glyph, style) = if x < filled {
                ("█", Style::default().fg(color))
            } else {
                ("░", Style::default().fg(Color::DarkGray))
            };
            buf.set_string(bar_x + 1 + x, area.y, glyph, style);
        }
        buf.set_string(bar_x + 1 + bar_width, area.y, "]", Style::default());
        buf.set_string(
            bar_x + 2 + bar_width,
            area.y,
            &value_text,
            Style::default().fg(color),
        );
    }
}

/// Star rating row for methodology entries
pub struct StarRating {
    stars: u8,
}

impl StarRating {
    pub fn new(stars: u8) -> Self {
        Self { stars: stars.min(5) }
    }

    pub fn as_string(&self) -> String {
        let mut out = String::new();
        for i in 0..5 {
            out.push(if i < self.stars { '★' } else { '☆' });
        }
        out
    }
}

impl Widget for StarRating {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 5 || area.height < 1 {
            return;
        }
        buf.set_string(
            area.x,
            area.y,
            self.as_string(),
            Style::default().fg(Color::Green),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_rating_caps_at_five() {
        assert_eq!(StarRating::new(4).as_string(), "★★★★☆");
        assert_eq!(StarRating::new(9).as_string(), "★★★★★");
        assert_eq!(StarRating::new(0).as_string(), "☆☆☆☆☆");
    }
}
