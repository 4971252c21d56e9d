//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses. Success notices stay for two
//! seconds, errors for four. Renders in the bottom-right corner on top of
//! all other content.

use crate::pages::{Notice, NoticeKind};
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Widest a toast grows before wrapping
const MAX_WIDTH: u16 = 60;

pub struct Toast {
    pub message: String,
    pub kind: NoticeKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn from_notice(notice: Notice) -> Self {
        let duration = match notice.kind {
            NoticeKind::Success => Duration::from_secs(2),
            NoticeKind::Error => Duration::from_secs(4),
        };
        Self {
            message: notice.message,
            kind: notice.kind,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let (icon, color) = match self.kind {
            NoticeKind::Success => ("✓", theme.success),
            NoticeKind::Error => ("✗", theme.error),
        };
        let text = format!("{} {}", icon, self.message);

        // Padding (2 chars each side) and border
        let inner_max = MAX_WIDTH.min(area.width.saturating_sub(8)).max(1);
        let text_width = text.width() as u16;
        let width = text_width.min(inner_max) + 4;
        let lines = text_width.div_ceil(inner_max).max(1);
        let height = lines + 2;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.background));

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(paragraph, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outlive_successes() {
        let ok = Toast::from_notice(Notice::success("Updated"));
        let err = Toast::from_notice(Notice::error("Brand exists"));
        assert!(err.duration > ok.duration);
        assert!(!ok.is_expired());
    }
}
