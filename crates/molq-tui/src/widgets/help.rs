//! Help popup — centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct HelpPopup<'a> {
    _theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { _theme: theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(70, 19, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" molq — keybindings (? to close) ")
            .border_style(Style::default().add_modifier(Modifier::BOLD));

        let inner = block.inner(popup);
        block.render(popup, buf);

        const BINDINGS: &[(&str, &str)] = &[
            ("q  /  Ctrl+c", "Quit"),
            ("Tab", "Cycle focus: modes → form → results → structure"),
            ("/", "Focus the search form"),
            ("Escape", "Leave the form / close an overlay"),
            ("↑ k  /  ↓ j", "Select mode, field, or result line"),
            ("← h  /  → l", "Move cursor, cycle choice, adjust slider"),
            ("Enter", "Submit the focused form"),
            ("v", "View all stored similarity compounds"),
            ("PageUp  /  Ctrl+u", "Scroll results up"),
            ("PageDown / Ctrl+d", "Scroll results down"),
            ("G", "Jump to the newest result"),
            (":", "Command bar (quit, theme, ts, clear, tail, all)"),
            ("?", "Toggle this help popup"),
        ];

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<20}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

/// A rect of the given size, centred within `area` (clamped to fit).
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(70, 19, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
    }

    #[test]
    fn centered_rect_clamps_to_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect(70, 19, area);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 10);
    }
}
