//! Title bar widget — the 1-line strip at the top of the screen.

use crate::forms::Mode;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

/// Renders the application title, the active search mode, and right-aligned
/// keybinding hints.
pub struct TitleBar<'a> {
    mode: Mode,
    _theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(mode: Mode, theme: &'a Theme) -> Self {
        Self { mode, _theme: theme }
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_string(
            area.x,
            area.y,
            " molq — PubChem compound search ",
            Style::default().add_modifier(Modifier::BOLD),
        );

        let mode = format!("[{}]", self.mode.label());
        buf.set_string(
            area.x + 33,
            area.y,
            mode,
            Style::default().add_modifier(Modifier::DIM),
        );

        // Keybinding hints at the right edge
        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
