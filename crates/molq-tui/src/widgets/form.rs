//! Search form widget — renders the selected mode's fields.
//!
//! # Editing
//!
//! - `↑` / `↓` move between fields.
//! - `Char(c)` / `Backspace` edit the selected text field at its cursor.
//! - `←` / `→` move the text cursor, cycle a choice, or adjust a slider.
//! - `Enter` submits the form (handled by the app shell, not here).
//!
//! All editing state lives in [`FormState`](crate::forms::FormState); this
//! widget only draws it.

use crate::forms::{FieldValue, FormState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Width of the slider track, in cells.
const SLIDER_CELLS: usize = 20;

pub struct Form<'a> {
    state: &'a FormState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Form<'a> {
    pub fn new(state: &'a FormState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area, if the selected field is a text input. Pass to
    /// `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let field = &self.state.fields[self.state.selected];
        if let FieldValue::Text { value, cursor } = &field.value {
            // Borders add one cell; each field occupies one row; the value
            // starts after "▸ {label}: ".
            let col = 2 + field.label.chars().count() + 2 + value[..*cursor].chars().count();
            let x = (area.x + 1 + col as u16).min(area.right().saturating_sub(1));
            let y = area.y + 1 + self.state.selected as u16;
            Some((x, y))
        } else {
            None
        }
    }
}

impl Widget for Form<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(self.state.mode.label())
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .state
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let selected = i == self.state.selected;
                let marker = if selected { "▸ " } else { "  " };
                let label_style = if selected && self.focused {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                let mut spans = vec![Span::styled(
                    format!("{marker}{}: ", field.label),
                    label_style,
                )];

                match &field.value {
                    FieldValue::Text { value, .. } => {
                        spans.push(Span::raw(value.clone()));
                    }
                    FieldValue::Choice { options, selected } => {
                        spans.push(Span::styled(
                            format!("‹ {} ›", options[*selected]),
                            Style::default().add_modifier(Modifier::BOLD),
                        ));
                    }
                    FieldValue::Slider { value, min, max } => {
                        // threshold:[=================---] 90
                        let span_range = (*max - *min) as usize;
                        let filled = ((*value - *min) as usize * SLIDER_CELLS)
                            / span_range.max(1);
                        spans.push(Span::raw(format!(
                            "[{}{}] {}",
                            "=".repeat(filled),
                            "-".repeat(SLIDER_CELLS - filled),
                            value
                        )));
                    }
                }

                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);

        // Submit hint on the bottom row of the pane
        let hint = " Enter:search ";
        if inner.height as usize > self.state.fields.len() {
            buf.set_string(
                inner.right().saturating_sub(hint.len() as u16),
                inner.bottom().saturating_sub(1),
                hint,
                Style::default().add_modifier(Modifier::DIM),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::Mode;

    #[test]
    fn cursor_position_only_for_text_fields() {
        let theme = Theme::load_default();
        let mut state = Mode::BySimilarity.form();
        let area = Rect::new(0, 0, 60, 10);

        let form = Form::new(&state, true, &theme);
        assert!(form.cursor_position(area).is_some());

        state.selected = 1; // threshold slider
        let form = Form::new(&state, true, &theme);
        assert!(form.cursor_position(area).is_none());
    }

    #[test]
    fn cursor_row_tracks_selected_field() {
        let theme = Theme::load_default();
        let mut state = Mode::ByMass.form();
        state.selected = 2; // "Value"
        let area = Rect::new(0, 0, 60, 10);
        let (_, y) = Form::new(&state, true, &theme).cursor_position(area).unwrap();
        assert_eq!(y, 3); // border row + field index
    }
}
