//! Search-method sidebar — the list of search modes on the left.
//!
//! `↑`/`↓` (or `k`/`j`) move the selection; the selected mode decides which
//! form is shown and which endpoint a submit targets.

use crate::event::{AppEvent, Direction};
use crate::forms::Mode;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ModeListState {
    /// Index into [`Mode::ALL`].
    pub selected: usize,
}

impl ModeListState {
    /// The currently selected search mode.
    pub fn mode(&self) -> Mode {
        Mode::ALL[self.selected]
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.selected = self.selected.saturating_sub(1);
                tracing::debug!(mode = self.mode().label(), "mode selected");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.selected + 1 < Mode::ALL.len() {
                    self.selected += 1;
                }
                tracing::debug!(mode = self.mode().label(), "mode selected");
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ModeList<'a> {
    state: &'a ModeListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ModeList<'a> {
    pub fn new(state: &'a ModeListState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

impl Widget for ModeList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Search Methods")
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = Mode::ALL
            .iter()
            .enumerate()
            .map(|(i, mode)| {
                let marker = if i == self.state.selected { "▸ " } else { "  " };
                let mut line = Line::from(format!("{marker}{}", mode.label()));
                if i == self.state.selected {
                    let style = if self.focused {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    line = line.patch_style(style);
                }
                line
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_mode() {
        let state = ModeListState::default();
        assert_eq!(state.mode(), Mode::ByCid);
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut state = ModeListState::default();
        state.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(state.selected, 0);
        for _ in 0..20 {
            state.handle(&AppEvent::Nav(Direction::Down));
        }
        assert_eq!(state.selected, Mode::ALL.len() - 1);
        assert_eq!(state.mode(), Mode::FullRecords);
    }
}
