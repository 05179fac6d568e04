//! Results pane — the scrollable notice log on the right.
//!
//! Every user action appends one or more timestamped notices here: found-CID
//! lists, pretty-printed JSON records, per-CID image failures, download
//! confirmations. The pane is the TUI rendition of the original interface's
//! sequential output area.
//!
//! # Scroll semantics
//!
//! `scroll_offset` = number of notices hidden at the bottom (0 = tail).
//! `cursor` = absolute index into `notices` (0 = oldest). The cursor is
//! always kept within the visible window; moving it past the edge
//! auto-scrolls.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// Severity of a notice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warn,
    Error,
    /// Continuation lines, e.g. pretty-printed JSON body text.
    Detail,
}

/// One timestamped line in the results pane.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub ts: chrono::DateTime<chrono::Utc>,
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Notice {
            ts: chrono::Utc::now(),
            kind,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ResultsState {
    pub notices: Vec<Notice>,
    /// Number of notices hidden at the bottom (0 = tail).
    pub scroll_offset: usize,
    /// Absolute index into `notices` of the highlighted line.
    pub cursor: usize,
    /// Whether timestamps are shown on each line.
    pub show_timestamps: bool,
    /// strftime format for the timestamp column.
    pub timestamp_format: String,
    /// Cached from the last render so `handle()` can do cursor-aware scrolling.
    last_height: Cell<usize>,
}

impl ResultsState {
    pub fn new(show_timestamps: bool, timestamp_format: String) -> Self {
        Self {
            notices: Vec::new(),
            scroll_offset: 0,
            cursor: 0,
            show_timestamps,
            timestamp_format,
            last_height: Cell::new(40),
        }
    }

    /// Append a notice and snap the view to the tail so the outcome of the
    /// action just performed is always visible.
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notices.push(Notice::new(kind, text));
        self.scroll_offset = 0;
        self.cursor = self.notices.len() - 1;
    }

    /// Append a multi-line body (a pretty-printed JSON record) as detail
    /// lines.
    pub fn push_body(&mut self, body: &str) {
        for line in body.lines() {
            self.notices.push(Notice::new(NoticeKind::Detail, line));
        }
        if !self.notices.is_empty() {
            self.scroll_offset = 0;
            self.cursor = self.notices.len() - 1;
        }
    }

    pub fn clear(&mut self) {
        self.notices.clear();
        self.scroll_offset = 0;
        self.cursor = 0;
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Returns `(start, end)` — the exclusive range of notices currently visible.
    fn visible_range(&self) -> (usize, usize) {
        let total = self.notices.len();
        let end = total.saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(self.height());
        (start, end)
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.notices.len();
        if total == 0 {
            return;
        }

        match event {
            // ── Line-by-line cursor movement ───────────────────────────────
            AppEvent::Nav(Direction::Up) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                let (start, _) = self.visible_range();
                if self.cursor < start {
                    self.scroll_offset = total.saturating_sub(self.cursor + self.height());
                }
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
                let (_, end) = self.visible_range();
                if self.cursor >= end {
                    self.scroll_offset = self.scroll_offset.saturating_sub(1);
                }
            }

            // ── Page scrolling ─────────────────────────────────────────────
            AppEvent::ScrollUp => {
                self.scroll_offset = (self.scroll_offset + PAGE_STEP).min(total);
                let (_, end) = self.visible_range();
                self.cursor = end.saturating_sub(1);
            }
            AppEvent::ScrollDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_STEP);
                let (_, end) = self.visible_range();
                self.cursor = end.saturating_sub(1);
            }

            // ── Jump to tail ───────────────────────────────────────────────
            AppEvent::ScrollToTail => {
                self.scroll_offset = 0;
                self.cursor = total.saturating_sub(1);
            }

            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Results<'a> {
    state: &'a ResultsState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Results<'a> {
    pub fn new(state: &'a ResultsState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

impl Widget for Results<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Results").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        // Cache for handle() — safe because draw always runs before handle()
        self.state.last_height.set(height);

        let total = self.state.notices.len();
        let end = total.saturating_sub(self.state.scroll_offset);
        let start = end.saturating_sub(height);

        let cursor_row: Option<usize> =
            if self.focused && self.state.cursor >= start && self.state.cursor < end {
                Some(self.state.cursor - start)
            } else {
                None
            };

        let lines: Vec<Line<'static>> = self.state.notices[start..end]
            .iter()
            .enumerate()
            .map(|(row, notice)| {
                let mut line = render_notice(
                    notice,
                    self.state.show_timestamps,
                    &self.state.timestamp_format,
                    self.theme,
                );
                if Some(row) == cursor_row {
                    line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
                }
                line
            })
            .collect();

        // Split inner into text (fill) + 1-column scrollbar strip so the
        // track height matches the visible content rows exactly.
        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        if total > 0 {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Notice rendering
// ---------------------------------------------------------------------------

fn render_notice(notice: &Notice, show_ts: bool, ts_format: &str, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    if show_ts {
        // Detail lines skip the timestamp column so JSON bodies line up.
        if notice.kind == NoticeKind::Detail {
            spans.push(Span::raw(" ".repeat(ts_len(ts_format) + 1)));
        } else {
            spans.push(Span::styled(
                format!("{} ", notice.ts.format(ts_format)),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
    }

    spans.push(Span::styled(
        notice.text.clone(),
        theme.notice_style(notice.kind),
    ));

    Line::from(spans)
}

fn ts_len(ts_format: &str) -> usize {
    chrono::Utc::now().format(ts_format).to_string().len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
