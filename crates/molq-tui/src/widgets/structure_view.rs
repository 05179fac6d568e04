//! Structure pane — renders fetched 2D structure bitmaps in the terminal.
//!
//! Each terminal cell shows two vertically stacked pixels via the `▀`
//! half-block glyph: the glyph's foreground carries the top pixel, the cell
//! background the bottom one. The 600×600 source bitmap is nearest-neighbour
//! sampled onto the largest square grid that fits the pane.
//!
//! `←` / `→` (or `h` / `l`) cycle through the gallery when the pane is
//! focused.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use molq_core::Cid;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct GalleryState {
    /// Fetched structures in display order.
    pub items: Vec<(Cid, image::RgbaImage)>,
    /// Index of the structure currently shown.
    pub selected: usize,
}

impl GalleryState {
    /// Drop all images; the start of a new search or view-all batch.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = 0;
    }

    pub fn push(&mut self, cid: Cid, img: image::RgbaImage) {
        self.items.push((cid, img));
        // Show the newest structure as it arrives
        self.selected = self.items.len() - 1;
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if self.items.is_empty() {
            return;
        }
        match event {
            AppEvent::Nav(Direction::Left) => {
                self.selected = (self.selected + self.items.len() - 1) % self.items.len();
            }
            AppEvent::Nav(Direction::Right) => {
                self.selected = (self.selected + 1) % self.items.len();
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct StructureView<'a> {
    state: &'a GalleryState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> StructureView<'a> {
    pub fn new(state: &'a GalleryState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

impl Widget for StructureView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = match self.state.items.get(self.state.selected) {
            Some((cid, _)) => format!(
                "Structure — CID {} ({}/{})",
                cid,
                self.state.selected + 1,
                self.state.items.len()
            ),
            None => "Structure".to_string(),
        };

        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some((cid, img)) = self.state.items.get(self.state.selected) else {
            buf.set_string(
                inner.x + 1,
                inner.y + 1,
                "no structure loaded",
                Style::default().add_modifier(Modifier::DIM),
            );
            return;
        };

        // Largest square grid that fits: cells are roughly twice as tall as
        // wide, and each cell carries two pixel rows.
        let grid_w = (inner.width as usize).min(inner.height as usize * 2);
        let grid_h = grid_w / 2;
        if grid_w == 0 || grid_h == 0 {
            return;
        }

        let (src_w, src_h) = img.dimensions();
        let x0 = inner.x + (inner.width - grid_w as u16) / 2;
        let y0 = inner.y + (inner.height - grid_h as u16) / 2;

        for cy in 0..grid_h {
            for cx in 0..grid_w {
                let px = (cx as u32 * src_w) / grid_w as u32;
                let py_top = (cy as u32 * 2 * src_h) / (grid_h as u32 * 2);
                let py_bot = ((cy as u32 * 2 + 1) * src_h) / (grid_h as u32 * 2);

                let top = img.get_pixel(px.min(src_w - 1), py_top.min(src_h - 1));
                let bot = img.get_pixel(px.min(src_w - 1), py_bot.min(src_h - 1));

                let style = Style::default()
                    .fg(Color::Rgb(top[0], top[1], top[2]))
                    .bg(Color::Rgb(bot[0], bot[1], bot[2]));
                buf.set_string(x0 + cx as u16, y0 + cy as u16, "▀", style);
            }
        }

        // Caption under the bitmap, coloured stably per compound
        let caption = format!("CID {cid}");
        if (y0 + grid_h as u16) < inner.bottom() {
            let cap_x = inner.x + (inner.width.saturating_sub(caption.len() as u16)) / 2;
            buf.set_string(
                cap_x,
                y0 + grid_h as u16,
                caption,
                self.theme.caption_style(cid.as_str()),
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

    fn img() -> image::RgbaImage {
        image::RgbaImage::from_pixel(600, 600, image::Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn push_shows_the_newest_structure() {
        let mut g = GalleryState::default();
        g.push(Cid::from("1"), img());
        g.push(Cid::from("2"), img());
        assert_eq!(g.selected, 1);
    }

    #[test]
    fn navigation_wraps_in_both_directions() {
        let mut g = GalleryState::default();
        for cid in ["1", "2", "3"] {
            g.push(Cid::from(cid), img());
        }
        assert_eq!(g.selected, 2);
        g.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(g.selected, 0);
        g.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(g.selected, 2);
    }

    #[test]
    fn clear_resets_selection() {
        let mut g = GalleryState::default();
        g.push(Cid::from("1"), img());
        g.clear();
        assert!(g.items.is_empty());
        assert_eq!(g.selected, 0);
    }

    #[test]
    fn events_on_empty_gallery_are_ignored() {
        let mut g = GalleryState::default();
        g.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(g.selected, 0);
    }
}
