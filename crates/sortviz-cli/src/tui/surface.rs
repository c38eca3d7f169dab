//! Paint core bar frames into a ratatui buffer.
//!
//! Logical coordinates are scaled onto the widget area. Horizontally a bar
//! takes every column whose centre it covers (at least one). Vertically the
//! resolution is one eighth of a cell, using the lower block glyphs for the
//! partially covered top cell.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use sortviz_core::{Rgb, Surface, SurfaceDimensions};

const LOWER_EIGHTHS: [&str; 7] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇"];

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    logical: SurfaceDimensions,
}

impl<'a> BufferSurface<'a> {
    /// `None` when `area` has no cells to draw on.
    pub fn new(buf: &'a mut Buffer, area: Rect, logical: SurfaceDimensions) -> Option<Self> {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return None;
        }
        Some(Self { buf, area, logical })
    }

    fn columns_per_unit(&self) -> f64 {
        f64::from(self.area.width) / self.logical.width.max(1.0)
    }

    fn eighths_per_unit(&self) -> f64 {
        f64::from(self.area.height) * 8.0 / self.logical.height.max(1.0)
    }

    /// Column range (relative to the area) covered by `[x, x + width)`.
    fn column_span(&self, x: f64, width: f64) -> Option<(u16, u16)> {
        let scale = self.columns_per_unit();
        let cols = f64::from(self.area.width);
        let first = ((x * scale) - 0.5).ceil().max(0.0);
        let end = (((x + width) * scale) - 0.5).ceil().min(cols);
        if end > first {
            return Some((first as u16, end as u16));
        }
        // Narrower than a column: take the one under its centre.
        let centre = ((x + width / 2.0) * scale).floor();
        (centre >= 0.0 && centre < cols).then(|| (centre as u16, centre as u16 + 1))
    }
}

impl Surface for BufferSurface<'_> {
    fn dimensions(&self) -> SurfaceDimensions {
        self.logical
    }

    fn clear(&mut self) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let Some((first_col, end_col)) = self.column_span(x, width) else {
            return;
        };

        let scale = self.eighths_per_unit();
        let total = i64::from(self.area.height) * 8;
        let top = ((y * scale).round() as i64).clamp(0, total);
        let bottom = (((y + height) * scale).round() as i64).clamp(0, total);
        if bottom <= top {
            return;
        }

        let color = to_color(color);
        for row in 0..self.area.height {
            let cell_top = i64::from(row) * 8;
            let covered = (bottom.min(cell_top + 8) - top.max(cell_top)).max(0);
            if covered == 0 {
                continue;
            }
            // Partial cells are only drawn when the rect reaches the cell's
            // bottom edge, which is always the case for bars.
            let symbol = if covered >= 8 {
                None
            } else if bottom >= cell_top + 8 {
                Some(LOWER_EIGHTHS[covered as usize - 1])
            } else {
                continue;
            };

            for col in first_col..end_col {
                let pos = (self.area.x + col, self.area.y + row);
                if let Some(cell) = self.buf.cell_mut(pos) {
                    match symbol {
                        None => {
                            cell.set_symbol(" ").set_bg(color).set_fg(color);
                        }
                        Some(glyph) => {
                            cell.set_symbol(glyph).set_fg(color);
                        }
                    }
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgb) {
        let col = (x * self.columns_per_unit()).floor().max(0.0) as u16;
        let row = ((y * self.eighths_per_unit()) / 8.0).floor().max(0.0) as u16;
        if col >= self.area.width || row >= self.area.height {
            return;
        }
        let max_width = usize::from(self.area.width - col);
        self.buf.set_stringn(
            self.area.x + col,
            self.area.y + row,
            text,
            max_width,
            Style::default().fg(to_color(color)),
        );
    }
}
