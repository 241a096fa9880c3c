#![allow(clippy::cast_precision_loss)]

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::{
    scene::{Cell, Palette, Rgb, parse_color},
    ui::theme::{ColorCapability, quantize},
};

/// Paints a computed scene grid into the terminal buffer.
///
/// Translucent cloud colors are composited over the sky gradient of their
/// row, since a terminal cell has no alpha.
pub struct SkyCanvas<'a> {
    pub grid: &'a [Vec<Cell>],
    pub palette: &'a Palette,
    pub capability: ColorCapability,
}

impl Widget for SkyCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let top = parse_color(&self.palette.sky_top);
        let bottom = parse_color(&self.palette.sky_bottom);
        let rows = self.grid.len();
        for (dy, row) in self.grid.iter().enumerate().take(usize::from(area.height)) {
            let sky = top.lerp(bottom, gradient_ratio(dy, rows));
            for (dx, cell) in row.iter().enumerate().take(usize::from(area.width)) {
                let (Ok(dx), Ok(dy)) = (u16::try_from(dx), u16::try_from(dy)) else {
                    continue;
                };
                paint_cell(buf, area.x + dx, area.y + dy, cell, sky, self.capability);
            }
        }
    }
}

fn gradient_ratio(row: usize, rows: usize) -> f64 {
    if rows <= 1 {
        0.0
    } else {
        row as f64 / (rows - 1) as f64
    }
}

fn paint_cell(buf: &mut Buffer, x: u16, y: u16, cell: &Cell, sky: Rgb, capability: ColorCapability) {
    let Some(target) = buf.cell_mut((x, y)) else {
        return;
    };
    target.set_char(cell.ch);
    if let Some(fg) = quantize(cell.color.resolve(sky), capability) {
        target.set_fg(fg);
    }
}
