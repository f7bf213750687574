//! Image rendering with upper-half-block characters.
//!
//! Each terminal cell shows two vertically stacked pixels: the top one as the
//! `▀` foreground colour, the bottom one as the background.

use image::imageops::FilterType;
use ratatui::{buffer::Buffer, layout::Position, layout::Rect, style::Color};

/// Draw `thumb` scaled to fit `area` (aspect preserved, never upscaled),
/// centred horizontally.
pub fn render_halfblocks(thumb: &image::RgbaImage, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 || thumb.width() == 0 || thumb.height() == 0 {
        return;
    }

    // Available pixel budget: each column = 1 px wide, each row = 2 px tall.
    let max_px_w = f64::from(area.width);
    let max_px_h = f64::from(area.height) * 2.0;

    let src_w = f64::from(thumb.width());
    let src_h = f64::from(thumb.height());

    let scale = (max_px_w / src_w).min(max_px_h / src_h).min(1.0);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    // Thumbnails usually arrive at exactly the card size; skip the resample.
    let resized;
    let rgba = if (fit_w, fit_h) == thumb.dimensions() {
        thumb
    } else {
        resized = image::imageops::resize(thumb, fit_w, fit_h, FilterType::Triangle);
        &resized
    };
    let (iw, ih) = rgba.dimensions();

    let col_offset = area.width.saturating_sub(iw as u16) / 2;
    // Bottom-align short images so labels sit right under them.
    let used_rows = ih.div_ceil(2) as u16;
    let row_offset = area.height.saturating_sub(used_rows);

    for row in 0..area.height.min(used_rows) {
        let yt = u32::from(row) * 2;
        let yb = yt + 1;
        for col in 0..iw.min(u32::from(area.width)) {
            let t = rgba.get_pixel(col, yt);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if yb < ih {
                let b = rgba.get_pixel(col, yb);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                Color::Reset
            };
            let pos = Position::new(area.x + col_offset + col as u16, area.y + row_offset + row);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_cells_with_top_and_bottom_pixels() {
        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        render_halfblocks(&img, area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_centres_narrow_images() {
        let img = image::RgbaImage::from_pixel(2, 4, image::Rgba([9, 9, 9, 255]));
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        render_halfblocks(&img, area, &mut buf);

        assert_eq!(buf[(1, 0)].symbol(), " ");
        assert_eq!(buf[(2, 0)].symbol(), "▀");
        assert_eq!(buf[(3, 1)].symbol(), "▀");
        assert_eq!(buf[(4, 0)].symbol(), " ");
    }

    #[test]
    fn test_empty_area_is_ignored() {
        let img = image::RgbaImage::new(4, 4);
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        render_halfblocks(&img, Rect::new(0, 0, 0, 4), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
