//! Single-glyph and half-block encoders

use super::{
    CellBuffer, ASCII_RAMP, ASCII_RAMP_MAX, BAYER_2X2, BG_FILL, BG_GLYPH, BG_THRESHOLD, BLOCK_FULL,
    BLOCK_LOWER, BLOCK_UPPER, RGB_AVG,
};
use crate::math::clampf;
use crate::soa::PixelBuffer;
use glam::Vec3;

/// Ordered-dither offset for a pixel
#[inline(always)]
pub fn dither_offset(row: u32, col: u32) -> f32 {
    BAYER_2X2[((row & 1) * 2 + (col & 1)) as usize]
}

#[inline(always)]
fn mean(c: Vec3) -> f32 {
    (c.x + c.y + c.z) * RGB_AVG
}

/// Encode one glyph per pixel
///
/// Lit pixels (any channel above [`BG_THRESHOLD`]) take a ramp glyph from
/// their dithered brightness and their own color. Dark pixels become
/// [`BG_GLYPH`] in [`BG_FILL`]. Backgrounds are not written.
///
/// # Returns
/// The number of cells written.
pub fn composite(pixels: &PixelBuffer, cells: &mut CellBuffer, width: u32, height: u32) -> usize {
    let capacity = cells.capacity().min(pixels.capacity());
    let (r, g, b) = (pixels.r(), pixels.g(), pixels.b());

    let mut i = 0usize;
    'rows: for row in 0..height {
        for col in 0..width {
            if i >= capacity {
                break 'rows;
            }
            let (pr, pg, pb) = (r[i], g[i], b[i]);

            let brightness = clampf(mean(Vec3::new(pr, pg, pb)) + dither_offset(row, col), 0.0, 1.0);

            if pr > BG_THRESHOLD || pg > BG_THRESHOLD || pb > BG_THRESHOLD {
                let idx = ((brightness * ASCII_RAMP_MAX as f32) as i32).clamp(0, ASCII_RAMP_MAX as i32);
                let glyph = char::from(ASCII_RAMP[idx as usize]);
                cells.set_glyph_fg(i, glyph, [pr, pg, pb, 1.0]);
            } else {
                cells.set_glyph_fg(i, BG_GLYPH, BG_FILL);
            }
            i += 1;
        }
    }
    i
}

/// Encode two vertically stacked pixels per cell
///
/// Produces `height / 2` rows of cells. A pixel is lit when its channel mean
/// exceeds [`BG_THRESHOLD`]:
/// - both lit: [`BLOCK_FULL`], foreground and background the average
/// - top only: [`BLOCK_UPPER`], top over bottom
/// - bottom only: [`BLOCK_LOWER`], bottom over top
/// - neither: a space filled with `background`
///
/// # Returns
/// The number of cells written.
pub fn composite_blocks(
    pixels: &PixelBuffer,
    cells: &mut CellBuffer,
    width: u32,
    height: u32,
    background: Vec3,
) -> usize {
    let out_height = height / 2;
    let cell_capacity = cells.capacity();
    let pixel_capacity = pixels.capacity();
    let w = width as usize;

    let bg = [background.x, background.y, background.z, 1.0];
    let mut written = 0usize;

    'rows: for out_row in 0..out_height as usize {
        let top_row = out_row * 2;
        let bot_row = top_row + 1;

        for col in 0..w {
            let out_idx = out_row * w + col;
            let top_idx = top_row * w + col;
            let bot_idx = bot_row * w + col;
            if out_idx >= cell_capacity || bot_idx >= pixel_capacity {
                break 'rows;
            }

            let top = pixels.get(top_idx).unwrap_or_default();
            let bot = pixels.get(bot_idx).unwrap_or_default();
            let top_on = mean(top) > BG_THRESHOLD;
            let bot_on = mean(bot) > BG_THRESHOLD;

            match (top_on, bot_on) {
                (true, true) => {
                    let avg = (top + bot) * 0.5;
                    let quad = [avg.x, avg.y, avg.z, 1.0];
                    cells.set_glyph_fg(out_idx, BLOCK_FULL, quad);
                    cells.set_bg(out_idx, quad);
                }
                (true, false) => {
                    cells.set_glyph_fg(out_idx, BLOCK_UPPER, [top.x, top.y, top.z, 1.0]);
                    cells.set_bg(out_idx, [bot.x, bot.y, bot.z, 1.0]);
                }
                (false, true) => {
                    cells.set_glyph_fg(out_idx, BLOCK_LOWER, [bot.x, bot.y, bot.z, 1.0]);
                    cells.set_bg(out_idx, [top.x, top.y, top.z, 1.0]);
                }
                (false, false) => {
                    cells.set_glyph_fg(out_idx, ' ', bg);
                    cells.set_bg(out_idx, bg);
                }
            }
            written += 1;
        }
    }
    written
}
