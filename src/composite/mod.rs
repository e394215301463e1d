//! Terminal cell encoding
//!
//! Turns shaded pixels into terminal cells: one `u32` Unicode scalar plus
//! RGBA foreground and background quads per cell. Two encoders share the
//! cell buffer:
//! - [`composite`]: one glyph per pixel from a dithered ASCII ramp
//! - [`composite_blocks`]: two stacked pixels per cell with half-block glyphs
//!
//! [`upscale`] then repeats cells by nearest neighbour to fill the terminal.
//!
//! Cell buffers are allocated once. Encoders overwrite the prefix they
//! cover and leave the rest untouched.

mod glyph;
mod upscale;

pub use glyph::{composite, composite_blocks, dither_offset};
pub use upscale::upscale;

/// Brightness ramp, darkest first
pub const ASCII_RAMP: &[u8; 10] = b" .:-=+*#%@";

/// Highest ramp index
pub const ASCII_RAMP_MAX: usize = 9;

/// 2×2 ordered dither offsets, indexed by `(row & 1) * 2 + (col & 1)`
pub const BAYER_2X2: [f32; 4] = [-0.075, 0.0, 0.0375, -0.0375];

/// Channel mean weight
pub const RGB_AVG: f32 = 0.333333;

/// Pixels at or below this level count as background
pub const BG_THRESHOLD: f32 = 0.04;

/// Foreground of background cells in single-glyph mode
pub const BG_FILL: [f32; 4] = [0.03, 0.05, 0.04, 1.0];

/// Glyph of background cells in single-glyph mode
pub const BG_GLYPH: char = '@';

/// `█` both halves lit
pub const BLOCK_FULL: char = '\u{2588}';

/// `▀` top half lit
pub const BLOCK_UPPER: char = '\u{2580}';

/// `▄` bottom half lit
pub const BLOCK_LOWER: char = '\u{2584}';

/// Per-cell glyphs with foreground and background colors
#[derive(Debug, Clone)]
pub struct CellBuffer {
    chars: Box<[u32]>,
    fg: Box<[f32]>,
    bg: Box<[f32]>,
}

impl CellBuffer {
    /// Allocate `capacity` blank cells
    pub fn new(capacity: usize) -> Self {
        CellBuffer {
            chars: vec![u32::from(' '); capacity].into_boxed_slice(),
            fg: vec![0.0; capacity * 4].into_boxed_slice(),
            bg: vec![0.0; capacity * 4].into_boxed_slice(),
        }
    }

    /// Number of cells
    #[inline]
    pub fn capacity(&self) -> usize {
        self.chars.len()
    }

    /// Glyph plane (Unicode scalar values)
    #[inline]
    pub fn chars(&self) -> &[u32] {
        &self.chars
    }

    /// Foreground plane, RGBA per cell
    #[inline]
    pub fn fg(&self) -> &[f32] {
        &self.fg
    }

    /// Background plane, RGBA per cell
    #[inline]
    pub fn bg(&self) -> &[f32] {
        &self.bg
    }

    /// Glyph of cell `index`
    #[inline]
    pub fn glyph(&self, index: usize) -> Option<char> {
        self.chars.get(index).and_then(|&c| char::from_u32(c))
    }

    /// Foreground of cell `index`
    #[inline]
    pub fn fg_at(&self, index: usize) -> Option<[f32; 4]> {
        quad(&self.fg, index)
    }

    /// Background of cell `index`
    #[inline]
    pub fn bg_at(&self, index: usize) -> Option<[f32; 4]> {
        quad(&self.bg, index)
    }

    #[inline]
    pub(crate) fn set_glyph_fg(&mut self, index: usize, glyph: char, fg: [f32; 4]) {
        self.chars[index] = u32::from(glyph);
        self.fg[index * 4..index * 4 + 4].copy_from_slice(&fg);
    }

    #[inline]
    pub(crate) fn set_bg(&mut self, index: usize, bg: [f32; 4]) {
        self.bg[index * 4..index * 4 + 4].copy_from_slice(&bg);
    }
}

/// Nearest-neighbour copy of a cell grid: glyphs and foregrounds only
#[derive(Debug, Clone)]
pub struct UpscaledCells {
    chars: Box<[u32]>,
    fg: Box<[f32]>,
}

impl UpscaledCells {
    /// Allocate `capacity` blank cells
    pub fn new(capacity: usize) -> Self {
        UpscaledCells {
            chars: vec![u32::from(' '); capacity].into_boxed_slice(),
            fg: vec![0.0; capacity * 4].into_boxed_slice(),
        }
    }

    /// Number of cells
    #[inline]
    pub fn capacity(&self) -> usize {
        self.chars.len()
    }

    /// Glyph plane
    #[inline]
    pub fn chars(&self) -> &[u32] {
        &self.chars
    }

    /// Foreground plane, RGBA per cell
    #[inline]
    pub fn fg(&self) -> &[f32] {
        &self.fg
    }

    /// Glyph of cell `index`
    #[inline]
    pub fn glyph(&self, index: usize) -> Option<char> {
        self.chars.get(index).and_then(|&c| char::from_u32(c))
    }

    /// Foreground of cell `index`
    #[inline]
    pub fn fg_at(&self, index: usize) -> Option<[f32; 4]> {
        quad(&self.fg, index)
    }
}

#[inline]
fn quad(plane: &[f32], index: usize) -> Option<[f32; 4]> {
    let q = plane.get(index * 4..index * 4 + 4)?;
    Some([q[0], q[1], q[2], q[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells() {
        let cells = CellBuffer::new(4);
        assert_eq!(cells.capacity(), 4);
        assert_eq!(cells.glyph(3), Some(' '));
        assert_eq!(cells.glyph(4), None);
        assert_eq!(cells.fg_at(0), Some([0.0; 4]));
        assert_eq!(cells.bg_at(4), None);
    }

    #[test]
    fn test_cell_writes() {
        let mut cells = CellBuffer::new(2);
        cells.set_glyph_fg(1, BLOCK_UPPER, [0.1, 0.2, 0.3, 1.0]);
        cells.set_bg(1, [0.4, 0.5, 0.6, 1.0]);
        assert_eq!(cells.chars()[1], 0x2580);
        assert_eq!(&cells.fg()[4..8], &[0.1, 0.2, 0.3, 1.0]);
        assert_eq!(cells.bg_at(1), Some([0.4, 0.5, 0.6, 1.0]));
    }

    #[test]
    fn test_ramp_ends() {
        assert_eq!(ASCII_RAMP[0], b' ');
        assert_eq!(ASCII_RAMP[ASCII_RAMP_MAX], b'@');
    }
}
