//! Nearest-neighbour cell upscaler

use super::{CellBuffer, UpscaledCells};

/// Repeat native cells to fill an `output_width × output_height` grid
///
/// Output cell `(row, col)` copies native cell
/// `(min(row / scale, native_height - 1), min(col / scale, native_width - 1))`.
/// Only glyphs and foregrounds are copied. A `scale` of 0 acts as 1, and an
/// empty native grid leaves the output untouched.
///
/// # Returns
/// The number of output cells written.
pub fn upscale(
    cells: &CellBuffer,
    out: &mut UpscaledCells,
    native_width: u32,
    native_height: u32,
    output_width: u32,
    output_height: u32,
    scale: u32,
) -> usize {
    if native_width == 0 || native_height == 0 || cells.capacity() == 0 {
        return 0;
    }
    let scale = scale.max(1);
    let last_native = cells.capacity() - 1;
    let out_capacity = out.capacity();

    let mut out_idx = 0usize;
    'rows: for out_row in 0..output_height {
        let native_row = (out_row / scale).min(native_height - 1) as usize;
        let row_offset = native_row * native_width as usize;

        for out_col in 0..output_width {
            if out_idx >= out_capacity {
                break 'rows;
            }
            let native_col = (out_col / scale).min(native_width - 1) as usize;
            let native_idx = (row_offset + native_col).min(last_native);

            out.chars[out_idx] = cells.chars()[native_idx];
            out.fg[out_idx * 4..out_idx * 4 + 4].copy_from_slice(&cells.fg()[native_idx * 4..native_idx * 4 + 4]);
            out_idx += 1;
        }
    }
    out_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native_2x2() -> CellBuffer {
        let mut cells = CellBuffer::new(4);
        for (i, glyph) in ['a', 'b', 'c', 'd'].into_iter().enumerate() {
            cells.set_glyph_fg(i, glyph, [i as f32, 0.0, 0.0, 1.0]);
        }
        cells
    }

    #[test]
    fn test_upscale_2x2_to_4x4() {
        let cells = native_2x2();
        let mut out = UpscaledCells::new(16);
        assert_eq!(upscale(&cells, &mut out, 2, 2, 4, 4, 2), 16);

        let expected = "aabbaabbccddccdd";
        let got: String = (0..16).filter_map(|i| out.glyph(i)).collect();
        assert_eq!(got, expected);
        assert_eq!(out.fg_at(15), Some([3.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_upscale_clamps_to_native_edge() {
        let cells = native_2x2();
        let mut out = UpscaledCells::new(16);
        // Output larger than scale * native: edge cells repeat
        upscale(&cells, &mut out, 2, 2, 3, 3, 1);
        let got: String = (0..9).filter_map(|i| out.glyph(i)).collect();
        assert_eq!(got, "abbcddcdd");
    }

    #[test]
    fn test_zero_scale_acts_as_one() {
        let cells = native_2x2();
        let mut out = UpscaledCells::new(4);
        upscale(&cells, &mut out, 2, 2, 2, 2, 0);
        let got: String = (0..4).filter_map(|i| out.glyph(i)).collect();
        assert_eq!(got, "abcd");
    }

    #[test]
    fn test_empty_native_is_noop() {
        let cells = native_2x2();
        let mut out = UpscaledCells::new(4);
        assert_eq!(upscale(&cells, &mut out, 0, 2, 4, 4, 1), 0);
        assert_eq!(out.glyph(0), Some(' '));
    }

    #[test]
    fn test_output_clamped_to_capacity() {
        let cells = native_2x2();
        let mut out = UpscaledCells::new(6);
        assert_eq!(upscale(&cells, &mut out, 2, 2, 4, 4, 2), 6);
    }
}
