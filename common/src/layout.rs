//! Page geometry of the complaint PDF
//!
//! All values are points measured from the top-left corner of the page;
//! the serializer flips the y axis for PDF coordinates.

/// A4 portrait (pt)
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;

/// Left edge of all text
pub const MARGIN_LEFT_PT: f32 = 40.0;
/// Baseline of the title, also the top of continuation pages
pub const MARGIN_TOP_PT: f32 = 40.0;
pub const MARGIN_BOTTOM_PT: f32 = 40.0;

/// Width each block is wrapped to
pub const TEXT_WIDTH_PT: f32 = 500.0;

pub const FONT_SIZE_PT: f32 = 14.0;
pub const LINE_HEIGHT_PT: f32 = 18.0;
pub const PARAGRAPH_SPACING_PT: f32 = 6.0;

/// Baseline of the first block
pub const CONTENT_START_Y_PT: f32 = 70.0;

/// Average glyph advance of a proportional sans font, in em
pub const AVG_CHAR_WIDTH_EM: f32 = 0.5;

pub const MM_TO_PT: f32 = 72.0 / 25.4;

#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

/// Characters that fit in `width_pt` at `font_size_pt`
pub fn chars_per_line(width_pt: f32, font_size_pt: f32) -> usize {
    let per_char = font_size_pt * AVG_CHAR_WIDTH_EM;
    if per_char <= 0.0 {
        return 1;
    }
    ((width_pt / per_char).floor() as usize).max(1)
}

/// Height a block of `line_count` wrapped lines advances the cursor by
pub fn block_advance_pt(line_count: usize) -> f32 {
    line_count as f32 * LINE_HEIGHT_PT + PARAGRAPH_SPACING_PT
}

/// Lowest baseline allowed on a page
pub fn page_bottom_limit_pt() -> f32 {
    PAGE_HEIGHT_PT - MARGIN_BOTTOM_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_per_line() {
        // 500pt / (14pt * 0.5)
        assert_eq!(chars_per_line(TEXT_WIDTH_PT, FONT_SIZE_PT), 71);
        assert_eq!(chars_per_line(10.0, 14.0), 1);
        assert_eq!(chars_per_line(100.0, 0.0), 1);
    }

    #[test]
    fn test_block_advance() {
        assert!((block_advance_pt(1) - 24.0).abs() < 0.001);
        assert!((block_advance_pt(3) - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_text_fits_page() {
        assert!(MARGIN_LEFT_PT + TEXT_WIDTH_PT < PAGE_WIDTH_PT);
        assert!((pt_to_mm(PAGE_WIDTH_PT) - 210.0).abs() < 0.1);
        assert!((pt_to_mm(PAGE_HEIGHT_PT) - 297.0).abs() < 0.1);
    }
}
