//! 3×5 digit font
//!
//! Each glyph row is three bits, most significant bit on the left.

/// Glyph width in pixels
pub const GLYPH_WIDTH: usize = 3;

/// Glyph height in pixels
pub const GLYPH_HEIGHT: usize = 5;

/// Bitmap for one decimal digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; GLYPH_HEIGHT],
}

impl Glyph {
    const fn new(rows: [u8; GLYPH_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Whether the pixel at `(col, row)` is lit. Outside the glyph is off.
    pub fn pixel(&self, col: usize, row: usize) -> bool {
        if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return false;
        }
        self.rows[row] & (0b100 >> col) != 0
    }

    /// Iterate over the `(col, row)` of every lit pixel
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GLYPH_HEIGHT)
            .flat_map(|row| (0..GLYPH_WIDTH).map(move |col| (col, row)))
            .filter(|&(col, row)| self.pixel(col, row))
    }
}

static DIGITS: [Glyph; 10] = [
    Glyph::new([0b111, 0b101, 0b101, 0b101, 0b111]), // 0
    Glyph::new([0b010, 0b110, 0b010, 0b010, 0b111]), // 1
    Glyph::new([0b111, 0b001, 0b111, 0b100, 0b111]), // 2
    Glyph::new([0b111, 0b001, 0b111, 0b001, 0b111]), // 3
    Glyph::new([0b101, 0b101, 0b111, 0b001, 0b001]), // 4
    Glyph::new([0b111, 0b100, 0b111, 0b001, 0b111]), // 5
    Glyph::new([0b111, 0b100, 0b111, 0b101, 0b111]), // 6
    Glyph::new([0b111, 0b001, 0b001, 0b001, 0b001]), // 7
    Glyph::new([0b111, 0b101, 0b111, 0b101, 0b111]), // 8
    Glyph::new([0b111, 0b101, 0b111, 0b001, 0b111]), // 9
];

/// Glyph for a decimal digit, or `None` above 9
pub fn digit(value: u8) -> Option<&'static Glyph> {
    DIGITS.get(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_digit_present() {
        for d in 0..10 {
            assert!(digit(d).is_some());
        }
        assert!(digit(10).is_none());
    }

    #[test]
    fn test_glyphs_distinct() {
        for a in 0..10 {
            for b in (a + 1)..10 {
                assert_ne!(digit(a), digit(b), "digits {} and {} collide", a, b);
            }
        }
    }

    #[test]
    fn test_rows_fit_width() {
        for glyph in DIGITS.iter() {
            assert!(glyph.rows.iter().all(|&row| row < (1 << GLYPH_WIDTH)));
        }
    }

    #[test]
    fn test_one_shape() {
        let one = digit(1).unwrap();
        assert!(one.pixel(1, 0));
        assert!(!one.pixel(0, 0));
        assert!(one.pixel(0, 1));
        assert_eq!(one.lit_pixels().count(), 8);
    }

    #[test]
    fn test_pixel_outside_glyph() {
        let eight = digit(8).unwrap();
        assert!(!eight.pixel(GLYPH_WIDTH, 0));
        assert!(!eight.pixel(0, GLYPH_HEIGHT));
    }
}
