//! Bit-packed frame buffer
//!
//! Pixel `(x, y)` lives at bit index `y * WIDTH + x`, stored in word
//! `index / WORD_BITS` at bit `index % WORD_BITS`. This is the layout the
//! matrix driver consumes directly.

use core::fmt;

/// Matrix width in pixels
pub const WIDTH: usize = 13;

/// Matrix height in pixels
pub const HEIGHT: usize = 8;

/// Bits per storage word
pub const WORD_BITS: usize = u32::BITS as usize;

/// Words needed to hold every pixel
pub const WORDS: usize = (WIDTH * HEIGHT).div_ceil(WORD_BITS);

/// One full matrix image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    words: [u32; WORDS],
}

impl Frame {
    /// All pixels off
    pub const fn blank() -> Self {
        Self { words: [0; WORDS] }
    }

    fn locate(x: usize, y: usize) -> Option<(usize, u32)> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let index = y * WIDTH + x;
        Some((index / WORD_BITS, 1 << (index % WORD_BITS)))
    }

    /// Light a pixel. Coordinates outside the matrix are ignored.
    pub fn set(&mut self, x: usize, y: usize) {
        if let Some((word, mask)) = Self::locate(x, y) {
            self.words[word] |= mask;
        }
    }

    /// Read a pixel. Coordinates outside the matrix read as off.
    pub fn get(&self, x: usize, y: usize) -> bool {
        Self::locate(x, y)
            .map(|(word, mask)| self.words[word] & mask != 0)
            .unwrap_or(false)
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.words = [0; WORDS];
    }

    /// Raw words, in the order the hardware expects
    pub fn words(&self) -> &[u32; WORDS] {
        &self.words
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_blank(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterate over the coordinates of every lit pixel, row by row
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get(x, y))
    }
}

/// Text rendering, one row per line, `#` for lit and `.` for dark
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                f.write_str(if self.get(x, y) { "#" } else { "." })?;
            }
            if y + 1 < HEIGHT {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
