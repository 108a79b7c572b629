//! Clock face rendering
//!
//! Layout on the 13×8 matrix, glyph tops on row 1:
//!
//! ```text
//! col  0  3   6 7  10
//!      H  H   : M  M
//! ```
//!
//! The hour tens digit is left blank below 10 rather than drawn as a zero.

use crate::dispatch::CommandError;
use crate::font;
use crate::frame::Frame;

/// Column of the hour tens digit
pub const HOUR_TENS_COL: usize = 0;
/// Column of the hour units digit
pub const HOUR_UNITS_COL: usize = 3;
/// Column of the minute tens digit
pub const MINUTE_TENS_COL: usize = 7;
/// Column of the minute units digit
pub const MINUTE_UNITS_COL: usize = 10;
/// Row of the top of every digit
pub const DIGIT_ROW: usize = 1;
/// Separator dots, lit on the blink phase
pub const SEPARATOR: [(usize, usize); 2] = [(6, 2), (6, 4)];

/// Render `hour:minute`, lighting the separator when `blink_on`
///
/// Rejects `hour > 23` or `minute > 59` without producing a frame.
pub fn render(hour: u8, minute: u8, blink_on: bool) -> Result<Frame, CommandError> {
    if hour > 23 || minute > 59 {
        return Err(CommandError::OutOfRange);
    }

    let mut frame = Frame::blank();

    if hour >= 10 {
        draw_digit(&mut frame, hour / 10, HOUR_TENS_COL);
    }
    draw_digit(&mut frame, hour % 10, HOUR_UNITS_COL);
    draw_digit(&mut frame, minute / 10, MINUTE_TENS_COL);
    draw_digit(&mut frame, minute % 10, MINUTE_UNITS_COL);

    if blink_on {
        for (x, y) in SEPARATOR {
            frame.set(x, y);
        }
    }

    Ok(frame)
}

/// The blank frame
pub fn clear() -> Frame {
    Frame::blank()
}

/// OR a digit into the frame; never clears pixels already set
fn draw_digit(frame: &mut Frame, value: u8, col: usize) {
    if let Some(glyph) = font::digit(value) {
        for (gx, gy) in glyph.lit_pixels() {
            frame.set(col + gx, DIGIT_ROW + gy);
        }
    }
}
