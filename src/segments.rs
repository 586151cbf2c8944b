//! Seven-segment glyph encoding.
//!
//! Each digit of the module is one byte; bit 0 is segment A through bit 6
//! for segment G. Bit 7 is unused on every digit except position
//! [`COLON_POSITION`], where it drives the colon between the two halves of
//! the display.
//!
//! ```text
//!       A
//!      ---
//!   F |   | B
//!      -G-
//!   E |   | C
//!      ---
//!       D
//! ```
//!
//! # Example
//!
//! ```rust
//! use tm1637_display::segments::{decimal_segments, encode_digit, BLANK};
//!
//! let digits = decimal_segments(42, false, 4);
//! assert_eq!(digits.as_slice(), &[BLANK, BLANK, encode_digit(4), encode_digit(2)]);
//! ```

use heapless::Vec;

/// Number of digit positions on the module.
pub const DIGITS: usize = 4;

/// Segment A (top).
pub const SEG_A: u8 = 0b0000_0001;
/// Segment B (top right).
pub const SEG_B: u8 = 0b0000_0010;
/// Segment C (bottom right).
pub const SEG_C: u8 = 0b0000_0100;
/// Segment D (bottom).
pub const SEG_D: u8 = 0b0000_1000;
/// Segment E (bottom left).
pub const SEG_E: u8 = 0b0001_0000;
/// Segment F (top left).
pub const SEG_F: u8 = 0b0010_0000;
/// Segment G (middle).
pub const SEG_G: u8 = 0b0100_0000;

/// Colon indicator bit, only meaningful at [`COLON_POSITION`].
pub const COLON: u8 = 0b1000_0000;

/// Digit position whose high bit lights the colon.
pub const COLON_POSITION: usize = 1;

/// All segments off.
pub const BLANK: u8 = 0x00;

/// Minus sign.
pub const MINUS: u8 = SEG_G;

/// Segment patterns for the hexadecimal digits 0-F.
pub const DIGIT_TO_SEGMENT: [u8; 16] = [
    // XGFEDCBA
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
    0b0111_0111, // A
    0b0111_1100, // b
    0b0011_1001, // C
    0b0101_1110, // d
    0b0111_1001, // E
    0b0111_0001, // F
];

/// Translate a digit (0-15) into its segment pattern.
///
/// Only the low nibble of `digit` is used, so out-of-range values wrap
/// instead of panicking.
#[inline]
pub const fn encode_digit(digit: u8) -> u8 {
    DIGIT_TO_SEGMENT[(digit & 0x0F) as usize]
}

/// Decompose `num` into `length` decimal glyphs, most significant first.
///
/// - `length` is clamped to 1-4
/// - Places above the magnitude of `num` are blank unless `leading_zero`
///   is set; the units place always shows a digit
/// - Digits that do not fit in `length` places are dropped
/// - Negative numbers get a [`MINUS`] in front of the most significant
///   digit (or in the first place with `leading_zero`) when there is room
pub fn decimal_segments(num: i32, leading_zero: bool, length: u8) -> Vec<u8, DIGITS> {
    radix_segments(num.unsigned_abs(), num < 0, 10, leading_zero, length)
}

/// Decompose `num` into `length` hexadecimal glyphs, most significant first.
///
/// Same placement rules as [`decimal_segments`], without sign handling.
pub fn hex_segments(num: u16, leading_zero: bool, length: u8) -> Vec<u8, DIGITS> {
    radix_segments(u32::from(num), false, 16, leading_zero, length)
}

fn radix_segments(
    magnitude: u32,
    negative: bool,
    radix: u32,
    leading_zero: bool,
    length: u8,
) -> Vec<u8, DIGITS> {
    let length = (length as usize).clamp(1, DIGITS);
    let mut out = Vec::new();
    let mut last_leading: Option<usize> = None;

    for i in 0..length {
        let place = (length - 1 - i) as u32;
        let weight = radix.pow(place);
        let leading = place > 0 && magnitude < weight;
        let digit = ((magnitude / weight) % radix) as u8;

        let glyph = if leading && !leading_zero {
            BLANK
        } else {
            encode_digit(digit)
        };
        if leading {
            last_leading = Some(i);
        }
        // capacity is DIGITS and length <= DIGITS
        let _ = out.push(glyph);
    }

    if negative {
        if let Some(idx) = last_leading {
            let idx = if leading_zero { 0 } else { idx };
            out[idx] = MINUS;
        }
    }

    out
}

/// OR the colon bit into whichever byte lands on [`COLON_POSITION`] when
/// `segments` is written starting at `pos`.
pub fn apply_colon(segments: &mut [u8], pos: u8) {
    let pos = pos as usize;
    if let Some(idx) = COLON_POSITION.checked_sub(pos) {
        if let Some(byte) = segments.get_mut(idx) {
            *byte |= COLON;
        }
    }
}
