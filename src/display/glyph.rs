//! Segment patterns for the clock's 7-segment digits.
//!
//! The board wires the shift-register outputs to the segments in this order:
//!
//! ```text
//!  bit: 7   6   5   4   3   2   1   0
//!  seg: DP  B   C   A   F   G   D   E
//! ```

/// Digit value that [`map_bcd`] turns into a dark cell.
pub const BLANK: u8 = 0xFF;

/// Constants for the board's 7-segment wiring.
struct Leds;

impl Leds {
    /// Segment E of the 7-segment display.
    const SEG_E: u8 = 0b_0000_0001;
    /// Segment D of the 7-segment display.
    const SEG_D: u8 = 0b_0000_0010;
    /// Segment G of the 7-segment display.
    const SEG_G: u8 = 0b_0000_0100;
    /// Segment F of the 7-segment display.
    const SEG_F: u8 = 0b_0000_1000;
    /// Segment A of the 7-segment display.
    const SEG_A: u8 = 0b_0001_0000;
    /// Segment C of the 7-segment display.
    const SEG_C: u8 = 0b_0010_0000;
    /// Segment B of the 7-segment display.
    const SEG_B: u8 = 0b_0100_0000;
    /// Decimal point of the 7-segment display.
    const DECIMAL: u8 = 0b_1000_0000;

    /// Segments for digits 0-9. Six and nine are drawn without their tails.
    const DIGITS: [u8; 10] = [
        0b_0111_1011, // Digit 0
        0b_0110_0000, // Digit 1
        0b_0101_0111, // Digit 2
        0b_0111_0110, // Digit 3
        0b_0110_1100, // Digit 4
        0b_0011_1110, // Digit 5
        0b_0010_1111, // Digit 6
        0b_0111_0000, // Digit 7
        0b_0111_1111, // Digit 8
        0b_0111_1100, // Digit 9
    ];
}

/// Maps a decimal digit to its segment byte; anything outside `0..=9` is blank.
#[must_use]
pub fn map_bcd(digit: u8) -> u8 {
    Leds::DIGITS.get(usize::from(digit)).copied().unwrap_or(0)
}

/// One cell's worth of status text.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    Digit(u8),
    #[default]
    Blank,
    A,
    P,
    H,
    R,
    M,
    Dash,
}

impl Glyph {
    /// The segment byte for this glyph.
    #[must_use]
    pub fn segments(self) -> u8 {
        match self {
            Self::Digit(digit) => map_bcd(digit),
            Self::Blank => 0,
            Self::A => Leds::SEG_A | Leds::SEG_B | Leds::SEG_C | Leds::SEG_E | Leds::SEG_F | Leds::SEG_G,
            Self::P => Leds::SEG_A | Leds::SEG_B | Leds::SEG_E | Leds::SEG_F | Leds::SEG_G,
            Self::H => Leds::SEG_B | Leds::SEG_C | Leds::SEG_E | Leds::SEG_F | Leds::SEG_G,
            // A lower-case r.
            Self::R => Leds::SEG_E | Leds::SEG_G,
            // An arch; the closest a single cell gets to an M.
            Self::M => Leds::SEG_A | Leds::SEG_B | Leds::SEG_C | Leds::SEG_E | Leds::SEG_F,
            Self::Dash => Leds::SEG_G,
        }
    }

    /// The segment byte with the decimal point lit as well.
    #[must_use]
    pub fn segments_with_point(self) -> u8 {
        self.segments() | Leds::DECIMAL
    }
}

impl From<char> for Glyph {
    /// Unknown characters come out blank.
    fn from(ch: char) -> Self {
        match ch {
            '0'..='9' => ch
                .to_digit(10)
                .and_then(|digit| u8::try_from(digit).ok())
                .map_or(Self::Blank, Self::Digit),
            'A' | 'a' => Self::A,
            'P' | 'p' => Self::P,
            'H' | 'h' => Self::H,
            'R' | 'r' => Self::R,
            'M' | 'm' => Self::M,
            '-' => Self::Dash,
            _ => Self::Blank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_table_matches_board_wiring() {
        assert_eq!(
            Leds::DIGITS,
            [123, 96, 87, 118, 108, 62, 47, 112, 127, 124]
        );
    }

    #[test]
    fn digits_are_composed_of_named_segments() {
        assert_eq!(map_bcd(1), Leds::SEG_B | Leds::SEG_C);
        assert_eq!(map_bcd(7), Leds::SEG_A | Leds::SEG_B | Leds::SEG_C);
        assert_eq!(map_bcd(8) | Leds::DECIMAL, 0xFF);
    }

    #[test]
    fn out_of_range_digits_are_blank() {
        assert_eq!(map_bcd(BLANK), 0);
        assert_eq!(map_bcd(10), 0);
        assert_eq!(Glyph::Digit(42).segments(), 0);
    }

    #[test]
    fn characters_map_to_glyphs() {
        assert_eq!(Glyph::from('7'), Glyph::Digit(7));
        assert_eq!(Glyph::from('p'), Glyph::P);
        assert_eq!(Glyph::from('?'), Glyph::Blank);
        assert_eq!(Glyph::Dash.segments(), 0b_0000_0100);
    }

    #[test]
    fn point_adds_only_the_decimal_segment() {
        assert_eq!(Glyph::Digit(8).segments_with_point(), 0xFF);
        assert_eq!(Glyph::Blank.segments_with_point(), Leds::DECIMAL);
        assert_eq!(Glyph::H.segments_with_point() & !Leds::DECIMAL, Glyph::H.segments());
    }
}
