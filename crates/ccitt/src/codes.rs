//! # Code tables
//!
//! The modified Huffman run-length codes and the two-dimensional mode codes
//! of ITU-T Recommendation T.4 (07/03), Tables 1 to 4.

use crate::Color;

/// A variable length code, written most significant bit first
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: u32,
    len: u8,
}

impl Codeword {
    /// Create a codeword from the lowest `len` bits of `bits`
    pub const fn new(bits: u32, len: u8) -> Self {
        Self { bits, len }
    }

    /// The bit pattern, right aligned
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// The number of bits
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> u8 {
        self.len
    }
}

const fn cw(bits: u32, len: u8) -> Codeword {
    Codeword::new(bits, len)
}

/// Terminating codes for white runs of 0 to 63 pixels
#[rustfmt::skip]
pub const WHITE_TERMINATING: [Codeword; 64] = [
    cw(0b00110101, 8),       cw(0b000111, 6),             // 0..=1
    cw(0b0111, 4),           cw(0b1000, 4),               // 2..=3
    cw(0b1011, 4),           cw(0b1100, 4),               // 4..=5
    cw(0b1110, 4),           cw(0b1111, 4),               // 6..=7
    cw(0b10011, 5),          cw(0b10100, 5),              // 8..=9
    cw(0b00111, 5),          cw(0b01000, 5),              // 10..=11
    cw(0b001000, 6),         cw(0b000011, 6),             // 12..=13
    cw(0b110100, 6),         cw(0b110101, 6),             // 14..=15
    cw(0b101010, 6),         cw(0b101011, 6),             // 16..=17
    cw(0b0100111, 7),        cw(0b0001100, 7),            // 18..=19
    cw(0b0001000, 7),        cw(0b0010111, 7),            // 20..=21
    cw(0b0000011, 7),        cw(0b0000100, 7),            // 22..=23
    cw(0b0101000, 7),        cw(0b0101011, 7),            // 24..=25
    cw(0b0010011, 7),        cw(0b0100100, 7),            // 26..=27
    cw(0b0011000, 7),        cw(0b00000010, 8),           // 28..=29
    cw(0b00000011, 8),       cw(0b00011010, 8),           // 30..=31
    cw(0b00011011, 8),       cw(0b00010010, 8),           // 32..=33
    cw(0b00010011, 8),       cw(0b00010100, 8),           // 34..=35
    cw(0b00010101, 8),       cw(0b00010110, 8),           // 36..=37
    cw(0b00010111, 8),       cw(0b00101000, 8),           // 38..=39
    cw(0b00101001, 8),       cw(0b00101010, 8),           // 40..=41
    cw(0b00101011, 8),       cw(0b00101100, 8),           // 42..=43
    cw(0b00101101, 8),       cw(0b00000100, 8),           // 44..=45
    cw(0b00000101, 8),       cw(0b00001010, 8),           // 46..=47
    cw(0b00001011, 8),       cw(0b01010010, 8),           // 48..=49
    cw(0b01010011, 8),       cw(0b01010100, 8),           // 50..=51
    cw(0b01010101, 8),       cw(0b00100100, 8),           // 52..=53
    cw(0b00100101, 8),       cw(0b01011000, 8),           // 54..=55
    cw(0b01011001, 8),       cw(0b01011010, 8),           // 56..=57
    cw(0b01011011, 8),       cw(0b01001010, 8),           // 58..=59
    cw(0b01001011, 8),       cw(0b00110010, 8),           // 60..=61
    cw(0b00110011, 8),       cw(0b00110100, 8),           // 62..=63
];

/// Terminating codes for black runs of 0 to 63 pixels
#[rustfmt::skip]
pub const BLACK_TERMINATING: [Codeword; 64] = [
    cw(0b0000110111, 10),    cw(0b010, 3),                // 0..=1
    cw(0b11, 2),             cw(0b10, 2),                 // 2..=3
    cw(0b011, 3),            cw(0b0011, 4),               // 4..=5
    cw(0b0010, 4),           cw(0b00011, 5),              // 6..=7
    cw(0b000101, 6),         cw(0b000100, 6),             // 8..=9
    cw(0b0000100, 7),        cw(0b0000101, 7),            // 10..=11
    cw(0b0000111, 7),        cw(0b00000100, 8),           // 12..=13
    cw(0b00000111, 8),       cw(0b000011000, 9),          // 14..=15
    cw(0b0000010111, 10),    cw(0b0000011000, 10),        // 16..=17
    cw(0b0000001000, 10),    cw(0b00001100111, 11),       // 18..=19
    cw(0b00001101000, 11),   cw(0b00001101100, 11),       // 20..=21
    cw(0b00000110111, 11),   cw(0b00000101000, 11),       // 22..=23
    cw(0b00000010111, 11),   cw(0b00000011000, 11),       // 24..=25
    cw(0b000011001010, 12),  cw(0b000011001011, 12),      // 26..=27
    cw(0b000011001100, 12),  cw(0b000011001101, 12),      // 28..=29
    cw(0b000001101000, 12),  cw(0b000001101001, 12),      // 30..=31
    cw(0b000001101010, 12),  cw(0b000001101011, 12),      // 32..=33
    cw(0b000011010010, 12),  cw(0b000011010011, 12),      // 34..=35
    cw(0b000011010100, 12),  cw(0b000011010101, 12),      // 36..=37
    cw(0b000011010110, 12),  cw(0b000011010111, 12),      // 38..=39
    cw(0b000001101100, 12),  cw(0b000001101101, 12),      // 40..=41
    cw(0b000011011010, 12),  cw(0b000011011011, 12),      // 42..=43
    cw(0b000001010100, 12),  cw(0b000001010101, 12),      // 44..=45
    cw(0b000001010110, 12),  cw(0b000001010111, 12),      // 46..=47
    cw(0b000001100100, 12),  cw(0b000001100101, 12),      // 48..=49
    cw(0b000001010010, 12),  cw(0b000001010011, 12),      // 50..=51
    cw(0b000000100100, 12),  cw(0b000000110111, 12),      // 52..=53
    cw(0b000000111000, 12),  cw(0b000000100111, 12),      // 54..=55
    cw(0b000000101000, 12),  cw(0b000001011000, 12),      // 56..=57
    cw(0b000001011001, 12),  cw(0b000000101011, 12),      // 58..=59
    cw(0b000000101100, 12),  cw(0b000001011010, 12),      // 60..=61
    cw(0b000001100110, 12),  cw(0b000001100111, 12),      // 62..=63
];

/// Make-up codes for white runs of 64 to 1728 pixels
#[rustfmt::skip]
pub const WHITE_MAKEUP: [Codeword; 27] = [
    cw(0b11011, 5),          cw(0b10010, 5),              // 64..=128
    cw(0b010111, 6),         cw(0b0110111, 7),            // 192..=256
    cw(0b00110110, 8),       cw(0b00110111, 8),           // 320..=384
    cw(0b01100100, 8),       cw(0b01100101, 8),           // 448..=512
    cw(0b01101000, 8),       cw(0b01100111, 8),           // 576..=640
    cw(0b011001100, 9),      cw(0b011001101, 9),          // 704..=768
    cw(0b011010010, 9),      cw(0b011010011, 9),          // 832..=896
    cw(0b011010100, 9),      cw(0b011010101, 9),          // 960..=1024
    cw(0b011010110, 9),      cw(0b011010111, 9),          // 1088..=1152
    cw(0b011011000, 9),      cw(0b011011001, 9),          // 1216..=1280
    cw(0b011011010, 9),      cw(0b011011011, 9),          // 1344..=1408
    cw(0b010011000, 9),      cw(0b010011001, 9),          // 1472..=1536
    cw(0b010011010, 9),      cw(0b011000, 6),             // 1600..=1664
    cw(0b010011011, 9),
];

/// Make-up codes for black runs of 64 to 1728 pixels
#[rustfmt::skip]
pub const BLACK_MAKEUP: [Codeword; 27] = [
    cw(0b0000001111, 10),    cw(0b000011001000, 12),      // 64..=128
    cw(0b000011001001, 12),  cw(0b000001011011, 12),      // 192..=256
    cw(0b000000110011, 12),  cw(0b000000110100, 12),      // 320..=384
    cw(0b000000110101, 12),  cw(0b0000001101100, 13),     // 448..=512
    cw(0b0000001101101, 13), cw(0b0000001001010, 13),     // 576..=640
    cw(0b0000001001011, 13), cw(0b0000001001100, 13),     // 704..=768
    cw(0b0000001001101, 13), cw(0b0000001110010, 13),     // 832..=896
    cw(0b0000001110011, 13), cw(0b0000001110100, 13),     // 960..=1024
    cw(0b0000001110101, 13), cw(0b0000001110110, 13),     // 1088..=1152
    cw(0b0000001110111, 13), cw(0b0000001010010, 13),     // 1216..=1280
    cw(0b0000001010011, 13), cw(0b0000001010100, 13),     // 1344..=1408
    cw(0b0000001010101, 13), cw(0b0000001011010, 13),     // 1472..=1536
    cw(0b0000001011011, 13), cw(0b0000001100100, 13),     // 1600..=1664
    cw(0b0000001100101, 13),
];

/// Make-up codes for runs of 1792 to 2560 pixels, shared by both colors
#[rustfmt::skip]
pub const EXTENDED_MAKEUP: [Codeword; 13] = [
    cw(0b00000001000, 11),   cw(0b00000001100, 11),       // 1792..=1856
    cw(0b00000001101, 11),   cw(0b000000010010, 12),      // 1920..=1984
    cw(0b000000010011, 12),  cw(0b000000010100, 12),      // 2048..=2112
    cw(0b000000010101, 12),  cw(0b000000010110, 12),      // 2176..=2240
    cw(0b000000010111, 12),  cw(0b000000011100, 12),      // 2304..=2368
    cw(0b000000011101, 12),  cw(0b000000011110, 12),      // 2432..=2496
    cw(0b000000011111, 12),
];

/// Pass mode
pub const PASS: Codeword = cw(0b0001, 4);

/// Horizontal mode, followed by two runs
pub const HORIZONTAL: Codeword = cw(0b001, 3);

/// Vertical mode codes, indexed by `a1 - b1 + 3`
#[rustfmt::skip]
pub const VERTICAL: [Codeword; 7] = [
    cw(0b0000010, 7), // VL3
    cw(0b000010, 6),  // VL2
    cw(0b010, 3),     // VL1
    cw(0b1, 1),       // V0
    cw(0b011, 3),     // VR1
    cw(0b000011, 6),  // VR2
    cw(0b0000011, 7), // VR3
];

/// End of line
pub const EOL: Codeword = cw(0b0000_0000_0001, 12);

/// End of facsimile block (two EOLs)
pub const EOFB: Codeword = cw(0x001001, 24);

/// The longest run that a single make-up code stands for
pub const MAX_MAKEUP_RUN: usize = 2560;

/// The vertical mode code for a changing element `a1` that is `offset`
/// pixels right of `b1`, if `|offset| <= 3`
pub fn vertical(offset: isize) -> Option<Codeword> {
    match offset {
        -3..=3 => Some(VERTICAL[(offset + 3) as usize]),
        _ => None,
    }
}

/// The terminating code for a run of `len < 64` pixels
pub fn terminating(color: Color, len: usize) -> Codeword {
    match color {
        Color::White => WHITE_TERMINATING[len],
        Color::Black => BLACK_TERMINATING[len],
    }
}

/// The make-up code for a run of `64 * count` pixels, `1 <= count <= 40`
pub fn makeup(color: Color, count: usize) -> Codeword {
    match (color, count) {
        (Color::White, 1..=27) => WHITE_MAKEUP[count - 1],
        (Color::Black, 1..=27) => BLACK_MAKEUP[count - 1],
        _ => EXTENDED_MAKEUP[count - 28],
    }
}

/// Returns the codes for a run of `len` pixels of one color
///
/// Runs of 2560 pixels or more start with one 2560 make-up code for each
/// full 2560 pixels. The rest is coded as a make-up code for the multiple
/// of 64 (if any), followed by the terminating code for the remainder.
pub fn run_codes(color: Color, len: usize) -> RunCodes {
    RunCodes {
        color,
        rest: len,
        done: false,
    }
}

/// Iterator over the codes of a single run, see [`run_codes`]
#[derive(Debug, Clone)]
pub struct RunCodes {
    color: Color,
    rest: usize,
    done: bool,
}

impl Iterator for RunCodes {
    type Item = Codeword;

    fn next(&mut self) -> Option<Codeword> {
        if self.done {
            None
        } else if self.rest >= MAX_MAKEUP_RUN {
            self.rest -= MAX_MAKEUP_RUN;
            Some(makeup(self.color, MAX_MAKEUP_RUN / 64))
        } else if self.rest >= 64 {
            let code = makeup(self.color, self.rest / 64);
            self.rest %= 64;
            Some(code)
        } else {
            self.done = true;
            Some(terminating(self.color, self.rest))
        }
    }
}
