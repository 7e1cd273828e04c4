//! # Line and block markers
//!
//! End-of-line codes for Group 3, the return-to-control sequence that ends
//! a Group 3 page and the end-of-facsimile-block code of Group 4.

use crate::{
    bits::BitPacker,
    codes::{Codeword, EOFB, EOL},
};

/// Number of EOL codes in the return-to-control (RTC) sequence
pub const RTC_EOL_COUNT: usize = 6;

/// The kind of end-of-line code
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Eol {
    /// The 12 bit EOL of one-dimensional coding
    Plain,
    /// EOL followed by a `1` bit, the next row is coded one-dimensionally
    Next1D,
    /// EOL followed by a `0` bit, the next row is coded two-dimensionally
    Next2D,
}

impl Eol {
    /// The codeword including the tag bit, if any
    pub fn codeword(self) -> Codeword {
        match self {
            Eol::Plain => EOL,
            Eol::Next1D => Codeword::new(EOL.bits() << 1 | 1, EOL.len() + 1),
            Eol::Next2D => Codeword::new(EOL.bits() << 1, EOL.len() + 1),
        }
    }
}

/// Write an end-of-line code
///
/// With `fill`, zero bits are inserted first, so that the 12 bit EOL itself
/// ends on a byte boundary.
pub fn put_eol(packer: &mut BitPacker<'_>, eol: Eol, fill: bool) {
    if fill {
        let pending = packer.accumulator().pending();
        let pad = if pending <= 4 { 4 - pending } else { 12 - pending };
        packer.put_zeros(pad as u8);
    }
    packer.put(eol.codeword());
}

/// Write the return-to-control sequence of six EOL codes
pub fn put_rtc(packer: &mut BitPacker<'_>, eol: Eol, fill: bool) {
    for _ in 0..RTC_EOL_COUNT {
        put_eol(packer, eol, fill);
    }
}

/// Write the end-of-facsimile-block code
pub fn put_eofb(packer: &mut BitPacker<'_>) {
    packer.put(EOFB);
}
