//! # CCITT Group 3 coding
//!
//! Modified Huffman (1-d) coding of single lines, and Group 3 pages with
//! EOL codes that mix 1-d and 2-d coded lines.
//!
//! Spec: ITU-T Recommendation T.4 (07/03) <https://www.itu.int/rec/T-REC-T.4-200307-I/en>
use log::debug;

use crate::{
    bits::{BitPacker, FillOrder},
    g42d::encode_2d_line,
    markers::{put_eol, put_rtc, Eol},
    row::{BitRow, Bitmap},
    FaxError, FaxResult,
};

mod encode_1d;

pub use encode_1d::encode_1d_line;

/// Options for Group 3 encoding
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct G3Options {
    /// Code every line one-dimensionally, using plain 12 bit EOL codes
    pub one_dimensional: bool,
    /// Insert fill bits, so that every EOL code ends on a byte boundary
    pub eol_aligned: bool,
    /// The K parameter of two-dimensional coding: at most `k - 1` 2-d coded
    /// lines follow each 1-d coded line
    ///
    /// Must not be zero, unless `one_dimensional` is set. It is ignored then.
    pub k_factor: u32,
}

impl Default for G3Options {
    fn default() -> Self {
        Self {
            one_dimensional: false,
            eol_aligned: false,
            k_factor: 2,
        }
    }
}

/// Encode a single row with modified Huffman coding (CCITT RLE)
///
/// There is no EOL code. The output is padded to a full byte and then
/// converted to `fill_order`. Returns the number of bytes written.
///
/// # Panics
///
/// Panics if `out` is too short.
pub fn encode_modified_huffman(row: &BitRow<'_>, out: &mut [u8], fill_order: FillOrder) -> usize {
    let mut packer = BitPacker::new(out);
    encode_1d_line(&mut packer, row);
    let len = packer.finish();
    fill_order.apply(&mut out[..len]);
    len
}

/// Encode all rows of a bitmap with modified Huffman coding
///
/// Each row starts on a new byte, as for TIFF compression type 2.
///
/// # Panics
///
/// Panics if `out` is too short.
pub fn encode_modified_huffman_image(
    image: &Bitmap<'_>,
    out: &mut [u8],
    fill_order: FillOrder,
) -> usize {
    let mut packer = BitPacker::new(out);
    for row in image.rows() {
        encode_1d_line(&mut packer, &row);
        packer.align();
    }
    let len = packer.finish();
    fill_order.apply(&mut out[..len]);
    debug!(
        "modified huffman: {}x{} -> {} bytes",
        image.width(),
        image.height(),
        len
    );
    len
}

/// Encode a bitmap as a Group 3 page
///
/// Every line is preceded by an EOL code. Unless `options.one_dimensional`
/// is set, the EOL carries a tag bit and every `k_factor`-th line starting
/// with the first is coded 1-d, all others 2-d with the line above as the
/// reference. The page ends with six EOL codes (RTC).
///
/// # Panics
///
/// Panics if `out` is too short.
pub fn encode_group3(
    image: &Bitmap<'_>,
    options: &G3Options,
    out: &mut [u8],
    fill_order: FillOrder,
) -> FaxResult<usize> {
    if options.k_factor == 0 && !options.one_dimensional {
        return Err(FaxError::ZeroKFactor);
    }
    let k = options.k_factor.max(1) as usize;
    let fill = options.eol_aligned;

    let mut packer = BitPacker::new(out);
    let mut reference = None;
    for (y, row) in image.rows().enumerate() {
        if options.one_dimensional {
            put_eol(&mut packer, Eol::Plain, fill);
            encode_1d_line(&mut packer, &row);
        } else {
            match reference {
                Some(reference) if y % k != 0 => {
                    put_eol(&mut packer, Eol::Next2D, fill);
                    encode_2d_line(&mut packer, &row, &reference);
                }
                _ => {
                    put_eol(&mut packer, Eol::Next1D, fill);
                    encode_1d_line(&mut packer, &row);
                }
            }
        }
        reference = Some(row);
    }

    let rtc = if options.one_dimensional {
        Eol::Plain
    } else {
        Eol::Next1D
    };
    put_rtc(&mut packer, rtc, fill);

    let len = packer.finish();
    fill_order.apply(&mut out[..len]);
    debug!(
        "group 3 ({}): {}x{} -> {} bytes",
        if options.one_dimensional { "1-d" } else { "2-d" },
        image.width(),
        image.height(),
        len
    );
    Ok(len)
}
