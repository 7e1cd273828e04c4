//! # CCITT Group 4 2D-encoding
//!
//! Spec: ITU-T Recommendation T.6 (11/88) <https://www.itu.int/rec/T-REC-T.6-198811-I/en>

use log::debug;

use crate::{
    bits::{BitPacker, FillOrder},
    markers::put_eofb,
    row::{Bitmap, WhiteLine},
};

mod encode;

pub use encode::encode_2d_line;

/// Encode a bitmap as a Group 4 image
///
/// Every line is coded 2-d, the first one against an imaginary white line.
/// There are no EOL codes, the image ends with EOFB and is padded to a full
/// byte. Returns the number of bytes written.
///
/// # Panics
///
/// Panics if `out` is too short.
pub fn encode_group4(image: &Bitmap<'_>, out: &mut [u8], fill_order: FillOrder) -> usize {
    let mut packer = BitPacker::new(out);
    let mut rows = image.rows();
    if let Some(first) = rows.next() {
        encode_2d_line(&mut packer, &first, &WhiteLine::new(image.width()));
        let mut reference = first;
        for row in rows {
            encode_2d_line(&mut packer, &row, &reference);
            reference = row;
        }
    }
    put_eofb(&mut packer);

    let len = packer.finish();
    fill_order.apply(&mut out[..len]);
    debug!(
        "group 4: {}x{} -> {} bytes",
        image.width(),
        image.height(),
        len
    );
    len
}
