//! Encoder implementation

use log::trace;

use crate::{
    bits::BitPacker,
    codes::{vertical, HORIZONTAL, PASS},
    row::{BitRow, ColorLine},
    Color,
};

/// Encode a line of bi-level image data with 2-d coding
///
/// `reference` is the line above, or a [`crate::row::WhiteLine`] for the
/// first line of a Group 4 image. Both lines must have the same width.
///
/// Changing elements are tracked as in ITU-T T.4, 4.2.1.3.1: `a0` is the
/// current position on the coding line, `a1` and `a2` the next changing
/// elements after it, `b1` the first changing element on the reference
/// line after `a0` with the color opposite to `a0`, and `b2` the next one
/// after `b1`.
pub fn encode_2d_line<R: ColorLine>(packer: &mut BitPacker<'_>, row: &BitRow<'_>, reference: &R) {
    let width = row.width();
    debug_assert_eq!(width, reference.width());
    if width == 0 {
        return;
    }

    // a0 starts on an imaginary white pixel before the line
    let mut a0 = 0;
    let mut color = Color::White;
    let mut a1 = if row.color_at(0) == Color::Black {
        0
    } else {
        row.next_transition(0)
    };
    let mut b1 = if reference.color_at(0) == Color::Black {
        0
    } else {
        reference.next_transition(0)
    };

    loop {
        let b2 = reference.next_transition(b1);
        if b2 < a1 {
            trace!("P({})", b2);
            packer.put(PASS);
            a0 = b2;
        } else if let Some(code) = vertical(a1 as isize - b1 as isize) {
            trace!("V({})", a1 as isize - b1 as isize);
            packer.put(code);
            a0 = a1;
        } else {
            let a2 = row.next_transition(a1);
            trace!("H({},{})", a1 - a0, a2 - a1);
            packer.put(HORIZONTAL);
            packer.put_run(color, a1 - a0);
            packer.put_run(!color, a2 - a1);
            a0 = a2;
        }

        if a0 >= width {
            break;
        }

        color = row.color_at(a0);
        a1 = row.next_transition(a0);
        b1 = reference.next_transition(a0);
        if b1 < width && reference.color_at(b1) == color {
            b1 = reference.next_transition(b1);
        }
    }
}
