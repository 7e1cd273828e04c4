//! # Packed rows and transition scanning
//!
//! Rows are bit-packed, most significant bit first, `0` for white and `1`
//! for black. Neither [`BitRow`] nor [`Bitmap`] copies the pixels.

use crate::{Color, FaxError, FaxResult};

const fn first_set_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i as u8).leading_zeros() as u8;
        i += 1;
    }
    table
}

/// Position of the first set bit in a byte, counted from the most
/// significant bit, or 8 for a zero byte
static FIRST_SET: [u8; 256] = first_set_table();

/// Finds the next changing element at or before `limit`
///
/// Returns the index of the first bit after `from` that differs from the
/// bit at `from`, or `limit` if there is none before it. Bit indices are
/// absolute positions in `data`. No byte past the one holding bit
/// `limit - 1` is read.
pub fn next_transition(data: &[u8], from: usize, limit: usize) -> usize {
    if from >= limit {
        return limit;
    }
    let mut index = from >> 3;
    let last = (limit - 1) >> 3;
    let extra = from & 0x7;

    // Turn the search into looking for the first `1`
    let flip = if data[index] & (0x80 >> extra) != 0 {
        0xFF
    } else {
        0x00
    };
    let mut byte = (data[index] ^ flip) & (0xFF >> extra);
    loop {
        if byte != 0 {
            let pos = (index << 3) + usize::from(FIRST_SET[usize::from(byte)]);
            return pos.min(limit);
        }
        if index >= last {
            return limit;
        }
        index += 1;
        byte = data[index] ^ flip;
    }
}

fn bit_len(data: &[u8]) -> usize {
    data.len().saturating_mul(8)
}

/// A scanline that the 2D coder can use as a reference
pub trait ColorLine {
    /// The number of pixels
    fn width(&self) -> usize;
    /// Get the color at index `i < width`
    fn color_at(&self, i: usize) -> Color;
    /// Index of the next pixel after `from` with a different color, or
    /// `width` if there is none
    fn next_transition(&self, from: usize) -> usize;
}

/// The imaginary all-white line above the first row of a Group 4 image
#[derive(Debug, Copy, Clone)]
pub struct WhiteLine {
    width: usize,
}

impl WhiteLine {
    /// Create a blank line of the given width
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl ColorLine for WhiteLine {
    fn width(&self) -> usize {
        self.width
    }

    fn color_at(&self, _i: usize) -> Color {
        Color::White
    }

    fn next_transition(&self, _from: usize) -> usize {
        self.width
    }
}

/// A run of pixels with the same color
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRun {
    /// Index of the first pixel
    pub start: usize,
    /// Number of pixels, may be zero
    pub len: usize,
    /// The color of all pixels in the run
    pub color: Color,
}

/// A view on a single row of packed pixels
#[derive(Debug, Copy, Clone)]
pub struct BitRow<'a> {
    data: &'a [u8],
    offset: usize,
    width: usize,
}

impl<'a> BitRow<'a> {
    /// Create a row of `width` pixels, starting at bit `offset` of `data`
    pub fn new(data: &'a [u8], offset: usize, width: usize) -> FaxResult<Self> {
        let needed = offset.saturating_add(width);
        let available = bit_len(data);
        if needed > available {
            return Err(FaxError::RowOutOfBounds {
                row: 0,
                needed,
                available,
            });
        }
        Ok(Self::new_unchecked(data, offset, width))
    }

    fn new_unchecked(data: &'a [u8], offset: usize, width: usize) -> Self {
        Self {
            data,
            offset,
            width,
        }
    }

    /// The runs of this row, alternating white and black
    ///
    /// The first run is white. If the row starts with a black pixel, it
    /// has a length of zero.
    pub fn runs(&self) -> Runs<'a> {
        Runs {
            row: *self,
            pos: 0,
            color: Color::White,
        }
    }
}

impl ColorLine for BitRow<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn color_at(&self, i: usize) -> Color {
        debug_assert!(i < self.width);
        let bit = self.offset + i;
        Color::from(self.data[bit >> 3] & (0x80 >> (bit & 0x7)) != 0)
    }

    fn next_transition(&self, from: usize) -> usize {
        let limit = self.offset + self.width;
        next_transition(self.data, self.offset + from, limit) - self.offset
    }
}

/// Iterator over the runs of a row, see [`BitRow::runs`]
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    row: BitRow<'a>,
    pos: usize,
    color: Color,
}

impl Iterator for Runs<'_> {
    type Item = PixelRun;

    fn next(&mut self) -> Option<PixelRun> {
        if self.pos >= self.row.width {
            return None;
        }
        let end = if self.pos == 0 && self.color == Color::White {
            if self.row.color_at(0) == Color::Black {
                0
            } else {
                self.row.next_transition(0)
            }
        } else {
            self.row.next_transition(self.pos)
        };
        let run = PixelRun {
            start: self.pos,
            len: end - self.pos,
            color: self.color,
        };
        self.pos = end;
        self.color.invert();
        Some(run)
    }
}

/// A view on `height` rows of packed pixels
///
/// Row `y` starts at bit `offset + y * stride` of the buffer.
#[derive(Debug, Copy, Clone)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    offset: usize,
    stride: usize,
    width: usize,
    height: usize,
}

impl<'a> Bitmap<'a> {
    /// Create a new bitmap view
    ///
    /// `stride` is the distance between the starts of two consecutive
    /// rows in bits, `offset` the bit offset of the first pixel.
    pub fn new(
        data: &'a [u8],
        stride: usize,
        offset: usize,
        width: usize,
        height: usize,
    ) -> FaxResult<Self> {
        if stride < width {
            return Err(FaxError::StrideTooSmall { stride, width });
        }
        if height > 0 {
            // an overflow is out of bounds, too
            let needed = (height - 1)
                .checked_mul(stride)
                .and_then(|last| last.checked_add(offset))
                .and_then(|start| start.checked_add(width))
                .unwrap_or(usize::MAX);
            let available = bit_len(data);
            if needed > available {
                // stride > 0 whenever a later row is the first one to not fit
                let row = match available.checked_sub(offset.saturating_add(width)) {
                    Some(room) => room / stride + 1,
                    None => 0,
                };
                return Err(FaxError::RowOutOfBounds {
                    row,
                    needed,
                    available,
                });
            }
        }
        Ok(Self {
            data,
            offset,
            stride,
            width,
            height,
        })
    }

    /// Create a bitmap where each row starts on a new byte
    pub fn packed(data: &'a [u8], width: usize, height: usize) -> FaxResult<Self> {
        let stride = (width + 7) / 8 * 8;
        Self::new(data, stride, 0, width, height)
    }

    /// The number of pixels per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the row at index `y < height`
    pub fn row(&self, y: usize) -> BitRow<'a> {
        assert!(y < self.height, "row {} of {}", y, self.height);
        BitRow::new_unchecked(self.data, self.offset + y * self.stride, self.width)
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = BitRow<'a>> + 'a {
        let this = *self;
        (0..self.height).map(move |y| this.row(y))
    }
}
