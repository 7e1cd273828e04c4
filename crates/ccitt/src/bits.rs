//! # Bit Packer and Fill Order

use crate::{
    codes::{run_codes, Codeword},
    Color,
};

/// Pending bits that do not yet form a complete byte
///
/// Holds at most 7 bits between calls to [`BitPacker::put`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct BitAccumulator {
    bits: u32,
    count: u32,
}

impl BitAccumulator {
    /// Number of bits waiting for the next byte
    pub fn pending(&self) -> u32 {
        self.count
    }
}

/// Writes codewords into a caller supplied byte slice
///
/// The output is never grown. Writing past the end of the slice panics,
/// so callers must size it with [`crate::max_encoded_len`] or similar.
#[derive(Debug)]
pub struct BitPacker<'a> {
    out: &'a mut [u8],
    len: usize,
    acc: BitAccumulator,
}

impl<'a> BitPacker<'a> {
    /// Creates a new instance, starting at the first byte of `out`
    pub fn new(out: &'a mut [u8]) -> Self {
        Self {
            out,
            len: 0,
            acc: BitAccumulator::default(),
        }
    }

    /// The number of complete bytes written so far
    pub fn bytes_written(&self) -> usize {
        self.len
    }

    /// The bits that are not yet part of a byte
    pub fn accumulator(&self) -> BitAccumulator {
        self.acc
    }

    fn push_byte(&mut self, byte: u8) {
        self.out[self.len] = byte;
        self.len += 1;
    }

    /// Write a single codeword
    pub fn put(&mut self, code: Codeword) {
        let len = u32::from(code.len());
        debug_assert!(len <= 24);
        // count < 8 and len <= 24, so everything fits into 31 bits
        let mask = (1u32 << len) - 1;
        self.acc.bits = (self.acc.bits << len) | (code.bits() & mask);
        self.acc.count += len;
        while self.acc.count >= 8 {
            self.acc.count -= 8;
            self.push_byte((self.acc.bits >> self.acc.count) as u8);
        }
        self.acc.bits &= (1 << self.acc.count) - 1;
    }

    /// Write the codes for a run of `len` pixels
    pub fn put_run(&mut self, color: Color, len: usize) {
        for code in run_codes(color, len) {
            self.put(code);
        }
    }

    /// Write `count` zero bits
    pub fn put_zeros(&mut self, count: u8) {
        self.put(Codeword::new(0, count));
    }

    /// Pad with zeros up to the next byte boundary
    pub fn align(&mut self) {
        let count = self.acc.count;
        if count > 0 {
            self.put_zeros((8 - count) as u8);
        }
    }

    /// Flush and return the number of bytes written
    pub fn finish(mut self) -> usize {
        self.align();
        self.len
    }
}

const fn reversed_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i as u8).reverse_bits();
        i += 1;
    }
    table
}

/// Each byte with the order of its bits reversed
static REVERSED: [u8; 256] = reversed_table();

/// Order of writing/reading bits to/from a byte (see TIFF spec)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillOrder {
    /// A byte is iterated from most- to least-significant bit
    #[default]
    MsbToLsb = 1,
    /// A byte is iterated from lest- to most-significant bit
    LsbToMsb = 2,
}

impl FillOrder {
    /// Convert an encoded stream from MSB-first to this fill order
    pub fn apply(self, bytes: &mut [u8]) {
        if self == FillOrder::LsbToMsb {
            reverse_bits(bytes);
        }
    }
}

/// Reverse the bit order of every byte
pub fn reverse_bits(bytes: &mut [u8]) {
    for byte in bytes {
        *byte = REVERSED[usize::from(*byte)];
    }
}
