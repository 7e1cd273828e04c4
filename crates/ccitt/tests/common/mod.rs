//! A minimal decoder for checking the encoder output, and image helpers
#![allow(dead_code)]

use std::collections::HashMap;

use ccitt_t4_t6_encoder::{
    codes::{
        Codeword, BLACK_MAKEUP, BLACK_TERMINATING, EOFB, EXTENDED_MAKEUP, HORIZONTAL, PASS,
        VERTICAL, WHITE_MAKEUP, WHITE_TERMINATING,
    },
    Bitmap, Color, ColorLine,
};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type Table<T> = HashMap<(u32, u8), T>;

fn key(code: Codeword) -> (u32, u8) {
    (code.bits(), code.len())
}

fn run_table(terminating: &[Codeword; 64], makeup: &[Codeword; 27]) -> Table<usize> {
    let mut table = HashMap::new();
    for (i, code) in terminating.iter().enumerate() {
        table.insert(key(*code), i);
    }
    for (i, code) in makeup.iter().enumerate() {
        table.insert(key(*code), 64 * (i + 1));
    }
    for (i, code) in EXTENDED_MAKEUP.iter().enumerate() {
        table.insert(key(*code), 64 * (i + 28));
    }
    table
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Pass,
    Horizontal,
    Vertical(isize),
}

fn mode_table() -> Table<Mode> {
    let mut table = HashMap::new();
    table.insert(key(PASS), Mode::Pass);
    table.insert(key(HORIZONTAL), Mode::Horizontal);
    for (i, code) in VERTICAL.iter().enumerate() {
        table.insert(key(*code), Mode::Vertical(i as isize - 3));
    }
    table
}

/// Reads an MSB-first bit stream
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl BitReader<'_> {
    pub fn bit(&mut self) -> bool {
        assert!(self.pos < self.data.len() * 8, "unexpected end of data");
        let byte = self.data[self.pos >> 3];
        let bit = byte & (0x80 >> (self.pos & 7)) != 0;
        self.pos += 1;
        bit
    }

    fn code<T: Copy>(&mut self, table: &Table<T>) -> T {
        let start = self.pos;
        let mut bits = 0;
        for len in 1..=13 {
            bits = bits << 1 | u32::from(self.bit());
            if let Some(value) = table.get(&(bits, len)) {
                return *value;
            }
        }
        panic!("no code at bit {}", start);
    }
}

pub struct Decoder<'a> {
    reader: BitReader<'a>,
    white: Table<usize>,
    black: Table<usize>,
    modes: Table<Mode>,
    pub modes_seen: Vec<Mode>,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BitReader { data, pos: 0 },
            white: run_table(&WHITE_TERMINATING, &WHITE_MAKEUP),
            black: run_table(&BLACK_TERMINATING, &BLACK_MAKEUP),
            modes: mode_table(),
            modes_seen: Vec::new(),
        }
    }

    pub fn bit(&mut self) -> bool {
        self.reader.bit()
    }

    pub fn bits(&mut self, count: u8) -> u32 {
        let mut value = 0;
        for _ in 0..count {
            value = value << 1 | u32::from(self.bit());
        }
        value
    }

    pub fn run(&mut self, color: Color) -> usize {
        let table = match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        };
        let mut total = 0;
        loop {
            let len = self.reader.code(table);
            total += len;
            if len < 64 {
                return total;
            }
        }
    }

    fn mode(&mut self) -> Mode {
        let mode = self.reader.code(&self.modes);
        self.modes_seen.push(mode);
        mode
    }

    /// Skip to the next byte boundary, the skipped bits must be zero
    pub fn align(&mut self) {
        while self.reader.pos % 8 != 0 {
            assert!(!self.bit(), "non-zero padding");
        }
    }

    /// Read an EOL, with any number of leading fill bits
    ///
    /// Returns the bit position just after the EOL.
    pub fn eol(&mut self) -> usize {
        let mut zeros = 0;
        while !self.bit() {
            zeros += 1;
        }
        assert!(zeros >= 11, "EOL with only {} zeros", zeros);
        self.reader.pos
    }

    /// Check that only zero padding of less than a byte is left
    pub fn finish(mut self) {
        self.align();
        assert_eq!(
            self.reader.pos,
            self.reader.data.len() * 8,
            "trailing data"
        );
    }

    pub fn line_1d(&mut self, width: usize) -> Vec<bool> {
        let mut line = vec![false; width];
        let mut pos = 0;
        let mut color = Color::White;
        while pos < width {
            let len = self.run(color);
            assert!(pos + len <= width, "run past the end of the line");
            if color == Color::Black {
                line[pos..pos + len].iter_mut().for_each(|p| *p = true);
            }
            pos += len;
            color.invert();
        }
        line
    }

    pub fn line_2d(&mut self, reference: &[bool]) -> Vec<bool> {
        let width = reference.len();
        let mut line = vec![false; width];
        let mut a0: Option<usize> = None;
        let mut color = Color::White;
        let changing = |i: usize| i == 0 && reference[0] || i > 0 && reference[i] != reference[i - 1];

        loop {
            let start = a0.unwrap_or(0);
            if a0.map_or(width == 0, |a0| a0 >= width) {
                break;
            }
            let from = a0.map_or(0, |a0| a0 + 1);
            let b1 = (from..width)
                .find(|&i| changing(i) && Color::from(reference[i]) != color)
                .unwrap_or(width);
            let b2 = (b1 + 1..width).find(|&i| changing(i)).unwrap_or(width);

            match self.mode() {
                Mode::Pass => {
                    fill(&mut line, start, b2, color);
                    a0 = Some(b2);
                }
                Mode::Vertical(d) => {
                    let a1 = b1 as isize + d;
                    assert!(a1 >= start as isize && a1 as usize <= width, "bad a1");
                    fill(&mut line, start, a1 as usize, color);
                    a0 = Some(a1 as usize);
                    color.invert();
                }
                Mode::Horizontal => {
                    let r1 = self.run(color);
                    let r2 = self.run(!color);
                    fill(&mut line, start, start + r1, color);
                    fill(&mut line, start + r1, start + r1 + r2, !color);
                    a0 = Some(start + r1 + r2);
                }
            }
        }
        line
    }
}

fn fill(line: &mut [bool], from: usize, to: usize, color: Color) {
    assert!(to <= line.len(), "changing element past the end of the line");
    if color == Color::Black {
        line[from..to].iter_mut().for_each(|p| *p = true);
    }
}

/// Decode a modified Huffman image with byte aligned rows
pub fn decode_mh(data: &[u8], width: usize, height: usize) -> Vec<Vec<bool>> {
    let mut decoder = Decoder::new(data);
    let mut rows = Vec::new();
    for _ in 0..height {
        rows.push(decoder.line_1d(width));
        decoder.align();
    }
    decoder.finish();
    rows
}

/// A decoded Group 3 page
pub struct G3Page {
    pub rows: Vec<Vec<bool>>,
    /// For each row, whether it was 1-d coded
    pub one_d: Vec<bool>,
    /// The bit positions after each EOL, including those of the RTC
    pub eol_ends: Vec<usize>,
}

/// Decode a Group 3 page, including the RTC
pub fn decode_g3(data: &[u8], width: usize, height: usize, tagged: bool) -> G3Page {
    let mut decoder = Decoder::new(data);
    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut one_d = Vec::new();
    let mut eol_ends = Vec::new();
    for _ in 0..height {
        eol_ends.push(decoder.eol());
        let is_1d = !tagged || decoder.bit();
        let row = if is_1d {
            decoder.line_1d(width)
        } else {
            let reference = rows.last().expect("2-d coded first row");
            decoder.line_2d(reference)
        };
        rows.push(row);
        one_d.push(is_1d);
    }
    for _ in 0..6 {
        eol_ends.push(decoder.eol());
        if tagged {
            assert!(decoder.bit(), "RTC tag must be 1");
        }
    }
    decoder.finish();
    G3Page {
        rows,
        one_d,
        eol_ends,
    }
}

/// Decode a Group 4 image, including the EOFB
pub fn decode_g4(data: &[u8], width: usize, height: usize) -> (Vec<Vec<bool>>, Vec<Mode>) {
    let mut decoder = Decoder::new(data);
    let mut rows = Vec::new();
    let mut reference = vec![false; width];
    for _ in 0..height {
        let row = decoder.line_2d(&reference);
        reference = row.clone();
        rows.push(row);
    }
    assert_eq!(decoder.bits(24), EOFB.bits(), "missing EOFB");
    let modes = std::mem::take(&mut decoder.modes_seen);
    decoder.finish();
    (rows, modes)
}

/// The pixels of a bitmap, `true` for black
pub fn pixels(image: &Bitmap<'_>) -> Vec<Vec<bool>> {
    image
        .rows()
        .map(|row| {
            (0..row.width())
                .map(|x| row.color_at(x) == Color::Black)
                .collect()
        })
        .collect()
}

pub struct XorShift(u32);

impl XorShift {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    pub fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    pub fn below(&mut self, n: u32) -> u32 {
        self.next() % n
    }
}

/// A bit buffer with rows that start `stride` bits apart, after `offset` bits
pub struct Canvas {
    pub data: Vec<u8>,
    pub offset: usize,
    pub stride: usize,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn packed(width: usize, height: usize) -> Self {
        Self::with_layout(width, height, (width + 7) / 8 * 8, 0)
    }

    pub fn with_layout(width: usize, height: usize, stride: usize, offset: usize) -> Self {
        let bits = offset + stride * height;
        Self {
            data: vec![0; (bits + 7) / 8],
            offset,
            stride,
            width,
            height,
        }
    }

    pub fn set(&mut self, x: usize, y: usize) {
        let bit = self.offset + y * self.stride + x;
        self.data[bit >> 3] |= 0x80 >> (bit & 7);
    }

    pub fn bitmap(&self) -> Bitmap<'_> {
        Bitmap::new(&self.data, self.stride, self.offset, self.width, self.height)
            .expect("valid layout")
    }

    /// Set roughly one in `n` pixels
    pub fn noise(mut self, seed: u32, n: u32) -> Self {
        let mut rng = XorShift::new(seed);
        for y in 0..self.height {
            for x in 0..self.width {
                if rng.below(n) == 0 {
                    self.set(x, y);
                }
            }
        }
        self
    }

    /// Draw `count` random filled rectangles
    pub fn rectangles(mut self, seed: u32, count: usize) -> Self {
        let mut rng = XorShift::new(seed);
        if self.width == 0 || self.height == 0 {
            return self;
        }
        for _ in 0..count {
            let x0 = rng.below(self.width as u32) as usize;
            let y0 = rng.below(self.height as u32) as usize;
            let w = 1 + rng.below((self.width - x0) as u32) as usize;
            let h = 1 + rng.below((self.height - y0) as u32) as usize;
            for y in y0..y0 + h {
                for x in x0..x0 + w {
                    self.set(x, y);
                }
            }
        }
        self
    }

    /// Like a page of text: short, slightly shifted strokes
    pub fn strokes(mut self, seed: u32) -> Self {
        let mut rng = XorShift::new(seed);
        let mut starts: Vec<usize> = (0..self.width / 24).map(|i| i * 24 + 4).collect();
        for y in 0..self.height {
            for start in starts.iter_mut() {
                let shift = rng.below(7) as usize;
                *start = (*start + shift).saturating_sub(3);
                let len = 2 + rng.below(6) as usize;
                for x in *start..(*start + len).min(self.width) {
                    self.set(x, y);
                }
            }
        }
        self
    }
}
