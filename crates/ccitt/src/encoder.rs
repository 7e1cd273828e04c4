//! # Encoder front-end
//!
//! Pick a scheme once, then encode any number of bitmaps with it.

use crate::{
    bits::FillOrder,
    g3::{encode_group3, encode_modified_huffman_image, G3Options},
    g42d::encode_group4,
    row::Bitmap,
    FaxResult,
};

/// The compression scheme
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Modified Huffman, each row byte aligned and without EOL codes (TIFF compression 2)
    ModifiedHuffman,
    /// Group 3 with EOL codes and RTC (TIFF compression 3)
    Group3(G3Options),
    /// Group 4 with EOFB (TIFF compression 4)
    #[default]
    Group4,
}

/// A configured CCITT encoder
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FaxEncoder {
    /// The compression scheme
    pub scheme: Scheme,
    /// The bit order of the output bytes
    pub fill_order: FillOrder,
}

impl FaxEncoder {
    /// Create a new encoder
    pub fn new(scheme: Scheme, fill_order: FillOrder) -> Self {
        Self { scheme, fill_order }
    }

    /// Encode `image` into `out` and return the number of bytes written
    ///
    /// # Panics
    ///
    /// Panics if `out` is too short. A buffer of [`max_encoded_len`] bytes
    /// is always enough.
    pub fn encode(&self, image: &Bitmap<'_>, out: &mut [u8]) -> FaxResult<usize> {
        match &self.scheme {
            Scheme::ModifiedHuffman => Ok(encode_modified_huffman_image(
                image,
                out,
                self.fill_order,
            )),
            Scheme::Group3(options) => encode_group3(image, options, out, self.fill_order),
            Scheme::Group4 => Ok(encode_group4(image, out, self.fill_order)),
        }
    }

    /// Encode `image` into a new vector
    pub fn encode_to_vec(&self, image: &Bitmap<'_>) -> FaxResult<Vec<u8>> {
        let mut out = vec![0; max_encoded_len(image.width(), image.height())];
        let len = self.encode(image, &mut out)?;
        out.truncate(len);
        Ok(out)
    }
}

/// An upper bound for the encoded size of a `width` x `height` image
///
/// Holds for all schemes, fill orders and options. No run of pixels costs
/// more than 14 bits for its codes, and each row adds at most 8 bytes for
/// fill bits, EOL and mode codes. The trailer (RTC or EOFB) fits into the
/// extra 16 bytes.
pub fn max_encoded_len(width: usize, height: usize) -> usize {
    height * (8 + (14 * width + 7) / 8) + 16
}
