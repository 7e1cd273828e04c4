#![warn(missing_docs)]
//! CCITT fax encodings
//!
//! This crate compresses bi-level images with the codes of ITU-T T.4 and
//! T.6, as used by TIFF (compression types 2, 3 and 4) and the PDF
//! `CCITTFaxDecode` filter:
//!
//! - [modified Huffman](g3::encode_modified_huffman) (1-d) for single rows
//! - [Group 3](g3::encode_group3) pages with EOL codes, 1-d or mixed 1-d/2-d
//! - [Group 4](g42d::encode_group4) images, all 2-d, terminated by EOFB
//!
//! All encoders write into a caller supplied buffer and return the number
//! of bytes used. See [`max_encoded_len`] for a safe buffer size, or use
//! [`FaxEncoder::encode_to_vec`].
//!
//! ```
//! use ccitt_t4_t6_encoder::{Bitmap, FaxEncoder};
//!
//! let pixels = [0x00; 8];
//! let image = Bitmap::packed(&pixels, 8, 8).unwrap();
//! let data = FaxEncoder::default().encode_to_vec(&image).unwrap();
//! assert_eq!(data, [0xFF, 0x00, 0x10, 0x01]);
//! ```

pub mod bits;
pub mod codes;
mod color;
mod encoder;
mod error;
pub mod g3;
pub mod g42d;
pub mod markers;
pub mod row;

pub use bits::FillOrder;
pub use color::Color;
pub use encoder::{max_encoded_len, FaxEncoder, Scheme};
pub use error::{FaxError, FaxResult};
pub use g3::{encode_group3, encode_modified_huffman, encode_modified_huffman_image, G3Options};
pub use g42d::encode_group4;
pub use row::{BitRow, Bitmap, ColorLine, PixelRun};
