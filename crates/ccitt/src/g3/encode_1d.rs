use log::trace;

use crate::{bits::BitPacker, row::BitRow};

/// Encode a line of bi-level image data with 1-d (modified Huffman) coding
pub fn encode_1d_line(packer: &mut BitPacker<'_>, row: &BitRow<'_>) {
    for run in row.runs() {
        trace!("{:?}({})", run.color, run.len);
        packer.put_run(run.color, run.len);
    }
}
