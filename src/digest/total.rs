//! Whole-file sums.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::chunk::{FileSum, Fingerprint};
use crate::config::check_chunk_size;
use crate::error::DigestError;
use crate::reader::{self, BlockReader};

#[cfg(feature = "hash-blake3")]
use crate::hash::Blake3Hasher;

/// A whole file reduced to one additive sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileTotal {
    /// Sum of every byte of the file.
    pub sum: FileSum,

    /// File length in bytes.
    pub len: u64,

    /// BLAKE3 fingerprint of the content (`hash-blake3` feature only).
    pub fingerprint: Option<Fingerprint>,
}

/// Sums everything `reader` yields, block by block.
///
/// `chunk_size` only sets the read granularity and must be in
/// `1..=MAX_CHUNK_SIZE`. A read failure returns an error, never a partial
/// total.
pub fn sum_reader<R: Read>(reader: R, chunk_size: usize) -> Result<FileTotal, DigestError> {
    check_chunk_size(chunk_size)?;
    sum_blocks(BlockReader::new(reader, chunk_size))
}

/// Sums the file at `path`.
///
/// I/O errors carry the path. An empty file is a valid total of zero. An
/// out-of-range `chunk_size` is rejected before the file is opened.
pub fn sum_file(path: impl AsRef<Path>, chunk_size: usize) -> Result<FileTotal, DigestError> {
    let path = path.as_ref();
    let total = sum_blocks(reader::open(path, chunk_size)?).map_err(|e| e.with_path(path))?;
    debug!(path = %path.display(), sum = total.sum.value(), "summed file");
    Ok(total)
}

fn sum_blocks<R: Read>(blocks: BlockReader<R>) -> Result<FileTotal, DigestError> {
    let mut sum = FileSum::default();
    let mut len = 0u64;

    #[cfg(feature = "hash-blake3")]
    let mut hasher = Blake3Hasher::new();

    for block in blocks {
        let block = block?;
        sum.update(&block.data);
        len += block.len() as u64;

        #[cfg(feature = "hash-blake3")]
        hasher.update(&block.data);
    }

    #[cfg(feature = "hash-blake3")]
    let fingerprint = Some(hasher.finalize());
    #[cfg(not(feature = "hash-blake3"))]
    let fingerprint = None;

    Ok(FileTotal {
        sum,
        len,
        fingerprint,
    })
}
