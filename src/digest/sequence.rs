//! Chunked digests.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::chunk::ChunkChecksum;
use crate::config::check_chunk_size;
use crate::error::DigestError;
use crate::reader::{self, BlockReader};

/// The checksums of a file's blocks, in stream order.
///
/// Position is meaningful: index `i` is the checksum of block `i`. The length
/// is `ceil(size / chunk_size)`, so an empty file has an empty digest.
///
/// # Example
///
/// ```
/// use chunksim::{DigestSequence, digest_bytes};
///
/// let digest = digest_bytes(&[1u8; 3000], 1024)?;
/// assert_eq!(digest, DigestSequence::from(vec![1024, 1024, 952]));
/// # Ok::<(), chunksim::DigestError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DigestSequence(Vec<ChunkChecksum>);

impl DigestSequence {
    /// Creates an empty digest.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends the checksum of the next block.
    pub fn push(&mut self, checksum: ChunkChecksum) {
        self.0.push(checksum);
    }

    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the digest covers no blocks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the checksums as a slice.
    pub fn as_slice(&self) -> &[ChunkChecksum] {
        &self.0
    }

    /// Returns an iterator over the checksums.
    pub fn iter(&self) -> std::slice::Iter<'_, ChunkChecksum> {
        self.0.iter()
    }

    /// Consumes the digest and returns the checksums.
    pub fn into_inner(self) -> Vec<ChunkChecksum> {
        self.0
    }
}

impl FromIterator<ChunkChecksum> for DigestSequence {
    fn from_iter<I: IntoIterator<Item = ChunkChecksum>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<ChunkChecksum>> for DigestSequence {
    fn from(checksums: Vec<ChunkChecksum>) -> Self {
        Self(checksums)
    }
}

impl From<Vec<u32>> for DigestSequence {
    fn from(values: Vec<u32>) -> Self {
        values.into_iter().map(ChunkChecksum::new).collect()
    }
}

impl<'a> IntoIterator for &'a DigestSequence {
    type Item = &'a ChunkChecksum;
    type IntoIter = std::slice::Iter<'a, ChunkChecksum>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds the digest of everything `reader` yields.
///
/// On failure no partial digest is returned. Returns
/// [`DigestError::InvalidConfig`] if `chunk_size` is zero or above
/// [`MAX_CHUNK_SIZE`](crate::MAX_CHUNK_SIZE).
pub fn digest_reader<R: Read>(reader: R, chunk_size: usize) -> Result<DigestSequence, DigestError> {
    check_chunk_size(chunk_size)?;
    BlockReader::new(reader, chunk_size)
        .map(|block| block.map(|b| b.checksum()))
        .collect()
}

/// Builds the digest of an in-memory buffer.
///
/// Returns [`DigestError::InvalidConfig`] if `chunk_size` is zero or above
/// [`MAX_CHUNK_SIZE`](crate::MAX_CHUNK_SIZE).
pub fn digest_bytes(data: &[u8], chunk_size: usize) -> Result<DigestSequence, DigestError> {
    check_chunk_size(chunk_size)?;
    Ok(data.chunks(chunk_size).map(ChunkChecksum::of).collect())
}

/// Builds the digest of the file at `path`.
///
/// The file is closed before this returns, on success and on failure.
/// I/O errors carry the path. An out-of-range `chunk_size` is rejected
/// before the file is opened.
pub fn digest_file(path: impl AsRef<Path>, chunk_size: usize) -> Result<DigestSequence, DigestError> {
    let path = path.as_ref();
    let blocks = reader::open(path, chunk_size)?;
    let digest = blocks
        .map(|block| block.map(|b| b.checksum()))
        .collect::<Result<DigestSequence, _>>()
        .map_err(|e| e.with_path(path))?;
    debug!(path = %path.display(), blocks = digest.len(), "digested file");
    Ok(digest)
}
