//! The Block type - one fixed-size slice of an input stream.

use bytes::Bytes;
use std::fmt;

use super::ChunkChecksum;

/// A fixed-size block of bytes read from a stream.
///
/// Every block of a stream holds exactly the configured chunk size except
/// possibly the last one, which may be shorter. Blocks are never empty when
/// produced by a reader.
///
/// # Example
///
/// ```
/// use chunksim::Block;
/// use bytes::Bytes;
///
/// let block = Block::new(Bytes::from_static(b"hello world"), 0, 0);
/// assert_eq!(block.len(), 11);
/// assert_eq!(block.checksum().value(), 1116);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The block data.
    pub data: Bytes,

    /// Zero-based position of this block in the stream.
    pub index: usize,

    /// Byte offset of the first byte of this block in the stream.
    pub offset: u64,
}

impl Block {
    /// Creates a new block.
    pub fn new(data: impl Into<Bytes>, index: usize, offset: u64) -> Self {
        Self {
            data: data.into(),
            index,
            offset,
        }
    }

    /// Returns the length of the block data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the block has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reduces the block to its checksum.
    pub fn checksum(&self) -> ChunkChecksum {
        ChunkChecksum::of(&self.data)
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the block as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the block and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block #{} ({} bytes @ {})",
            self.index,
            self.len(),
            self.offset
        )
    }
}
