//! Additive checksums.
//!
//! Both checksums are plain byte sums. They are cheap and order-insensitive
//! within a block, and collide easily; they are not hashes.

use std::fmt;

/// Sum of the byte values of one block.
///
/// Bounded by `chunk_size * 255`, which fits in 32 bits for every accepted
/// chunk size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkChecksum(u32);

impl ChunkChecksum {
    /// Wraps a raw checksum value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Reduces a block of bytes to its checksum.
    ///
    /// # Example
    ///
    /// ```
    /// use chunksim::ChunkChecksum;
    ///
    /// assert_eq!(ChunkChecksum::of(&[1, 2, 3]).value(), 6);
    /// assert_eq!(ChunkChecksum::of(&[]).value(), 0);
    /// ```
    pub fn of(data: &[u8]) -> Self {
        Self(data.iter().map(|&b| u32::from(b)).sum())
    }

    /// Returns the raw checksum value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ChunkChecksum {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ChunkChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum of the byte values of a whole file.
///
/// Accumulated block by block so a file never has to be held in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileSum(u64);

impl FileSum {
    /// Wraps a raw sum value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Adds the bytes of `data` to the running sum.
    pub fn update(&mut self, data: &[u8]) {
        self.0 += data.iter().map(|&b| u64::from(b)).sum::<u64>();
    }

    /// Returns the raw sum value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for FileSum {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for FileSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
