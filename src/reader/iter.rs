//! Block reader - splits a byte stream into fixed-size blocks.
//!
//! # Example
//!
//! ```
//! use chunksim::BlockReader;
//! use std::io::Cursor;
//!
//! let data = vec![7u8; 2500];
//! let blocks: Vec<_> = BlockReader::new(Cursor::new(data), 1024)
//!     .collect::<Result<_, _>>()?;
//!
//! let lens: Vec<_> = blocks.iter().map(|b| b.len()).collect();
//! assert_eq!(lens, vec![1024, 1024, 452]);
//! # Ok::<(), chunksim::DigestError>(())
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use bytes::Bytes;

use crate::buffer::Buffer;
use crate::chunk::Block;
use crate::config::check_chunk_size;
use crate::error::DigestError;

/// An iterator that yields fixed-size blocks from a reader.
///
/// Each block holds exactly `chunk_size` bytes except the last one, which
/// holds whatever remains. Short reads from the underlying source are
/// absorbed, so block boundaries depend only on the byte layout of the
/// stream. An empty stream yields no blocks.
///
/// The iterator is lazy, finite and not restartable. After an error it
/// yields nothing further. The reader is released when the iterator is
/// dropped, whether or not it ran to completion.
pub struct BlockReader<R> {
    reader: R,
    buffer: Buffer,
    index: usize,
    offset: u64,
    finished: bool,
}

impl<R: Read> BlockReader<R> {
    /// Creates a block reader over `reader`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero or above [`MAX_CHUNK_SIZE`]. Entry
    /// points taking a raw size check it first and return
    /// [`DigestError::InvalidConfig`] instead.
    ///
    /// [`MAX_CHUNK_SIZE`]: crate::MAX_CHUNK_SIZE
    pub fn new(reader: R, chunk_size: usize) -> Self {
        assert!(
            check_chunk_size(chunk_size).is_ok(),
            "chunk_size must be in 1..=MAX_CHUNK_SIZE"
        );
        Self {
            reader,
            buffer: Buffer::take(chunk_size),
            index: 0,
            offset: 0,
            finished: false,
        }
    }

    /// Returns the configured block size.
    pub fn chunk_size(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of bytes yielded so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Consumes the block reader and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads until the buffer is full or the stream ends.
    fn fill(&mut self) -> std::io::Result<usize> {
        let buf = self.buffer.as_mut_slice();
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for BlockReader<R> {
    type Item = Result<Block, DigestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.fill() {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(n) => {
                if n < self.buffer.len() {
                    // A short fill only happens at end of stream.
                    self.finished = true;
                }
                let block = Block::new(
                    Bytes::copy_from_slice(&self.buffer.as_slice()[..n]),
                    self.index,
                    self.offset,
                );
                self.index += 1;
                self.offset += n as u64;
                Some(Ok(block))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Opens `path` and returns a block reader over it.
///
/// Errors carry the path. An out-of-range `chunk_size` is rejected before
/// the file is opened.
pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> Result<BlockReader<File>, DigestError> {
    check_chunk_size(chunk_size)?;
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DigestError::from(e).with_path(path))?;
    Ok(BlockReader::new(file, chunk_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most `step` bytes per read call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Yields `good` bytes, then fails.
    struct Failing {
        good: usize,
    }

    impl Read for Failing {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.good == 0 {
                return Err(std::io::Error::other("disk on fire"));
            }
            let n = self.good.min(buf.len());
            buf[..n].fill(1);
            self.good -= n;
            Ok(n)
        }
    }

    fn lens<R: Read>(reader: BlockReader<R>) -> Vec<usize> {
        reader.map(|b| b.unwrap().len()).collect()
    }

    #[test]
    fn test_empty_stream() {
        let reader = BlockReader::new(Cursor::new(Vec::<u8>::new()), 1024);
        assert!(lens(reader).is_empty());
    }

    #[test]
    fn test_exact_multiple() {
        let reader = BlockReader::new(Cursor::new(vec![0u8; 2048]), 1024);
        assert_eq!(lens(reader), vec![1024, 1024]);
    }

    #[test]
    fn test_short_tail() {
        let reader = BlockReader::new(Cursor::new(vec![0u8; 3000]), 1024);
        assert_eq!(lens(reader), vec![1024, 1024, 952]);
    }

    #[test]
    fn test_short_reads_do_not_move_boundaries() {
        let data: Vec<u8> = (0..3000).map(|i| (i % 251) as u8).collect();
        let whole: Vec<_> = BlockReader::new(Cursor::new(&data), 1024)
            .map(|b| b.unwrap())
            .collect();
        let trickled: Vec<_> = BlockReader::new(Trickle { data: &data, step: 7 }, 1024)
            .map(|b| b.unwrap())
            .collect();
        assert_eq!(whole, trickled);
    }

    #[test]
    fn test_indices_and_offsets() {
        let reader = BlockReader::new(Cursor::new(vec![0u8; 250]), 100);
        let blocks: Vec<_> = reader.map(|b| b.unwrap()).collect();
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.index, i);
            assert_eq!(block.offset, (i * 100) as u64);
        }
        assert_eq!(blocks.last().unwrap().end(), 250);
    }

    #[test]
    fn test_error_stops_iteration() {
        let mut reader = BlockReader::new(Failing { good: 10 }, 4);
        assert_eq!(reader.next().unwrap().unwrap().len(), 4);
        assert_eq!(reader.next().unwrap().unwrap().len(), 4);
        // Partial fill then error: the error wins, no truncated block.
        assert!(matches!(reader.next(), Some(Err(DigestError::Io { .. }))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let err = open("/definitely/not/here.bin", 1024).err().unwrap();
        assert!(err.path().is_some());
    }

    #[test]
    #[should_panic]
    fn test_zero_chunk_size_panics() {
        let _ = BlockReader::new(Cursor::new(vec![1u8]), 0);
    }

    #[test]
    #[should_panic]
    fn test_oversized_chunk_size_panics() {
        let _ = BlockReader::new(Cursor::new(vec![1u8]), crate::MAX_CHUNK_SIZE + 1);
    }

    #[test]
    fn test_open_rejects_bad_chunk_size() {
        for chunk_size in [0, crate::MAX_CHUNK_SIZE + 1] {
            let err = open("/definitely/not/here.bin", chunk_size).err().unwrap();
            assert!(matches!(err, DigestError::InvalidConfig { .. }));
        }
    }
}
