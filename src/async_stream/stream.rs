//! Async stream adapter for block reading.
//!
//! Yields exactly the blocks [`BlockReader`](crate::BlockReader) would yield
//! for the same bytes.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use chunksim::blocks_async;
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), chunksim::DigestError> {
//!     let mut stream = blocks_async(reader, 1024);
//!
//!     while let Some(block) = stream.next().await {
//!         let block = block?;
//!         println!("block {}: {}", block.index, block.checksum());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::chunk::Block;
use crate::config::check_chunk_size;
use crate::digest::DigestSequence;
use crate::error::DigestError;

pin_project! {
    /// A stream that yields fixed-size blocks from an async reader.
    ///
    /// Partial reads accumulate until a block is full or the reader reports
    /// end of stream, so boundaries never depend on how the reader splits
    /// its output.
    pub struct BlockStream<R> {
        #[pin]
        reader: R,
        buffer: Vec<u8>,
        filled: usize,
        index: usize,
        offset: u64,
        finished: bool,
    }
}

impl<R: AsyncRead> BlockStream<R> {
    /// Creates a block stream over `reader`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero or above
    /// [`MAX_CHUNK_SIZE`](crate::MAX_CHUNK_SIZE).
    pub fn new(reader: R, chunk_size: usize) -> Self {
        assert!(
            check_chunk_size(chunk_size).is_ok(),
            "chunk_size must be in 1..=MAX_CHUNK_SIZE"
        );
        Self {
            reader,
            buffer: vec![0u8; chunk_size],
            filled: 0,
            index: 0,
            offset: 0,
            finished: false,
        }
    }
}

impl<R: AsyncRead> Stream for BlockStream<R> {
    type Item = Result<Block, DigestError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            if *this.filled == this.buffer.len() {
                break;
            }

            let buf = &mut this.buffer[*this.filled..];
            match this.reader.as_mut().poll_read(cx, buf) {
                // Bytes read so far stay in `buffer` across wakeups.
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    break;
                }
                Poll::Ready(Ok(n)) => *this.filled += n,
            }
        }

        let len = *this.filled;
        if len == 0 {
            return Poll::Ready(None);
        }

        let block = Block::new(
            Bytes::copy_from_slice(&this.buffer[..len]),
            *this.index,
            *this.offset,
        );
        *this.filled = 0;
        *this.index += 1;
        *this.offset += len as u64;
        Poll::Ready(Some(Ok(block)))
    }
}

/// Creates a block stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use chunksim::blocks_async;
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = blocks_async(file.compat(), 1024);
/// ```
pub fn blocks_async<R: AsyncRead>(reader: R, chunk_size: usize) -> BlockStream<R> {
    BlockStream::new(reader, chunk_size)
}

/// Builds the digest of everything an async reader yields.
///
/// On failure no partial digest is returned. An out-of-range `chunk_size`
/// returns [`DigestError::InvalidConfig`].
pub async fn digest_async<R: AsyncRead + Unpin>(
    reader: R,
    chunk_size: usize,
) -> Result<DigestSequence, DigestError> {
    check_chunk_size(chunk_size)?;
    let mut stream = BlockStream::new(reader, chunk_size);
    let mut digest = DigestSequence::new();
    while let Some(block) = std::future::poll_fn(|cx| Pin::new(&mut stream).poll_next(cx)).await {
        digest.push(block?.checksum());
    }
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::digest_bytes;
    use std::io;

    #[tokio::test]
    async fn test_block_stream_empty() {
        let reader: &[u8] = &[];
        let stream = BlockStream::new(reader, 1024);
        let blocks: Vec<_> = futures_util::StreamExt::collect(stream).await;
        assert!(blocks.is_empty());
    }

    #[tokio::test]
    async fn test_block_stream_sizes() {
        let data: Vec<u8> = vec![0xAAu8; 3000];
        let reader: &[u8] = &data;
        let stream = BlockStream::new(reader, 1024);

        let blocks: Vec<_> = futures_util::StreamExt::collect(stream).await;
        let blocks: Vec<_> = blocks.into_iter().collect::<Result<Vec<_>, _>>().unwrap();

        let lens: Vec<_> = blocks.iter().map(|b: &Block| b.len()).collect();
        assert_eq!(lens, vec![1024, 1024, 952]);
    }

    #[tokio::test]
    async fn test_digest_async_matches_sync() {
        let data: Vec<u8> = (0..5000).map(|i| (i % 256) as u8).collect();
        let reader: &[u8] = &data;
        let digest = digest_async(reader, 1024).await.unwrap();
        assert_eq!(digest, digest_bytes(&data, 1024).unwrap());
    }

    /// Yields `good` bytes, then fails.
    struct Failing {
        good: usize,
    }

    impl AsyncRead for Failing {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut [u8],
        ) -> Poll<io::Result<usize>> {
            if self.good == 0 {
                return Poll::Ready(Err(io::Error::other("boom")));
            }
            let n = self.good.min(buf.len());
            buf[..n].fill(9);
            self.good -= n;
            Poll::Ready(Ok(n))
        }
    }

    #[tokio::test]
    async fn test_digest_async_read_failure_midway() {
        let result = digest_async(Failing { good: 3000 }, 1024).await;
        assert!(matches!(result, Err(DigestError::Io { .. })));
    }

    #[tokio::test]
    async fn test_digest_async_rejects_bad_chunk_size() {
        let reader: &[u8] = &[1, 2, 3];
        let result = digest_async(reader, 0).await;
        assert!(matches!(result, Err(DigestError::InvalidConfig { .. })));
    }
}
