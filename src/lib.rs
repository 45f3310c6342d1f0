//! chunksim
//!
//! Fixed-size chunk checksums and positional similarity for many files.
//!
//! `chunksim` splits each input file into fixed-size blocks, reduces every
//! block to an additive checksum, and compares the resulting digests
//! position by position. Files are digested in parallel and gathered into a
//! single table before any comparison runs.
//!
//! - [`BlockReader`] - Read bytes → yield fixed-size blocks
//! - [`digest_file`] - Blocks → [`DigestSequence`]
//! - [`Dispatcher`] - Many files → [`DigestTable`], one thread per file or a
//!   bounded worker pool
//! - [`similarity`] / [`pairwise`] - Digests → percentage scores
//! - [`sum_file`] / [`SumReport`] - Whole-file sums and shared-sum groups
//!
//! Checksums are plain byte sums. They are cheap and collide easily; they
//! are not hashes.
//!
//! # Sync
//!
//! ```no_run
//! use std::path::PathBuf;
//! use chunksim::{DigestConfig, digest_all, pairwise};
//!
//! let paths = vec![PathBuf::from("a.bin"), PathBuf::from("b.bin")];
//! let config = DigestConfig::default();
//!
//! let table = digest_all(&paths, &config);
//! for score in pairwise(&paths, &table) {
//!     println!("{}", score);
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use chunksim::digest_async;
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), chunksim::DigestError> {
//!     let digest = digest_async(reader, 1024).await?;
//!     println!("{} blocks", digest.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod compare;
mod config;
mod digest;
mod dispatch;
mod error;
mod reader;
mod report;

mod buffer; // internal (thread-local reuse)
mod hash; // internal blake3 impl

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use chunk::{Block, ChunkChecksum, FileSum, Fingerprint};
pub use compare::similarity;
pub use config::{DEFAULT_CHUNK_SIZE, DigestConfig, MAX_CHUNK_SIZE, Strategy};
pub use digest::{
    DigestSequence, FileTotal, digest_bytes, digest_file, digest_reader, sum_file, sum_reader,
};
pub use dispatch::{DigestTable, Dispatcher, Failure, digest_all, sum_all};
pub use error::{DigestError, Result};
pub use reader::{BlockReader, open};
pub use report::{PairScore, SumGroup, SumReport, base_name, pairwise};

#[cfg(feature = "async-io")]
pub use async_stream::{BlockStream, blocks_async, digest_async};
