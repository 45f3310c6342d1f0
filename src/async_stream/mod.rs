//! Async streaming support for digests.
//!
//! This module reads fixed-size blocks through the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! - [`blocks_async`] - Creates an async stream of blocks from an async reader
//! - [`digest_async`] - Builds a digest from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{BlockStream, blocks_async, digest_async};
