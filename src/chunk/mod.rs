//! Chunk types.
//!
//! - [`Block`] - Fixed-size slice of a file with its position
//! - [`ChunkChecksum`] - Additive checksum of one block
//! - [`FileSum`] - Additive checksum of a whole file
//! - [`Fingerprint`] - 32-byte BLAKE3 hash of a whole file

mod checksum;
mod data;
mod fingerprint;

pub use checksum::{ChunkChecksum, FileSum};
pub use data::Block;
pub use fingerprint::Fingerprint;
