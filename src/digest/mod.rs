//! File digests.
//!
//! A file's digest is the ordered list of its block checksums. The whole-file
//! variant collapses a file into a single [`FileTotal`].
//!
//! - [`DigestSequence`] - Per-block checksums in stream order
//! - [`digest_reader`] / [`digest_file`] / [`digest_bytes`] - Build a digest
//! - [`FileTotal`] / [`sum_reader`] / [`sum_file`] - Whole-file sum

mod sequence;
mod total;

pub use sequence::{DigestSequence, digest_bytes, digest_file, digest_reader};
pub use total::{FileTotal, sum_file, sum_reader};
