//! Fixed-size block reading.
//!
//! - [`BlockReader`] - Iterator yielding [`Block`](crate::Block)s from any
//!   [`std::io::Read`] source
//! - [`open`] - Opens a file path as a `BlockReader`

mod iter;

pub use iter::{BlockReader, open};
