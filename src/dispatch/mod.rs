//! Parallel digest dispatch.
//!
//! - [`Dispatcher`] - Fans files out across threads and gathers the results
//! - [`DigestTable`] - Path-keyed results, built by a single consumer
//! - [`Failure`] - A file that could not be digested

mod table;
mod worker;

pub use table::{DigestTable, Failure};
pub use worker::{Dispatcher, digest_all, sum_all};
