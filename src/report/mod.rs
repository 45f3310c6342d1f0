//! Result reporting.
//!
//! - [`pairwise`] / [`PairScore`] - Similarity of every unordered pair
//! - [`SumReport`] / [`SumGroup`] - Whole-file totals and shared sums

mod pairs;
mod sums;

pub use pairs::{PairScore, base_name, pairwise};
pub use sums::{SumGroup, SumReport};
