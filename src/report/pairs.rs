//! Pairwise similarity report.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::compare::similarity;
use crate::digest::DigestSequence;
use crate::dispatch::DigestTable;

/// The similarity of one pair of input paths.
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    /// Position of the first path in the input.
    pub left_index: usize,
    /// The first path.
    pub left: PathBuf,
    /// Position of the second path in the input (always greater).
    pub right_index: usize,
    /// The second path.
    pub right: PathBuf,
    /// Percentage in `[0, 100]`.
    pub score: f64,
}

impl fmt::Display for PairScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Similarity between {} and {}: {:.5}%",
            base_name(&self.left),
            base_name(&self.right),
            self.score
        )
    }
}

/// Returns the last component of `path`, or the whole path if it has none.
pub fn base_name(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}

/// Scores every unordered pair of `paths`.
///
/// Pairs come out as `(0, 1), (0, 2), ..., (1, 2), ...` following input
/// positions. A path missing from `table` scores as an empty digest, so
/// every pair it is part of scores 0.
pub fn pairwise(paths: &[PathBuf], table: &DigestTable<DigestSequence>) -> Vec<PairScore> {
    let empty = DigestSequence::new();
    let digests: Vec<&DigestSequence> = paths
        .iter()
        .map(|path| table.get(path).unwrap_or(&empty))
        .collect();

    let count = paths.len();
    let mut scores = Vec::with_capacity(count * count.saturating_sub(1) / 2);
    for i in 0..count {
        for j in i + 1..count {
            scores.push(PairScore {
                left_index: i,
                left: paths[i].clone(),
                right_index: j,
                right: paths[j].clone(),
                score: similarity(digests[i], digests[j]),
            });
        }
    }
    scores
}
