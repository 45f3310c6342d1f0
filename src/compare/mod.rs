//! Positional similarity between digests.

use crate::digest::DigestSequence;

/// Percentage of positions at which two digests hold the same checksum.
///
/// Only the first `n = min(a.len(), b.len())` positions are compared; a
/// longer digest's tail is ignored. Returns `100 * matches / n`, or `0.0`
/// when `n` is zero (either digest empty).
///
/// The result is always in `[0, 100]` and symmetric in its arguments.
///
/// # Example
///
/// ```
/// use chunksim::{DigestSequence, similarity};
///
/// let a = DigestSequence::from(vec![100, 200]);
/// let b = DigestSequence::from(vec![100, 999, 300]);
/// assert_eq!(similarity(&a, &b), 50.0);
/// ```
pub fn similarity(a: &DigestSequence, b: &DigestSequence) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }

    let matches = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x == y)
        .count();

    matches as f64 / n as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[u32]) -> DigestSequence {
        DigestSequence::from(values.to_vec())
    }

    #[test]
    fn test_self_similarity() {
        let a = seq(&[3, 1, 4, 1, 5]);
        assert_eq!(similarity(&a, &a), 100.0);
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(similarity(&seq(&[1024]), &seq(&[2048])), 0.0);
    }

    #[test]
    fn test_tail_ignored() {
        let a = seq(&[100, 200]);
        let b = seq(&[100, 999, 300]);
        assert_eq!(similarity(&a, &b), 50.0);

        let c = seq(&[1, 2, 3]);
        let d = seq(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(similarity(&c, &d), 100.0);
    }

    #[test]
    fn test_symmetric() {
        let a = seq(&[1, 2, 3, 4]);
        let b = seq(&[1, 0, 3]);
        assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn test_empty_is_zero() {
        let empty = DigestSequence::new();
        assert_eq!(similarity(&empty, &empty), 0.0);
        assert_eq!(similarity(&empty, &seq(&[1, 2])), 0.0);
        assert_eq!(similarity(&seq(&[1, 2]), &empty), 0.0);
    }

    #[test]
    fn test_bounded() {
        let a = seq(&[1, 2, 3, 4, 5, 6, 7]);
        let b = seq(&[1, 9, 3, 9, 5]);
        let score = similarity(&a, &b);
        assert!((0.0..=100.0).contains(&score));
        assert!((score - 60.0).abs() < 1e-9);
    }
}
