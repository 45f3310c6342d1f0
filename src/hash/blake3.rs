//! BLAKE3-based file fingerprinting.

use crate::chunk::Fingerprint;

/// An incremental BLAKE3 hasher producing [`Fingerprint`]s.
#[derive(Debug, Clone, Default)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    /// Feeds more data into the hasher.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalizes and returns the fingerprint.
    pub fn finalize(&self) -> Fingerprint {
        Fingerprint::new(self.state.finalize().into())
    }

    /// Hashes data in one shot.
    pub fn hash(data: &[u8]) -> Fingerprint {
        Fingerprint::new(blake3::hash(data).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let a = Blake3Hasher::hash(b"hello world");
        let b = Blake3Hasher::hash(b"hello world");
        assert_eq!(a, b);
        assert_ne!(a, Blake3Hasher::hash(b"hello world!"));
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hasher.finalize(), Blake3Hasher::hash(b"hello world"));
    }

    #[test]
    fn test_same_sum_different_fingerprint() {
        // Both sum to 3.
        assert_ne!(Blake3Hasher::hash(&[1, 2]), Blake3Hasher::hash(&[2, 1]));
    }
}
