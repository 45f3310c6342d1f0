//! Strong hash implementations for whole-file identity.
//!
//! Additive sums collide easily; a BLAKE3 fingerprint confirms whether files
//! sharing a sum really hold the same bytes. Requires the `hash-blake3`
//! feature.
//!
//! - [`Blake3Hasher`] - BLAKE3 hash implementation

#[cfg(feature = "hash-blake3")]
mod blake3;

#[cfg(feature = "hash-blake3")]
pub use blake3::Blake3Hasher;
