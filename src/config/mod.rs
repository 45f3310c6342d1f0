//! Configuration for digesting and dispatch.
//!
//! - [`DigestConfig`] - Chunk size and dispatch strategy
//! - [`Strategy`] - How files are fanned out across threads

use crate::error::DigestError;

/// Default chunk size (1 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Largest accepted chunk size (16 MiB).
///
/// Keeps `chunk_size * 255` inside a `u32` checksum.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Pool size used when the number of processing units cannot be queried.
pub const FALLBACK_WORKERS: usize = 4;

/// How the dispatcher fans work out across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One thread per input path.
    PerFile,
    /// A bounded pool of workers pulling paths from a shared job queue.
    Pool {
        /// Number of worker threads.
        workers: usize,
    },
}

impl Strategy {
    /// A pool sized to the available processing units.
    pub fn pool() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_WORKERS);
        Strategy::Pool { workers }
    }

    /// A pool with an explicit number of workers.
    pub const fn with_workers(workers: usize) -> Self {
        Strategy::Pool { workers }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::pool()
    }
}

/// Configuration for chunked digests.
///
/// The chunk size must be non-zero and at most [`MAX_CHUNK_SIZE`]. A pool
/// strategy needs at least one worker.
///
/// # Example
///
/// ```
/// use chunksim::{DigestConfig, Strategy};
///
/// let config = DigestConfig::new(4096)?
///     .with_strategy(Strategy::with_workers(2));
/// assert_eq!(config.chunk_size(), 4096);
/// # Ok::<(), chunksim::DigestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigestConfig {
    chunk_size: usize,
    strategy: Strategy,
}

impl DigestConfig {
    /// Creates a new configuration with the given chunk size.
    ///
    /// Returns error if the size is zero or above [`MAX_CHUNK_SIZE`].
    pub fn new(chunk_size: usize) -> Result<Self, DigestError> {
        let config = Self {
            chunk_size,
            strategy: Strategy::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`DigestConfig::validate`] to check it.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the dispatch strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the dispatch strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), DigestError> {
        check_chunk_size(self.chunk_size)?;

        if let Strategy::Pool { workers: 0 } = self.strategy {
            return Err(DigestError::InvalidConfig {
                message: "worker pool needs at least one worker",
            });
        }

        Ok(())
    }
}

/// Checks that a block size is non-zero and at most [`MAX_CHUNK_SIZE`].
pub(crate) fn check_chunk_size(chunk_size: usize) -> Result<(), DigestError> {
    if chunk_size == 0 {
        return Err(DigestError::InvalidConfig {
            message: "chunk size must be non-zero",
        });
    }

    if chunk_size > MAX_CHUNK_SIZE {
        return Err(DigestError::InvalidConfig {
            message: "chunk size cannot exceed 16 MiB",
        });
    }

    Ok(())
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            strategy: Strategy::default(),
        }
    }
}
