//! Internal buffer management.
//!
//! This module provides a thread-local pool of read buffers so that a pool
//! worker digesting many files reuses one allocation. It is an
//! implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
