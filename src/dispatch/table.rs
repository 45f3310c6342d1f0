//! The digest table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DigestError;

/// A file whose job failed.
#[derive(Debug)]
pub struct Failure {
    /// Position of the path in the dispatched input.
    pub index: usize,
    /// The path as given.
    pub path: PathBuf,
    /// Why it failed.
    pub error: DigestError,
}

/// Formats as `Error processing file <path>: <cause>`, naming the path once.
impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error processing file {}: ", self.path.display())?;
        match &self.error {
            DigestError::Io { source, .. } => write!(f, "{}", source),
            other => write!(f, "{}", other),
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    index: usize,
    value: T,
}

/// Results of a dispatch, keyed by path.
///
/// A path is either present with a complete value or absent; failures are
/// listed separately and never stand in as values. Only the dispatcher's
/// collecting thread writes to a table, and only until dispatch returns.
///
/// When the same path was dispatched more than once, the first result to
/// arrive is kept.
#[derive(Debug)]
pub struct DigestTable<T> {
    entries: HashMap<PathBuf, Slot<T>>,
    order: Vec<PathBuf>,
    failures: Vec<Failure>,
    dispatched: usize,
}

impl<T> DigestTable<T> {
    pub(crate) fn with_capacity(dispatched: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(dispatched),
            order: Vec::new(),
            failures: Vec::new(),
            dispatched,
        }
    }

    /// Records the outcome of one job.
    pub(crate) fn record(&mut self, index: usize, path: &Path, result: Result<T, DigestError>) {
        match result {
            Ok(value) => match self.entries.entry(path.to_path_buf()) {
                Entry::Vacant(slot) => {
                    slot.insert(Slot { index, value });
                }
                Entry::Occupied(_) => {
                    debug!(path = %path.display(), index, "duplicate path, keeping first result");
                }
            },
            Err(error) => {
                warn!(path = %path.display(), error = %error, "failed to digest file");
                self.failures.push(Failure {
                    index,
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }

    /// Freezes the table once every job has reported.
    pub(crate) fn finish(mut self) -> Self {
        let mut order: Vec<_> = self
            .entries
            .iter()
            .map(|(path, slot)| (slot.index, path.clone()))
            .collect();
        order.sort_unstable_by_key(|(index, _)| *index);
        self.order = order.into_iter().map(|(_, path)| path).collect();
        self.failures.sort_by_key(|f| f.index);
        self
    }

    /// Returns the value for `path`, if its job succeeded.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&T> {
        self.entries.get(path.as_ref()).map(|slot| &slot.value)
    }

    /// Returns true if `path` has a value.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Returns the number of distinct paths with a value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no path has a value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of jobs that were dispatched.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Returns the failed jobs in input order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Iterates over successful entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &T)> {
        self.order.iter().filter_map(|path| {
            self.entries
                .get(path)
                .map(|slot| (path.as_path(), &slot.value))
        })
    }
}

impl<T> FromIterator<(PathBuf, T)> for DigestTable<T> {
    fn from_iter<I: IntoIterator<Item = (PathBuf, T)>>(iter: I) -> Self {
        let mut table = DigestTable::with_capacity(0);
        for (index, (path, value)) in iter.into_iter().enumerate() {
            table.record(index, &path, Ok(value));
            table.dispatched += 1;
        }
        table.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_get() {
        let mut table = DigestTable::with_capacity(2);
        table.record(1, Path::new("b"), Ok(2));
        table.record(0, Path::new("a"), Ok(1));
        let table = table.finish();

        assert_eq!(table.get("a"), Some(&1));
        assert_eq!(table.get("b"), Some(&2));
        assert_eq!(table.len(), 2);
        let order: Vec<_> = table.iter().map(|(p, _)| p.to_path_buf()).collect();
        assert_eq!(order, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }

    #[test]
    fn test_failure_is_absent() {
        let mut table: DigestTable<u32> = DigestTable::with_capacity(1);
        table.record(
            0,
            Path::new("gone"),
            Err(std::io::Error::other("nope").into()),
        );
        let table = table.finish();

        assert!(table.get("gone").is_none());
        assert!(table.is_empty());
        assert_eq!(table.failures().len(), 1);
        assert_eq!(table.failures()[0].path, PathBuf::from("gone"));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut table = DigestTable::with_capacity(2);
        table.record(1, Path::new("a"), Ok("late"));
        table.record(0, Path::new("a"), Ok("later"));
        let table = table.finish();

        assert_eq!(table.get("a"), Some(&"late"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.dispatched(), 2);
    }

    #[test]
    fn test_from_iter() {
        let table: DigestTable<u8> = vec![(PathBuf::from("x"), 1), (PathBuf::from("y"), 2)]
            .into_iter()
            .collect();
        assert_eq!(table.dispatched(), 2);
        assert_eq!(table.get("y"), Some(&2));
    }

    #[test]
    fn test_failure_display_names_path_once() {
        let mut table: DigestTable<u32> = DigestTable::with_capacity(2);
        table.record(
            0,
            Path::new("dir/gone.bin"),
            Err(DigestError::from(std::io::Error::other("nope")).with_path("dir/gone.bin")),
        );
        table.record(
            1,
            Path::new("boom.bin"),
            Err(DigestError::WorkerPanicked {
                path: PathBuf::from("boom.bin"),
            }),
        );
        let table = table.finish();

        let lines: Vec<_> = table.failures().iter().map(|f| f.to_string()).collect();
        assert_eq!(lines[0], "Error processing file dir/gone.bin: nope");
        assert_eq!(lines[0].matches("gone.bin").count(), 1);
        assert!(lines[1].starts_with("Error processing file boom.bin: worker thread panicked"));
    }
}
