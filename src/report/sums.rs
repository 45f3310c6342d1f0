//! Whole-file sum report.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::chunk::{FileSum, Fingerprint};
use crate::digest::FileTotal;
use crate::dispatch::DigestTable;

/// Input paths sharing one whole-file sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumGroup {
    /// The shared sum.
    pub sum: FileSum,
    /// Paths in input order.
    pub paths: Vec<PathBuf>,
    /// Whether every member also has the same fingerprint. `None` when
    /// fingerprints were not computed.
    pub identical: Option<bool>,
}

/// Totals of a whole-file run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SumReport {
    /// Sum over every successfully read input.
    pub total: u128,
    /// Sums shared by two or more inputs, ascending by sum.
    pub groups: Vec<SumGroup>,
}

impl SumReport {
    /// Builds the report for `paths` from a finished table.
    ///
    /// Each input position counts once, so a path given twice contributes
    /// twice. Failed paths are left out entirely.
    pub fn from_table(paths: &[PathBuf], table: &DigestTable<FileTotal>) -> Self {
        let mut total = 0u128;
        let mut by_sum: BTreeMap<FileSum, Vec<(&PathBuf, Option<Fingerprint>)>> = BTreeMap::new();

        for path in paths {
            let Some(file) = table.get(path) else {
                continue;
            };
            total += u128::from(file.sum.value());
            by_sum
                .entry(file.sum)
                .or_default()
                .push((path, file.fingerprint));
        }

        let groups = by_sum
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(sum, members)| {
                let identical = members
                    .iter()
                    .map(|(_, fp)| *fp)
                    .collect::<Option<Vec<_>>>()
                    .map(|fps| fps.windows(2).all(|w| w[0] == w[1]));
                SumGroup {
                    sum,
                    paths: members.into_iter().map(|(p, _)| p.clone()).collect(),
                    identical,
                }
            })
            .collect();

        Self { total, groups }
    }
}

impl fmt::Display for SumGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<_> = self.paths.iter().map(|p| p.display().to_string()).collect();
        write!(
            f,
            "Files with the same sum ({}): [{}]",
            self.sum,
            paths.join(", ")
        )?;
        match self.identical {
            Some(true) => write!(f, " identical"),
            Some(false) => write!(f, " collision"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for SumReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.total)?;
        for group in &self.groups {
            writeln!(f, "{}", group)?;
        }
        Ok(())
    }
}
