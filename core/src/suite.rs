//! The run collection for one invocation.

use std::ops::Range;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::SpecFile;

/// How a group of spec files entered a [`Suite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addition {
    /// One spec file appended with [`Suite::add_spec_file`].
    Single {
        /// Position of the file in the suite.
        index: usize,
    },
    /// A batch appended with [`Suite::add_spec_files`].
    Batch {
        /// Positions the batch occupies in the suite. Empty for an empty batch.
        range: Range<usize>,
    },
}

/// Ordered, append-only collection of spec files to run.
///
/// Single files and batches both extend the same sequence, but each call is
/// recorded as an [`Addition`] so a directory's contents stay attributable
/// to one append. Duplicates are kept.
///
/// # Examples
///
/// ```
/// use specset_core::{Addition, SpecFile, Suite};
///
/// let mut suite = Suite::new();
/// suite.add_spec_file(SpecFile::new("a_spec.js"));
/// suite.add_spec_file(SpecFile::new("a_spec.js"));
/// suite.add_spec_files(Vec::new());
///
/// assert_eq!(suite.len(), 2);
/// assert_eq!(suite.additions().len(), 3);
/// assert_eq!(suite.additions()[2], Addition::Batch { range: 2..2 });
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suite {
    spec_files: Vec<SpecFile>,
    additions: Vec<Addition>,
}

impl Suite {
    /// Creates an empty suite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single spec file.
    pub fn add_spec_file(&mut self, spec_file: SpecFile) {
        let index = self.spec_files.len();
        debug!(spec = %spec_file, index, "adding spec file");
        self.spec_files.push(spec_file);
        self.additions.push(Addition::Single { index });
    }

    /// Appends a batch of spec files as one addition, keeping their order.
    pub fn add_spec_files(&mut self, spec_files: impl IntoIterator<Item = SpecFile>) {
        let start = self.spec_files.len();
        self.spec_files.extend(spec_files);
        let end = self.spec_files.len();
        debug!(start, count = end - start, "adding spec file batch");
        self.additions.push(Addition::Batch { range: start..end });
    }

    /// All spec files, in run order.
    pub fn spec_files(&self) -> &[SpecFile] {
        &self.spec_files
    }

    /// Every append call made on this suite, in call order.
    pub fn additions(&self) -> &[Addition] {
        &self.additions
    }

    /// Spec files contributed by `addition`.
    ///
    /// Returns `None` if `addition` points outside this suite, e.g. when it
    /// was taken from another suite.
    pub fn files_of(&self, addition: &Addition) -> Option<&[SpecFile]> {
        match addition {
            Addition::Single { index } => self.spec_files.get(*index).map(std::slice::from_ref),
            Addition::Batch { range } => self.spec_files.get(range.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.spec_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spec_files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpecFile> {
        self.spec_files.iter()
    }

    /// Consumes the suite, returning the spec files in run order.
    pub fn into_spec_files(self) -> Vec<SpecFile> {
        self.spec_files
    }
}

impl<'a> IntoIterator for &'a Suite {
    type Item = &'a SpecFile;
    type IntoIter = std::slice::Iter<'a, SpecFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.spec_files.iter()
    }
}

impl IntoIterator for Suite {
    type Item = SpecFile;
    type IntoIter = std::vec::IntoIter<SpecFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.spec_files.into_iter()
    }
}

/// Serializes as the ordered list of spec files; attribution is not part of
/// the wire shape.
impl Serialize for Suite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.spec_files.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(path: &str) -> SpecFile {
        SpecFile::new(path)
    }

    #[test]
    fn test_new_suite_is_empty() {
        let suite = Suite::new();
        assert!(suite.is_empty());
        assert!(suite.additions().is_empty());
    }

    #[test]
    fn test_single_and_batch_preserve_arrival_order() {
        let mut suite = Suite::new();
        suite.add_spec_file(SpecFile::with_line("a.js", 10).unwrap());
        suite.add_spec_file(spec("b.js"));
        suite.add_spec_files(vec![spec("dir/c.js"), spec("dir/d.js")]);

        let paths: Vec<String> = suite.iter().map(|s| s.to_string()).collect();
        assert_eq!(paths, vec!["a.js:10", "b.js", "dir/c.js", "dir/d.js"]);
    }

    #[test]
    fn test_batch_is_recorded_as_one_addition() {
        let mut suite = Suite::new();
        suite.add_spec_file(spec("a.js"));
        suite.add_spec_files(vec![spec("dir/c.js"), spec("dir/d.js")]);

        assert_eq!(
            suite.additions(),
            &[
                Addition::Single { index: 0 },
                Addition::Batch { range: 1..3 },
            ]
        );
        assert_eq!(
            suite.files_of(&suite.additions()[1]),
            Some(&[spec("dir/c.js"), spec("dir/d.js")][..])
        );
    }

    #[test]
    fn test_files_of_foreign_addition_is_none() {
        let empty = Suite::new();
        assert_eq!(empty.files_of(&Addition::Single { index: 0 }), None);
        assert_eq!(empty.files_of(&Addition::Batch { range: 1..3 }), None);
        assert_eq!(empty.files_of(&Addition::Batch { range: 0..0 }), Some(&[][..]));

        let mut suite = Suite::new();
        suite.add_spec_file(spec("a.js"));
        assert_eq!(
            suite.files_of(&Addition::Single { index: 0 }),
            Some(&[spec("a.js")][..])
        );
        assert_eq!(suite.files_of(&Addition::Batch { range: 0..2 }), None);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut suite = Suite::new();
        suite.add_spec_file(spec("a.js"));
        suite.add_spec_files(vec![spec("a.js")]);
        assert_eq!(suite.len(), 2);
        assert_eq!(suite.spec_files()[0], suite.spec_files()[1]);
    }

    #[test]
    fn test_serializes_as_ordered_list() {
        let mut suite = Suite::new();
        suite.add_spec_file(SpecFile::with_line("a.js", 3).unwrap());
        suite.add_spec_files(vec![spec("b.js")]);

        let json = serde_json::to_value(&suite).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "path": "a.js", "line": 3 }, { "path": "b.js" }])
        );
    }
}
