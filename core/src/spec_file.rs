//! The specification unit: one runnable file, optionally scoped to a line.

use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single runnable spec file.
///
/// A spec file always has a path. When the user asked for a specific line
/// (`path:line` on the command line) the line is kept so the execution
/// engine can focus the run on the example at that line.
///
/// # Examples
///
/// ```
/// use specset_core::SpecFile;
///
/// let whole = SpecFile::new("spec/user_spec.js");
/// assert_eq!(whole.line(), None);
/// assert_eq!(whole.to_string(), "spec/user_spec.js");
///
/// let focused = SpecFile::with_line("spec/user_spec.js", 23).unwrap();
/// assert_eq!(focused.line().map(|l| l.get()), Some(23));
/// assert_eq!(focused.to_string(), "spec/user_spec.js:23");
///
/// // Line numbers are 1-based.
/// assert!(SpecFile::with_line("spec/user_spec.js", 0).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecFile {
    path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line: Option<NonZeroU32>,
}

impl SpecFile {
    /// Creates a spec file covering the whole file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            line: None,
        }
    }

    /// Creates a spec file scoped to `line`.
    ///
    /// Returns `None` when `line` is zero.
    pub fn with_line(path: impl Into<PathBuf>, line: u32) -> Option<Self> {
        let line = NonZeroU32::new(line)?;
        Some(Self::at_line(path, line))
    }

    /// Creates a spec file scoped to an already validated line number.
    pub fn at_line(path: impl Into<PathBuf>, line: NonZeroU32) -> Self {
        Self {
            path: path.into(),
            line: Some(line),
        }
    }

    /// Path of the spec file, exactly as it was given or discovered.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line the run is scoped to, if any.
    pub fn line(&self) -> Option<NonZeroU32> {
        self.line
    }

    /// Returns `true` if the run is scoped to a single line.
    pub fn is_focused(&self) -> bool {
        self.line.is_some()
    }
}

impl fmt::Display for SpecFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path.display(), line),
            None => write!(f, "{}", self.path.display()),
        }
    }
}
