//! Recursive spec discovery beneath a directory argument.
//!
//! A [`SpecDirectory`] is only a descriptor: nothing touches the filesystem
//! until [`SpecDirectory::spec_files`] is called. Discovery walks the tree
//! depth-first with entries sorted by file name at every level, so the same
//! tree always yields the same order.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::SpecFile;

/// Errors raised while walking a spec directory.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// An entry beneath the directory could not be read.
    #[error("failed to walk spec directory '{}': {source}", .directory.display())]
    Walk {
        /// Directory the walk started from.
        directory: PathBuf,
        /// Underlying walk failure (I/O error or symlink loop).
        #[source]
        source: walkdir::Error,
    },

    /// The target of a symbolic link beneath the directory could not be read.
    #[error("failed to inspect '{}': {source}", .path.display())]
    Inspect {
        /// Link whose target could not be inspected.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Controls which files a [`SpecDirectory`] yields.
///
/// The default yields every regular file beneath the directory.
///
/// # Examples
///
/// ```
/// use specset_core::DiscoveryOptions;
///
/// let options = DiscoveryOptions::default().with_suffix("_spec.js");
/// assert!(options.matches_file_name("user_spec.js"));
/// assert!(!options.matches_file_name("helper.js"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    /// Only yield files whose name ends with this suffix.
    #[serde(default)]
    pub suffix: Option<String>,
    /// Follow symbolic links while walking.
    #[serde(default)]
    pub follow_links: bool,
    /// Yield files and descend into directories whose name starts with `.`.
    #[serde(default = "default_include_hidden")]
    pub include_hidden: bool,
}

fn default_include_hidden() -> bool {
    true
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            suffix: None,
            follow_links: false,
            include_hidden: default_include_hidden(),
        }
    }
}

impl DiscoveryOptions {
    /// Restricts discovery to file names ending with `suffix`.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Returns `true` if a file called `name` passes the suffix filter.
    pub fn matches_file_name(&self, name: &str) -> bool {
        match &self.suffix {
            Some(suffix) => name.ends_with(suffix.as_str()),
            None => true,
        }
    }
}

/// A directory argument whose spec files are discovered recursively.
///
/// # Examples
///
/// ```
/// use specset_core::{DiscoveryOptions, SpecDirectory};
///
/// let root = tempfile::tempdir().unwrap();
/// std::fs::create_dir(root.path().join("nested")).unwrap();
/// std::fs::write(root.path().join("b_spec.js"), "").unwrap();
/// std::fs::write(root.path().join("nested/a_spec.js"), "").unwrap();
///
/// let dir = SpecDirectory::new(root.path());
/// let files = dir.spec_files(&DiscoveryOptions::default()).unwrap();
/// assert_eq!(files.len(), 2);
/// assert!(files.iter().all(|f| f.line().is_none()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDirectory {
    path: PathBuf,
}

impl SpecDirectory {
    /// Creates a descriptor for `path`. The directory is not read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory path, exactly as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discovers the spec files beneath this directory.
    ///
    /// Only regular files are returned. A symbolic link counts as a file when
    /// its target is a regular file, whether or not `follow_links` is set;
    /// `follow_links` only decides whether linked directories are descended.
    /// Dangling links are skipped. The directory itself and its
    /// subdirectories never appear as spec files.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Walk`] if the directory or any entry beneath
    /// it cannot be read, or [`DiscoveryError::Inspect`] if a link target
    /// cannot be inspected.
    pub fn spec_files(&self, options: &DiscoveryOptions) -> Result<Vec<SpecFile>, DiscoveryError> {
        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .follow_links(options.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| options.include_hidden || !is_hidden(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| DiscoveryError::Walk {
                directory: self.path.clone(),
                source,
            })?;

            let is_file = is_regular_file(&entry).map_err(|source| DiscoveryError::Inspect {
                path: entry.path().to_path_buf(),
                source,
            })?;
            if !is_file {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !options.matches_file_name(&name) {
                continue;
            }

            files.push(SpecFile::new(entry.into_path()));
        }

        debug!(
            directory = %self.path.display(),
            count = files.len(),
            "discovered spec files"
        );
        Ok(files)
    }
}

/// Unfollowed links report their own type, so stat the target instead.
fn is_regular_file(entry: &DirEntry) -> io::Result<bool> {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return Ok(true);
    }
    if !file_type.is_symlink() {
        return Ok(false);
    }
    match entry.path().metadata() {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}
