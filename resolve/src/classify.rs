//! Argument classification against the filesystem.
//!
//! A token is one of three mutually exclusive shapes, checked in priority
//! order: a `path:line` reference to an existing file, an existing file, or
//! an existing directory. Anything else is [`ArgumentKind::Unrecognized`].

use std::fs;
use std::io::{self, ErrorKind};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{ResolveError, Result};

/// `<path>:<digits>`, split at the final colon.
static FILE_WITH_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<path>.+):(?P<line>[0-9]+)$").expect("static regex must compile")
});

/// Shape of a single command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentKind {
    /// `path:line` where `path` is an existing regular file.
    FileWithLine {
        /// File component, without the line suffix.
        path: PathBuf,
        /// 1-based line number.
        line: NonZeroU32,
    },
    /// The token itself is an existing regular file.
    File,
    /// The token itself is an existing directory.
    Directory,
    /// None of the above.
    Unrecognized,
}

/// Classifies `token`, checking file+line, then file, then directory.
///
/// Missing paths and paths that cannot be inspected for permission reasons
/// simply do not match.
///
/// # Errors
///
/// Returns [`ResolveError::Inspect`] if the filesystem reports any other
/// failure while inspecting the token.
///
/// # Examples
///
/// ```
/// use specset_resolve::classify::{ArgumentKind, classify};
///
/// let root = tempfile::tempdir().unwrap();
/// let spec = root.path().join("user_spec.js");
/// std::fs::write(&spec, "").unwrap();
/// let spec = spec.to_str().unwrap();
///
/// assert_eq!(classify(spec).unwrap(), ArgumentKind::File);
/// assert!(matches!(
///     classify(&format!("{spec}:12")).unwrap(),
///     ArgumentKind::FileWithLine { .. }
/// ));
/// assert_eq!(classify(root.path().to_str().unwrap()).unwrap(), ArgumentKind::Directory);
/// assert_eq!(classify("no/such/spec.js").unwrap(), ArgumentKind::Unrecognized);
/// ```
pub fn classify(token: &str) -> Result<ArgumentKind> {
    let stat_err = |source| ResolveError::Inspect {
        token: token.to_string(),
        source,
    };

    if let Some((path, line)) = split_file_with_line(token) {
        if stat_is_file(Path::new(path)).map_err(stat_err)? {
            let kind = ArgumentKind::FileWithLine {
                path: PathBuf::from(path),
                line,
            };
            debug!(token, ?kind, "classified argument");
            return Ok(kind);
        }
    }

    let kind = match stat(Path::new(token)).map_err(stat_err)? {
        Some(metadata) if metadata.is_file() => ArgumentKind::File,
        Some(metadata) if metadata.is_dir() => ArgumentKind::Directory,
        _ => ArgumentKind::Unrecognized,
    };

    debug!(token, ?kind, "classified argument");
    Ok(kind)
}

/// Returns `true` if `token` is `<path>:<positive-integer>` and `path` is an
/// existing regular file.
pub fn is_file_with_line(token: &str) -> bool {
    split_file_with_line(token)
        .is_some_and(|(path, _)| stat_is_file(Path::new(path)).unwrap_or(false))
}

/// Returns `true` if `token` is an existing regular file.
pub fn is_file(token: &str) -> bool {
    stat_is_file(Path::new(token)).unwrap_or(false)
}

/// Returns `true` if `token` is an existing directory.
pub fn is_directory(token: &str) -> bool {
    matches!(stat(Path::new(token)), Ok(Some(metadata)) if metadata.is_dir())
}

/// Splits `path:line` at the final colon. The line must be a positive `u32`.
pub fn split_file_with_line(token: &str) -> Option<(&str, NonZeroU32)> {
    let captures = FILE_WITH_LINE_RE.captures(token)?;
    let path = captures.name("path")?.as_str();
    let line = captures.name("line")?.as_str().parse::<NonZeroU32>().ok()?;
    Some((path, line))
}

fn stat_is_file(path: &Path) -> io::Result<bool> {
    Ok(stat(path)?.is_some_and(|metadata| metadata.is_file()))
}

/// Stats `path`, following links. `Ok(None)` means "nothing usable here".
fn stat(path: &Path) -> io::Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(err) if is_absent(&err) => Ok(None),
        Err(err) => Err(err),
    }
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::PermissionDenied
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidInput
    )
}
