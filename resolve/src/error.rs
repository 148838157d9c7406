//! Error types for argument resolution.

use specset_core::DiscoveryError;
use thiserror::Error;

/// Errors that abort resolution of an argument list.
///
/// Resolution is fail-fast: the first error ends the pass and no partial
/// suite is returned.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The token is not an existing file, `file:line` reference, or directory.
    #[error("unrecognized argument '{0}': not an existing file, file:line, or directory")]
    UnrecognizedArgument(String),

    /// The filesystem reported a hard error while classifying the token.
    #[error("failed to inspect argument '{token}': {source}")]
    Inspect {
        /// Token being classified.
        token: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A directory argument could not be walked.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The worker pool for parallel resolution could not be started.
    #[error("failed to start resolver thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ResolveError {
    /// The offending token, for errors tied to a single argument.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedArgument(token) | Self::Inspect { token, .. } => {
                Some(token.as_str())
            }
            Self::Discovery(_) | Self::ThreadPool(_) => None,
        }
    }
}

/// Convenience alias for results with [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;
