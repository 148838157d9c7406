//! Argument resolution: tokens in, ordered [`Suite`] out.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use specset_core::{DiscoveryOptions, SpecDirectory, SpecFile, Suite};
use tracing::{debug, info};

use crate::classify::{ArgumentKind, classify};
use crate::error::{ResolveError, Result};

/// Resolver settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Filters applied when a directory argument is expanded.
    #[serde(default)]
    pub discovery: DiscoveryOptions,
    /// Worker count for [`Resolver::resolve_parallel`]. `None` picks a
    /// default from available parallelism.
    #[serde(default)]
    pub jobs: Option<usize>,
}

/// What a single token contributes to the suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A file or `file:line` argument.
    Single(SpecFile),
    /// The spec files found beneath a directory argument.
    Batch(Vec<SpecFile>),
}

impl Resolution {
    /// Appends this contribution, using the batch operation for directories.
    pub fn add_to(self, suite: &mut Suite) {
        match self {
            Self::Single(spec_file) => suite.add_spec_file(spec_file),
            Self::Batch(spec_files) => suite.add_spec_files(spec_files),
        }
    }
}

/// Turns command-line arguments into a [`Suite`].
///
/// Each token is classified on its own and contributes in input order, so
/// resolving `[a, b]` yields `resolve(a) ++ resolve(b)`. The first token that
/// cannot be resolved aborts the pass.
///
/// # Examples
///
/// ```
/// use specset_resolve::{ResolveError, Resolver};
///
/// let root = tempfile::tempdir().unwrap();
/// let spec = root.path().join("some_spec.js");
/// std::fs::write(&spec, "").unwrap();
/// let spec = spec.to_str().unwrap();
///
/// let resolver = Resolver::default();
/// let suite = resolver.resolve([format!("{spec}:23"), spec.to_string()]).unwrap();
/// assert_eq!(suite.len(), 2);
/// assert_eq!(suite.spec_files()[0].line().map(|l| l.get()), Some(23));
/// assert_eq!(suite.spec_files()[1].line(), None);
///
/// let err = resolver.resolve(["missing_spec.js"]).unwrap_err();
/// assert!(matches!(err, ResolveError::UnrecognizedArgument(ref t) if t == "missing_spec.js"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver with the given settings.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Settings this resolver was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves every token in order into a new suite.
    ///
    /// # Errors
    ///
    /// Returns the first failure: [`ResolveError::UnrecognizedArgument`] for a
    /// token that is not a file, `file:line` or directory,
    /// [`ResolveError::Inspect`] for a hard filesystem error while classifying,
    /// or [`ResolveError::Discovery`] if a directory cannot be walked.
    pub fn resolve<I, S>(&self, tokens: I) -> Result<Suite>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suite = Suite::new();
        let mut token_count = 0usize;
        for token in tokens {
            self.resolve_one(token.as_ref())?.add_to(&mut suite);
            token_count += 1;
        }

        info!(
            arguments = token_count,
            spec_files = suite.len(),
            "resolved arguments"
        );
        Ok(suite)
    }

    /// Resolves tokens on a thread pool, then appends results in input order.
    ///
    /// The suite is identical to the one [`resolve`](Self::resolve) builds.
    /// When several tokens fail, the error of the earliest one is returned.
    /// Once a token has failed, workers skip every token after it.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve), plus
    /// [`ResolveError::ThreadPool`] if the worker pool cannot be created.
    pub fn resolve_parallel<S>(&self, tokens: &[S]) -> Result<Suite>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let jobs = self
            .config
            .jobs
            .filter(|jobs| *jobs > 0)
            .unwrap_or_else(|| default_parallel_jobs(tokens.len()));
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        debug!(jobs, arguments = tokens.len(), "resolving arguments in parallel");

        let resolutions = pool.install(|| {
            resolve_until_first_failure(tokens, |token| self.resolve_one(token.as_ref()))
        });

        let mut suite = Suite::new();
        for resolution in resolutions.into_iter().flatten() {
            resolution?.add_to(&mut suite);
        }

        info!(
            arguments = tokens.len(),
            spec_files = suite.len(),
            "resolved arguments"
        );
        Ok(suite)
    }

    /// Resolves a single token into its contribution.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_one(&self, token: &str) -> Result<Resolution> {
        match classify(token)? {
            ArgumentKind::FileWithLine { path, line } => {
                Ok(Resolution::Single(SpecFile::at_line(path, line)))
            }
            ArgumentKind::File => Ok(Resolution::Single(SpecFile::new(token))),
            ArgumentKind::Directory => {
                let directory = SpecDirectory::new(token);
                let spec_files = directory.spec_files(&self.config.discovery)?;
                Ok(Resolution::Batch(spec_files))
            }
            ArgumentKind::Unrecognized => {
                Err(ResolveError::UnrecognizedArgument(token.to_string()))
            }
        }
    }
}

/// Resolves `tokens` with default settings.
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub fn resolve<I, S>(tokens: I) -> Result<Suite>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Resolver::default().resolve(tokens)
}

/// Runs `resolve_token` over `tokens` on the current rayon pool.
///
/// Results come back in input order. A token is skipped (`None`) only when
/// an earlier token has already failed, so every token up to and including
/// the earliest failure is always resolved.
fn resolve_until_first_failure<T, F>(
    tokens: &[T],
    resolve_token: F,
) -> Vec<Option<Result<Resolution>>>
where
    T: Sync,
    F: Fn(&T) -> Result<Resolution> + Sync,
{
    use rayon::prelude::*;

    let first_failure = AtomicUsize::new(usize::MAX);
    // Indexed collect keeps input order regardless of completion order.
    tokens
        .par_iter()
        .enumerate()
        .map(|(index, token)| {
            if index > first_failure.load(Ordering::Relaxed) {
                return None;
            }
            let resolution = resolve_token(token);
            if resolution.is_err() {
                first_failure.fetch_min(index, Ordering::Relaxed);
            }
            Some(resolution)
        })
        .collect()
}

fn default_parallel_jobs(token_count: usize) -> usize {
    let cpu_count = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get())
        .unwrap_or(4);
    cpu_count.max(1).min(token_count.max(1))
}
