//! Resolve test runner arguments into a runnable [`Suite`].
//!
//! Every command-line token is one of three shapes, checked in this order:
//!
//! 1. `path:line`, where `path` is an existing file — one spec file scoped to
//!    that line;
//! 2. an existing file — one spec file;
//! 3. an existing directory — every spec file found beneath it, appended as
//!    a single batch.
//!
//! Anything else fails resolution with
//! [`ResolveError::UnrecognizedArgument`] naming the token.
//!
//! # Main entry points
//!
//! - [`resolve`] — resolve with default settings.
//! - [`Resolver`] — configurable resolver with sequential and parallel paths.
//! - [`classify::classify`] — classify one token without building anything.
//! - [`output::format_suite`] — render a suite for an execution engine.
//!
//! # Example
//!
//! ```
//! use specset_resolve::resolve;
//!
//! let root = tempfile::tempdir().unwrap();
//! std::fs::create_dir(root.path().join("some_directory")).unwrap();
//! std::fs::write(root.path().join("some_directory/a_spec.js"), "").unwrap();
//! std::fs::write(root.path().join("some_directory/b_spec.js"), "").unwrap();
//!
//! let suite = resolve([root.path().join("some_directory").to_str().unwrap()]).unwrap();
//! assert_eq!(suite.len(), 2);
//! assert_eq!(suite.additions().len(), 1);
//! ```
//!
//! [`Suite`]: specset_core::Suite

pub mod classify;
pub mod error;
pub mod output;
pub mod resolver;

pub use classify::{ArgumentKind, classify};
pub use error::{ResolveError, Result};
pub use resolver::{Resolution, Resolver, ResolverConfig, resolve};
