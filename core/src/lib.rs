//! Core types for resolving test arguments into a runnable suite.
//!
//! This crate defines the data model shared by the resolver and the CLI:
//!
//! - [`SpecFile`] — one runnable spec file, optionally scoped to a line.
//! - [`SpecDirectory`] — a directory descriptor that discovers the spec files
//!   beneath it recursively, in a deterministic order.
//! - [`Suite`] — the ordered, append-only run collection for one invocation.
//!   Single files and directory batches are appended through separate
//!   operations and recorded as [`Addition`]s.
//!
//! # Example
//!
//! ```
//! use specset_core::{Addition, SpecFile, Suite};
//!
//! let mut suite = Suite::new();
//! suite.add_spec_file(SpecFile::with_line("spec/a_spec.js", 23).unwrap());
//! suite.add_spec_files(vec![
//!     SpecFile::new("spec/dir/b_spec.js"),
//!     SpecFile::new("spec/dir/c_spec.js"),
//! ]);
//!
//! assert_eq!(suite.len(), 3);
//! assert_eq!(suite.spec_files()[0].to_string(), "spec/a_spec.js:23");
//! assert_eq!(suite.additions()[1], Addition::Batch { range: 1..3 });
//! ```

mod directory;
mod spec_file;
mod suite;

pub use directory::{DiscoveryError, DiscoveryOptions, SpecDirectory};
pub use spec_file::SpecFile;
pub use suite::{Addition, Suite};
