//! Output formatting for resolved suites.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use specset_core::{SpecFile, Suite};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// One `path` or `path:line` per line.
    Plain,
    /// A [`RunPlan`] document.
    Json,
}

/// Serializable run set handed to an execution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPlan {
    /// RFC 3339 timestamp of resolution.
    pub generated_at: String,
    /// Number of spec files in the plan.
    pub spec_count: usize,
    /// Spec files in run order.
    pub spec_files: Vec<SpecFile>,
}

impl RunPlan {
    /// Builds a plan from a resolved suite, stamped with the current time.
    pub fn from_suite(suite: Suite) -> Self {
        let spec_files = suite.into_spec_files();
        Self {
            generated_at: Utc::now().to_rfc3339(),
            spec_count: spec_files.len(),
            spec_files,
        }
    }
}

/// Formats a suite in the requested output format.
pub fn format_suite(suite: &Suite, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Plain => Ok(suite_to_plain(suite)),
        OutputFormat::Json => serde_json::to_string_pretty(&RunPlan::from_suite(suite.clone()))
            .map_err(|e| format!("JSON serialization failed: {e}")),
    }
}

fn suite_to_plain(suite: &Suite) -> String {
    let mut out = String::new();
    for spec_file in suite {
        out.push_str(&spec_file.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_suite() -> Suite {
        let mut suite = Suite::new();
        suite.add_spec_file(SpecFile::with_line("spec/a_spec.js", 23).unwrap());
        suite.add_spec_files(vec![
            SpecFile::new("spec/dir/b_spec.js"),
            SpecFile::new("spec/dir/c_spec.js"),
        ]);
        suite
    }

    #[test]
    fn test_format_plain_lists_one_spec_per_line() {
        let out = format_suite(&sample_suite(), OutputFormat::Plain).unwrap();
        assert_eq!(
            out,
            "spec/a_spec.js:23\nspec/dir/b_spec.js\nspec/dir/c_spec.js\n"
        );
    }

    #[test]
    fn test_format_plain_empty_suite_is_empty() {
        assert_eq!(format_suite(&Suite::new(), OutputFormat::Plain).unwrap(), "");
    }

    #[test]
    fn test_format_json_builds_run_plan() {
        let out = format_suite(&sample_suite(), OutputFormat::Json).unwrap();
        let plan: RunPlan = serde_json::from_str(&out).unwrap();

        assert_eq!(plan.spec_count, 3);
        assert!(plan.generated_at.contains('T'));
        assert_eq!(plan.spec_files[0], SpecFile::with_line("spec/a_spec.js", 23).unwrap());
        assert_eq!(plan.spec_files[2].line(), None);
    }
}
