//! Resolution against real directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use specset_core::{Addition, SpecFile};
use specset_resolve::{ResolveError, Resolver, ResolverConfig, classify, resolve};

/// Builds `some/path/to/` with two spec files and a spec directory holding
/// two more files.
fn fixture_tree() -> tempfile::TempDir {
    let root = tempfile::tempdir().expect("failed to create temp dir");
    let base = root.path().join("some/path/to");
    fs::create_dir_all(base.join("some_directory/nested")).unwrap();
    fs::write(base.join("some_spec.js"), "describe('a', () => {});\n").unwrap();
    fs::write(base.join("some_other_spec.js"), "describe('b', () => {});\n").unwrap();
    fs::write(base.join("some_directory/first_spec.js"), "").unwrap();
    fs::write(base.join("some_directory/nested/second_spec.js"), "").unwrap();
    root
}

fn arg(root: &Path, relative: &str) -> String {
    root.join(relative).to_string_lossy().into_owned()
}

fn path(root: &Path, relative: &str) -> PathBuf {
    root.join(relative)
}

#[test]
fn file_with_line_yields_one_focused_spec() {
    let root = fixture_tree();
    let suite = resolve([format!("{}:23", arg(root.path(), "some/path/to/some_spec.js"))]).unwrap();

    assert_eq!(
        suite.spec_files(),
        &[SpecFile::with_line(path(root.path(), "some/path/to/some_spec.js"), 23).unwrap()]
    );
    assert_eq!(suite.additions(), &[Addition::Single { index: 0 }]);
}

#[test]
fn plain_file_yields_one_unfocused_spec() {
    let root = fixture_tree();
    let suite = resolve([arg(root.path(), "some/path/to/some_spec.js")]).unwrap();

    assert_eq!(
        suite.spec_files(),
        &[SpecFile::new(path(root.path(), "some/path/to/some_spec.js"))]
    );
}

#[test]
fn directory_yields_recursive_listing_as_one_batch() {
    let root = fixture_tree();
    let suite = resolve([arg(root.path(), "some/path/to/some_directory")]).unwrap();

    assert_eq!(
        suite.spec_files(),
        &[
            SpecFile::new(path(root.path(), "some/path/to/some_directory/first_spec.js")),
            SpecFile::new(path(
                root.path(),
                "some/path/to/some_directory/nested/second_spec.js"
            )),
        ]
    );
    assert_eq!(suite.additions(), &[Addition::Batch { range: 0..2 }]);
}

#[test]
fn mixed_arguments_concatenate_in_input_order() {
    let root = fixture_tree();
    let a = format!("{}:10", arg(root.path(), "some/path/to/some_spec.js"));
    let b = arg(root.path(), "some/path/to/some_other_spec.js");
    let dir = arg(root.path(), "some/path/to/some_directory");

    let combined = resolve([&a, &b, &dir]).unwrap();

    let mut expected = Vec::new();
    for token in [&a, &b, &dir] {
        expected.extend(resolve([token]).unwrap().into_spec_files());
    }
    assert_eq!(combined.spec_files(), expected.as_slice());
    assert_eq!(combined.len(), 1 + 1 + 2);
}

#[test]
fn repeated_arguments_are_not_deduplicated() {
    let root = fixture_tree();
    let file = arg(root.path(), "some/path/to/some_spec.js");

    let suite = resolve([&file, &file]).unwrap();
    assert_eq!(suite.len(), 2);
}

#[test]
fn unrecognized_argument_names_the_token() {
    let root = fixture_tree();
    let bad = arg(root.path(), "some/path/to/missing_spec.js:12");

    let err = resolve([arg(root.path(), "some/path/to/some_spec.js"), bad.clone()]).unwrap_err();

    match err {
        ResolveError::UnrecognizedArgument(token) => assert_eq!(token, bad),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn classify_agrees_with_predicates() {
    let root = fixture_tree();
    let file = arg(root.path(), "some/path/to/some_spec.js");
    let focused = format!("{file}:7");
    let dir = arg(root.path(), "some/path/to/some_directory");

    assert!(classify::is_file_with_line(&focused));
    assert!(classify::is_file(&file));
    assert!(classify::is_directory(&dir));
    assert!(matches!(
        classify(&focused).unwrap(),
        specset_resolve::ArgumentKind::FileWithLine { .. }
    ));
}

#[test]
fn parallel_resolution_matches_sequential_order() {
    let root = fixture_tree();
    let tokens: Vec<String> = vec![
        arg(root.path(), "some/path/to/some_directory"),
        format!("{}:1", arg(root.path(), "some/path/to/some_spec.js")),
        arg(root.path(), "some/path/to/some_other_spec.js"),
        arg(root.path(), "some/path/to"),
    ];

    let resolver = Resolver::new(ResolverConfig {
        jobs: Some(4),
        ..ResolverConfig::default()
    });

    assert_eq!(
        resolver.resolve_parallel(&tokens).unwrap(),
        resolver.resolve(&tokens).unwrap()
    );
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_surfaces_as_discovery_error() {
    use std::os::unix::fs::PermissionsExt;

    let root = fixture_tree();
    let locked = path(root.path(), "some/path/to/some_directory/locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden_spec.js"), "").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the directory anyway.
    let readable = fs::read_dir(&locked).is_ok();
    let result = resolve([arg(root.path(), "some/path/to/some_directory")]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if readable {
        assert_eq!(result.unwrap().len(), 3);
    } else {
        assert!(matches!(result.unwrap_err(), ResolveError::Discovery(_)));
    }
}
