//! Project file discovery.
//!
//! Resolves the run's glob pattern against the project root, excluding
//! dependency and build-output directories plus anything gitignored. The
//! result is sorted so per-file processing order is stable across runs,
//! which the checkpoint's processed-file list relies on.

use std::path::Path;

use anyhow::{Context, Result};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;

/// Directories never worth translating, applied on top of gitignore rules.
const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "public",
    "coverage",
    "test",
    "tests",
];

/// Return root-relative paths matching `pattern`, sorted lexicographically.
pub fn match_project_files(root: &Path, pattern: &str) -> Result<Vec<String>> {
    let mut overrides = OverrideBuilder::new(root);
    overrides
        .add(pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?;
    for dir in EXCLUDED_DIRS {
        // A leading `!` means ignore in override position.
        overrides
            .add(&format!("!{}/", dir))
            .with_context(|| format!("invalid exclusion for {}", dir))?;
    }
    let overrides = overrides.build().context("failed to build glob matcher")?;

    let walker = WalkBuilder::new(root)
        .standard_filters(true)
        .follow_links(false)
        .overrides(overrides)
        .build();

    let mut matches = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            matches.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }

    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_glob_matches_and_sorts() {
        let tmp = tempdir().unwrap();
        touch(tmp.path(), "src/pages/Home.vue");
        touch(tmp.path(), "src/App.vue");
        touch(tmp.path(), "src/main.ts");

        let files = match_project_files(tmp.path(), "src/**/*.vue").unwrap();
        assert_eq!(files, vec!["src/App.vue", "src/pages/Home.vue"]);
    }

    #[test]
    fn test_excludes_dependency_and_output_dirs() {
        let tmp = tempdir().unwrap();
        touch(tmp.path(), "src/App.vue");
        touch(tmp.path(), "node_modules/pkg/Evil.vue");
        touch(tmp.path(), "dist/Built.vue");

        let files = match_project_files(tmp.path(), "**/*.vue").unwrap();
        assert_eq!(files, vec!["src/App.vue"]);
    }

    #[test]
    fn test_excludes_test_dirs_at_any_depth() {
        let tmp = tempdir().unwrap();
        touch(tmp.path(), "src/App.vue");
        touch(tmp.path(), "test/Fixture.vue");
        touch(tmp.path(), "src/tests/Spec.vue");

        let files = match_project_files(tmp.path(), "**/*.vue").unwrap();
        assert_eq!(files, vec!["src/App.vue"]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let tmp = tempdir().unwrap();
        touch(tmp.path(), "src/main.ts");

        let files = match_project_files(tmp.path(), "src/**/*.vue").unwrap();
        assert!(files.is_empty());
    }
}
