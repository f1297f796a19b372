//! Path filtering: default segment excludes, then `--include`, then
//! `--except`, then a final check that each path is still a regular file.

use crate::glob::Pattern;
use log::debug;
use std::collections::BTreeSet;
use std::path::Path;

/// Directory names that are never merged, wherever they appear in a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultExcludes {
    segments: BTreeSet<String>,
}

impl DefaultExcludes {
    pub const STANDARD: &'static [&'static str] = &[
        ".git",
        "node_modules",
        ".pnpm-store",
        "bower_components",
        "temp",
        "tmp",
        ".temp",
        ".tmp",
        "vendor",
        ".venv",
        "venv",
        "dist",
        "__pycache__",
    ];

    pub fn standard() -> Self {
        Self::new(Self::STANDARD.iter().copied())
    }

    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            segments: BTreeSet::new(),
        }
    }

    /// True if any `/`- or `\`-separated segment of `rel_path` is excluded.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        rel_path
            .split(['/', '\\'])
            .any(|segment| self.segments.contains(segment))
    }
}

impl Default for DefaultExcludes {
    fn default() -> Self {
        Self::standard()
    }
}

/// User-supplied include/exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub include: Vec<Pattern>,
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Builds a config from comma-separated lists, as given on the command line.
    pub fn from_lists(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: include.map(split_patterns).unwrap_or_default(),
            exclude: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    fn is_included(&self, rel_path: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|p| p.is_match(rel_path))
    }

    fn is_denied(&self, rel_path: &str) -> bool {
        self.exclude.iter().any(|p| p.is_match(rel_path))
    }
}

/// Splits `a.ts, **/*.md,,` into patterns, dropping blank entries.
pub fn split_patterns(list: &str) -> Vec<Pattern> {
    list.split(',').filter_map(Pattern::parse).collect()
}

/// Runs every filter stage over `paths`, keeping their order.
///
/// `project_root` is used to confirm each surviving path is a regular file.
pub fn apply_filters(
    paths: Vec<String>,
    project_root: &Path,
    defaults: &DefaultExcludes,
    config: &FilterConfig,
) -> Vec<String> {
    let total = paths.len();

    let kept: Vec<String> = paths
        .into_iter()
        .filter(|p| keep(p, "default exclude", !defaults.is_excluded(p)))
        .filter(|p| keep(p, "include list", config.is_included(p)))
        .filter(|p| keep(p, "except list", !config.is_denied(p)))
        .filter(|p| keep(p, "not a regular file", project_root.join(p).is_file()))
        .collect();

    debug!("{} of {} paths passed filtering", kept.len(), total);
    kept
}

fn keep(path: &str, stage: &str, pass: bool) -> bool {
    if !pass {
        debug!("Dropped {path} ({stage})");
    }
    pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    fn owned(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_excludes_match_whole_segments() {
        let defaults = DefaultExcludes::standard();
        assert!(defaults.is_excluded("node_modules/x/index.js"));
        assert!(defaults.is_excluded("web\\node_modules\\y.js"));
        assert!(defaults.is_excluded("a/__pycache__/m.pyc"));
        assert!(!defaults.is_excluded("src/node_modules_helper.js"));
        assert!(!defaults.is_excluded("src/vendored/x.rs"));
    }

    #[test]
    fn test_default_excludes_win_over_include() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "node_modules/lib/a.ts");
        touch(root, "src/b.ts");

        let config = FilterConfig::from_lists(Some("**/*.ts"), None);
        let kept = apply_filters(
            owned(&["node_modules/lib/a.ts", "src/b.ts"]),
            root,
            &DefaultExcludes::standard(),
            &config,
        );

        assert_eq!(kept, vec!["src/b.ts"]);
    }

    #[test]
    fn test_except_applies_after_include() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "a.ts");
        touch(root, "b.ts");
        touch(root, "c.md");

        let config = FilterConfig::from_lists(Some("*.ts"), Some("a.ts"));
        let kept = apply_filters(
            owned(&["a.ts", "b.ts", "c.md"]),
            root,
            &DefaultExcludes::standard(),
            &config,
        );

        assert_eq!(kept, vec!["b.ts"]);
    }

    #[test]
    fn test_custom_default_excludes() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "generated/x.rs");
        touch(root, "node_modules/y.js");

        let defaults = DefaultExcludes::new(["generated"]);
        let kept = apply_filters(
            owned(&["generated/x.rs", "node_modules/y.js"]),
            root,
            &defaults,
            &FilterConfig::default(),
        );

        assert_eq!(kept, vec!["node_modules/y.js"]);
    }

    #[test]
    fn test_directories_and_missing_paths_are_dropped() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "scratch/notes.txt");
        touch(root, "keep.rs");

        let kept = apply_filters(
            owned(&["scratch/", "gone.rs", "keep.rs"]),
            root,
            &DefaultExcludes::none(),
            &FilterConfig::default(),
        );

        assert_eq!(kept, vec!["keep.rs"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "b.rs");
        touch(root, "a.rs");

        let kept = apply_filters(
            owned(&["b.rs", "a.rs"]),
            root,
            &DefaultExcludes::standard(),
            &FilterConfig::default(),
        );

        assert_eq!(kept, vec!["b.rs", "a.rs"]);
    }

    #[test]
    fn test_split_patterns_drops_blanks() {
        let patterns = split_patterns(" a.ts , ,**/*.md,");
        let sources: Vec<&str> = patterns.iter().map(Pattern::as_str).collect();
        assert_eq!(sources, vec!["a.ts", "**/*.md"]);
    }
}
