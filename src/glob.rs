//! Pattern matching for `--include` / `--except` lists.
//!
//! A pattern without `*` matches a path exactly, by suffix (`a/b/foo.ts`
//! for `b/foo.ts`) or by file name. A pattern with `*` is a glob: `**`
//! crosses `/`, a single `*` does not, and the glob must cover the whole path.

use regex::Regex;

use crate::utils::to_posix;

/// A parsed `--include` / `--except` entry.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact path, path suffix, or file name.
    Literal(String),
    /// Anchored glob compiled to a regex.
    Glob { source: String, regex: Regex },
}

impl Pattern {
    /// Parses a user-supplied pattern. Blank input yields `None`, since an
    /// empty pattern never matches anything.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if !raw.contains('*') {
            return Some(Pattern::Literal(raw.to_string()));
        }

        // Escaped input cannot produce an invalid regex.
        let regex = Regex::new(&glob_to_regex(raw)).ok()?;
        Some(Pattern::Glob {
            source: raw.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(s) => s,
            Pattern::Glob { source, .. } => source,
        }
    }

    /// Tests a relative path. Backslashes in `rel_path` are treated as `/`.
    pub fn is_match(&self, rel_path: &str) -> bool {
        let path = to_posix(rel_path);
        match self {
            Pattern::Literal(lit) => {
                path == *lit
                    || path.ends_with(&format!("/{lit}"))
                    || path.rsplit('/').next() == Some(lit.as_str())
            }
            Pattern::Glob { regex, .. } => regex.is_match(&path),
        }
    }
}

/// Returns true if `rel_path` matches `pattern`.
pub fn matches(rel_path: &str, pattern: &str) -> bool {
    Pattern::parse(pattern).is_some_and(|p| p.is_match(rel_path))
}

/// Translates a glob into an anchored regex source string.
///
/// Literal runs are escaped first, then `**` becomes `.*` and `*` becomes
/// `[^/]*`.
pub fn glob_to_regex(glob: &str) -> String {
    let body = glob
        .split("**")
        .map(|part| {
            part.split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("[^/]*")
        })
        .collect::<Vec<_>>()
        .join(".*");

    format!("^{body}$")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pattern_never_matches() {
        assert!(!matches("a.ts", ""));
        assert!(!matches("a.ts", "   "));
        assert!(Pattern::parse("\t").is_none());
    }

    #[test]
    fn test_literal_matches_by_name_and_suffix() {
        assert!(matches("a/b/foo.ts", "foo.ts"));
        assert!(matches("foo.ts", "foo.ts"));
        assert!(matches("a/b/foo.ts", "b/foo.ts"));
        assert!(!matches("a/foo.tsx", "foo.ts"));
        assert!(!matches("a/xfoo.ts", "foo.ts"));
        assert!(matches("README.md", "README.md"));
        assert!(matches("docs/deep/README.md", "README.md"));
    }

    #[test]
    fn test_literal_matching_is_case_sensitive() {
        assert!(!matches("docs/readme.md", "README.md"));
    }

    #[test]
    fn test_double_star_crosses_separators() {
        assert!(matches("a/b/c.ts", "**/*.ts"));
        assert!(!matches("a/b/c.tsx", "**/*.ts"));
        assert!(matches("src/x/y/z.rs", "src/**"));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        assert!(matches("a.ts", "*.ts"));
        assert!(!matches("a/b.ts", "*.ts"));
        assert!(matches("src/a.ts", "src/*.ts"));
        assert!(!matches("src/x/a.ts", "src/*.ts"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(matches("a+b(1).ts", "a+b(1)*"));
        assert!(!matches("aab1.ts", "a+b(1)*"));
        assert!(matches("file.ts", "*.ts"));
        assert!(!matches("filexts", "*.ts"));
    }

    #[test]
    fn test_backslash_paths_are_normalized() {
        assert!(matches("src\\lib\\a.ts", "src/**/*.ts"));
        assert!(matches("src\\a.ts", "a.ts"));
    }

    #[test]
    fn test_glob_to_regex_output() {
        assert_eq!(glob_to_regex("**/*.ts"), r"^.*/[^/]*\.ts$");
        assert_eq!(glob_to_regex("a*"), "^a[^/]*$");
    }
}
