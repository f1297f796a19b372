//! Change-set source backed by `git status`.
//!
//! In `--git` mode the candidate list comes from the working tree's short
//! status instead of from path arguments. Added, modified and untracked
//! files are reported with paths relative to the directory git runs in.
//! Untracked folders are expanded to the files inside them. Deletions are
//! dropped and renames resolve to their new path.

use anyhow::{Context, Result, bail};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use std::process::Command;

/// `XY path` or `XY old -> new`.
static STATUS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<status>.{2}) (?P<path>.+)$").expect("status line regex is valid")
});

/// Anything that can report the set of changed files.
pub trait ChangeSource {
    fn changed_paths(&self) -> Result<Vec<String>>;
}

/// Reads the change set from `git status --short` run in `root`.
pub struct GitStatus {
    root: PathBuf,
}

impl GitStatus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ChangeSource for GitStatus {
    fn changed_paths(&self) -> Result<Vec<String>> {
        info!("Reading change set from git in {}", self.root.display());

        // Pin the settings that change the short format's shape: paths
        // relative to `root`, non-ASCII left unescaped, no color codes.
        let output = Command::new("git")
            .args([
                "-c",
                "core.quotePath=false",
                "-c",
                "status.relativePaths=true",
                "-c",
                "color.status=false",
                "status",
                "--short",
                "--untracked-files=all",
            ])
            .current_dir(&self.root)
            .output()
            .context("Failed to run `git status`; is git installed?")?;

        if !output.status.success() {
            bail!(
                "git status failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let paths: Vec<String> = stdout.lines().filter_map(parse_status_line).collect();

        debug!("git reported {} changed paths", paths.len());
        Ok(paths)
    }
}

/// Parses one short-status line into the path it contributes, if any.
///
/// Returns `None` for deletions and malformed lines.
pub fn parse_status_line(line: &str) -> Option<String> {
    let caps = STATUS_LINE.captures(line)?;
    let status = &caps["status"];
    let path = &caps["path"];

    if status.contains('D') {
        debug!("Skipping deleted entry: {path}");
        return None;
    }

    let path = match path.rsplit_once(" -> ") {
        Some((_, new)) => new,
        None => path,
    };

    let path = unquote(path.trim());
    if path.is_empty() { None } else { Some(path) }
}

/// Undoes git's C-style quoting: `"a\tb"`, `"caf\303\251.ts"`.
/// Unquoted input is returned as is.
fn unquote(path: &str) -> String {
    let Some(inner) = path.strip_prefix('"').and_then(|p| p.strip_suffix('"')) else {
        return path.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut rest = inner.as_bytes();

    while let Some((&b, tail)) = rest.split_first() {
        rest = tail;
        if b != b'\\' {
            bytes.push(b);
            continue;
        }

        let Some((&esc, tail)) = rest.split_first() else {
            bytes.push(b'\\');
            break;
        };
        rest = tail;

        match esc {
            b'a' => bytes.push(0x07),
            b'b' => bytes.push(0x08),
            b't' => bytes.push(b'\t'),
            b'n' => bytes.push(b'\n'),
            b'v' => bytes.push(0x0b),
            b'f' => bytes.push(0x0c),
            b'r' => bytes.push(b'\r'),
            b'0'..=b'7' => {
                let mut value = u32::from(esc - b'0');
                let mut digits = 1;
                while digits < 3 {
                    match rest.first() {
                        Some(&d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            rest = &rest[1..];
                            digits += 1;
                        }
                        _ => break,
                    }
                }
                bytes.push((value & 0xff) as u8);
            }
            other => bytes.push(other),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
