use crate::utils::rel_path_string;
use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::Path;

/// Resolves file and folder arguments into a sorted, de-duplicated list of
/// paths relative to `project_root`.
///
/// Missing paths and unsupported file types are logged and skipped.
pub fn collect_paths<S: AsRef<str>>(project_root: &Path, args: &[S]) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();

    for arg in args {
        let arg = arg.as_ref();
        let full = project_root.join(arg);
        let rel = match full.strip_prefix(project_root) {
            Ok(stripped) => rel_path_string(stripped),
            Err(_) => rel_path_string(Path::new(arg)),
        };

        let metadata = match std::fs::metadata(&full) {
            Ok(m) => m,
            Err(err) => {
                warn!("Skipping {arg}: path does not exist ({err})");
                continue;
            }
        };

        if metadata.is_file() {
            debug!("Collected file argument: {rel}");
            seen.insert(rel);
        } else if metadata.is_dir() {
            let before = seen.len();
            walk_dir(&full, &rel, &mut seen);
            debug!("Collected {} files under {}", seen.len() - before, display_dir(&rel));
        } else {
            warn!("Skipping {arg}: not a regular file or directory");
        }
    }

    Ok(seen.into_iter().collect())
}

/// Adds every regular file beneath `dir` to `seen`, prefixed by `rel_prefix`.
fn walk_dir(dir: &Path, rel_prefix: &str, seen: &mut BTreeSet<String>) {
    let mut builder = WalkBuilder::new(dir);

    // Every file is a candidate here; exclusion happens in the filter stage.
    builder.standard_filters(false).follow_links(false);

    for result in builder.build() {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }

                let Ok(sub) = path.strip_prefix(dir) else {
                    continue;
                };
                let sub = rel_path_string(sub);
                let rel = if rel_prefix.is_empty() {
                    sub
                } else {
                    format!("{rel_prefix}/{sub}")
                };
                seen.insert(rel);
            }
            Err(err) => {
                warn!("Error walking {}: {err}", dir.display());
            }
        }
    }
}

fn display_dir(rel: &str) -> &str {
    if rel.is_empty() { "." } else { rel }
}
