//! # mdmerge Library
//!
//! Merges a set of files into one Markdown document that starts with a
//! "File Index" table giving each file's start and end line, so a reader
//! (or an LLM prompt) can jump straight to any file.
//!
//! Candidates come either from file/folder arguments or from `git status`.
//! They pass through default directory excludes and the user's
//! `--include` / `--except` patterns before being assembled.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mdmerge::{Config, RunOutcome, run_mdmerge};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::for_paths(std::env::current_dir()?, ["src"]);
//!
//!     if let RunOutcome::Written { path, files } = run_mdmerge(&config).await? {
//!         println!("{files} files -> {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod filewalker;
pub mod filter;
pub mod git;
pub mod glob;
pub mod logging;
pub mod naming;
pub mod utils;
pub mod writer;

pub use cli::Config;
pub use filewalker::collect_paths;
pub use filter::{DefaultExcludes, FilterConfig, apply_filters};
pub use git::{ChangeSource, GitStatus};
pub use naming::{InvocationMode, output_basename};
pub use writer::{Document, FileEntry, IndexRow, assemble};

use anyhow::Result;
use log::{debug, info};
use std::path::PathBuf;
use utils::rel_path_string;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written { path: PathBuf, files: usize },
    /// Every candidate was filtered out; nothing was written.
    NothingToDo,
}

/// Runs a merge, reading the change set from `git status` in `--git` mode.
pub async fn run_mdmerge(config: &Config) -> Result<RunOutcome> {
    let git = GitStatus::new(&config.project_root);
    run_with_source(config, &git).await
}

/// Runs a merge with an explicit change-set source.
pub async fn run_with_source(config: &Config, changes: &dyn ChangeSource) -> Result<RunOutcome> {
    let root = &config.project_root;
    let output_path = config.output_path();

    let mut candidates = match &config.mode {
        InvocationMode::ExplicitPaths(paths) => collect_paths(root, paths.as_slice())?,
        InvocationMode::GitChanged => changes.changed_paths()?,
    };
    debug!("{} candidate paths", candidates.len());

    // Never merge a previous copy of the output into itself.
    if let Ok(own) = output_path.strip_prefix(root) {
        let own = rel_path_string(own);
        candidates.retain(|p| *p != own);
    }

    let selected = apply_filters(candidates, root, &config.default_excludes, &config.filters);
    if selected.is_empty() {
        info!("No files left after filtering; nothing to do");
        return Ok(RunOutcome::NothingToDo);
    }

    let mut entries = Vec::with_capacity(selected.len());
    for rel_path in &selected {
        entries.push(FileEntry::load(root, rel_path).await?);
    }

    let document = assemble(&entries);
    writer::write_document(&document, &output_path).await?;
    info!("Wrote {}", output_path.display());

    Ok(RunOutcome::Written {
        path: output_path,
        files: entries.len(),
    })
}
