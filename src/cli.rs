use crate::filter::{DefaultExcludes, FilterConfig};
use crate::naming::{InvocationMode, output_basename};
use anyhow::{Result, anyhow, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_OUT_DIR: &str = "temp/llm-context";

#[derive(Debug, Clone)]
pub struct Config {
    pub project_root: PathBuf,
    pub mode: InvocationMode,
    pub out_dir: PathBuf,
    pub name: Option<String>,
    pub filters: FilterConfig,
    pub default_excludes: DefaultExcludes,
    pub verbosity: u8,
}

impl Config {
    /// A config merging `paths` under `project_root` with default settings.
    pub fn for_paths<S: Into<String>>(
        project_root: impl Into<PathBuf>,
        paths: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            mode: InvocationMode::ExplicitPaths(paths.into_iter().map(Into::into).collect()),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            name: None,
            filters: FilterConfig::default(),
            default_excludes: DefaultExcludes::standard(),
            verbosity: 0,
        }
    }

    /// `<project_root>/<out_dir>/<basename>.md`
    pub fn output_path(&self) -> PathBuf {
        let basename = output_basename(&self.mode, self.name.as_deref());
        self.project_root
            .join(&self.out_dir)
            .join(format!("{basename}.md"))
    }
}

pub fn build_command() -> Command {
    Command::new("mdmerge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Merges files into one Markdown document with a line-indexed file table")
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("DIR")
                .help("Output directory")
                .default_value(DEFAULT_OUT_DIR)
                .num_args(1),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("NAME")
                .help("Output file name, without extension")
                .num_args(1),
        )
        .arg(
            Arg::new("except")
                .long("except")
                .value_name("PATTERNS")
                .help("Comma-separated patterns to exclude")
                .num_args(1),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .value_name("PATTERNS")
                .help("Comma-separated patterns; only matching files are merged")
                .num_args(1),
        )
        .arg(
            Arg::new("git")
                .long("git")
                .help("Merge files reported as added or modified by `git status`")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log output (-v, -vv, -vvv)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("paths")
                .value_name("PATHS")
                .help("Files or folders to merge, relative to the current directory")
                .num_args(1..),
        )
}

/// Parses the process arguments against the current directory.
pub fn parse_args() -> Result<Config> {
    let project_root = std::env::current_dir()?;
    parse_args_from(std::env::args_os(), project_root)
}

pub fn parse_args_from<I, T>(args: I, project_root: PathBuf) -> Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = build_command();
    let matches = command.try_get_matches_from_mut(args).unwrap_or_else(|e| e.exit());
    let usage = command.render_usage();

    config_from_matches(&matches, project_root).map_err(|err| anyhow!("{err}\n\n{usage}"))
}

fn config_from_matches(matches: &ArgMatches, project_root: PathBuf) -> Result<Config> {
    let git = matches.get_flag("git");
    let paths: Vec<String> = matches
        .get_many::<String>("paths")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    let mode = if git {
        InvocationMode::GitChanged
    } else if paths.is_empty() {
        bail!("no paths given; pass files or folders, or use --git");
    } else {
        InvocationMode::ExplicitPaths(paths)
    };

    let out_dir = matches
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

    let filters = FilterConfig::from_lists(
        matches.get_one::<String>("include").map(String::as_str),
        matches.get_one::<String>("except").map(String::as_str),
    );

    Ok(Config {
        project_root,
        mode,
        out_dir,
        name: matches.get_one::<String>("name").cloned(),
        filters,
        default_excludes: DefaultExcludes::standard(),
        verbosity: matches.get_count("verbose"),
    })
}
