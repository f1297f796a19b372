/// Basename used with `--git` when no `--name` is given.
pub const GIT_CHANGED_NAME: &str = "git-changed";
/// Basename used for multiple paths, or when a single path yields nothing usable.
pub const MERGED_NAME: &str = "merged";

/// Where the candidate paths come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationMode {
    ExplicitPaths(Vec<String>),
    GitChanged,
}

/// Picks the output file's basename (no extension).
pub fn output_basename(mode: &InvocationMode, explicit_name: Option<&str>) -> String {
    if let Some(name) = explicit_name {
        return name.to_string();
    }

    match mode {
        InvocationMode::GitChanged => GIT_CHANGED_NAME.to_string(),
        InvocationMode::ExplicitPaths(paths) if paths.len() == 1 => {
            let name = paths[0].replace(['/', '\\'], "-");
            let name = name.trim_matches('-');
            if name.is_empty() {
                MERGED_NAME.to_string()
            } else {
                name.to_string()
            }
        }
        InvocationMode::ExplicitPaths(_) => MERGED_NAME.to_string(),
    }
}
