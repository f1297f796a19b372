use std::ffi::OsStr;
use std::path::{Component, Path};

/// Maps a file extension to the tag used on the opening code fence.
/// Unknown extensions map to an empty tag.
pub fn get_language_tag(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "rs" => "rust",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "jsx",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "tsx",
        "py" => "python",
        "rb" => "ruby",
        "go" => "go",
        "java" => "java",
        "kt" => "kotlin",
        "swift" => "swift",
        "c" => "c",
        "cpp" | "cc" | "cxx" => "cpp",
        "h" => "c",
        "hpp" => "cpp",
        "cs" => "csharp",
        "php" => "php",
        "sh" | "bash" => "bash",
        "sql" => "sql",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "vue" => "vue",
        "svelte" => "svelte",
        "md" => "markdown",
        "json" => "json",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        _ => "",
    }
}

/// Rewrites `\` separators as `/`.
pub fn to_posix(path: &str) -> String {
    path.replace('\\', "/")
}

/// Renders a relative path with `/` separators, dropping `.` components
/// and trailing slashes (`./src/` becomes `src`).
pub fn rel_path_string(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect();

    to_posix(&parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_language_tags() {
        assert_eq!(get_language_tag(Path::new("src/main.rs")), "rust");
        assert_eq!(get_language_tag(Path::new("App.TSX")), "tsx");
        assert_eq!(get_language_tag(Path::new("Makefile")), "");
        assert_eq!(get_language_tag(Path::new("data.bin")), "");
    }

    #[test]
    fn test_rel_path_string() {
        assert_eq!(rel_path_string(Path::new("./src/")), "src");
        assert_eq!(rel_path_string(&PathBuf::from("a").join("b.ts")), "a/b.ts");
        assert_eq!(rel_path_string(Path::new("../x/y")), "../x/y");
        assert_eq!(rel_path_string(Path::new(".")), "");
    }
}
