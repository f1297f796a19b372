use crate::utils::get_language_tag;
use anyhow::{Context, Result};
use content_inspector::{ContentType, inspect};
use log::{debug, warn};
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Title, blank line, table header and separator row.
const INDEX_PREAMBLE: &str = "# File Index\n\n| Path | Start | End |\n|------|-------|-----|\n";
const INDEX_PREAMBLE_LINES: usize = 4;

/// One file selected for merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub rel_path: String,
    pub content: String,
    pub language_tag: &'static str,
}

impl FileEntry {
    pub fn new(rel_path: impl Into<String>, content: impl Into<String>) -> Self {
        let rel_path = rel_path.into();
        let language_tag = get_language_tag(Path::new(&rel_path));
        Self {
            rel_path,
            content: content.into(),
            language_tag,
        }
    }

    /// Reads `rel_path` under `project_root`. Invalid UTF-8 is replaced
    /// rather than rejected.
    pub async fn load(project_root: &Path, rel_path: &str) -> Result<Self> {
        let path = project_root.join(rel_path);
        let bytes = fs::read(&path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let sample_size = std::cmp::min(8192, bytes.len());
        if inspect(&bytes[..sample_size]) == ContentType::BINARY {
            warn!("{rel_path} looks like a binary file; merging it as text anyway");
        }

        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                warn!("{rel_path} is not valid UTF-8; invalid bytes are replaced with U+FFFD");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        debug!("Read {rel_path} ({} bytes)", content.len());
        Ok(Self::new(rel_path, content))
    }

    /// Renders the fenced block for this file. The block never ends with a
    /// newline, so its last line is always the closing fence.
    pub fn render_block(&self) -> String {
        let path = escape_line_breaks(&self.rel_path);
        let header = if self.language_tag.is_empty() {
            path
        } else {
            format!("{} {path}", self.language_tag)
        };

        let separator = if self.content.is_empty() || self.content.ends_with('\n') {
            ""
        } else {
            "\n"
        };

        format!("```{header}\n{}{separator}```", self.content)
    }
}

/// Where a file's block sits in the merged document (1-based, inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// A fully assembled output document.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub index: Vec<IndexRow>,
}

/// Counts newline-delimited lines; a final line without `\n` still counts.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Lays out the File Index followed by every file's block.
///
/// Blocks are separated by one blank line. Line numbers in the index are
/// the exact lines of each block's opening and closing fence.
pub fn assemble(entries: &[FileEntry]) -> Document {
    let blocks: Vec<String> = entries.iter().map(FileEntry::render_block).collect();

    // Preamble, one row per file, one blank line, then the first block.
    let mut next_start = INDEX_PREAMBLE_LINES + entries.len() + 1 + 1;
    let mut index = Vec::with_capacity(entries.len());

    for (entry, block) in entries.iter().zip(&blocks) {
        let start_line = next_start;
        let end_line = start_line + count_lines(block) - 1;
        index.push(IndexRow {
            path: entry.rel_path.clone(),
            start_line,
            end_line,
        });
        next_start = end_line + 2;
    }

    let mut text = String::from(INDEX_PREAMBLE);
    for row in &index {
        text.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&row.path),
            row.start_line,
            row.end_line
        ));
    }
    text.push('\n');
    text.push_str(&blocks.join("\n\n"));
    text.push('\n');

    Document { text, index }
}

/// Keeps a path on one line so index rows and fence headers stay one line each.
fn escape_line_breaks(value: &str) -> String {
    value.replace('\r', "\\r").replace('\n', "\\n")
}

fn escape_cell(value: &str) -> String {
    escape_line_breaks(value).replace('|', "\\|")
}

/// Writes the document to `output_path`, creating parent directories.
pub async fn write_document(document: &Document, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let file = File::create(output_path)
        .await
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(document.text.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    writer.flush().await.context("Failed to flush output")?;

    debug!(
        "Wrote {} bytes to {}",
        document.text.len(),
        output_path.display()
    );
    Ok(())
}
