use crate::utils::{extension_of, read_file_content};
use crate::DigestError;
use std::path::Path;
use tracing::{debug, trace};

pub const TREE_HEADING: &str = "## Directory Tree";
pub const FILES_HEADING: &str = "## Files";

/// A selected file together with its contents.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

/// Reads every selected file in order. The first failure aborts the run.
pub async fn read_files(root: &Path, paths: &[String]) -> Result<Vec<FileEntry>, DigestError> {
    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        debug!("Reading file: {}", path);
        let content = read_file_content(&root.join(path)).await?;
        entries.push(FileEntry {
            path: path.clone(),
            content,
        });
    }
    Ok(entries)
}

/// Joins the prompt, tree and file blocks with blank lines.
pub fn assemble(prompt: Option<&str>, tree: Option<&str>, files: &[FileEntry], xml: bool) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(prompt) = prompt.filter(|p| !p.trim().is_empty()) {
        blocks.push(prompt.to_owned());
    }

    if let Some(tree) = tree {
        blocks.push(format!("{}\n\n```\n{}\n```", TREE_HEADING, tree));
    }

    blocks.push(FILES_HEADING.to_owned());
    for file in files {
        trace!("Formatting file: {}", file.path);
        let block = if xml {
            format_xml_block(file)
        } else {
            format_markdown_block(file)
        };
        blocks.push(block);
    }

    blocks.join("\n\n").trim_end().to_owned()
}

fn format_markdown_block(file: &FileEntry) -> String {
    let ext = extension_of(&file.path);
    let fence = fence_for(&file.content);
    format!(
        "### `{}`\n\n{}{}\n{}\n{}",
        file.path,
        fence,
        ext,
        file.content.trim_end(),
        fence
    )
}

fn format_xml_block(file: &FileEntry) -> String {
    format!(
        "<file path=\"{}\">\n{}\n</file>",
        escape_attribute(&file.path),
        file.content.trim_end()
    )
}

/// Three backticks, or one more than the longest run inside `content`.
fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut current = 0;
    for c in content.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
