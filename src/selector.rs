use crate::errors::DigestError;
use crate::ignore::IgnoreMatcher;
use crate::utils::{normalize_path, relative_slash_path};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::Path;
use tokio::fs as async_fs;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

pub const DEFAULT_PATTERN: &str = "**/*";

/// Extensions never worth pasting into a chat, matched case-insensitively.
pub const BINARY_EXTENSIONS: &[&str] = &[
    // Images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tif", "tiff", "psd", "heic", "avif",
    // Audio and video
    "mp3", "wav", "ogg", "flac", "aac", "m4a", "mp4", "m4v", "avi", "mov", "mkv", "webm", "wmv",
    "flv",
    // Archives
    "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar", "jar", "war",
    // Office documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp",
    // Native executables and libraries
    "exe", "dll", "so", "dylib", "a", "o", "lib", "obj", "bin", "class", "pyc", "pyo", "wasm",
    // Fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // Embedded databases
    "db", "sqlite", "sqlite3", "mdb",
];

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

pub fn is_binary_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            BINARY_EXTENSIONS
                .iter()
                .any(|binary| binary.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Resolves the files under `root` matched by `patterns` and `include`,
/// minus ignored, binary and oversized ones. The result is sorted and free
/// of duplicates; an empty result is not an error.
pub async fn select_files(
    root: &Path,
    patterns: &[String],
    include: &[String],
    matcher: &IgnoreMatcher,
    max_size: u64,
) -> Result<Vec<String>, DigestError> {
    let compiled = compile_patterns(root, patterns.iter().chain(include.iter()));
    if compiled.is_empty() {
        warn!("No usable glob patterns were given");
        return Ok(Vec::new());
    }

    debug!("Walking {:?}", root);
    let walk_root = root.to_path_buf();
    let walk_matcher = matcher.clone();
    let candidates =
        tokio::task::spawn_blocking(move || collect_candidates(&walk_root, &walk_matcher)).await?;
    trace!("Found {} candidate files", candidates.len());

    let matched: BTreeSet<String> = candidates
        .into_iter()
        .filter(|candidate| {
            compiled
                .iter()
                .any(|pattern| pattern.matches_with(candidate, GLOB_OPTIONS))
        })
        .collect();
    debug!("{} files matched the glob patterns", matched.len());

    let mut selected = Vec::with_capacity(matched.len());
    for path in matched {
        if matcher.ignores(&path) {
            trace!("Ignoring {}", path);
            continue;
        }
        if is_binary_path(&path) {
            trace!("Skipping binary file {}", path);
            continue;
        }
        match async_fs::metadata(root.join(&path)).await {
            Ok(metadata) if !metadata.is_file() => {
                trace!("Skipping {}: not a regular file", path);
            }
            Ok(metadata) if metadata.len() > max_size => {
                debug!(
                    "Skipping {}: {} bytes exceeds limit of {} bytes",
                    path,
                    metadata.len(),
                    max_size
                );
            }
            Ok(_) => selected.push(path),
            Err(e) => {
                debug!("Skipping {}: could not stat file: {}", path, e);
            }
        }
    }

    Ok(selected)
}

fn compile_patterns<'a, I>(root: &Path, patterns: I) -> Vec<Pattern>
where
    I: Iterator<Item = &'a String>,
{
    patterns
        .filter_map(|raw| {
            let expanded = expand_directory_pattern(root, raw);
            match Pattern::new(&expanded) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Invalid glob pattern '{}': {}", raw, e);
                    None
                }
            }
        })
        .collect()
}

/// A pattern naming an existing directory selects everything beneath it.
fn expand_directory_pattern(root: &Path, raw: &str) -> String {
    let normalized = normalize_path(raw);
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        return DEFAULT_PATTERN.to_owned();
    }
    if root.join(trimmed).is_dir() {
        let expanded = format!("{}/{}", Pattern::escape(trimmed), DEFAULT_PATTERN);
        trace!("Expanding directory pattern '{}' to '{}'", raw, expanded);
        return expanded;
    }
    normalized
}

fn collect_candidates(root: &Path, matcher: &IgnoreMatcher) -> Vec<String> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            match relative_slash_path(entry.path(), root) {
                Some(relative) => !matcher.ignores_dir(&relative),
                None => true,
            }
        });

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let file_type = entry.file_type();
        if !(file_type.is_file() || file_type.is_symlink()) {
            continue;
        }
        if let Some(relative) = relative_slash_path(entry.path(), root) {
            candidates.push(relative);
        }
    }
    candidates
}
