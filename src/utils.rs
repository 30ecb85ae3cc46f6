use crate::DigestError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::fs as async_fs;
use tracing::debug;

/// Size ceiling used when no expression is given or it cannot be parsed.
pub const DEFAULT_MAX_SIZE: u64 = 100 * 1024;

static SIZE_EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*(kb|k|mb|m)?\s*$").expect("size expression regex is valid")
});

/// Strips a leading `./` and converts `\` separators to `/`.
pub fn normalize_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let mut trimmed = normalized.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_owned()
}

/// Renders a path relative to `root` as a forward-slash string.
pub fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Parses `50k`, `2mb`, `100` and friends into bytes. Anything else falls
/// back to [`DEFAULT_MAX_SIZE`].
pub fn parse_size_limit(expression: &str) -> u64 {
    let Some(captures) = SIZE_EXPRESSION.captures(expression) else {
        debug!(
            "Unrecognized size expression '{}', using default of {} bytes",
            expression, DEFAULT_MAX_SIZE
        );
        return DEFAULT_MAX_SIZE;
    };

    let multiplier: u64 = match captures
        .get(2)
        .map(|unit| unit.as_str().to_ascii_lowercase())
        .as_deref()
    {
        Some("k") | Some("kb") => 1024,
        Some("m") | Some("mb") => 1024 * 1024,
        _ => 1,
    };

    captures[1]
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(multiplier))
        .unwrap_or_else(|| {
            debug!("Size expression '{}' overflows, using default", expression);
            DEFAULT_MAX_SIZE
        })
}

/// The final extension of `path` without its dot, or an empty string.
pub fn extension_of(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
}

pub async fn read_file_content(path: &Path) -> Result<String, DigestError> {
    async_fs::read_to_string(path)
        .await
        .map_err(|err| DigestError::FileReadError(format!("{}: {}", path.display(), err)))
}
