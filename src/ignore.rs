use ::ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::DigestError;

pub const GITIGNORE_FILE: &str = ".gitignore";

pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    // Version control
    ".git/",
    ".svn/",
    ".hg/",
    // Dependencies
    "node_modules/",
    "bower_components/",
    "vendor/",
    ".venv/",
    "venv/",
    "__pycache__/",
    // Build output
    "target/",
    "dist/",
    "build/",
    "out/",
    ".next/",
    ".nuxt/",
    "coverage/",
    // Lockfiles
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "Cargo.lock",
    "Gemfile.lock",
    "composer.lock",
    "poetry.lock",
    "uv.lock",
    "go.sum",
    // Environment
    ".env",
    ".env.*",
    // Logs
    "*.log",
    // Minified and source maps
    "*.min.js",
    "*.min.css",
    "*.map",
];

/// Gitignore-style exclusion rules for one scan root.
///
/// Rules are layered as built-in defaults, then caller excludes, then the
/// root `.gitignore`. The last matching rule wins, so a `!pattern` in the
/// repository ignore file can re-include something the defaults deny.
#[derive(Clone, Debug)]
pub struct IgnoreMatcher {
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    pub fn new<P: AsRef<Path>>(root: P, excludes: &[String]) -> Result<Self, DigestError> {
        let root = root.as_ref();
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_PATTERNS {
            add_pattern(&mut builder, pattern);
        }
        for pattern in excludes {
            add_pattern(&mut builder, pattern);
        }

        let ignore_file = root.join(GITIGNORE_FILE);
        if ignore_file.is_file() {
            debug!("Loading ignore rules from {:?}", ignore_file);
            if let Some(e) = builder.add(&ignore_file) {
                warn!("Some rules in {:?} could not be parsed: {}", ignore_file, e);
            }
        }

        debug!("Using {} caller exclude patterns: {:?}", excludes.len(), excludes);

        let gitignore = builder
            .build()
            .map_err(|e| DigestError::IgnoreError(e.to_string()))?;

        Ok(IgnoreMatcher { gitignore })
    }

    /// Whether the file at `path` (relative to the root) is excluded, either
    /// directly or through one of its parent directories.
    pub fn ignores(&self, path: &str) -> bool {
        self.matches(path, false)
    }

    /// Whether the directory at `path` is excluded. Used to prune walks.
    pub fn ignores_dir(&self, path: &str) -> bool {
        self.matches(path, true)
    }

    fn matches(&self, path: &str, is_dir: bool) -> bool {
        let path = path.trim_start_matches("./");
        if path.is_empty() {
            return false;
        }
        self.gitignore
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}

fn add_pattern(builder: &mut GitignoreBuilder, pattern: &str) {
    let pattern = pattern.trim();
    if pattern.is_empty() || pattern.starts_with('#') {
        return;
    }
    if let Err(e) = builder.add_line(None, pattern) {
        warn!("Invalid ignore pattern '{}': {}", pattern, e);
    }
}
