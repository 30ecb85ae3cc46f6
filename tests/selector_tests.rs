use repodigest::ignore::IgnoreMatcher;
use repodigest::selector::{is_binary_path, select_files};
use repodigest::utils::{parse_size_limit, DEFAULT_MAX_SIZE};
use std::path::Path;
use tempfile::tempdir;
use tokio::fs;

async fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.unwrap();
    }
    fs::write(path, content).await.unwrap();
}

fn patterns(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_selects_sorted_unique_paths() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "src/main.rs", "fn main() {}").await;
    write(root, "src/lib.rs", "pub mod a;").await;
    write(root, "src/a/mod.rs", "pub fn a() {}").await;
    write(root, "Cargo.toml", "[package]").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let files = select_files(
        root,
        &patterns(&["**/*.rs", "src/*"]),
        &patterns(&["Cargo.toml", "src/main.rs"]),
        &matcher,
        DEFAULT_MAX_SIZE,
    )
    .await
    .unwrap();

    assert_eq!(
        files,
        vec!["Cargo.toml", "src/a/mod.rs", "src/lib.rs", "src/main.rs"]
    );
}

#[tokio::test]
async fn test_selection_is_idempotent() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "b.txt", "b").await;
    write(root, "a/c.txt", "c").await;
    write(root, "a/d.md", "d").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let all = patterns(&["**/*"]);
    let first = select_files(root, &all, &[], &matcher, DEFAULT_MAX_SIZE)
        .await
        .unwrap();
    let second = select_files(root, &all, &[], &matcher, DEFAULT_MAX_SIZE)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, vec!["a/c.txt", "a/d.md", "b.txt"]);
}

#[tokio::test]
async fn test_binary_files_are_always_excluded() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "logo.png", "not really a png").await;
    write(root, "assets/Photo.JPG", "nope").await;
    write(root, "notes.txt", "hello").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let files = select_files(
        root,
        &patterns(&["logo.png", "assets/Photo.JPG", "**/*"]),
        &[],
        &matcher,
        DEFAULT_MAX_SIZE,
    )
    .await
    .unwrap();

    assert_eq!(files, vec!["notes.txt"]);
}

#[test]
fn test_binary_extension_check() {
    assert!(is_binary_path("logo.png"));
    assert!(is_binary_path("dist/app.WASM"));
    assert!(is_binary_path("fonts/Inter.woff2"));
    assert!(!is_binary_path("src/main.rs"));
    assert!(!is_binary_path("Makefile"));
    assert!(!is_binary_path("icon.svg"));
}

#[tokio::test]
async fn test_size_ceiling_is_inclusive() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "exact.txt", "0123456789").await;
    write(root, "over.txt", "0123456789A").await;
    write(root, "under.txt", "012").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let files = select_files(root, &patterns(&["*.txt"]), &[], &matcher, 10)
        .await
        .unwrap();

    assert_eq!(files, vec!["exact.txt", "under.txt"]);
}

#[tokio::test]
async fn test_dotfiles_need_explicit_patterns() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".github/workflows/ci.yml", "on: push").await;
    write(root, ".prettierrc", "{}").await;
    write(root, "src/.hidden/inner.rs", "// hidden").await;
    write(root, "src/visible.rs", "// visible").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let defaults = select_files(root, &patterns(&["**/*"]), &[], &matcher, DEFAULT_MAX_SIZE)
        .await
        .unwrap();
    assert_eq!(defaults, vec!["src/visible.rs"]);

    let explicit = select_files(
        root,
        &patterns(&["**/*"]),
        &patterns(&[".github/**/*", ".prettierrc"]),
        &matcher,
        DEFAULT_MAX_SIZE,
    )
    .await
    .unwrap();
    assert_eq!(
        explicit,
        vec![".github/workflows/ci.yml", ".prettierrc", "src/visible.rs"]
    );
}

#[tokio::test]
async fn test_ignore_rules_filter_matches() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "node_modules/pkg/index.js", "module.exports = 1").await;
    write(root, "index.js", "require('pkg')").await;
    write(root, "debug.log", "boom").await;
    write(root, "Cargo.lock", "# lock").await;
    write(root, "scratch/tmp.js", "1").await;
    write(root, ".gitignore", "!Cargo.lock\nscratch/\n").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let files = select_files(root, &patterns(&["**/*"]), &[], &matcher, DEFAULT_MAX_SIZE)
        .await
        .unwrap();

    assert_eq!(files, vec!["Cargo.lock", "index.js"]);
}

#[tokio::test]
async fn test_directory_pattern_expands_to_contents() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "src/a.rs", "a").await;
    write(root, "src/nested/b.rs", "b").await;
    write(root, "other.rs", "o").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let files = select_files(root, &patterns(&["./src/"]), &[], &matcher, DEFAULT_MAX_SIZE)
        .await
        .unwrap();

    assert_eq!(files, vec!["src/a.rs", "src/nested/b.rs"]);
}

#[tokio::test]
async fn test_no_matches_yields_empty_list() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.rs", "a").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let files = select_files(root, &patterns(&["**/*.py"]), &[], &matcher, DEFAULT_MAX_SIZE)
        .await
        .unwrap();

    assert!(files.is_empty());
}

#[tokio::test]
async fn test_matching_is_case_sensitive() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "README.md", "# readme").await;

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let files = select_files(root, &patterns(&["readme.md"]), &[], &matcher, DEFAULT_MAX_SIZE)
        .await
        .unwrap();

    assert!(files.is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_broken_symlinks_are_dropped_silently() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "real.txt", "real").await;
    std::os::unix::fs::symlink(root.join("missing.txt"), root.join("dangling.txt")).unwrap();

    let matcher = IgnoreMatcher::new(root, &[]).unwrap();
    let files = select_files(root, &patterns(&["*.txt"]), &[], &matcher, DEFAULT_MAX_SIZE)
        .await
        .unwrap();

    assert_eq!(files, vec!["real.txt"]);
}

#[test]
fn test_parse_size_limit() {
    assert_eq!(parse_size_limit("50k"), 51_200);
    assert_eq!(parse_size_limit("2m"), 2_097_152);
    assert_eq!(parse_size_limit("100"), 100);
    assert_eq!(parse_size_limit("bogus"), 102_400);
}

#[test]
fn test_parse_size_limit_units_and_fallbacks() {
    assert_eq!(parse_size_limit("10KB"), 10_240);
    assert_eq!(parse_size_limit("1Mb"), 1_048_576);
    assert_eq!(parse_size_limit("3K"), 3_072);
    assert_eq!(parse_size_limit(""), DEFAULT_MAX_SIZE);
    assert_eq!(parse_size_limit("-5k"), DEFAULT_MAX_SIZE);
    assert_eq!(parse_size_limit("1.5m"), DEFAULT_MAX_SIZE);
    assert_eq!(parse_size_limit("5g"), DEFAULT_MAX_SIZE);
    assert_eq!(parse_size_limit("99999999999999999999m"), DEFAULT_MAX_SIZE);
}
