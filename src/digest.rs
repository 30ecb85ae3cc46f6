use crate::assemble::{assemble, read_files};
use crate::ignore::IgnoreMatcher;
use crate::selector::{select_files, DEFAULT_PATTERN};
use crate::trie::render_tree;
use crate::utils::DEFAULT_MAX_SIZE;
use crate::DigestError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// Resolved inputs for a single run.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub root: PathBuf,
    pub patterns: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub max_size: u64,
    pub tree: bool,
    pub prompt: Option<String>,
    pub xml: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        DigestConfig {
            root: PathBuf::from("."),
            patterns: vec![DEFAULT_PATTERN.to_owned()],
            include: Vec::new(),
            exclude: Vec::new(),
            max_size: DEFAULT_MAX_SIZE,
            tree: true,
            prompt: None,
            xml: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Digest {
    pub files: Vec<String>,
    pub output: String,
    pub total_bytes: u64,
}

impl Digest {
    /// Rough token estimate at four characters per token.
    pub fn approx_tokens(&self) -> usize {
        self.output.chars().count().div_ceil(4)
    }
}

#[async_trait]
pub trait Digester {
    /// Builds the digest, or `None` when no file survived selection.
    async fn digest(&self) -> Result<Option<Digest>, DigestError>;
}

pub struct BasicDigester {
    config: DigestConfig,
}

impl BasicDigester {
    pub fn new(config: DigestConfig) -> Self {
        BasicDigester { config }
    }
}

#[async_trait]
impl Digester for BasicDigester {
    async fn digest(&self) -> Result<Option<Digest>, DigestError> {
        let config = &self.config;
        debug!("Building ignore rules for {:?}", config.root);
        let matcher = IgnoreMatcher::new(&config.root, &config.exclude)?;

        let files = select_files(
            &config.root,
            &config.patterns,
            &config.include,
            &matcher,
            config.max_size,
        )
        .await?;
        if files.is_empty() {
            return Ok(None);
        }
        info!("Selected {} files", files.len());

        let entries = read_files(&config.root, &files).await?;
        let total_bytes: u64 = entries.iter().map(|e| e.content.len() as u64).sum();

        let tree = config.tree.then(|| render_tree(&files));
        let output = assemble(config.prompt.as_deref(), tree.as_deref(), &entries, config.xml);
        trace!("Final content length: {}", output.len());

        Ok(Some(Digest {
            files,
            output,
            total_bytes,
        }))
    }
}

pub async fn build_digest(config: DigestConfig) -> Result<Option<Digest>, DigestError> {
    let digester = BasicDigester::new(config);
    digester.digest().await
}
