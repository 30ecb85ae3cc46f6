use clap::Parser;
use repodigest::logger::initialize_logger;
use repodigest::output::{emit, ClipboardProvider, SystemClipboard};
use repodigest::selector::DEFAULT_PATTERN;
use repodigest::utils::parse_size_limit;
use repodigest::{build_digest, DigestConfig, DigestError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Glob patterns selecting files to include
    #[arg(default_value = DEFAULT_PATTERN)]
    patterns: Vec<String>,
    /// Write the output to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Copy the output to the clipboard (default)
    #[arg(short = 'c', long, overrides_with = "no_clipboard")]
    clipboard: bool,
    #[arg(long, overrides_with = "clipboard", help = "Do not copy the output to the clipboard")]
    no_clipboard: bool,
    /// Additional glob patterns to include
    #[arg(short = 'i', long, num_args = 1..)]
    include: Vec<String>,
    /// Additional gitignore-style patterns to exclude
    #[arg(short = 'e', long, num_args = 1..)]
    exclude: Vec<String>,
    /// Maximum file size, e.g. 500, 50k, 2mb
    #[arg(short = 'm', long, default_value = "100k")]
    max_size: String,
    /// Include a directory tree (default)
    #[arg(short = 't', long, overrides_with = "no_tree")]
    tree: bool,
    #[arg(long, overrides_with = "tree", help = "Leave out the directory tree")]
    no_tree: bool,
    /// Task prompt placed before everything else
    #[arg(short = 'p', long)]
    prompt: Option<String>,
    #[arg(short = 'x', long, help = "Wrap each file in <file path=\"...\"> tags")]
    xml: bool,
    /// Directory to scan
    #[arg(short = 'r', long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger();

    match run(cli_args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<ExitCode, DigestError> {
    let config = DigestConfig {
        root: args.root,
        patterns: args.patterns,
        include: args.include,
        exclude: args.exclude,
        max_size: parse_size_limit(&args.max_size),
        tree: args.tree || !args.no_tree,
        prompt: args.prompt,
        xml: args.xml,
    };

    let Some(digest) = build_digest(config).await? else {
        warn!("No files matched the given patterns");
        return Ok(ExitCode::FAILURE);
    };

    let mut system_clipboard = SystemClipboard;
    let clipboard: Option<&mut dyn ClipboardProvider> = if args.no_clipboard && !args.clipboard {
        None
    } else {
        Some(&mut system_clipboard)
    };

    let mut stdout = tokio::io::stdout();
    emit(&digest.output, args.output.as_deref(), &mut stdout, clipboard).await?;

    info!(
        "Packed {} files ({} bytes, ~{} tokens)",
        digest.files.len(),
        digest.total_bytes,
        digest.approx_tokens()
    );
    Ok(ExitCode::SUCCESS)
}
