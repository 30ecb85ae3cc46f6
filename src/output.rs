use crate::DigestError;
use arboard::Clipboard;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<(), DigestError>;
}

/// The desktop clipboard, opened fresh for every copy.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), DigestError> {
        debug!("Initializing clipboard");
        let mut clipboard =
            Clipboard::new().map_err(|e| DigestError::ClipboardInitError(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| DigestError::ClipboardWriteError(e.to_string()))
    }
}

/// What happened to the assembled output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    /// The file written to, or `None` when the output went to the writer.
    pub written_to: Option<PathBuf>,
    pub copied: bool,
}

/// Sends `output` to `destination` if given, otherwise to `writer`, and then
/// to the clipboard. Clipboard failures are logged and never returned.
pub async fn emit<W>(
    output: &str,
    destination: Option<&Path>,
    writer: &mut W,
    clipboard: Option<&mut dyn ClipboardProvider>,
) -> Result<EmitReport, DigestError>
where
    W: AsyncWrite + Unpin,
{
    let written_to = match destination {
        Some(path) => {
            async_fs::write(path, output)
                .await
                .map_err(|e| DigestError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
            info!("Wrote output to {}", path.display());
            Some(path.to_path_buf())
        }
        None => {
            writer.write_all(output.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            None
        }
    };

    let copied = match clipboard {
        Some(clipboard) => match clipboard.set_text(output) {
            Ok(()) => {
                info!("Copied output to clipboard");
                true
            }
            Err(e) => {
                warn!("Could not copy output to clipboard: {}", e);
                false
            }
        },
        None => false,
    };

    Ok(EmitReport { written_to, copied })
}
