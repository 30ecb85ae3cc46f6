use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("Failed to read file {0}")]
    FileReadError(String),

    #[error("Failed to write output: {0}")]
    OutputWriteError(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Ignore rules error: {0}")]
    IgnoreError(String),

    #[error("Background task failed: {0}")]
    TaskError(String),
}

impl From<std::io::Error> for DigestError {
    fn from(err: std::io::Error) -> Self {
        DigestError::IoError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for DigestError {
    fn from(err: tokio::task::JoinError) -> Self {
        DigestError::TaskError(err.to_string())
    }
}
