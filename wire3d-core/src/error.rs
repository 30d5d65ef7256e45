/// Crate-level error types.
use std::path::PathBuf;

/// A command line that could not be turned into a command.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("empty command line")]
    Empty,
    #[error("unknown verb `{0}`")]
    UnknownVerb(String),
    #[error("`{0}` needs a model name")]
    MissingModelName(String),
    #[error("malformed command `{0}`")]
    Malformed(String),
}

/// The mailbox lock was poisoned by a panicking holder.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MailboxError {
    #[error("command mailbox lock poisoned")]
    Poisoned,
}

/// Registry mutations that could not be applied.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("model `{0}` not found")]
    NotFound(String),
    #[error("model `{0}` is a structured mesh and cannot be rotated")]
    NotRotatable(String),
}

/// Loss of the platform drawing surface.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("draw surface I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("draw surface lost: {0}")]
    Lost(String),
}

/// Scene file loading failures.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open scene file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scene document has an empty model name")]
    EmptyName,
}
