use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Icon not found: {name} (looked in {})", dir.display())]
    IconNotFound { name: String, dir: PathBuf },

    #[error("Malformed icon {name} in {}: {reason}", dir.display())]
    MalformedIcon {
        name: String,
        dir: PathBuf,
        reason: String,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
