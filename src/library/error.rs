use std::path::PathBuf;

/// Failures of the content source. None of these reach the converter.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
