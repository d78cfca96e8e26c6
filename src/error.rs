use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a line-delimited data file as a whole.
///
/// Individual bad lines are never reported through this type; see
/// [`crate::lines::MalformedLine`].
#[derive(Debug, Error)]
pub enum DataFileError {
    /// The file does not exist.
    #[error("File {} was not found.", path.display())]
    NotFound { path: PathBuf },

    /// Any other I/O failure while opening or reading the file.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataFileError {
    /// Classify an I/O error raised while working on `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
