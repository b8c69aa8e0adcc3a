use std::fmt;
use std::path::PathBuf;

/// Error raised at the persistence boundary.
///
/// Catalog-facing store operations collapse these to `false` (save) or an
/// empty load; `JsonFileStore::try_load` surfaces them for callers that want
/// to tell a missing file apart from a corrupt one.
#[derive(Debug)]
pub enum StorageError {
    /// The data file does not exist yet.
    Missing(PathBuf),
    /// Reading or writing the data file failed.
    Io(std::io::Error),
    /// The file contents are not valid JSON.
    Format(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Missing(path) => {
                write!(f, "Data file not found: {}", path.display())
            }
            StorageError::Io(err) => write!(f, "File access error: {}", err),
            StorageError::Format(err) => write!(f, "Invalid data file: {}", err),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Format(err)
    }
}
