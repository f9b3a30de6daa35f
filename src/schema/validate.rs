//! Input file validation, run before any SQLite call.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::ConnectionError;

/// The 16-byte header every SQLite 3 database file starts with.
pub const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Check that `path` exists, is a regular file, and carries the SQLite
/// header.
pub fn validate_database_path(path: &Path) -> Result<(), ConnectionError> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConnectionError::NotFound(path.to_path_buf()),
        _ => ConnectionError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_file() {
        return Err(ConnectionError::NotAFile(path.to_path_buf()));
    }

    let mut header = [0u8; 16];
    let mut file = File::open(path).map_err(|e| ConnectionError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Files shorter than the header cannot be databases.
    if file.read_exact(&mut header).is_err() || &header != SQLITE_HEADER {
        return Err(ConnectionError::InvalidSignature(path.to_path_buf()));
    }

    Ok(())
}
