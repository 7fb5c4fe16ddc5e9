//! Reading and writing document files.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to load or save a file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// The underlying reason, without the path, for status messages.
    pub fn reason(&self) -> String {
        match self {
            Self::NotFound { .. } => "file not found".to_string(),
            Self::Io { source, .. } => source.to_string(),
        }
    }
}

/// Read `path` as a list of lines.
///
/// Lines are split on `\n`; trailing `\r` bytes are dropped. A final
/// newline does not produce an extra empty line, so an empty file has no
/// lines at all.
///
/// # Errors
///
/// Returns [`StorageError::NotFound`] when the file does not exist and
/// [`StorageError::Io`] for any other read failure.
pub fn load_lines(path: &Path) -> Result<Vec<Vec<u8>>, StorageError> {
    let _scope = crate::perf::scope("storage.load");
    let bytes = fs::read(path).map_err(|err| StorageError::from_io(path, err))?;
    let lines = split_lines(&bytes);
    tracing::info!(path = %path.display(), lines = lines.len(), bytes = bytes.len(), "loaded file");
    Ok(lines)
}

fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    if bytes.is_empty() {
        return Vec::new();
    }
    body.split(|&b| b == b'\n')
        .map(|line| {
            let end = line.iter().rposition(|&b| b != b'\r').map_or(0, |i| i + 1);
            line[..end].to_vec()
        })
        .collect()
}

/// Write `contents` to `path`, creating it if needed, and return the number
/// of bytes written.
///
/// The file is opened without truncation and cut to the new length before
/// writing, so a failed open leaves the old contents alone.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the file cannot be opened, resized or
/// written.
pub fn save(path: &Path, contents: &[u8]) -> Result<usize, StorageError> {
    let io_err = |err| StorageError::Io {
        path: path.to_path_buf(),
        source: err,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path).map_err(io_err)?;
    let len = u64::try_from(contents.len()).unwrap_or(u64::MAX);
    file.set_len(len).map_err(io_err)?;
    file.write_all(contents).map_err(io_err)?;
    file.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "saved file");
    Ok(contents.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_split_lines_drops_final_newline() {
        assert_eq!(split_lines(b"a\nb\n"), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(split_lines(b"a\nb"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(
            split_lines(b"a\n\n\nb\n"),
            vec![b"a".to_vec(), Vec::new(), Vec::new(), b"b".to_vec()]
        );
        assert_eq!(split_lines(b"\n"), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_split_lines_strips_carriage_returns() {
        assert_eq!(split_lines(b"a\r\nb\r\n"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_empty_file_has_no_lines() {
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_lines(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_lines(dir.path()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.c");
        let written = save(&path, b"int x;\n\treturn;\n").unwrap();
        assert_eq!(written, 16);
        let lines = load_lines(&path).unwrap();
        assert_eq!(lines, vec![b"int x;".to_vec(), b"\treturn;".to_vec()]);
    }

    #[test]
    fn test_save_shrinks_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "a much longer previous body\n").unwrap();
        save(&path, b"short\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"short\n");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = save(&path, b"x\n").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!err.reason().is_empty());
    }
}
