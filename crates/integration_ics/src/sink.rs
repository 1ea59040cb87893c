//! Calendar file output

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::IcsError;

/// Atomically replace `path` with `content`
///
/// The calendar is written to a temporary file next to the target and
/// renamed over it, so readers never observe a partial file.
#[instrument(skip(content), fields(path = %path.display(), bytes = content.len()))]
pub fn write_calendar(path: &Path, content: &str) -> Result<(), IcsError> {
    let io_err = |e: std::io::Error| IcsError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let dir = parent_dir(path);
    std::fs::create_dir_all(&dir).map_err(io_err)?;

    let mut file = NamedTempFile::new_in(&dir).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;
    file.as_file().sync_all().map_err(io_err)?;
    file.persist(path).map_err(|e| io_err(e.error))?;

    debug!("Calendar written");
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birthdays.ics");

        write_calendar(&path, "first").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        write_calendar(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("birthdays.ics");

        write_calendar(&path, "BEGIN:VCALENDAR").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn bare_file_name_uses_current_directory() {
        assert_eq!(parent_dir(Path::new("birthdays.ics")), PathBuf::from("."));
        assert_eq!(
            parent_dir(Path::new("/tmp/birthdays.ics")),
            PathBuf::from("/tmp")
        );
    }

    #[test]
    fn unwritable_target_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be replaced by a file
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        let err = write_calendar(&target, "content").unwrap_err();
        assert!(matches!(err, IcsError::Io { .. }));
    }
}
