// =============================================================================
// output.rs - WRITE IT ALL OR WRITE NOTHING
// =============================================================================
//
// Both output files are full overwrites. To keep a crash (or an error halfway
// through the CSV) from leaving a truncated file under the real name, we
// write to `<name>.partial` next to the destination and rename it into place
// only after everything has been flushed. Same directory, so the rename stays
// on one filesystem.
// =============================================================================

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ScrapeError;

fn partial_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

/// Run `write` against a buffered temp file, then move it over `path`.
///
/// On any error the temp file is removed and `path` is left untouched.
pub fn replace_file<T, F>(path: &Path, write: F) -> Result<T, ScrapeError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T, ScrapeError>,
{
    let tmp = partial_path(path);
    let file = File::create(&tmp).map_err(|e| ScrapeError::io(&tmp, e))?;
    let mut writer = BufWriter::new(file);

    let result = write(&mut writer).and_then(|value| {
        writer.flush().map_err(|e| ScrapeError::io(&tmp, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| ScrapeError::io(&tmp, e))?;
        Ok(value)
    });
    drop(writer);

    let result = result.and_then(|value| {
        fs::rename(&tmp, path).map_err(|e| ScrapeError::io(path, e))?;
        Ok(value)
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old content that is longer than the new one").unwrap();

        replace_file(&path, |w| {
            w.write_all(b"new").map_err(|e| ScrapeError::io("out.txt", e))
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_failed_write_leaves_destination_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "previous run").unwrap();

        let result: Result<(), _> = replace_file(&path, |w| {
            w.write_all(b"half a fi").map_err(|e| ScrapeError::io("out.txt", e))?;
            Err(ScrapeError::InvalidSetting {
                key: "test".to_string(),
                value: "boom".to_string(),
            })
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous run");
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_failed_rename_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory under the destination name cannot be renamed over.
        let path = dir.path().join("out.txt");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = replace_file(&path, |w| {
            w.write_all(b"new").map_err(|e| ScrapeError::io("out.txt", e))
        })
        .unwrap_err();

        assert!(matches!(err, ScrapeError::Io { .. }));
        assert!(!partial_path(&path).exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.txt");
        let err = replace_file(&path, |_| Ok(())).unwrap_err();
        assert!(matches!(err, ScrapeError::Io { .. }));
    }
}
