// rowguard-core/src/infrastructure/fs.rs

use crate::infrastructure::error::WriteError;
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
const DEFAULT_MODE: u32 = 0o644;

/// Writes `content` to `path` through a temp file in the same directory and
/// an atomic rename. Either the whole file lands or nothing does.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    let unavailable = |source: std::io::Error| WriteError::DestinationUnavailable {
        path: path.to_path_buf(),
        source,
    };

    // `Path::parent` yields "" for a bare file name.
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    // Same directory, so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(unavailable)?;

    temp_file.write_all(content.as_ref()).map_err(unavailable)?;
    temp_file.as_file().sync_all().map_err(unavailable)?;

    // Temp files are created 0600; the report keeps the mode of the file it
    // replaces, or 0644 for a new one.
    #[cfg(unix)]
    {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let mode = fs::metadata(path)
            .map(|meta| meta.permissions().mode() & 0o777)
            .unwrap_or(DEFAULT_MODE);
        fs::set_permissions(temp_file.path(), fs::Permissions::from_mode(mode))
            .map_err(unavailable)?;
    }

    // Dropping the temp file on error removes it
    temp_file.persist(path).map_err(|e| unavailable(e.error))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.csv");

        atomic_write(&file_path, "identity,name,email,violations\n")?;

        assert_eq!(
            fs::read_to_string(file_path)?,
            "identity,name,email,violations\n"
        );
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.csv");

        atomic_write(&file_path, "Initial")?;
        atomic_write(&file_path, "Updated")?;

        assert_eq!(fs::read_to_string(file_path)?, "Updated");
        Ok(())
    }

    #[test]
    fn test_missing_parent_leaves_nothing_behind() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("missing").join("report.csv");

        let err = atomic_write(&file_path, "data").unwrap_err();

        assert!(matches!(err, WriteError::DestinationUnavailable { .. }));
        assert!(!file_path.exists());
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_directory_target_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("out");
        fs::create_dir(&target)?;
        fs::write(target.join("keep.txt"), "x")?;

        assert!(atomic_write(&target, "data").is_err());
        // only the pre-existing directory remains, no stray temp file
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_world_readable() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir()?;
        let file_path = dir.path().join("report.csv");

        atomic_write(&file_path, "data")?;

        let mode = fs::metadata(&file_path)?.permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir()?;
        let file_path = dir.path().join("report.csv");
        fs::write(&file_path, "old")?;
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o640))?;

        atomic_write(&file_path, "new")?;

        let mode = fs::metadata(&file_path)?.permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(fs::read_to_string(&file_path)?, "new");
        Ok(())
    }
}
