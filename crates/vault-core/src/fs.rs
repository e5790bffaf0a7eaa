//! Vault file I/O: atomic writes and permission handling.
//!
//! The envelope text is written to a sibling temp file first and
//! renamed over the destination, so a crash mid-write never leaves a
//! truncated vault. On Unix the file ends up mode 0600.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, VaultError};

/// Read the envelope text from the vault file.
///
/// Trailing whitespace (a trailing newline from manual edits) is
/// stripped; the envelope itself never contains whitespace.
pub fn read_vault(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents.trim_end().to_string()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(VaultError::NotFound(path.display().to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Atomically replace the vault file with `envelope`.
pub fn write_vault_atomic(path: &Path, envelope: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, envelope)?;
    rename_with_fallback(&temp_path, path)?;
    restrict_permissions(path)?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp = path.as_os_str().to_os_string();
    temp.push(".tmp");
    PathBuf::from(temp)
}

/// Rename, with a remove-and-retry fallback for platforms where rename
/// fails if the destination exists. A failed rename cleans up the temp
/// file so no `.tmp` litter survives.
fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

/// Owner-only read/write. The vault is ciphertext, but there is no
/// reason to share it.
fn restrict_permissions(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.bin");

        write_vault_atomic(&path, "ZW52ZWxvcGU=").unwrap();
        assert_eq!(read_vault(&path).unwrap(), "ZW52ZWxvcGU=");
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.bin");

        write_vault_atomic(&path, "old").unwrap();
        write_vault_atomic(&path, "new").unwrap();

        assert_eq!(read_vault(&path).unwrap(), "new");
        assert!(!path.with_file_name("vault.bin.tmp").exists());
    }

    #[test]
    fn test_missing_vault_is_not_found() {
        let dir = tempdir().unwrap();
        let result = read_vault(&dir.path().join("absent.bin"));
        assert!(matches!(result, Err(VaultError::NotFound(_))));
    }

    #[test]
    fn test_read_strips_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.bin");
        fs::write(&path, "ZW52ZWxvcGU=\n").unwrap();

        assert_eq!(read_vault(&path).unwrap(), "ZW52ZWxvcGU=");
    }

    #[cfg(unix)]
    #[test]
    fn test_vault_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.bin");
        write_vault_atomic(&path, "ZW52ZWxvcGU=").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
