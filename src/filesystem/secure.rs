use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Ensure the parent directory of `path` exists and has restrictive permissions on Unix.
pub fn ensure_parent_secure(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
            }
        }
    }
    Ok(())
}

#[cfg(unix)]
fn set_perm_0600(path: &Path) {
    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
}

/// Whole-file read; `None` when the file does not exist.
pub fn read_if_exists(path: &Path) -> io::Result<Option<Vec<u8>>> {
    let mut f = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    Ok(Some(buf))
}

/// Atomically replace `path` with `bytes` (temp file + rename), 0600 on Unix.
pub fn atomic_write_secure(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path: PathBuf = path.with_extension("tmp");
    {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(bytes)?;
        let _ = tmp.sync_data();
    }
    #[cfg(unix)]
    set_perm_0600(&tmp_path);

    fs::rename(&tmp_path, path)
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    PathBuf::from(format!("{}.{n}", path.display()))
}

/// Rotate up to `n` backups (`<file>.1` newest .. `<file>.n` oldest), then write atomically.
pub fn write_with_backups_n(path: &Path, bytes: &[u8], n: usize) -> io::Result<()> {
    ensure_parent_secure(path)?;

    if n > 0 && path.exists() {
        let _ = fs::remove_file(backup_path(path, n));
        for i in (1..n).rev() {
            let src = backup_path(path, i);
            if src.exists() {
                let _ = fs::rename(&src, backup_path(path, i + 1));
            }
        }
        // Copy rather than move: the live file must survive a failed write.
        let first = backup_path(path, 1);
        fs::copy(path, &first)?;
        #[cfg(unix)]
        set_perm_0600(&first);
    }

    atomic_write_secure(path, bytes)
}

/// Append `line` to `path`, creating the file (0600 on Unix) when missing.
pub fn append_secure(path: &Path, line: &str) -> io::Result<()> {
    ensure_parent_secure(path)?;
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    f.write_all(line.as_bytes())?;
    #[cfg(unix)]
    set_perm_0600(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn backups_rotate_oldest_out() {
        let td = tempdir().unwrap();
        let path = td.path().join("passwords.json");
        for body in ["one", "two", "three", "four"] {
            write_with_backups_n(&path, body.as_bytes(), 2).unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "four");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "three");
        assert_eq!(fs::read_to_string(backup_path(&path, 2)).unwrap(), "two");
        assert!(!backup_path(&path, 3).exists());
    }

    #[test]
    fn zero_backups_leaves_no_copies() {
        let td = tempdir().unwrap();
        let path = td.path().join("passwords.json");
        write_with_backups_n(&path, b"a", 0).unwrap();
        write_with_backups_n(&path, b"b", 0).unwrap();
        assert!(!backup_path(&path, 1).exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn read_missing_is_none() {
        let td = tempdir().unwrap();
        assert!(read_if_exists(&td.path().join("nope")).unwrap().is_none());
    }

    #[test]
    fn append_creates_nested_file() {
        let td = tempdir().unwrap();
        let path = td.path().join("nested").join("passwords.csv");
        append_secure(&path, "a\n").unwrap();
        append_secure(&path, "b\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
