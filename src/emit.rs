//! Artifact emitter
//!
//! Generated text is fully built in memory before anything touches the disk.
//! Each artifact is written to a temporary file next to its target and then
//! renamed over it, so an interrupted run never leaves a truncated file that
//! a later build would pick up.

use crate::error::GenError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::info;

/// A generated file: where it goes and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Artifact {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Write `contents` verbatim to `path`, replacing any previous file.
///
/// A replaced file keeps its permissions; a new one gets the same mode a
/// plain `fs::write` would give it.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), GenError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;

    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());
    let mut file = temp_file_in(parent).map_err(|e| GenError::io(parent, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| GenError::io(path, e))?;
    if let Some(permissions) = existing {
        file.as_file()
            .set_permissions(permissions)
            .map_err(|e| GenError::io(path, e))?;
    }
    file.persist(path).map_err(|e| GenError::io(path, e.error))?;
    Ok(())
}

// tempfile defaults to 0600; ask for 0666 and let the umask narrow it.
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Write every artifact, resolving relative paths against `out_dir`.
pub fn write_all(out_dir: &Path, artifacts: &[Artifact]) -> Result<(), GenError> {
    for artifact in artifacts {
        let target = out_dir.join(&artifact.path);
        write_atomic(&target, &artifact.contents)?;
        info!(path = %target.display(), bytes = artifact.contents.len(), "wrote artifact");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("io").join("certs.gen.h");
        write_atomic(&target, "#endif").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "#endif");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.inc");
        fs::write(&target, "stale contents that are longer").unwrap();
        write_atomic(&target, "fresh").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "fresh");
    }

    #[test]
    fn test_write_all_resolves_against_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_all(
            dir.path(),
            &[Artifact::new("a.inc", "A"), Artifact::new("nested/b.inc", "B")],
        )
        .unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.inc")).unwrap(), "A");
        assert_eq!(
            fs::read_to_string(dir.path().join("nested/b.inc")).unwrap(),
            "B"
        );
        // no temporary files left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let result = write_atomic(&blocker.join("child.inc"), "x");
        assert!(matches!(result, Err(GenError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_mode_matches_plain_write() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.inc");
        fs::write(&plain, "x").unwrap();
        let target = dir.path().join("atomic.inc");
        write_atomic(&target, "x").unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&target), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_replaced_file_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.inc");
        fs::write(&target, "old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&target, "new").unwrap();
        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }
}
