use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// RAII guard for a record slot's temporary file.
///
/// Content is staged next to the target and only becomes visible through
/// [`SlotGuard::commit`] or [`SlotGuard::commit_new`]. If the guard is
/// dropped first (early return, serialization failure, panic) the temporary
/// file is removed so no partial record is left behind.
pub struct SlotGuard {
    tmp_path: PathBuf,
    committed: bool,
}

impl SlotGuard {
    /// Stage `contents` in a temporary file beside `target`
    pub fn stage(target: &Path, contents: &[u8]) -> io::Result<Self> {
        let tmp_path = tmp_path_for(target);
        let guard = SlotGuard {
            tmp_path,
            committed: false,
        };

        // The handle is closed at the end of this block, before any rename
        {
            let mut file = File::create(&guard.tmp_path)?;
            file.write_all(contents)?;
            file.sync_all()?;
        }

        Ok(guard)
    }

    /// Replace `target` with the staged content
    pub fn commit(mut self, target: &Path) -> io::Result<()> {
        fs::rename(&self.tmp_path, target)?;
        self.committed = true;
        Ok(())
    }

    /// Publish the staged content at `target` only if nothing is there yet.
    ///
    /// Returns `Ok(false)` when `target` already exists. Linking fails instead
    /// of replacing, so an existing slot is never clobbered.
    pub fn commit_new(self, target: &Path) -> io::Result<bool> {
        match fs::hard_link(&self.tmp_path, target) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e),
        }
        // The temporary link is removed on drop either way
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.tmp_path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!("failed to remove {}: {e}", self.tmp_path.display());
                }
            }
        }
    }
}

fn tmp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".tmp.{}", std::process::id()));
    target.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_commit_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("一.json");
        fs::write(&target, "old").unwrap();

        SlotGuard::stage(&target, b"new").unwrap().commit(&target).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(dir_entries(dir.path()), vec!["一.json".to_string()]);
    }

    #[test]
    fn test_drop_removes_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("一.json");
        {
            let _guard = SlotGuard::stage(&target, b"partial").unwrap();
            assert_eq!(dir_entries(dir.path()).len(), 1);
        }
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_commit_new_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("一.json");

        let created = SlotGuard::stage(&target, b"first").unwrap().commit_new(&target).unwrap();
        assert!(created);

        let created = SlotGuard::stage(&target, b"second").unwrap().commit_new(&target).unwrap();
        assert!(!created);

        assert_eq!(fs::read_to_string(&target).unwrap(), "first");
        assert_eq!(dir_entries(dir.path()), vec!["一.json".to_string()]);
    }
}
