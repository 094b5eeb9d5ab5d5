use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ProntoError;
use crate::roster::Roster;

/// Load a roster document from a JSON file.
pub fn load_roster(path: &Path) -> Result<Roster, ProntoError> {
    let content = std::fs::read_to_string(path).map_err(|e| ProntoError::RosterLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| ProntoError::RosterLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Replace the roster document as a whole.
///
/// The JSON is written to a temp file in the same directory and renamed over
/// the target, so readers never see a half-written roster.
pub fn save_roster(path: &Path, roster: &Roster) -> Result<(), ProntoError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmpfile = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmpfile, roster)?;
    tmpfile.write_all(b"\n")?;
    tmpfile.persist(path).map_err(|e| ProntoError::Io(e.error))?;
    Ok(())
}

/// Exclusive marker that an import is running against one roster file.
///
/// Taken with create-new semantics next to the roster; a second import
/// fails instead of waiting. Released on drop.
#[derive(Debug)]
pub struct ImportLock {
    path: PathBuf,
}

impl ImportLock {
    pub fn acquire(roster_path: &Path) -> Result<ImportLock, ProntoError> {
        let path = lock_path(roster_path);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                writeln!(file, "{}", std::process::id())?;
                Ok(ImportLock { path })
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                let pid = std::fs::read_to_string(&path)
                    .ok()
                    .and_then(|s| s.trim().parse().ok());
                Err(ProntoError::ImportInProgress { lock: path, pid })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ImportLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not remove import lock");
        }
    }
}

fn lock_path(roster_path: &Path) -> PathBuf {
    let mut name = OsString::from(roster_path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Status};

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");

        let mut roster = Roster::new(vec![Person::new("86054-2", "DEOLINDO", "G054")]);
        roster.set_status("86054-2", 7, Some(Status::Present)).unwrap();
        save_roster(&path, &roster).unwrap();

        let loaded = load_roster(&path).unwrap();
        assert_eq!(loaded, roster);
    }

    #[test]
    fn test_load_rejects_unknown_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        std::fs::write(
            &path,
            r#"{ "persons": [ { "id": "1", "name": "ANA PAULA", "sector": "G050", "schedule": ["XX"] } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            load_roster(&path),
            Err(ProntoError::RosterLoad { .. })
        ));
    }

    #[test]
    fn test_load_rejects_overlong_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        let slots = vec!["P"; 40];
        let doc = serde_json::json!({
            "persons": [{ "id": "7", "name": "DEOLINDO", "sector": "G050", "schedule": slots }]
        });
        std::fs::write(&path, doc.to_string()).unwrap();
        match load_roster(&path) {
            Err(ProntoError::RosterLoad { reason, .. }) => {
                assert!(reason.contains("person '7' has 40 schedule slots"), "{reason}");
            }
            other => panic!("expected RosterLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_roster_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_roster(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_leftover_lock_is_named_in_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        let lock_file = dir.path().join("roster.json.lock");
        std::fs::write(&lock_file, "garbage").unwrap();

        let err = ImportLock::acquire(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("roster.json.lock"), "{message}");
        assert!(message.contains("unknown"), "{message}");
        assert!(matches!(err, ProntoError::ImportInProgress { pid: None, .. }));
    }

    #[test]
    fn test_import_lock_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");

        let lock = ImportLock::acquire(&path).unwrap();
        assert!(lock.path().exists());
        match ImportLock::acquire(&path) {
            Err(ProntoError::ImportInProgress { lock: held, pid }) => {
                assert_eq!(held, lock.path());
                assert_eq!(pid, Some(std::process::id()));
            }
            other => panic!("expected ImportInProgress, got {other:?}"),
        }

        let lock_file = lock.path().to_path_buf();
        drop(lock);
        assert!(!lock_file.exists());
        assert!(ImportLock::acquire(&path).is_ok());
    }
}
