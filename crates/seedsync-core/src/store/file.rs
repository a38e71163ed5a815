// # File Session Store
//
// File-based implementation of SessionStore.
//
// ## Layout
//
// One file per record under a data directory:
//
// ```text
// <dir>/session.json    serialized SessionState
// <dir>/last_ip         plain-text marker
// <dir>/last_update     plain-text marker (RFC 3339)
// ```
//
// ## Atomicity
//
// Every write goes to `<file>.tmp` first and is renamed into place, so a
// reader never observes a half-written record. A session file that exists
// but fails to decode is surfaced as a decode error; recovery is left to
// the operator since silently dropping credentials would force a re-seed.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::session::SessionState;
use crate::traits::session_store::SessionStore;

/// File name of the session record inside the data directory
const SESSION_FILE: &str = "session.json";

/// File-backed session store rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
    session_path: PathBuf,
}

impl FileSessionStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir).await.map_err(|e| {
            Error::config(format!(
                "failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let session_path = dir.join(SESSION_FILE);
        Ok(Self { dir, session_path })
    }

    /// Data directory this store is rooted at
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn marker_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Write `bytes` to `path` via a temporary file and rename
    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), Error> {
        let mut tmp = path.to_path_buf();
        tmp.set_extension("tmp");

        {
            let mut file = fs::File::create(&tmp).await.map_err(|e| {
                Error::store(format!("failed to create {}: {}", tmp.display(), e))
            })?;
            file.write_all(bytes).await.map_err(|e| {
                Error::store(format!("failed to write {}: {}", tmp.display(), e))
            })?;
            file.flush().await.map_err(|e| {
                Error::store(format!("failed to flush {}: {}", tmp.display(), e))
            })?;
        }

        fs::rename(&tmp, path).await.map_err(|e| {
            Error::store(format!(
                "failed to rename {} to {}: {}",
                tmp.display(),
                path.display(),
                e
            ))
        })?;

        tracing::trace!(path = %path.display(), "record written");
        Ok(())
    }

    /// Read a file to a string, mapping NotFound to `None`
    async fn read_optional(&self, path: &Path) -> Result<Option<String>, Error> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::store(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn exists(&self) -> bool {
        self.session_path.exists()
    }

    async fn load(&self) -> Result<Option<SessionState>, Error> {
        let Some(content) = self.read_optional(&self.session_path).await? else {
            return Ok(None);
        };

        let session: SessionState = serde_json::from_str(&content).map_err(|e| {
            Error::decode(format!(
                "session record {} is corrupt: {}",
                self.session_path.display(),
                e
            ))
        })?;

        Ok(Some(session))
    }

    async fn save(&self, session: &SessionState) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| Error::store(format!("failed to serialize session: {}", e)))?;
        self.write_atomic(&self.session_path, json.as_bytes()).await
    }

    async fn read_marker(&self, name: &str) -> Result<Option<String>, Error> {
        self.read_optional(&self.marker_path(name)).await
    }

    async fn write_marker(&self, name: &str, value: &str) -> Result<(), Error> {
        self.write_atomic(&self.marker_path(name), value.as_bytes())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionCookie;
    use tempfile::tempdir;

    #[tokio::test]
    async fn absent_records_are_not_errors() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::open(dir.path()).await.unwrap();

        assert!(!store.exists().await);
        assert!(store.load().await.unwrap().is_none());
        assert!(store.read_marker("last_ip").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn session_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::open(dir.path()).await.unwrap();

        let session = SessionState::from_cookies(vec![
            SessionCookie::new("mam_id", "seed-value"),
            SessionCookie::new("uid", "42"),
        ]);
        store.save(&session).await.unwrap();

        assert!(store.exists().await);

        // Reopen to prove durability, not just in-process state
        let store2 = FileSessionStore::open(dir.path()).await.unwrap();
        let loaded = store2.load().await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn corrupt_session_surfaces_decode_error() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::open(dir.path()).await.unwrap();

        fs::write(dir.path().join("session.json"), b"not json")
            .await
            .unwrap();

        assert!(store.exists().await);
        let err = store.load().await.unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn markers_are_independent_scalars() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::open(dir.path()).await.unwrap();

        store.write_marker("last_ip", "1.2.3.4").await.unwrap();
        store
            .write_marker("last_update", "2026-01-01T00:00:00Z")
            .await
            .unwrap();

        assert_eq!(
            store.read_marker("last_ip").await.unwrap().as_deref(),
            Some("1.2.3.4")
        );
        assert_eq!(
            store.read_marker("last_update").await.unwrap().as_deref(),
            Some("2026-01-01T00:00:00Z")
        );

        // Overwrite replaces wholesale
        store.write_marker("last_ip", "5.6.7.8").await.unwrap();
        assert_eq!(
            store.read_marker("last_ip").await.unwrap().as_deref(),
            Some("5.6.7.8")
        );
    }

    #[tokio::test]
    async fn no_tmp_file_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::open(dir.path()).await.unwrap();

        store.save(&SessionState::from_seed("s")).await.unwrap();
        store.write_marker("last_ip", "1.2.3.4").await.unwrap();

        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        assert_eq!(names, vec!["last_ip", "session.json"]);
    }
}
