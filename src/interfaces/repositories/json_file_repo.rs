use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::{fs, sync::Mutex};

use crate::{entities::message::Message, errors::StorageError};

/// Whole-file JSON store. Every operation loads the full list and every
/// mutation rewrites the full document through a temp file + rename.
///
/// Writers inside one process are serialized by `write_lock`. Separate
/// processes sharing the file are not coordinated: the last writer wins.
#[derive(Clone)]
pub struct JsonFileMessageRepo {
    path: Arc<PathBuf>,
    pub(crate) write_lock: Arc<Mutex<()>>,
}

impl JsonFileMessageRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileMessageRepo {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store.
    pub(crate) async fn read_all(&self) -> Result<Vec<Message>, StorageError> {
        match fs::read(self.path.as_path()).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Degraded read: storage failures are logged and yield an empty list.
    /// Only for read paths; mutations go through `load_for_write`.
    pub(crate) async fn load(&self) -> Vec<Message> {
        self.read_all().await.unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), "Reading messages failed, serving empty list: {}", e);
            Vec::new()
        })
    }

    /// Existing records for a read-modify-write. `None` when the file exists
    /// but cannot be read or parsed, in which case the caller must not write
    /// so unreadable history is never replaced.
    pub(crate) async fn load_for_write(&self) -> Option<Vec<Message>> {
        match self.read_all().await {
            Ok(messages) => Some(messages),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Reading messages failed, leaving file untouched: {}", e);
                None
            }
        }
    }

    pub(crate) async fn write_all(&self, messages: &[Message]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(messages)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).await?;
        fs::rename(&tmp, self.path.as_path()).await?;
        Ok(())
    }

    /// Degraded write: failures are logged and swallowed.
    pub(crate) async fn persist(&self, messages: &[Message]) {
        if let Err(e) = self.write_all(messages).await {
            tracing::warn!(path = %self.path.display(), "Persisting messages failed, change kept in memory only: {}", e);
        }
    }
}
