//! Consent state persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::consent::state::{ConsentError, DisclaimerState};

/// Get/set pair for the persisted disclaimer state.
#[async_trait]
pub trait ConsentStore: Send + Sync {
    /// `None` when nothing was ever saved.
    async fn load(&self) -> Result<Option<DisclaimerState>, ConsentError>;

    async fn save(&self, state: DisclaimerState) -> Result<(), ConsentError>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryConsentStore {
    state: Mutex<Option<DisclaimerState>>,
}

impl MemoryConsentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: DisclaimerState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    pub fn snapshot(&self) -> Option<DisclaimerState> {
        *self.state.lock()
    }
}

#[async_trait]
impl ConsentStore for MemoryConsentStore {
    async fn load(&self) -> Result<Option<DisclaimerState>, ConsentError> {
        Ok(self.snapshot())
    }

    async fn save(&self, state: DisclaimerState) -> Result<(), ConsentError> {
        *self.state.lock() = Some(state);
        Ok(())
    }
}

/// JSON file store. Saves write a sibling temp file and rename it over the
/// target, so readers never observe a partial write.
#[derive(Debug, Clone)]
pub struct FileConsentStore {
    path: PathBuf,
}

impl FileConsentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ConsentStore for FileConsentStore {
    async fn load(&self) -> Result<Option<DisclaimerState>, ConsentError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, state: DisclaimerState) -> Result<(), ConsentError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(&state)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}
