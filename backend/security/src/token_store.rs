//! Bearer-token allowlist backed by a JSON file.
//!
//! The file holds `{"users": [...]}` and is rewritten in full after every
//! mutation. All access is serialized through one `RwLock`; mutations hold
//! the write lock across the read-modify-write-persist sequence.

use jiaofu_core::JiaofuError;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// On-disk shape of the token file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStoreFile {
    #[serde(default)]
    pub users: Vec<String>,
}

/// In-memory token list plus the path it persists to.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    tokens: RwLock<Vec<String>>,
}

impl TokenStore {
    /// Load the store from `path`, creating an empty file first if absent.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, JiaofuError> {
        let path = path.into();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            info!(path = %path.display(), "Token file not found, creating empty store");
            write_file(&path, &TokenStoreFile::default()).await?;
        }

        let raw = fs::read_to_string(&path).await.map_err(|e| {
            JiaofuError::Persistence(format!("failed to read {}: {e}", path.display()))
        })?;
        let file: TokenStoreFile = serde_json::from_str(&raw).map_err(|e| {
            JiaofuError::Persistence(format!("failed to parse {}: {e}", path.display()))
        })?;

        let mut seen = std::collections::HashSet::new();
        if file.users.iter().any(|t| !seen.insert(t.as_str())) {
            warn!(path = %path.display(), "Token file contains duplicate entries");
        }

        info!(path = %path.display(), count = file.users.len(), "Loaded token store");
        Ok(Self {
            path,
            tokens: RwLock::new(file.users),
        })
    }

    /// Path the store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Exact, case-sensitive membership check.
    pub async fn is_authorized(&self, candidate: &str) -> bool {
        self.tokens.read().await.iter().any(|t| t == candidate)
    }

    /// Snapshot of the tokens in store order.
    pub async fn list(&self) -> Vec<String> {
        self.tokens.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Append a token and persist. Rejects exact duplicates.
    ///
    /// A failed write rolls the in-memory change back.
    pub async fn add(&self, token: &str) -> Result<(), JiaofuError> {
        let mut tokens = self.tokens.write().await;
        if tokens.iter().any(|t| t == token) {
            return Err(JiaofuError::AlreadyExists(token.to_string()));
        }

        tokens.push(token.to_string());
        if let Err(e) = self.persist(&tokens).await {
            tokens.pop();
            return Err(e);
        }

        debug!(count = tokens.len(), "Token added");
        Ok(())
    }

    /// Remove the first exact match and persist.
    ///
    /// A failed write restores the token at its original position.
    pub async fn remove(&self, token: &str) -> Result<(), JiaofuError> {
        let mut tokens = self.tokens.write().await;
        let Some(index) = tokens.iter().position(|t| t == token) else {
            return Err(JiaofuError::NotFound(token.to_string()));
        };

        let removed = tokens.remove(index);
        if let Err(e) = self.persist(&tokens).await {
            tokens.insert(index, removed);
            return Err(e);
        }

        debug!(count = tokens.len(), "Token removed");
        Ok(())
    }

    async fn persist(&self, tokens: &[String]) -> Result<(), JiaofuError> {
        let file = TokenStoreFile {
            users: tokens.to_vec(),
        };
        write_file(&self.path, &file).await
    }
}

/// Overwrite the whole file atomically: write a sibling temp file, then rename.
async fn write_file(path: &Path, file: &TokenStoreFile) -> Result<(), JiaofuError> {
    let persist_err =
        |e: std::io::Error| JiaofuError::Persistence(format!("failed to write {}: {e}", path.display()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(persist_err)?;
    }

    let json = serde_json::to_string_pretty(file)
        .map_err(|e| JiaofuError::Persistence(format!("failed to serialize token file: {e}")))?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json.as_bytes()).await.map_err(persist_err)?;
    fs::rename(&tmp, path).await.map_err(persist_err)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
