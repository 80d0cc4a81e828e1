//! Settings storage for the API key and the selected model.
//!
//! Configuration is passed explicitly: callers load [`Settings`] from a
//! [`ConfigStore`] and hand the result to the completion provider.

use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::{AgentError, IoResultExt, Result};

/// Key holding the OpenAI API key.
pub const API_KEY: &str = "openai_api_key";

/// Key holding the selected model name.
pub const MODEL_KEY: &str = "model";

/// Environment variable consulted when no key is stored.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Models offered for selection.
pub const KNOWN_MODELS: &[&str] = &[
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4-turbo",
    "gpt-4",
    "o1-preview",
    "o1-mini",
    "gpt-3.5-turbo",
];

/// Key/value settings storage.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Settings persisted as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileConfigStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path).fs_context(&path)?;
            serde_json::from_str(&raw)?
        } else {
            BTreeMap::new()
        };
        debug!("Loaded {} settings from {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    /// Opens the store at `$XDG_CONFIG_HOME/codeplanr/config.json`.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Returns the default config path following the XDG Base Directory
    /// specification.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("codeplanr")
            .place_config_file("config.json")
            .map_err(|e| AgentError::configuration(format!("XDG directory error: {e}")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).fs_context(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, raw).fs_context(&self.path)?;
        restrict_to_owner(&self.path)
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// In-memory store, useful for tests and one-off overrides.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: BTreeMap<String, String>,
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolved settings for a completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
}

impl Settings {
    /// Resolves settings from `store`, falling back to `OPENAI_API_KEY` for
    /// the key and to [`DEFAULT_MODEL`] for the model.
    pub fn load(store: &dyn ConfigStore) -> Self {
        Self::resolve(store, env::var(API_KEY_ENV).ok())
    }

    fn resolve(store: &dyn ConfigStore, env_key: Option<String>) -> Self {
        let api_key = non_blank(store.get(API_KEY)).or_else(|| non_blank(env_key));
        let model = non_blank(store.get(MODEL_KEY)).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self { api_key, model }
    }
}

/// The file holds the API key, so only the owner may read it.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).fs_context(path)
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Hides all but the last four characters of an API key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - 4))
}
