use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::Note;

pub const BASE_DIR: &str = ".terminal-notes";
pub const STORAGE_FILE: &str = "storage.json";
pub const LOG_FILE: &str = "notes.log";
pub const CONFIG_FILE: &str = "config.json";
pub const NOTES_KEY: &str = "notes";

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub data_dir: String,
}

/// String keys to string values, the way browser local storage behaves.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Key-value store kept as a single JSON object file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        let items: BTreeMap<String, String> = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("Malformed store {}: {e}", self.path.display()))?;
        Ok(items)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_items().unwrap_or_else(|e| {
            warn!("{e}; starting a fresh store");
            BTreeMap::new()
        });
        items.insert(key.to_string(), value.to_string());
        let data = serde_json::to_string_pretty(&items)?;
        atomic_write(&self.path, data.as_bytes())?;
        restrict_file(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    pub items: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Absent, unreadable or unparsable data all load as an empty collection.
pub fn load_notes(store: &impl KeyValueStore) -> Vec<Note> {
    let raw = match store.get_item(NOTES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Could not read stored notes: {e}");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Option<Vec<Note>>>(&raw) {
        Ok(notes) => notes.unwrap_or_default(),
        Err(e) => {
            warn!("Stored notes are not valid JSON, starting empty: {e}");
            Vec::new()
        }
    }
}

pub fn save_notes(store: &mut impl KeyValueStore, notes: &[Note]) -> Result<()> {
    let raw = serde_json::to_string(notes)?;
    store.set_item(NOTES_KEY, &raw)
}

pub fn default_base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home.join(BASE_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(default_base_dir()?.join(CONFIG_FILE))
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let cfg: Config = serde_json::from_str(&raw)?;
    Ok(Some(cfg))
}

pub fn save_config(data_dir: &Path) -> Result<()> {
    let cfg = Config {
        data_dir: data_dir
            .to_str()
            .ok_or_else(|| anyhow!("Invalid data dir path"))?
            .to_string(),
    };
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let data = serde_json::to_string_pretty(&cfg)?;
    atomic_write(path.as_path(), data.as_bytes())?;
    restrict_file(path.as_path())?;
    Ok(())
}

/// Data directory for this run: the override, else the configured one, else the default.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(raw) = override_dir {
        return validate_data_dir(raw);
    }
    if let Some(cfg) = load_config()? {
        return validate_data_dir(Path::new(&cfg.data_dir));
    }
    default_base_dir()
}

pub fn validate_data_dir(raw: &Path) -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    resolve_under_home(raw, &home)
}

pub fn storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_FILE)
}

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    restrict_dir(dir)
}

fn resolve_under_home(raw: &Path, home: &Path) -> Result<PathBuf> {
    let candidate = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        home.join(raw)
    };

    if candidate
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(anyhow!("Data dir cannot contain '..' traversal components"));
    }
    if !candidate.starts_with(home) {
        return Err(anyhow!("Data dir must be inside {}", home.display()));
    }

    // Resolve symlinks when possible so a link cannot point outside home.
    let home_real = fs::canonicalize(home).unwrap_or_else(|_| home.to_path_buf());
    if candidate.exists() {
        let real = fs::canonicalize(&candidate)?;
        if !real.starts_with(&home_real) {
            return Err(anyhow!("Data dir resolves outside {}", home.display()));
        }
    } else if let Some(parent) = candidate.parent() {
        if parent.exists() {
            let real_parent = fs::canonicalize(parent)?;
            if !real_parent.starts_with(&home_real) {
                return Err(anyhow!("Data dir parent resolves outside {}", home.display()));
            }
        }
    }

    Ok(candidate)
}

fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| anyhow!("Invalid target path"))?;
    if !parent.exists() {
        fs::create_dir_all(parent)?;
        restrict_dir(parent)?;
    }

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path)
        .map_err(|e| anyhow!("Atomic write failed: {}", e.error))?;
    Ok(())
}

pub fn restrict_file(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if path.exists() {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms)?;
        }
    }
    Ok(())
}

fn restrict_dir(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if path.exists() {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(path, perms)?;
        }
    }
    Ok(())
}
