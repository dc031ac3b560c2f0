//! Persisted session state.
//!
//! The only thing that survives between invocations is the most recent
//! comparison id, so `show` and `export` can run without re-supplying it.
//! Everything else is re-fetched by id.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionData {
    last_comparison_id: Option<String>,
}

/// Typed store over the session file, with explicit get/set/clear.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    data: SessionData,
}

impl SessionStore {
    /// Open the store at the user's data directory
    /// (e.g. `~/.local/share/termlens/session.json`).
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = dirs::data_dir()
            .context("no user data directory available")?
            .join("termlens");
        Ok(Self::open(dir.join(SESSION_FILE)))
    }

    /// Open the store at an explicit path. A missing or unreadable file
    /// reads as an empty session.
    pub fn open(path: PathBuf) -> Self {
        let data = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { path, data }
    }

    pub fn last_comparison_id(&self) -> Option<&str> {
        self.data.last_comparison_id.as_deref()
    }

    pub fn set_last_comparison_id(&mut self, id: &str) -> anyhow::Result<()> {
        self.data.last_comparison_id = Some(id.to_string());
        self.save()
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.data = SessionData::default();
        self.save()
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, text).with_context(|| format!("writing {}", self.path.display()))
    }
}
