use crate::data::climb_state::ClimbState;
use crate::data::persistence::Persistable;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Durable home of the climb record. `Ok(None)` from `load` means nothing has
/// been stored yet.
pub trait ClimbStorage {
    fn load(&self) -> Result<Option<ClimbState>>;
    fn save(&mut self, state: &ClimbState) -> Result<()>;
}

/// `climbed_peaks.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(ClimbState::filename())
    }
}

impl ClimbStorage for FileStorage {
    fn load(&self) -> Result<Option<ClimbState>> {
        if !self.path().exists() {
            return Ok(None);
        }
        ClimbState::load_from(&self.dir).map(Some)
    }

    fn save(&mut self, state: &ClimbState) -> Result<()> {
        state.save_to(&self.dir)
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use super::{ClimbState, ClimbStorage};
    use anyhow::{Context, Result, bail};

    /// Keeps the serialized record in memory.
    #[derive(Debug, Default, Clone)]
    pub struct MemoryStorage {
        pub record: Option<String>,
        /// Makes every write fail, to exercise the non-fatal save path.
        pub read_only: bool,
    }

    impl MemoryStorage {
        pub fn with_record(record: &str) -> Self {
            MemoryStorage {
                record: Some(record.to_string()),
                read_only: false,
            }
        }
    }

    impl ClimbStorage for MemoryStorage {
        fn load(&self) -> Result<Option<ClimbState>> {
            self.record
                .as_deref()
                .map(|raw| serde_json::from_str(raw).context("failed to parse climb record"))
                .transpose()
        }

        fn save(&mut self, state: &ClimbState) -> Result<()> {
            if self.read_only {
                bail!("storage is read-only");
            }
            let raw = serde_json::to_string(state).context("failed to serialize climb record")?;
            self.record = Some(raw);
            Ok(())
        }
    }
}

/// Sole owner of the climb state. Every mutation goes through `toggle` and is
/// written back immediately; a failed write leaves the in-memory state
/// authoritative for the session.
pub struct ClimbStore<S: ClimbStorage> {
    state: ClimbState,
    storage: S,
    last_save_error: Option<String>,
}

impl<S: ClimbStorage> ClimbStore<S> {
    pub fn open(storage: S) -> Self {
        let state = Self::load(&storage);
        info!(climbed = state.len(), "climb state loaded");
        ClimbStore {
            state,
            storage,
            last_save_error: None,
        }
    }

    /// Never fails: a missing or unreadable record yields an empty state.
    pub fn load(storage: &S) -> ClimbState {
        match storage.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!("no climb record yet, starting empty");
                ClimbState::default()
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "discarding unreadable climb record");
                ClimbState::default()
            }
        }
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        let climbed = self.state.toggle(id);
        debug!(id, climbed, "toggled peak");
        self.save();
        climbed
    }

    fn save(&mut self) {
        match self.storage.save(&self.state) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                let msg = format!("{e:#}");
                warn!(error = %msg, "failed to persist climb state");
                self.last_save_error = Some(msg);
            }
        }
    }

    pub fn state(&self) -> &ClimbState {
        &self.state
    }

    /// Message of the most recent failed write, cleared by the next success.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }
}

#[cfg(test)]
impl<S: ClimbStorage> ClimbStore<S> {
    pub fn is_climbed(&self, id: &str) -> bool {
        self.state.contains(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
