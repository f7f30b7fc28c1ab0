//! Session persistence.
//!
//! Remembers the last-used input values between invocations. The record is
//! read once at startup and written once at teardown; simulation code never
//! reads it. Stored with bincode.

use serde::{Deserialize, Serialize};
use srm_common::motor::MotorConfig;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Session persistence errors.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// File system access failed.
    #[error("Session I/O error: {0}")]
    Io(String),

    /// Record could not be encoded.
    #[error("Failed to serialize session: {0}")]
    Encode(String),

    /// Record could not be decoded.
    #[error("Failed to deserialize session: {0}")]
    Decode(String),
}

/// Last-used input values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    /// Version of record format (for migration)
    pub version: u32,
    /// Motor of the last `run`/`step`, diameters of the last sweep.
    pub motor: Option<MotorConfig>,
    /// Last sweep size.
    pub sweep_max: Option<usize>,
    /// Timestamp of last save (Unix epoch seconds)
    pub saved_at: u64,
}

impl SessionRecord {
    /// Current record format version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Create an empty record.
    pub const fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            motor: None,
            sweep_max: None,
            saved_at: 0,
        }
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// File-backed session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store for `path`. Nothing is read until [`load`](Self::load).
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the record, stamping `saved_at`.
    pub fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        debug!("Saving session to {:?}", self.path);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::Io(format!("Failed to create directory: {}", e)))?;
        }

        let mut record = *record;
        record.saved_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let file = File::create(&self.path)
            .map_err(|e| SessionError::Io(format!("Failed to create session file: {}", e)))?;

        bincode::serialize_into(BufWriter::new(file), &record)
            .map_err(|e| SessionError::Encode(e.to_string()))?;

        info!("Saved session to {:?}", self.path);
        Ok(())
    }

    /// Load the record. `Ok(None)` if the file is absent or from another
    /// format version.
    pub fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        debug!("Loading session from {:?}", self.path);

        if !self.path.exists() {
            debug!("Session file does not exist, starting fresh");
            return Ok(None);
        }

        let file = File::open(&self.path)
            .map_err(|e| SessionError::Io(format!("Failed to open session file: {}", e)))?;

        let record: SessionRecord = bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| SessionError::Decode(e.to_string()))?;

        if record.version != SessionRecord::CURRENT_VERSION {
            warn!(
                "Session file version {} differs from current {}, starting fresh",
                record.version,
                SessionRecord::CURRENT_VERSION
            );
            return Ok(None);
        }

        Ok(Some(record))
    }
}
