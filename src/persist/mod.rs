//! Memory persistence between runs
//!
//! Memory is stored as a JSON object mapping decimal address strings to
//! integers:
//!
//! ```json
//! {
//!   "0": 0,
//!   "1": 42
//! }
//! ```
//!
//! Loading overlays the stored cells on freshly seeded memory, so missing keys
//! keep their default 0 and unknown keys add new addresses. Saving writes every
//! cell. Registers are never stored. Reads and writes are whole-file and
//! unlocked: two processes sharing one store simply overwrite each other.

use crate::memory::Memory;
use crate::parser::ast::{Address, Word};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot access memory store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("memory store {path} is not valid: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON-backed memory store at a fixed path
#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MemoryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Seeded memory with the stored cells laid over it
    pub fn load(&self) -> Result<Memory, PersistError> {
        let mut memory = Memory::new();
        if let Some(cells) = self.read_cells()? {
            tracing::debug!(path = %self.path.display(), cells = cells.len(), "loaded memory");
            memory.overlay(cells);
        } else {
            tracing::debug!(path = %self.path.display(), "no memory store, starting from zero");
        }
        Ok(memory)
    }

    /// Raw stored cells, `None` when the store does not exist yet
    pub fn read_cells(&self) -> Result<Option<BTreeMap<Address, Word>>, PersistError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| PersistError::Json {
                path: self.path.clone(),
                source,
            })
    }

    /// Write every cell, pretty-printed with two-space indentation
    pub fn save(&self, memory: &Memory) -> Result<(), PersistError> {
        let text =
            serde_json::to_string_pretty(memory.cells()).map_err(|source| PersistError::Json {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, text).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), cells = memory.len(), "saved memory");
        Ok(())
    }
}
