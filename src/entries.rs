//! Persistent list of timer entries
//!
//! The list is an ordered JSON array of `{ "name", "duration" }` records in a
//! per-user data file. Every edit is written back immediately.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::timer::{TimerDefinition, MAX_DURATION_SECS};

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("no timer entry at index {0}")]
    NotFound(usize),

    #[error("timer name must not be empty")]
    EmptyName,

    #[error("duration {0}s exceeds the maximum of {max}s", max = MAX_DURATION_SECS)]
    DurationTooLong(i64),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Changes to one row; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowEdit {
    pub name: Option<String>,
    pub duration: Option<i64>,
}

fn check_duration(duration: i64) -> Result<(), EntryError> {
    if duration > MAX_DURATION_SECS {
        return Err(EntryError::DurationTooLong(duration));
    }
    Ok(())
}

/// Default location of the entry file, e.g. `~/.local/share/teatime/timers.json`
pub fn default_data_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "teatime")?;
    Some(dirs.data_dir().join("timers.json"))
}

/// Entries offered when no file exists yet
pub fn default_entries() -> Vec<TimerDefinition> {
    vec![
        TimerDefinition::new("Earl Grey", 210),
        TimerDefinition::new("Green Tea", 120),
        TimerDefinition::new("Rooibos", 300),
    ]
}

/// The ordered timer list, optionally backed by a file
#[derive(Debug)]
pub struct EntryStore {
    path: Option<PathBuf>,
    entries: Vec<TimerDefinition>,
}

impl EntryStore {
    /// Load the list from `path`, falling back to the defaults if the file is missing
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EntryError> {
        let path = path.into();

        let entries: Vec<TimerDefinition> = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).map_err(|source| EntryError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No timer list at {}, using defaults", path.display());
                default_entries()
            }
            Err(source) => return Err(EntryError::Io { path, source }),
        };

        info!("Loaded {} timer(s) from {}", entries.len(), path.display());
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// A list that is never written to disk
    pub fn in_memory(entries: Vec<TimerDefinition>) -> Self {
        Self {
            path: None,
            entries,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn list(&self) -> &[TimerDefinition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&TimerDefinition, EntryError> {
        self.entries.get(index).ok_or(EntryError::NotFound(index))
    }

    /// Append a row and return its index
    ///
    /// Zero or negative durations are stored; starting such a row is ignored.
    pub fn add(&mut self, definition: TimerDefinition) -> Result<usize, EntryError> {
        if definition.name.trim().is_empty() {
            return Err(EntryError::EmptyName);
        }
        check_duration(definition.duration)?;
        self.entries.push(definition);
        self.save()?;
        Ok(self.entries.len() - 1)
    }

    /// Apply an in-place edit to a row
    pub fn update(&mut self, index: usize, edit: RowEdit) -> Result<TimerDefinition, EntryError> {
        if edit.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(EntryError::EmptyName);
        }
        if let Some(duration) = edit.duration {
            check_duration(duration)?;
        }

        let entry = self
            .entries
            .get_mut(index)
            .ok_or(EntryError::NotFound(index))?;
        if let Some(name) = edit.name {
            entry.name = name;
        }
        if let Some(duration) = edit.duration {
            entry.duration = duration;
        }
        let updated = entry.clone();

        self.save()?;
        Ok(updated)
    }

    /// Remove a row and return it
    pub fn remove(&mut self, index: usize) -> Result<TimerDefinition, EntryError> {
        if index >= self.entries.len() {
            return Err(EntryError::NotFound(index));
        }
        let removed = self.entries.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Write the list back to its file through a temporary sibling
    pub fn save(&self) -> Result<(), EntryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| EntryError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            EntryError::Parse {
                path: path.clone(),
                source,
            }
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;

        debug!("Saved {} timer(s) to {}", self.entries.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = EntryStore::load(dir.path().join("timers.json")).unwrap();
        assert_eq!(store.list(), default_entries().as_slice());
    }

    #[test]
    fn test_edits_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("timers.json");

        let mut store = EntryStore::load(&path).unwrap();
        let index = store.add(TimerDefinition::new("Sencha", 90)).unwrap();
        assert_eq!(index, 3);
        store
            .update(
                0,
                RowEdit {
                    name: None,
                    duration: Some(240),
                },
            )
            .unwrap();
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.name, "Green Tea");

        let reloaded = EntryStore::load(&path).unwrap();
        assert_eq!(
            reloaded.list(),
            &[
                TimerDefinition::new("Earl Grey", 240),
                TimerDefinition::new("Rooibos", 300),
                TimerDefinition::new("Sencha", 90),
            ]
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_reads_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timers.json");
        fs::write(&path, r#"[{"name": "Egg", "duration": 420}]"#).unwrap();

        let store = EntryStore::load(&path).unwrap();
        assert_eq!(store.get(0).unwrap(), &TimerDefinition::new("Egg", 420));
        assert!(matches!(store.get(1), Err(EntryError::NotFound(1))));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timers.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(EntryStore::load(&path), Err(EntryError::Parse { .. })));
    }

    #[test]
    fn test_rejects_bad_edits() {
        let mut store = EntryStore::in_memory(default_entries());

        assert!(matches!(
            store.add(TimerDefinition::new("  ", 10)),
            Err(EntryError::EmptyName)
        ));
        assert!(matches!(
            store.update(
                0,
                RowEdit {
                    name: Some(String::new()),
                    duration: None
                }
            ),
            Err(EntryError::EmptyName)
        ));
        assert!(matches!(store.remove(7), Err(EntryError::NotFound(7))));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_rejects_oversized_durations() {
        let mut store = EntryStore::in_memory(default_entries());

        assert!(matches!(
            store.add(TimerDefinition::new("Forever", i64::MAX)),
            Err(EntryError::DurationTooLong(i64::MAX))
        ));
        assert!(matches!(
            store.update(
                0,
                RowEdit {
                    name: Some("Forever".to_string()),
                    duration: Some(MAX_DURATION_SECS + 1)
                }
            ),
            Err(EntryError::DurationTooLong(_))
        ));
        assert_eq!(store.get(0).unwrap(), &TimerDefinition::new("Earl Grey", 210));
        assert_eq!(store.len(), 3);

        store.add(TimerDefinition::new("Year", MAX_DURATION_SECS)).unwrap();
        store.add(TimerDefinition::new("Nothing", 0)).unwrap();
        assert_eq!(store.len(), 5);
    }
}
