//! JSON file store
//!
//! The document maps each hook name to its listeners:
//!
//! ```json
//! {
//!   "greet": [
//!     { "function": "upper", "priority": 5 },
//!     { "function": "shout", "priority": 10 }
//!   ],
//!   "proc": {
//!     "before": [{ "function": "upper_arg", "priority": 5 }],
//!     "after": [{ "function": "star", "priority": 10 }]
//!   }
//! }
//! ```

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::HookStore;
use crate::{
    error::{HooksError, IoOperation, Result},
    registry::RegistryState,
};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores registry state in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    /// Create a store writing pretty-printed JSON to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Sibling of the target so the final rename stays on one filesystem.
    // Unique per process and per write so concurrent writers never share one.
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(
            self.path
                .file_name()
                .unwrap_or_else(|| OsStr::new("hooks.json")),
        );
        name.push(format!(
            ".{}.{}.tmp",
            process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        self.path.with_file_name(name)
    }
}

impl HookStore for JsonFileStore {
    fn load(&self) -> Result<RegistryState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No hook file, starting empty");
                return Ok(RegistryState::default());
            }
            Err(e) => return Err(HooksError::persistence(&self.path, IoOperation::Read, e)),
        };

        if content.trim().is_empty() {
            return Ok(RegistryState::default());
        }

        let corrupt = |source: serde_json::Error| HooksError::CorruptState {
            path: self.path.clone(),
            source,
        };
        let state: RegistryState = serde_json::from_str(&content).map_err(corrupt)?;
        state
            .validate()
            .map_err(|e| corrupt(serde::de::Error::custom(e)))?;

        debug!(
            path = %self.path.display(),
            hook_count = state.len(),
            "Loaded hook file"
        );
        Ok(state)
    }

    fn save(&self, state: &RegistryState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| HooksError::persistence(parent, IoOperation::CreateDir, e))?;
        }

        let mut json = if self.pretty {
            serde_json::to_string_pretty(state)?
        } else {
            serde_json::to_string(state)?
        };
        json.push('\n');

        let temp = self.temp_path();
        if let Err(e) = fs::write(&temp, json) {
            let _ = fs::remove_file(&temp);
            return Err(HooksError::persistence(&temp, IoOperation::Write, e));
        }
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(HooksError::persistence(&self.path, IoOperation::Rename, e));
        }

        debug!(
            path = %self.path.display(),
            hook_count = state.len(),
            "Saved hook file"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::types::{ListenerRef, Phase};

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn sample_state() -> RegistryState {
        let mut state = RegistryState::new();
        state.insert("greet", ListenerRef::new("upper", 5), None).unwrap();
        state.insert("greet", ListenerRef::new("shout", 10), None).unwrap();
        state
            .insert("proc", ListenerRef::new("upper_arg", 5), Some(Phase::Before))
            .unwrap();
        state
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("hooks.json"));

        let state = store.load().unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_load_blank_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");
        fs::write(&path, "  \n").unwrap();

        let state = JsonFileStore::new(&path).load().unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("hooks.json"));
        let state = sample_state();

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("hooks.json")).with_pretty(false);

        store.save(&sample_state()).unwrap();
        store.save(&RegistryState::new()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "{}\n");
        assert_eq!(dir_entries(dir.path()), vec!["hooks.json"]);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/hooks.json"));

        store.save(&sample_state()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_load_reads_original_document_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");
        fs::write(
            &path,
            r#"{
    "antes_do_sistema": [{ "function": "intercepta_antes", "priority": 5 }],
    "depois_do_sistema": [{ "function": "intercepta_depois", "priority": 10 }]
}"#,
        )
        .unwrap();

        let state = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(
            state.entries("antes_do_sistema", None),
            &[ListenerRef::new("intercepta_antes", 5)]
        );
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStore::new(&path).load();
        assert!(matches!(result, Err(HooksError::CorruptState { .. })));
    }

    #[test]
    fn test_load_misspelled_phase_key_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");
        fs::write(
            &path,
            r#"{"proc": {"befor": [{"function": "upper_arg", "priority": 5}]}}"#,
        )
        .unwrap();

        let result = JsonFileStore::new(&path).load();
        assert!(matches!(result, Err(HooksError::CorruptState { .. })));
    }

    #[test]
    fn test_load_empty_names_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");
        fs::write(&path, r#"{"": [{"function": "", "priority": 5}]}"#).unwrap();

        let result = JsonFileStore::new(&path).load();
        assert!(matches!(result, Err(HooksError::CorruptState { .. })));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory where the file should go makes the rename fail.
        let path = dir.path().join("hooks.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let result = JsonFileStore::new(&path).save(&sample_state());

        assert!(matches!(
            result,
            Err(HooksError::PersistenceFailed {
                operation: IoOperation::Rename,
                ..
            })
        ));
        assert_eq!(dir_entries(dir.path()), vec!["hooks.json"]);
    }

    #[test]
    fn test_temp_paths_are_unique_siblings() {
        let store = JsonFileStore::new("/var/lib/app/hooks.json");
        let first = store.temp_path();
        let second = store.temp_path();

        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(Path::new("/var/lib/app")));
    }
}
