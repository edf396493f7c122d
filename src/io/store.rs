use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::task::Task;
use crate::parse::{parse_task_bytes, serialize_tasks};

/// Name of the state directory, relative to the working directory.
pub const STATE_DIR: &str = ".stodo";

/// Timestamp format used in archive file names (14 digits).
const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Error type for store I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("archive {path} already exists")]
    ArchiveExists { path: PathBuf },
    #[error("could not archive to {path}: {source}")]
    ArchiveError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The ordered task list and the file backing it.
///
/// Every mutation writes the whole list back to disk before returning, so
/// after any successful call the file is the exact serialization of
/// `tasks()`. Tasks are addressed by position; indices out of range are
/// ignored rather than reported.
#[derive(Debug)]
pub struct Store {
    tasks: Vec<Task>,
    path: PathBuf,
}

impl Store {
    /// Create an empty store bound to `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store {
            tasks: Vec::new(),
            path: path.into(),
        }
    }

    /// Create a store bound to `path` and load it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Store::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Directory holding the task file, its archives and the recovery log
    pub fn state_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Replace the in-memory list with the file's contents.
    ///
    /// A missing file reads as an empty list. Malformed lines are dropped
    /// and recorded in the recovery log.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.tasks = Vec::new();
                return Ok(());
            }
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let (tasks, dropped) = parse_task_bytes(&bytes);
        let dropped: Vec<String> = dropped
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect();
        if !dropped.is_empty() {
            recovery::log_recovery(
                self.state_dir(),
                RecoveryEntry::new(RecoveryCategory::Parser, "dropped lines")
                    .field("Source", self.file_name())
                    .body(dropped.join("\n")),
            );
        }

        self.tasks = tasks;
        Ok(())
    }

    /// Rewrite the whole file from the in-memory list.
    pub fn save(&self) -> Result<(), StoreError> {
        let content = serialize_tasks(&self.tasks);
        if let Err(e) = recovery::atomic_write(&self.path, content.as_bytes()) {
            recovery::log_recovery(
                self.state_dir(),
                RecoveryEntry::new(RecoveryCategory::Write, "task file write failed")
                    .field("Target", self.file_name())
                    .field("Error", e.to_string())
                    .body(content),
            );
            return Err(StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            });
        }
        Ok(())
    }

    /// Append a pending task with no priority. Blank text adds nothing.
    pub fn add(&mut self, text: &str) -> Result<(), StoreError> {
        let text = text.trim();
        if !text.is_empty() {
            self.tasks.push(Task::new(text));
        }
        self.save()
    }

    /// Delete the task at `index`.
    pub fn remove(&mut self, index: usize) -> Result<(), StoreError> {
        if index < self.tasks.len() {
            self.tasks.remove(index);
        }
        self.save()
    }

    /// Flip the done flag of the task at `index`.
    pub fn toggle(&mut self, index: usize) -> Result<(), StoreError> {
        if let Some(task) = self.tasks.get_mut(index) {
            task.done = !task.done;
        }
        self.save()
    }

    /// Advance the priority of the task at `index`, wrapping High to None.
    pub fn cycle_priority(&mut self, index: usize) -> Result<(), StoreError> {
        if let Some(task) = self.tasks.get_mut(index) {
            task.priority = task.priority.cycle();
        }
        self.save()
    }

    /// Move the task file aside as `archive.<timestamp>[.<label>]` and start
    /// over with an empty list. Returns the archive path.
    pub fn archive(&mut self, label: &str) -> Result<PathBuf, StoreError> {
        self.archive_at(label, Local::now())
    }

    /// `archive` with an explicit clock reading.
    ///
    /// On error the in-memory list is untouched and the task file is back
    /// at its original path.
    pub fn archive_at(
        &mut self,
        label: &str,
        now: DateTime<Local>,
    ) -> Result<PathBuf, StoreError> {
        let archive_path = self.state_dir().join(archive_file_name(now, label));

        if archive_path.exists() {
            self.log_archive_failure(&archive_path, "archive already exists");
            return Err(StoreError::ArchiveExists { path: archive_path });
        }

        if let Err(e) = fs::rename(&self.path, &archive_path) {
            self.log_archive_failure(&archive_path, &e.to_string());
            return Err(StoreError::ArchiveError {
                path: archive_path,
                source: e,
            });
        }

        if let Err(e) = fs::File::create(&self.path) {
            let mut error = e.to_string();
            if let Some(note) = restore_task_file(&archive_path, &self.path) {
                error.push_str("; ");
                error.push_str(&note);
            }
            self.log_archive_failure(&archive_path, &error);
            return Err(StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            });
        }

        self.tasks.clear();
        Ok(archive_path)
    }

    fn log_archive_failure(&self, archive_path: &Path, error: &str) {
        recovery::log_recovery(
            self.state_dir(),
            RecoveryEntry::new(RecoveryCategory::Archive, "archive failed")
                .field("Target", archive_path.display().to_string())
                .field("Error", error),
        );
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Move an archive back to the task file path. Returns a note for the
/// recovery log when that fails.
fn restore_task_file(archive_path: &Path, path: &Path) -> Option<String> {
    fs::rename(archive_path, path)
        .err()
        .map(|e| format!("restoring {} failed: {}", path.display(), e))
}

/// `archive.<YYYYMMDDHHMMSS>`, with `.<label>` appended when the label is
/// not blank.
pub fn archive_file_name(now: DateTime<Local>, label: &str) -> String {
    let mut name = format!("archive.{}", now.format(ARCHIVE_TIMESTAMP_FORMAT));
    let label = label.trim();
    if !label.is_empty() {
        name.push('.');
        name.push_str(label);
    }
    name
}

/// Create the state directory under `root` and an empty task file inside it
/// if they don't exist yet. Returns the task file path.
pub fn bootstrap_state_dir(root: &Path, file_name: &str) -> Result<PathBuf, StoreError> {
    let state_dir = root.join(STATE_DIR);
    fs::create_dir_all(&state_dir)?;

    let path = state_dir.join(file_name);
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| StoreError::WriteError {
            path: path.clone(),
            source: e,
        })?;
    Ok(path)
}
