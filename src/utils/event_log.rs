use crate::domain::model::TIMESTAMP_FORMAT;
use crate::domain::ports::{EventLog, LogLevel};
use crate::utils::error::Result;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn mirror(level: LogLevel, message: &str) {
    match level {
        LogLevel::Info => tracing::info!("{}", message),
        LogLevel::Warning => tracing::warn!("{}", message),
        LogLevel::Error => tracing::error!("{}", message),
    }
}

/// Appends `yyyy-MM-dd HH:mm:ss [LEVEL] message` lines to a file.
///
/// Every caller funnels through one mutex-guarded handle, so lines from concurrent
/// callers never interleave. Entries are mirrored to `tracing` as well.
#[derive(Debug)]
pub struct FileEventLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileEventLog {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for FileEventLog {
    fn log(&self, level: LogLevel, message: &str) {
        mirror(level, message);

        let entry = format!(
            "{} [{}] {}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            level.label(),
            message
        );

        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(entry.as_bytes()) {
            tracing::error!("Failed to append to {}: {}", self.path.display(), e);
        }
    }
}

/// Forwards events to `tracing` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLog;

impl EventLog for TracingEventLog {
    fn log(&self, level: LogLevel, message: &str) {
        mirror(level, message);
    }
}
