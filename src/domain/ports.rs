use crate::domain::model::{ShipmentRecord, ValidationResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Writes `data`, creating missing parent directories first.
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Removing a file that is already gone succeeds.
    fn remove_file(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Regular files in `dir` whose extension matches `extension` (case-insensitive).
    fn list_files(
        &self,
        dir: &Path,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;
}

/// Durable archive for raw source files.
#[async_trait]
pub trait ArchiveUploader: Send + Sync {
    /// Stores the file and returns its permanent URL.
    async fn upload(&self, path: &Path) -> Result<String>;
}

#[async_trait]
impl ArchiveUploader for Box<dyn ArchiveUploader> {
    async fn upload(&self, path: &Path) -> Result<String> {
        (**self).upload(path).await
    }
}

pub trait RecordParser: Send + Sync {
    /// Never fails; malformed lines are dropped.
    fn parse(&self, content: &[u8]) -> Vec<ShipmentRecord>;
}

pub trait RecordValidator: Send + Sync {
    fn validate(&self, records: &[ShipmentRecord], now: NaiveDateTime) -> ValidationResult;
}

pub trait DateParser: Send + Sync {
    fn parse(&self, value: &str) -> Option<NaiveDateTime>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Operator-facing event stream, separate from per-file reports.
pub trait EventLog: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}
