use crate::core::{ProcessingSummary, Storage};
use crate::domain::model::TIMESTAMP_FORMAT;
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// `<stem><suffix><.ext>` for a source file name, e.g. `north_processed.csv`.
pub fn report_file_name(file_name: &str, suffix: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    }
}

pub fn format_success_report(summary: &ProcessingSummary) -> String {
    format!(
        "ProcessedFile: {}\nTotalRecords: {}\nFileUrl:\n{}\nDateProcessed: {}",
        summary.file_name,
        summary.total_records,
        summary.file_url,
        summary.date_processed.format(TIMESTAMP_FORMAT)
    )
}

pub fn format_error_report(file_name: &str, reason: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "FileName: {}\nReason: {}\nTimestamp: {}",
        file_name,
        reason,
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

/// Persists per-file outcome reports. Writing the same report twice overwrites it.
#[derive(Debug, Clone)]
pub struct ReportWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> ReportWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn write_success_report(
        &self,
        summary: &ProcessingSummary,
        target_dir: &Path,
    ) -> Result<PathBuf> {
        let path = target_dir.join(report_file_name(&summary.file_name, "_processed"));
        self.storage
            .write_file(&path, format_success_report(summary).as_bytes())
            .await?;
        tracing::debug!("Success report written to {}", path.display());
        Ok(path)
    }

    pub async fn write_error_report(
        &self,
        file_name: &str,
        reason: &str,
        timestamp: NaiveDateTime,
        target_dir: &Path,
    ) -> Result<PathBuf> {
        let path = target_dir.join(report_file_name(file_name, "_error"));
        self.storage
            .write_file(&path, format_error_report(file_name, reason, timestamp).as_bytes())
            .await?;
        tracing::debug!("Error report written to {}", path.display());
        Ok(path)
    }
}
