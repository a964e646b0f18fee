use crate::core::engine::ProcessorEngine;
use crate::core::{ArchiveUploader, BatchSummary, Disposition, EventLog, Storage};
use crate::utils::error::Result;

/// Runs every candidate file in the incoming folder through the engine, one at a time.
pub struct BatchDriver<S: Storage, U: ArchiveUploader> {
    engine: ProcessorEngine<S, U>,
    extension: String,
}

impl<S: Storage, U: ArchiveUploader> BatchDriver<S, U> {
    pub fn new(engine: ProcessorEngine<S, U>, extension: impl Into<String>) -> Self {
        Self {
            engine,
            extension: extension.into(),
        }
    }

    pub fn engine(&self) -> &ProcessorEngine<S, U> {
        &self.engine
    }

    /// Only an unreadable incoming folder fails the batch; per-file problems end up
    /// in the returned summary.
    pub async fn run(&self) -> Result<BatchSummary> {
        let incoming = &self.engine.folders().incoming;
        let files = self
            .engine
            .storage()
            .list_files(incoming, &self.extension)
            .await?;

        let mut summary = BatchSummary::default();
        if files.is_empty() {
            self.engine.log().info("No files to process");
            return Ok(summary);
        }

        self.engine
            .log()
            .info(&format!("Found {} file(s) to process", files.len()));

        for file in &files {
            let disposition = self.engine.process_file(file).await;
            match &disposition {
                Disposition::Archived(s) => {
                    println!("✓ Processed: {} ({} records)", s.file_name, s.total_records)
                }
                Disposition::Rejected { file_name, reason } => {
                    println!("✗ Invalid: {} - {}", file_name, reason)
                }
                Disposition::Faulted { file_name, reason } => {
                    println!("✗ Error: {} - {}", file_name, reason)
                }
                Disposition::Pending { file_name, reason } => {
                    println!("⚠ Left in incoming: {} - {}", file_name, reason)
                }
            }
            summary.record(&disposition);
        }

        tracing::info!(
            "Batch finished: {} archived, {} rejected, {} faulted, {} pending",
            summary.archived,
            summary.rejected,
            summary.faulted,
            summary.pending
        );
        Ok(summary)
    }
}
