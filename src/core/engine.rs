use crate::core::report::ReportWriter;
use crate::core::{
    ArchiveUploader, Clock, Disposition, EventLog, ProcessingSummary, RecordParser,
    RecordValidator, Storage, ValidationResult,
};
use crate::utils::error::{Result, TransTrackError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where reports land for one warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folders {
    pub incoming: PathBuf,
    pub processed: PathBuf,
    pub errors: PathBuf,
}

/// Outcome whose report has already been persisted.
enum Reported {
    Archived(ProcessingSummary),
    Rejected(String),
}

/// Runs one source file through parse, validate, upload, report and delete.
///
/// Every path writes its report before touching the source file, so a file is never
/// removed without a matching report. Once a report exists a failed delete leaves the
/// source in place for manual remediation instead of reporting twice.
pub struct ProcessorEngine<S: Storage, U: ArchiveUploader> {
    storage: S,
    uploader: U,
    reports: ReportWriter<S>,
    parser: Box<dyn RecordParser>,
    validator: Box<dyn RecordValidator>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn EventLog>,
    folders: Folders,
}

impl<S: Storage + Clone, U: ArchiveUploader> ProcessorEngine<S, U> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        storage: S,
        uploader: U,
        parser: Box<dyn RecordParser>,
        validator: Box<dyn RecordValidator>,
        clock: Arc<dyn Clock>,
        log: Arc<dyn EventLog>,
        folders: Folders,
    ) -> Self {
        Self {
            reports: ReportWriter::new(storage.clone()),
            storage,
            uploader,
            parser,
            validator,
            clock,
            log,
            folders,
        }
    }
}

impl<S: Storage, U: ArchiveUploader> ProcessorEngine<S, U> {
    pub fn folders(&self) -> &Folders {
        &self.folders
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn log(&self) -> &dyn EventLog {
        self.log.as_ref()
    }

    pub async fn process_file(&self, path: &Path) -> Disposition {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.log.info(&format!("Processing file: {}", file_name));

        let reported = match self.report_outcome(path, &file_name).await {
            Ok(reported) => reported,
            Err(err) => return self.fault(path, &file_name, err).await,
        };

        if let Err(err) = self.storage.remove_file(path).await {
            return self.leave_pending(&file_name, &err);
        }

        match reported {
            Reported::Archived(summary) => {
                self.log.info(&format!(
                    "File processed successfully and deleted from incoming: {} ({} records, {})",
                    file_name, summary.total_records, summary.file_url
                ));
                Disposition::Archived(summary)
            }
            Reported::Rejected(reason) => {
                self.log.warning(&format!(
                    "File validation failed and deleted from incoming: {} - {}",
                    file_name, reason
                ));
                Disposition::Rejected { file_name, reason }
            }
        }
    }

    async fn report_outcome(&self, path: &Path, file_name: &str) -> Result<Reported> {
        let started = self.clock.now();

        let content = self.storage.read_file(path).await?;
        let records = self.parser.parse(&content);
        self.log.info(&format!(
            "Parsed {} record(s) from {}",
            records.len(),
            file_name
        ));

        match self.validator.validate(&records, started) {
            ValidationResult::Invalid(reason) => {
                self.reports
                    .write_error_report(file_name, &reason, self.clock.now(), &self.folders.errors)
                    .await?;
                Ok(Reported::Rejected(reason))
            }
            ValidationResult::Valid => {
                self.log.info(&format!("Uploading {} to archive...", file_name));
                let file_url = self.uploader.upload(path).await?;
                self.log.info(&format!("File uploaded successfully: {}", file_url));

                let summary = ProcessingSummary {
                    file_name: file_name.to_string(),
                    total_records: records.len(),
                    file_url,
                    date_processed: started,
                };
                self.reports
                    .write_success_report(&summary, &self.folders.processed)
                    .await?;
                Ok(Reported::Archived(summary))
            }
        }
    }

    async fn fault(&self, path: &Path, file_name: &str, err: TransTrackError) -> Disposition {
        self.log
            .error(&format!("Error processing {}: {}", file_name, err));
        let reason = format!("System error: {}", err);

        if let Err(report_err) = self
            .reports
            .write_error_report(file_name, &reason, self.clock.now(), &self.folders.errors)
            .await
        {
            self.log.error(&format!(
                "Failed to write error report for {}: {}",
                file_name, report_err
            ));
            return self.leave_pending(file_name, &report_err);
        }

        if let Err(delete_err) = self.storage.remove_file(path).await {
            self.log.error(&format!("Failed to delete error file: {}", delete_err));
            return self.leave_pending(file_name, &delete_err);
        }

        self.log
            .error(&format!("File deleted due to processing error: {}", file_name));
        Disposition::Faulted {
            file_name: file_name.to_string(),
            reason,
        }
    }

    fn leave_pending(&self, file_name: &str, err: &TransTrackError) -> Disposition {
        self.log.error(&format!(
            "Could not finish disposing of {}: {}",
            file_name, err
        ));
        self.log.warning(&format!(
            "{} left in {} for manual inspection",
            file_name,
            self.folders.incoming.display()
        ));
        Disposition::Pending {
            file_name: file_name.to_string(),
            reason: err.to_string(),
        }
    }
}
