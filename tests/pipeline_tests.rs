use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use transtrack::core::{ArchiveUploader, EventLog};
use transtrack::utils::dates::{CalendarDateParser, FixedClock};
use transtrack::utils::event_log::FileEventLog;
use transtrack::{
    BatchDriver, Disposition, Folders, LocalStorage, ProcessorEngine, TransTrackError,
    WarehouseProfile,
};

/// Answers every upload with a URL under a fixed host, or fails for listed file names.
#[derive(Default)]
struct ScriptedUploader {
    failing: Vec<String>,
    uploaded: Mutex<Vec<String>>,
}

#[async_trait]
impl ArchiveUploader for ScriptedUploader {
    async fn upload(&self, path: &Path) -> transtrack::Result<String> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        if self.failing.contains(&name) {
            return Err(TransTrackError::upload(format!("store rejected {}", name)));
        }
        self.uploaded.lock().unwrap().push(name.clone());
        Ok(format!("https://archive.test/raw/{}", name))
    }
}

struct Warehouse {
    _root: TempDir,
    folders: Folders,
    log_path: PathBuf,
}

impl Warehouse {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let folders = Folders {
            incoming: root.path().join("Incoming"),
            processed: root.path().join("Processed"),
            errors: root.path().join("Errors"),
        };
        fs::create_dir_all(&folders.incoming).unwrap();
        let log_path = root.path().join("logs").join("run.log");
        Self {
            _root: root,
            folders,
            log_path,
        }
    }

    fn drop_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.folders.incoming.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn driver(
        &self,
        profile: WarehouseProfile,
        uploader: ScriptedUploader,
    ) -> BatchDriver<LocalStorage, ScriptedUploader> {
        let log: Arc<dyn EventLog> = Arc::new(FileEventLog::new(&self.log_path).unwrap());
        let engine = ProcessorEngine::new(
            LocalStorage::new(),
            uploader,
            profile.parser(),
            profile.validator(Arc::new(CalendarDateParser::default())),
            Arc::new(FixedClock(now())),
            log,
            self.folders.clone(),
        );
        BatchDriver::new(engine, profile.extension())
    }

    fn processed_report(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.folders.processed.join(name)).ok()
    }

    fn error_report(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.folders.errors.join(name)).ok()
    }

    fn log(&self) -> String {
        fs::read_to_string(&self.log_path).unwrap_or_default()
    }
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap()
}

#[tokio::test]
async fn test_north_valid_file_end_to_end() {
    let wh = Warehouse::new();
    let source = wh.drop_file("valid_north.csv", "SH1001,Accra,Tema,2024-10-12,150.5");
    let driver = wh.driver(WarehouseProfile::North, ScriptedUploader::default());

    let disposition = driver.engine().process_file(&source).await;

    assert!(matches!(disposition, Disposition::Archived(_)));
    assert!(!source.exists(), "source should be deleted");
    let report = wh.processed_report("valid_north_processed.csv").unwrap();
    assert!(report.contains("ProcessedFile: valid_north.csv"));
    assert!(report.contains("TotalRecords: 1"));
    assert!(report.contains("FileUrl:\nhttps://archive.test/raw/valid_north.csv\n"));
    assert!(report.ends_with("DateProcessed: 2025-06-02 08:15:00"));
    assert!(wh.log().contains("[INFO] Processing file: valid_north.csv"));
}

#[tokio::test]
async fn test_north_zero_weight_is_rejected() {
    let wh = Warehouse::new();
    let source = wh.drop_file("invalid_north.csv", "SH1001,Accra,Tema,2024-10-12,0");
    let uploader = ScriptedUploader::default();
    let driver = wh.driver(WarehouseProfile::North, uploader);

    let disposition = driver.engine().process_file(&source).await;

    match &disposition {
        Disposition::Rejected { reason, .. } => assert!(reason.contains("weight")),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(!source.exists());
    let report = wh.error_report("invalid_north_error.csv").unwrap();
    assert!(report.contains("FileName: invalid_north.csv"));
    assert!(report.contains("weight"));
    assert!(report.contains("Timestamp: 2025-06-02 08:15:00"));
    assert!(wh.log().contains("[WARNING] File validation failed"));
}

#[tokio::test]
async fn test_south_sunday_is_rejected_as_weekend() {
    let wh = Warehouse::new();
    let source = wh.drop_file("sunday.txt", "S-90019|West|CapeCoast|2024-11-17|Bulk");
    let driver = wh.driver(WarehouseProfile::South, ScriptedUploader::default());

    let disposition = driver.engine().process_file(&source).await;

    match &disposition {
        Disposition::Rejected { reason, .. } => assert!(reason.contains("weekend")),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(wh.error_report("sunday_error.txt").unwrap().contains("weekend"));
    assert!(!source.exists());
}

#[tokio::test]
async fn test_south_valid_file_end_to_end() {
    let wh = Warehouse::new();
    let source = wh.drop_file(
        "valid_south.txt",
        "S-55221|North|Takoradi|2024-11-13|Bulk\nS-55222|East|Tema|2024-11-11|Fragile",
    );
    let driver = wh.driver(WarehouseProfile::South, ScriptedUploader::default());

    let disposition = driver.engine().process_file(&source).await;

    let Disposition::Archived(summary) = disposition else {
        panic!("expected archive");
    };
    assert_eq!(summary.total_records, 2);
    let report = wh.processed_report("valid_south_processed.txt").unwrap();
    assert!(report.contains("TotalRecords: 2"));
    assert!(!source.exists());
}

#[tokio::test]
async fn test_empty_files_are_rejected_for_both_profiles() {
    for (profile, name) in [
        (WarehouseProfile::North, "empty.csv"),
        (WarehouseProfile::South, "empty.txt"),
    ] {
        let wh = Warehouse::new();
        let source = wh.drop_file(name, "");
        let driver = wh.driver(profile, ScriptedUploader::default());

        let disposition = driver.engine().process_file(&source).await;

        assert_eq!(
            disposition,
            Disposition::Rejected {
                file_name: name.to_string(),
                reason: "No records found".to_string(),
            }
        );
        assert!(!source.exists());
    }
}

#[tokio::test]
async fn test_upload_failure_reports_system_error_and_removes_source() {
    let wh = Warehouse::new();
    let source = wh.drop_file("north.csv", "SH1001,Accra,Tema,2024-10-12,150.5");
    let uploader = ScriptedUploader {
        failing: vec!["north.csv".to_string()],
        ..Default::default()
    };
    let driver = wh.driver(WarehouseProfile::North, uploader);

    let disposition = driver.engine().process_file(&source).await;

    match &disposition {
        Disposition::Faulted { reason, .. } => {
            assert!(reason.starts_with("System error:"));
            assert!(!reason.contains("weight"));
        }
        other => panic!("expected fault, got {other:?}"),
    }
    assert!(!source.exists());
    assert!(wh.processed_report("north_processed.csv").is_none());
    let report = wh.error_report("north_error.csv").unwrap();
    assert!(report.contains("Reason: System error: Upload failed: store rejected north.csv"));
    assert!(wh.log().contains("[ERROR] Error processing north.csv"));
}

#[tokio::test]
async fn test_malformed_lines_do_not_block_the_file() {
    let wh = Warehouse::new();
    let source = wh.drop_file(
        "mixed.csv",
        "SH1001,Accra,Tema,2024-10-12,150.5\nthis line is junk\nSH1002,Accra,Kumasi,2024-09-20,90\n",
    );
    let driver = wh.driver(WarehouseProfile::North, ScriptedUploader::default());

    let disposition = driver.engine().process_file(&source).await;

    let Disposition::Archived(summary) = disposition else {
        panic!("expected archive");
    };
    assert_eq!(summary.total_records, 2);
}

#[tokio::test]
async fn test_batch_processes_every_file_independently() {
    let wh = Warehouse::new();
    wh.drop_file("a_good.csv", "SH1001,Accra,Tema,2024-10-12,150.5");
    wh.drop_file("b_bad.csv", "SH-1,Accra,Tema,2024-10-12,150.5");
    wh.drop_file("c_upload.csv", "SH1003,Accra,Tema,2024-10-12,5");
    wh.drop_file("ignored.txt", "S-1|West|Tema|2024-11-13|Bulk");
    let uploader = ScriptedUploader {
        failing: vec!["c_upload.csv".to_string()],
        ..Default::default()
    };
    let driver = wh.driver(WarehouseProfile::North, uploader);

    let summary = driver.run().await.unwrap();

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.archived, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.faulted, 1);
    assert_eq!(summary.pending, 0);
    assert!(wh.processed_report("a_good_processed.csv").is_some());
    assert!(wh.error_report("b_bad_error.csv").is_some());
    assert!(wh.error_report("c_upload_error.csv").is_some());

    let remaining: Vec<String> = fs::read_dir(&wh.folders.incoming)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(remaining, vec!["ignored.txt"]);
    assert!(wh.log().contains("Found 3 file(s) to process"));
}

#[tokio::test]
async fn test_empty_incoming_folder() {
    let wh = Warehouse::new();
    let driver = wh.driver(WarehouseProfile::South, ScriptedUploader::default());

    let summary = driver.run().await.unwrap();

    assert_eq!(summary.total(), 0);
    assert!(wh.log().contains("No files to process"));
}

#[tokio::test]
async fn test_missing_incoming_folder_fails_the_batch() {
    let wh = Warehouse::new();
    fs::remove_dir_all(&wh.folders.incoming).unwrap();
    let driver = wh.driver(WarehouseProfile::North, ScriptedUploader::default());

    assert!(matches!(
        driver.run().await,
        Err(TransTrackError::IoError(_))
    ));
}

#[tokio::test]
async fn test_reprocessing_same_name_overwrites_report() {
    let wh = Warehouse::new();
    let driver = wh.driver(WarehouseProfile::North, ScriptedUploader::default());

    let source = wh.drop_file("daily.csv", "SH1001,Accra,Tema,2024-10-12,150.5");
    driver.engine().process_file(&source).await;
    let source = wh.drop_file(
        "daily.csv",
        "SH1001,Accra,Tema,2024-10-12,150.5\nSH1002,Accra,Tema,2024-10-13,1",
    );
    driver.engine().process_file(&source).await;

    let report = wh.processed_report("daily_processed.csv").unwrap();
    assert!(report.contains("TotalRecords: 2"));
    assert_eq!(fs::read_dir(&wh.folders.processed).unwrap().count(), 1);
}
