//! Wires resolved settings into a ready-to-run batch driver.

use crate::adapters::storage::LocalStorage;
use crate::adapters::upload::{HttpUploader, HttpUploaderConfig, LocalArchiveUploader};
use crate::config::toml_config::UploadConfig;
use crate::config::RunSettings;
use crate::core::batch::BatchDriver;
use crate::core::engine::ProcessorEngine;
use crate::core::{ArchiveUploader, EventLog};
use crate::utils::dates::{CalendarDateParser, SystemClock};
use crate::utils::error::Result;
use crate::utils::event_log::{FileEventLog, TracingEventLog};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type LocalBatchDriver = BatchDriver<LocalStorage, Box<dyn ArchiveUploader>>;

pub async fn build_uploader(config: &UploadConfig) -> Result<Box<dyn ArchiveUploader>> {
    match config {
        UploadConfig::Http(http) => Ok(Box::new(HttpUploader::new(HttpUploaderConfig {
            endpoint: http.endpoint.clone(),
            upload_preset: http.upload_preset.clone(),
            api_key: http.api_key.clone(),
            timeout: Duration::from_secs(http.timeout_seconds),
        })?)),
        UploadConfig::Local(local) => Ok(Box::new(LocalArchiveUploader::new(&local.archive_dir))),
        #[cfg(feature = "s3")]
        UploadConfig::S3(s3) => {
            use crate::adapters::s3::{S3Uploader, S3UploaderConfig};
            let uploader = S3Uploader::new(S3UploaderConfig {
                bucket: s3.bucket.clone(),
                region: s3.region.clone(),
                prefix: s3.prefix.clone(),
                endpoint: s3.endpoint.clone(),
                public_base_url: s3.public_base_url.clone(),
            })
            .await?;
            Ok(Box::new(uploader))
        }
        #[cfg(not(feature = "s3"))]
        UploadConfig::S3(_) => Err(crate::utils::error::TransTrackError::ConfigError {
            message: "upload kind 's3' requires building with the `s3` feature".to_string(),
        }),
    }
}

pub fn build_event_log(log_file: Option<&Path>) -> Result<Arc<dyn EventLog>> {
    match log_file {
        Some(path) => Ok(Arc::new(FileEventLog::new(path)?)),
        None => Ok(Arc::new(TracingEventLog)),
    }
}

pub async fn build_driver(settings: &RunSettings) -> Result<LocalBatchDriver> {
    let profile = settings.profile;
    let dates = Arc::new(CalendarDateParser::new(settings.file.date_formats()));
    let uploader = build_uploader(&settings.file.upload).await?;
    let log = build_event_log(settings.file.folders.log_file.as_deref())?;

    let engine = ProcessorEngine::new(
        LocalStorage::new(),
        uploader,
        profile.parser(),
        profile.validator(dates),
        Arc::new(SystemClock),
        log,
        settings.file.folders(),
    );
    Ok(BatchDriver::new(engine, profile.extension()))
}
