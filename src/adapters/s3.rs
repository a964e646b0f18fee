use crate::core::ArchiveUploader;
use crate::utils::error::{Result, TransTrackError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct S3UploaderConfig {
    pub bucket: String,
    pub region: String,
    pub prefix: Option<String>,
    pub endpoint: Option<String>,
    pub public_base_url: Option<String>,
}

/// Archives raw files as S3 objects under `<prefix>/<file name>`.
#[derive(Debug, Clone)]
pub struct S3Uploader {
    client: S3Client,
    config: S3UploaderConfig,
}

impl S3Uploader {
    pub async fn new(config: S3UploaderConfig) -> Result<Self> {
        if config.bucket.trim().is_empty() {
            return Err(TransTrackError::ConfigError {
                message: "S3 bucket name cannot be empty".to_string(),
            });
        }

        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared)
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = S3Client::from_conf(builder.build());

        Ok(Self { client, config })
    }

    pub fn object_key(&self, file_name: &str) -> String {
        object_key(self.config.prefix.as_deref(), file_name)
    }

    pub fn object_url(&self, key: &str) -> String {
        object_url(&self.config, key)
    }
}

fn object_key(prefix: Option<&str>, file_name: &str) -> String {
    match prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}/{}", prefix, file_name),
        None => file_name.to_string(),
    }
}

fn object_url(config: &S3UploaderConfig, key: &str) -> String {
    match &config.public_base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            config.bucket, config.region, key
        ),
    }
}

#[async_trait]
impl ArchiveUploader for S3Uploader {
    async fn upload(&self, path: &Path) -> Result<String> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| TransTrackError::upload(format!("{} has no file name", path.display())))?;
        let data = std::fs::read(path)?;
        let key = self.object_key(&file_name);

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .body(data.into())
            .send()
            .await
            .map_err(|e| {
                TransTrackError::upload(format!(
                    "Failed to write {} to S3: {}",
                    key,
                    aws_sdk_s3::error::DisplayErrorContext(&e)
                ))
            })?;

        Ok(self.object_url(&key))
    }
}
