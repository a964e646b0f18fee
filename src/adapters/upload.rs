use crate::core::ArchiveUploader;
use crate::utils::error::{Result, TransTrackError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| TransTrackError::upload(format!("{} has no file name", path.display())))
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct HttpUploaderConfig {
    pub endpoint: String,
    pub upload_preset: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Raw-file upload to an HTTP archive store.
///
/// Sends a multipart form with a `file` part and a `public_id` equal to the file stem,
/// and expects a JSON answer carrying `secure_url` (or `url`).
#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: Client,
    config: HttpUploaderConfig,
}

impl HttpUploader {
    pub fn new(config: HttpUploaderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ArchiveUploader for HttpUploader {
    async fn upload(&self, path: &Path) -> Result<String> {
        let file_name = file_name_of(path)?;
        let data = std::fs::read(path)?;

        let mut form = Form::new()
            .part("file", Part::bytes(data).file_name(file_name.clone()))
            .text("public_id", stem_of(path));
        if let Some(preset) = &self.config.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }
        if let Some(api_key) = &self.config.api_key {
            form = form.text("api_key", api_key.clone());
        }

        tracing::debug!("POST {} ({})", self.config.endpoint, file_name);
        let response = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(TransTrackError::upload(format!(
                "archive store answered {} for {}: {}",
                status, file_name, snippet
            )));
        }

        let body: serde_json::Value = response.json().await?;
        body.get("secure_url")
            .or_else(|| body.get("url"))
            .and_then(|v| v.as_str())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                TransTrackError::upload(format!("archive store returned no URL for {}", file_name))
            })
    }
}

/// Copies files into a local archive directory and hands back `file://` URLs.
#[derive(Debug, Clone)]
pub struct LocalArchiveUploader {
    archive_dir: PathBuf,
}

impl LocalArchiveUploader {
    pub fn new(archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_dir: archive_dir.into(),
        }
    }
}

#[async_trait]
impl ArchiveUploader for LocalArchiveUploader {
    async fn upload(&self, path: &Path) -> Result<String> {
        let file_name = file_name_of(path)?;
        std::fs::create_dir_all(&self.archive_dir)?;
        let target = std::path::absolute(self.archive_dir.join(&file_name))?;
        std::fs::copy(path, &target)?;

        Url::from_file_path(&target)
            .map(String::from)
            .map_err(|_| TransTrackError::upload(format!("cannot build URL for {}", target.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn config(endpoint: String) -> HttpUploaderConfig {
        HttpUploaderConfig {
            endpoint,
            upload_preset: Some("shipments".to_string()),
            api_key: None,
            timeout: Duration::from_secs(5),
        }
    }

    fn source(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("north.csv");
        std::fs::write(&path, "SH1001,Accra,Tema,2024-10-12,150.5").unwrap();
        path
    }

    #[tokio::test]
    async fn test_http_upload_returns_secure_url() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/raw/upload")
                .body_contains("SH1001,Accra,Tema")
                .body_contains("upload_preset");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "secure_url": "https://cdn.example.com/raw/north.csv",
                    "url": "http://cdn.example.com/raw/north.csv"
                }));
        });

        let dir = TempDir::new().unwrap();
        let uploader = HttpUploader::new(config(server.url("/raw/upload"))).unwrap();
        let url = uploader.upload(&source(&dir)).await.unwrap();

        mock.assert();
        assert_eq!(url, "https://cdn.example.com/raw/north.csv");
    }

    #[tokio::test]
    async fn test_http_upload_falls_back_to_url_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(201)
                .json_body(serde_json::json!({"url": "http://cdn.example.com/north.csv"}));
        });

        let dir = TempDir::new().unwrap();
        let uploader = HttpUploader::new(config(server.url("/upload"))).unwrap();
        assert_eq!(
            uploader.upload(&source(&dir)).await.unwrap(),
            "http://cdn.example.com/north.csv"
        );
    }

    #[tokio::test]
    async fn test_http_upload_non_success_status_is_upload_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(500).body("bucket offline");
        });

        let dir = TempDir::new().unwrap();
        let uploader = HttpUploader::new(config(server.url("/upload"))).unwrap();
        let err = uploader.upload(&source(&dir)).await.unwrap_err();

        assert!(matches!(err, TransTrackError::UploadError { .. }));
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("bucket offline"));
    }

    #[tokio::test]
    async fn test_http_upload_without_url_is_upload_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(200).json_body(serde_json::json!({"public_id": "north"}));
        });

        let dir = TempDir::new().unwrap();
        let uploader = HttpUploader::new(config(server.url("/upload"))).unwrap();
        let err = uploader.upload(&source(&dir)).await.unwrap_err();
        assert!(matches!(err, TransTrackError::UploadError { .. }));
    }

    #[tokio::test]
    async fn test_http_upload_missing_file_fails() {
        let server = MockServer::start();
        let uploader = HttpUploader::new(config(server.url("/upload"))).unwrap();
        let dir = TempDir::new().unwrap();
        assert!(uploader.upload(&dir.path().join("gone.csv")).await.is_err());
    }

    #[tokio::test]
    async fn test_local_archive_copies_file() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("archive");
        let uploader = LocalArchiveUploader::new(&archive);

        let url = uploader.upload(&source(&dir)).await.unwrap();

        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/archive/north.csv"));
        assert!(archive.join("north.csv").exists());
    }
}
