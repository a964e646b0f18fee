use crate::core::engine::Folders;
use crate::profiles::WarehouseProfile;
use crate::utils::dates::DEFAULT_DATE_FORMATS;
use crate::utils::error::{Result, TransTrackError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub profile: Option<WarehouseProfile>,
    pub folders: FoldersConfig,
    pub upload: UploadConfig,
    pub dates: Option<DatesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldersConfig {
    pub incoming: PathBuf,
    pub processed: PathBuf,
    pub errors: PathBuf,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UploadConfig {
    Http(HttpUploadConfig),
    S3(S3UploadConfig),
    Local(LocalUploadConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpUploadConfig {
    pub endpoint: String,
    pub upload_preset: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3UploadConfig {
    pub bucket: String,
    pub region: String,
    pub prefix: Option<String>,
    pub endpoint: Option<String>,
    pub public_base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUploadConfig {
    pub archive_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatesConfig {
    pub formats: Vec<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TransTrackError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TransTrackError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern compiles")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn folders(&self) -> Folders {
        Folders {
            incoming: self.folders.incoming.clone(),
            processed: self.folders.processed.clone(),
            errors: self.folders.errors.clone(),
        }
    }

    pub fn date_formats(&self) -> Vec<String> {
        match &self.dates {
            Some(dates) => dates.formats.clone(),
            None => DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("folders.incoming", &path_str(&self.folders.incoming))?;
        validate_path("folders.processed", &path_str(&self.folders.processed))?;
        validate_path("folders.errors", &path_str(&self.folders.errors))?;
        if let Some(log_file) = &self.folders.log_file {
            validate_path("folders.log_file", &path_str(log_file))?;
        }

        match &self.upload {
            UploadConfig::Http(http) => {
                validate_url("upload.endpoint", &http.endpoint)?;
                validate_range("upload.timeout_seconds", http.timeout_seconds, 1, 600)?;
            }
            UploadConfig::S3(s3) => {
                validate_non_empty_string("upload.bucket", &s3.bucket)?;
                validate_non_empty_string("upload.region", &s3.region)?;
                if let Some(endpoint) = &s3.endpoint {
                    validate_url("upload.endpoint", endpoint)?;
                }
                if let Some(base) = &s3.public_base_url {
                    validate_url("upload.public_base_url", base)?;
                }
            }
            UploadConfig::Local(local) => {
                validate_path("upload.archive_dir", &path_str(&local.archive_dir))?;
            }
        }

        if let Some(dates) = &self.dates {
            if dates.formats.is_empty() {
                return Err(TransTrackError::ConfigValidationError {
                    field: "dates.formats".to_string(),
                    message: "At least one date format is required".to_string(),
                });
            }
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
