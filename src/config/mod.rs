pub mod toml_config;

use crate::profiles::WarehouseProfile;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "transtrack")]
#[command(about = "Validates warehouse shipment files, archives them and reports the outcome")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "transtrack.toml")]
    pub config: PathBuf,

    /// Warehouse profile; overrides `profile` in the config file
    #[arg(short, long, value_enum)]
    pub profile: Option<WarehouseProfile>,

    #[arg(long)]
    pub incoming: Option<PathBuf>,

    #[arg(long)]
    pub processed: Option<PathBuf>,

    #[arg(long)]
    pub errors: Option<PathBuf>,

    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit diagnostics as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file and layers the command-line overrides on top.
    pub fn resolve(&self) -> Result<RunSettings> {
        let mut file = TomlConfig::from_file(&self.config)?;
        if let Some(incoming) = &self.incoming {
            file.folders.incoming = incoming.clone();
        }
        if let Some(processed) = &self.processed {
            file.folders.processed = processed.clone();
        }
        if let Some(errors) = &self.errors {
            file.folders.errors = errors.clone();
        }
        if let Some(log_file) = &self.log_file {
            file.folders.log_file = Some(log_file.clone());
        }
        RunSettings::new(self.profile, file)
    }
}

/// Fully resolved settings for one batch run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub profile: WarehouseProfile,
    pub file: TomlConfig,
}

impl RunSettings {
    pub fn new(profile: Option<WarehouseProfile>, file: TomlConfig) -> Result<Self> {
        let profile = *validate_required_field("profile", &profile.or(file.profile))?;
        Ok(Self { profile, file })
    }
}
