pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod profiles;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use crate::core::{batch::BatchDriver, engine::Folders, engine::ProcessorEngine};
pub use domain::model::{Disposition, ProcessingSummary, ShipmentRecord, ValidationResult};
pub use profiles::WarehouseProfile;
pub use utils::error::{Result, TransTrackError};
