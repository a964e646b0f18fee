//! Warehouse profiles: the delimiter, field layout and rule set each warehouse uses.

pub mod north;
pub mod south;

use crate::core::parser::{DelimitedParser, FieldLayout};
use crate::domain::model::{ShipmentRecord, ValidationResult};
use crate::domain::ports::{DateParser, RecordParser, RecordValidator};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use north::NorthValidator;
pub use south::SouthValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WarehouseProfile {
    North,
    South,
}

impl WarehouseProfile {
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
        }
    }

    /// Extension (without the dot) of the files this warehouse drops.
    pub fn extension(self) -> &'static str {
        match self {
            Self::North => "csv",
            Self::South => "txt",
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            Self::North => b',',
            Self::South => b'|',
        }
    }

    pub fn parser(self) -> Box<dyn RecordParser> {
        let layout = match self {
            Self::North => FieldLayout::OriginWeight,
            Self::South => FieldLayout::RegionLoadType,
        };
        Box::new(DelimitedParser::new(self.delimiter(), layout))
    }

    pub fn validator(self, dates: Arc<dyn DateParser>) -> Box<dyn RecordValidator> {
        match self {
            Self::North => Box::new(NorthValidator::new(dates)),
            Self::South => Box::new(SouthValidator::new(dates)),
        }
    }
}

impl fmt::Display for WarehouseProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WarehouseProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            other => Err(format!("unknown warehouse profile: {other}")),
        }
    }
}

/// Inputs shared by every rule while one file is checked.
pub struct RuleContext<'a> {
    pub now: NaiveDateTime,
    pub dates: &'a dyn DateParser,
}

/// Returns the failure reason, or `None` when the record passes.
pub type Rule = fn(&ShipmentRecord, &RuleContext<'_>) -> Option<String>;

/// Runs `rules` in order over `records` in order; the first failure decides the file.
pub fn evaluate(records: &[ShipmentRecord], rules: &[Rule], ctx: &RuleContext<'_>) -> ValidationResult {
    if records.is_empty() {
        return ValidationResult::Invalid("No records found".to_string());
    }

    records
        .iter()
        .find_map(|record| rules.iter().find_map(|rule| rule(record, ctx)))
        .map_or(ValidationResult::Valid, ValidationResult::Invalid)
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
