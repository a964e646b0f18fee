use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used in every report and log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One parsed line of a shipment file.
///
/// Both warehouse layouts share this shape; fields a profile does not carry stay empty
/// (`origin`/`weight` for South, `region`/`load_type` for North).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub shipment_id: String,
    pub origin: String,
    pub region: String,
    pub destination: String,
    pub date: String,
    pub weight: String,
    pub load_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub file_name: String,
    pub total_records: usize,
    pub file_url: String,
    pub date_processed: NaiveDateTime,
}

/// Final fate of a source file after one processing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Uploaded, success report written, source deleted.
    Archived(ProcessingSummary),
    /// Failed validation, error report written, source deleted.
    Rejected { file_name: String, reason: String },
    /// System error reported, source deleted.
    Faulted { file_name: String, reason: String },
    /// Source left in the incoming folder for manual remediation.
    Pending { file_name: String, reason: String },
}

impl Disposition {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Archived(summary) => &summary.file_name,
            Self::Rejected { file_name, .. }
            | Self::Faulted { file_name, .. }
            | Self::Pending { file_name, .. } => file_name,
        }
    }

    /// True when the source file no longer sits in the incoming folder.
    pub fn source_removed(&self) -> bool {
        !matches!(self, Self::Pending { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub archived: usize,
    pub rejected: usize,
    pub faulted: usize,
    pub pending: usize,
    pub files: Vec<String>,
}

impl BatchSummary {
    pub fn record(&mut self, disposition: &Disposition) {
        match disposition {
            Disposition::Archived(_) => self.archived += 1,
            Disposition::Rejected { .. } => self.rejected += 1,
            Disposition::Faulted { .. } => self.faulted += 1,
            Disposition::Pending { .. } => self.pending += 1,
        }
        self.files.push(disposition.file_name().to_string());
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }
}
