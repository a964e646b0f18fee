pub mod batch;
pub mod engine;
pub mod parser;
pub mod report;

pub use crate::domain::model::{
    BatchSummary, Disposition, ProcessingSummary, ShipmentRecord, ValidationResult,
};
pub use crate::domain::ports::{
    ArchiveUploader, Clock, DateParser, EventLog, LogLevel, RecordParser, RecordValidator,
    Storage,
};
pub use crate::utils::error::Result;
