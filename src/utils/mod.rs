pub mod dates;
pub mod error;
pub mod event_log;
pub mod logger;
pub mod validation;
