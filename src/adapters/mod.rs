// Adapters layer: concrete implementations of the domain ports (storage, archive uploads).

#[cfg(feature = "s3")]
pub mod s3;
pub mod storage;
pub mod upload;
