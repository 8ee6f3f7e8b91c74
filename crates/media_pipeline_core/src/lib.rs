//! Shared media pipeline domain primitives.
//!
//! This crate owns the provisioning callback contract, storage-event decoding,
//! conversion job request shape, and identifier synthesis. It intentionally
//! excludes AWS SDK and Lambda runtime concerns.

pub mod config;
pub mod identifier;
pub mod job_request;
pub mod provisioning;
pub mod storage_event;
