//! AWS-oriented adapters and handlers for the media pipeline functions.
//!
//! This crate owns runtime integration details (Lambda handlers, MediaConvert
//! and provisioning callback adapters) and exposes a single runtime module
//! boundary for the domain primitives in `media_pipeline_core`.

pub mod adapters;
pub mod handlers;
pub mod logging;
pub mod runtime;
