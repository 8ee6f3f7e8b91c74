pub use media_pipeline_core::{config, identifier, job_request, provisioning, storage_event};
