use serde_json::json;

use crate::adapters::mediaconvert::JobSubmitter;
use crate::logging::{log_error, log_info};
use crate::runtime::config::TranscodeConfig;
use crate::runtime::job_request::{ConversionJobRequest, JobRequestBuilder};
use crate::runtime::storage_event::{
    first_storage_event, EventError, StorageEvent, StorageNotification,
};

pub const COMPONENT: &str = "transcode_dispatcher";
pub const JOB_CREATED_MESSAGE: &str = "Transcode job created.";

pub fn build_job_request(event: &StorageEvent, config: &TranscodeConfig) -> ConversionJobRequest {
    JobRequestBuilder::new(&config.job_template, &config.role_arn)
        .input(event.source_locator())
        .cmaf_output(config.output_destination().as_deref())
        .build()
}

/// Submits a job for the notification's first object.
///
/// Only malformed notifications are errors; a rejected submission is reported
/// through the returned message.
pub fn handle_storage_notification(
    notification: &StorageNotification,
    config: &TranscodeConfig,
    submitter: &impl JobSubmitter,
) -> Result<String, EventError> {
    let event = first_storage_event(notification)?;
    Ok(dispatch_transcode(&event, config, submitter))
}

pub fn dispatch_transcode(
    event: &StorageEvent,
    config: &TranscodeConfig,
    submitter: &impl JobSubmitter,
) -> String {
    let source = event.source_locator();
    let request = build_job_request(event, config);
    log_info(
        COMPONENT,
        "job_requested",
        json!({
            "source": source.clone(),
            "request": request.clone(),
        }),
    );

    match submitter.create_job(&request) {
        Ok(()) => {
            log_info(
                COMPONENT,
                "job_created",
                json!({
                    "source": source,
                    "message": JOB_CREATED_MESSAGE,
                }),
            );
            JOB_CREATED_MESSAGE.to_string()
        }
        Err(error) => {
            let message = format!("Transcode failed for {source} Error: {error}");
            log_error(
                COMPONENT,
                "job_failed",
                json!({
                    "source": source,
                    "message": message.clone(),
                }),
            );
            message
        }
    }
}
