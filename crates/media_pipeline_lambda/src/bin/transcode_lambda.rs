use lambda_runtime::{service_fn, Error, LambdaEvent};
use media_pipeline_lambda::adapters::mediaconvert::MediaConvertAdapter;
use media_pipeline_lambda::handlers::transcode::handle_storage_notification;
use media_pipeline_lambda::runtime::config::TranscodeConfig;
use media_pipeline_lambda::runtime::storage_event::StorageNotification;
use serde_json::Value;

struct RuntimeDependencies {
    config: TranscodeConfig,
    mediaconvert: MediaConvertAdapter,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<String, Error> {
    let notification: StorageNotification = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid storage notification: {error}")))?;

    let message = handle_storage_notification(&notification, &deps.config, &deps.mediaconvert)?;
    Ok(message)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = TranscodeConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        mediaconvert: MediaConvertAdapter::new(&aws_config, config.endpoint_url.as_deref()),
        config,
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
