use lambda_runtime::{service_fn, Error, LambdaEvent};
use media_pipeline_lambda::adapters::callback::HttpCallbackSender;
use media_pipeline_lambda::adapters::mediaconvert::MediaConvertAdapter;
use media_pipeline_lambda::handlers::endpoint::{handle_endpoint_request, COMPONENT};
use media_pipeline_lambda::handlers::provisioning::parse_provisioning_request;
use serde_json::Value;

struct RuntimeDependencies {
    mediaconvert: MediaConvertAdapter,
    callback_sender: HttpCallbackSender,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<Value, Error> {
    let log_stream_name = &event.context.env_config.log_stream;
    let Some(request) = parse_provisioning_request(
        COMPONENT,
        event.payload,
        log_stream_name,
        &deps.callback_sender,
    )
    .map_err(Error::from)?
    else {
        return Ok(Value::Null);
    };

    handle_endpoint_request(
        &request,
        log_stream_name,
        &deps.mediaconvert,
        &deps.callback_sender,
    );
    Ok(Value::Null)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        mediaconvert: MediaConvertAdapter::new(&aws_config, None),
        callback_sender: HttpCallbackSender::new(reqwest::Client::new()),
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
