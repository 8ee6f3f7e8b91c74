use lambda_runtime::{service_fn, Error, LambdaEvent};
use media_pipeline_lambda::adapters::callback::HttpCallbackSender;
use media_pipeline_lambda::adapters::entropy::SystemEntropy;
use media_pipeline_lambda::handlers::identifier::{handle_identifier_request, COMPONENT};
use media_pipeline_lambda::handlers::provisioning::parse_provisioning_request;
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    callback_sender: &HttpCallbackSender,
) -> Result<Value, Error> {
    let log_stream_name = &event.context.env_config.log_stream;
    let Some(request) =
        parse_provisioning_request(COMPONENT, event.payload, log_stream_name, callback_sender)
            .map_err(Error::from)?
    else {
        return Ok(Value::Null);
    };

    handle_identifier_request(&request, log_stream_name, &SystemEntropy, callback_sender);
    Ok(Value::Null)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let callback_sender = HttpCallbackSender::new(reqwest::Client::new());
    let callback_sender = &callback_sender;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, callback_sender).await
    }))
    .await
}
