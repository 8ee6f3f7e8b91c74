use std::collections::BTreeMap;

use serde_json::json;

use crate::adapters::callback::CallbackSender;
use crate::adapters::mediaconvert::EndpointDiscovery;
use crate::handlers::provisioning::{log_request_received, PendingResponse};
use crate::logging::log_error;
use crate::runtime::provisioning::{ProvisioningRequest, ProvisioningResponse};

pub const COMPONENT: &str = "endpoint_resolver";
pub const ENDPOINT_URL_KEY: &str = "EndpointUrl";

/// Resolves the account's MediaConvert endpoint and reports the first URL
/// back to the provisioning system.
pub fn handle_endpoint_request(
    request: &ProvisioningRequest,
    log_stream_name: &str,
    discovery: &impl EndpointDiscovery,
    sender: &dyn CallbackSender,
) -> ProvisioningResponse {
    log_request_received(COMPONENT, request);
    let pending = PendingResponse::open(COMPONENT, request, log_stream_name, sender);

    let endpoint_url = discovery.describe_endpoints().and_then(|urls| {
        urls.into_iter()
            .next()
            .ok_or_else(|| "describe endpoints returned no endpoints".to_string())
    });

    match endpoint_url {
        Ok(url) => pending.succeed(BTreeMap::from([(ENDPOINT_URL_KEY.to_string(), url)])),
        Err(error) => {
            log_error(
                COMPONENT,
                "discovery_failed",
                json!({
                    "request_id": request.request_id.clone(),
                    "error": error,
                }),
            );
            pending.fail(None)
        }
    }
}
