use std::collections::BTreeMap;

use crate::adapters::callback::CallbackSender;
use crate::adapters::entropy::IdentifierEntropy;
use crate::handlers::provisioning::{log_request_received, PendingResponse};
use crate::runtime::identifier::generate_identifier;
use crate::runtime::provisioning::{ProvisioningRequest, ProvisioningResponse};

pub const COMPONENT: &str = "identifier_generator";
pub const ID_KEY: &str = "ID";

pub fn handle_identifier_request(
    request: &ProvisioningRequest,
    log_stream_name: &str,
    entropy: &impl IdentifierEntropy,
    sender: &dyn CallbackSender,
) -> ProvisioningResponse {
    log_request_received(COMPONENT, request);
    let pending = PendingResponse::open(COMPONENT, request, log_stream_name, sender);

    let identifier = generate_identifier(entropy.random_fraction(), entropy.timestamp_ms());
    pending.succeed(BTreeMap::from([(ID_KEY.to_string(), identifier)]))
}
