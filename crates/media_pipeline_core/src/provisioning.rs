use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const LOG_STREAM_REASON_PREFIX: &str = "See the details in CloudWatch Log Stream: ";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// Custom resource lifecycle event delivered by the provisioning system.
///
/// Only the fields echoed back in the response are interpreted; resource
/// properties are carried as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisioningRequest {
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    #[serde(default)]
    pub resource_type: String,
    pub logical_resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_properties: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProvisioningStatus {
    Success,
    Failed,
}

impl ProvisioningStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisioningResponse {
    pub status: ProvisioningStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

pub fn build_response(
    request: &ProvisioningRequest,
    status: ProvisioningStatus,
    data: Option<BTreeMap<String, String>>,
    reason: Option<String>,
    log_stream_name: &str,
) -> ProvisioningResponse {
    let physical_resource_id = request
        .physical_resource_id
        .clone()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| log_stream_name.to_string());

    ProvisioningResponse {
        status,
        reason: reason.unwrap_or_else(|| format!("{LOG_STREAM_REASON_PREFIX}{log_stream_name}")),
        physical_resource_id,
        stack_id: request.stack_id.clone(),
        request_id: request.request_id.clone(),
        logical_resource_id: request.logical_resource_id.clone(),
        no_echo: false,
        data,
    }
}

/// Builds a `FAILED` response for an event that did not parse as a
/// [`ProvisioningRequest`], echoing whichever identifiers it does carry.
/// Returns the response URL with the response, or `None` when the event has
/// no URL to answer.
pub fn reject_raw_event(
    event: &Value,
    reason: String,
    log_stream_name: &str,
) -> Option<(String, ProvisioningResponse)> {
    let field = |name: &str| {
        event
            .get(name)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    let response_url = field("ResponseURL")?;

    Some((
        response_url,
        ProvisioningResponse {
            status: ProvisioningStatus::Failed,
            reason,
            physical_resource_id: field("PhysicalResourceId")
                .unwrap_or_else(|| log_stream_name.to_string()),
            stack_id: field("StackId").unwrap_or_default(),
            request_id: field("RequestId").unwrap_or_default(),
            logical_resource_id: field("LogicalResourceId").unwrap_or_default(),
            no_echo: false,
            data: None,
        },
    ))
}

pub fn response_body(response: &ProvisioningResponse) -> Result<Vec<u8>, String> {
    serde_json::to_vec(response)
        .map_err(|error| format!("failed to serialize provisioning response: {error}"))
}
