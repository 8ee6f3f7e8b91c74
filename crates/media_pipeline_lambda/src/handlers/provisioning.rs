use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::adapters::callback::CallbackSender;
use crate::logging::{log_error, log_info};
use crate::runtime::provisioning::{
    build_response, reject_raw_event, response_body, ProvisioningRequest, ProvisioningResponse,
    ProvisioningStatus,
};

pub const UNREPORTED_EXIT_REASON: &str = "Handler exited without reporting a result";

/// An outstanding obligation to answer one provisioning request.
///
/// Exactly one response is sent per guard: through [`PendingResponse::succeed`]
/// or [`PendingResponse::fail`], or as `FAILED` when the guard is dropped
/// unsettled (including during a panic unwind).
pub struct PendingResponse<'a> {
    component: &'static str,
    request: &'a ProvisioningRequest,
    log_stream_name: &'a str,
    sender: &'a dyn CallbackSender,
    settled: bool,
}

impl<'a> PendingResponse<'a> {
    pub fn open(
        component: &'static str,
        request: &'a ProvisioningRequest,
        log_stream_name: &'a str,
        sender: &'a dyn CallbackSender,
    ) -> Self {
        Self {
            component,
            request,
            log_stream_name,
            sender,
            settled: false,
        }
    }

    pub fn succeed(mut self, data: BTreeMap<String, String>) -> ProvisioningResponse {
        self.settle(ProvisioningStatus::Success, Some(data), None)
    }

    pub fn fail(mut self, reason: Option<String>) -> ProvisioningResponse {
        self.settle(ProvisioningStatus::Failed, None, reason)
    }

    fn settle(
        &mut self,
        status: ProvisioningStatus,
        data: Option<BTreeMap<String, String>>,
        reason: Option<String>,
    ) -> ProvisioningResponse {
        self.settled = true;
        let response = build_response(self.request, status, data, reason, self.log_stream_name);
        log_info(
            self.component,
            "response_sent",
            json!({
                "request_id": self.request.request_id.clone(),
                "status": status.as_str(),
                "response": response.clone(),
            }),
        );

        deliver(self.component, &self.request.response_url, &response, self.sender);
        response
    }
}

fn deliver(
    component: &str,
    response_url: &str,
    response: &ProvisioningResponse,
    sender: &dyn CallbackSender,
) {
    let delivery =
        response_body(response).and_then(|body| sender.send_response(response_url, &body));
    if let Err(error) = delivery {
        log_error(
            component,
            "callback_delivery_failed",
            json!({
                "request_id": response.request_id.clone(),
                "status": response.status.as_str(),
                "error": error,
            }),
        );
    }
}

/// Parses a provisioning event.
///
/// An event that does not parse is answered with `FAILED` right away when it
/// carries a response URL, and `Ok(None)` is returned. `Err` means no
/// callback could be sent at all.
pub fn parse_provisioning_request(
    component: &str,
    payload: Value,
    log_stream_name: &str,
    sender: &dyn CallbackSender,
) -> Result<Option<ProvisioningRequest>, String> {
    let error = match serde_json::from_value::<ProvisioningRequest>(payload.clone()) {
        Ok(request) => return Ok(Some(request)),
        Err(error) => format!("invalid provisioning request: {error}"),
    };

    log_error(
        component,
        "request_rejected",
        json!({
            "error": error.clone(),
            "event": payload.clone(),
        }),
    );

    let Some((response_url, response)) = reject_raw_event(&payload, error.clone(), log_stream_name)
    else {
        return Err(error);
    };
    log_info(
        component,
        "response_sent",
        json!({
            "request_id": response.request_id.clone(),
            "status": response.status.as_str(),
            "response": response.clone(),
        }),
    );
    deliver(component, &response_url, &response, sender);
    Ok(None)
}

impl Drop for PendingResponse<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.settle(
                ProvisioningStatus::Failed,
                None,
                Some(UNREPORTED_EXIT_REASON.to_string()),
            );
        }
    }
}

pub fn log_request_received(component: &str, request: &ProvisioningRequest) {
    log_info(
        component,
        "request_received",
        serde_json::to_value(request).unwrap_or_else(|error| json!({ "error": error.to_string() })),
    );
}
