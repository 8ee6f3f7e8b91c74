#![allow(dead_code)]

use std::sync::Mutex;

use media_pipeline_lambda::adapters::callback::CallbackSender;
use media_pipeline_lambda::adapters::entropy::IdentifierEntropy;
use media_pipeline_lambda::adapters::mediaconvert::{EndpointDiscovery, JobSubmitter};
use media_pipeline_lambda::runtime::job_request::ConversionJobRequest;
use media_pipeline_lambda::runtime::provisioning::ProvisioningRequest;
use serde_json::{json, Value};

pub const RESPONSE_URL: &str = "https://cloudformation-custom-resource-response.example/presigned";
pub const LOG_STREAM: &str = "2026/10/18/[$LATEST]0123456789abcdef";

pub fn provisioning_request(request_type: &str) -> ProvisioningRequest {
    serde_json::from_value(json!({
        "RequestType": request_type,
        "ResponseURL": RESPONSE_URL,
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/vod/guid",
        "RequestId": "11111111-2222-3333-4444-555555555555",
        "ResourceType": "Custom::Resource",
        "LogicalResourceId": "CustomResource",
        "ResourceProperties": {
            "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:custom"
        }
    }))
    .expect("request should parse")
}

pub struct CapturingSender {
    deliveries: Mutex<Vec<(String, Vec<u8>)>>,
    fail_with: Option<String>,
}

impl CapturingSender {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            fail_with: Some(error.to_string()),
        }
    }

    pub fn deliveries(&self) -> Vec<(String, Vec<u8>)> {
        self.deliveries.lock().expect("poisoned mutex").clone()
    }

    pub fn only_body(&self) -> Value {
        let deliveries = self.deliveries();
        assert_eq!(deliveries.len(), 1, "exactly one callback should be sent");
        assert_eq!(deliveries[0].0, RESPONSE_URL);
        serde_json::from_slice(&deliveries[0].1).expect("callback body should be json")
    }
}

impl CallbackSender for CapturingSender {
    fn send_response(&self, response_url: &str, body: &[u8]) -> Result<(), String> {
        self.deliveries
            .lock()
            .expect("poisoned mutex")
            .push((response_url.to_string(), body.to_vec()));
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

pub enum FakeDiscovery {
    Endpoints(Vec<String>),
    Failure(String),
    Panic,
}

impl EndpointDiscovery for FakeDiscovery {
    fn describe_endpoints(&self) -> Result<Vec<String>, String> {
        match self {
            Self::Endpoints(urls) => Ok(urls.clone()),
            Self::Failure(error) => Err(error.clone()),
            Self::Panic => panic!("discovery client crashed"),
        }
    }
}

pub struct FixedEntropy {
    pub fraction: f64,
    pub timestamp_ms: u64,
}

impl IdentifierEntropy for FixedEntropy {
    fn random_fraction(&self) -> f64 {
        self.fraction
    }

    fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}

pub struct CapturingSubmitter {
    requests: Mutex<Vec<ConversionJobRequest>>,
    fail_with: Option<String>,
}

impl CapturingSubmitter {
    pub fn accepting() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn rejecting(error: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Some(error.to_string()),
        }
    }

    pub fn requests(&self) -> Vec<ConversionJobRequest> {
        self.requests.lock().expect("poisoned mutex").clone()
    }
}

impl JobSubmitter for CapturingSubmitter {
    fn create_job(&self, request: &ConversionJobRequest) -> Result<(), String> {
        self.requests
            .lock()
            .expect("poisoned mutex")
            .push(request.clone());
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
