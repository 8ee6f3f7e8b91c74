use crate::storage_event::SOURCE_SCHEME;

pub const MEDIA_CONVERT_ENDPOINT_VAR: &str = "MEDIA_CONVERT_ENDPOINT";
pub const MEDIA_CONVERT_ROLE_ARN_VAR: &str = "MEDIA_CONVERT_ROLE_ARN";
pub const JOB_TEMPLATE_VAR: &str = "JOB_TEMPLATE";
pub const OUTPUT_LOCATION_VAR: &str = "OUTPUT_LOCATION";

/// Deployment-time settings for the transcode dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeConfig {
    pub endpoint_url: Option<String>,
    pub role_arn: String,
    pub job_template: String,
    pub output_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

impl TranscodeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &str| {
            optional(name).ok_or_else(|| ConfigError::new(format!("{name} must be configured")))
        };

        Ok(Self {
            endpoint_url: optional(MEDIA_CONVERT_ENDPOINT_VAR),
            role_arn: required(MEDIA_CONVERT_ROLE_ARN_VAR)?,
            job_template: required(JOB_TEMPLATE_VAR)?,
            output_location: optional(OUTPUT_LOCATION_VAR),
        })
    }

    /// `s3://<bucket[/prefix]>/` when an output location is configured.
    pub fn output_destination(&self) -> Option<String> {
        self.output_location.as_deref().map(|location| {
            let trimmed = location.trim_end_matches('/');
            format!("{SOURCE_SCHEME}{trimmed}/")
        })
    }
}
