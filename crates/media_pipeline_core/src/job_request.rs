//! Conversion job request model.
//!
//! Field names follow the MediaConvert `CreateJob` JSON shape so the request
//! can be logged verbatim and mapped one-to-one onto SDK types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const AUDIO_SELECTOR_NAME: &str = "Audio Selector 1";
pub const AUDIO_LANGUAGE_CODE: &str = "ENM";
pub const AUDIO_PROGRAM_SELECTION: i32 = 1;
pub const CMAF_GROUP_SETTINGS: &str = "CMAF_GROUP_SETTINGS";
pub const CMAF_SEGMENT_LENGTH: i32 = 10;
pub const CMAF_FRAGMENT_LENGTH: i32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ConversionJobRequest {
    pub job_template: String,
    pub role: String,
    pub settings: JobSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct JobSettings {
    pub inputs: Vec<JobInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_groups: Option<Vec<OutputGroup>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct JobInput {
    pub file_input: String,
    pub audio_selectors: BTreeMap<String, AudioSelector>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct AudioSelector {
    pub offset: i32,
    pub default_selection: String,
    pub selector_type: String,
    pub program_selection: i32,
    pub language_code: String,
}

impl AudioSelector {
    /// The single default track selected by language code.
    pub fn default_language_track() -> Self {
        Self {
            offset: 0,
            default_selection: "DEFAULT".to_string(),
            selector_type: "LANGUAGE_CODE".to_string(),
            program_selection: AUDIO_PROGRAM_SELECTION,
            language_code: AUDIO_LANGUAGE_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct OutputGroup {
    pub outputs: Vec<serde_json::Value>,
    pub output_group_settings: OutputGroupSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct OutputGroupSettings {
    #[serde(rename = "Type")]
    pub group_type: String,
    pub cmaf_group_settings: CmafGroupSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CmafGroupSettings {
    pub segment_length: i32,
    pub destination: String,
    pub fragment_length: i32,
}

impl OutputGroup {
    pub fn cmaf(destination: impl Into<String>) -> Self {
        Self {
            outputs: Vec::new(),
            output_group_settings: OutputGroupSettings {
                group_type: CMAF_GROUP_SETTINGS.to_string(),
                cmaf_group_settings: CmafGroupSettings {
                    segment_length: CMAF_SEGMENT_LENGTH,
                    destination: destination.into(),
                    fragment_length: CMAF_FRAGMENT_LENGTH,
                },
            },
        }
    }
}

/// Starts from a template-only request and optionally layers on an output
/// group override.
#[derive(Debug, Clone)]
pub struct JobRequestBuilder {
    job_template: String,
    role: String,
    inputs: Vec<JobInput>,
    output_groups: Vec<OutputGroup>,
}

impl JobRequestBuilder {
    pub fn new(job_template: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            job_template: job_template.into(),
            role: role.into(),
            inputs: Vec::new(),
            output_groups: Vec::new(),
        }
    }

    pub fn input(mut self, file_input: impl Into<String>) -> Self {
        self.inputs.push(JobInput {
            file_input: file_input.into(),
            audio_selectors: BTreeMap::from([(
                AUDIO_SELECTOR_NAME.to_string(),
                AudioSelector::default_language_track(),
            )]),
        });
        self
    }

    pub fn cmaf_output(mut self, destination: Option<&str>) -> Self {
        if let Some(destination) = destination {
            self.output_groups.push(OutputGroup::cmaf(destination));
        }
        self
    }

    pub fn build(self) -> ConversionJobRequest {
        ConversionJobRequest {
            job_template: self.job_template,
            role: self.role,
            settings: JobSettings {
                inputs: self.inputs,
                output_groups: if self.output_groups.is_empty() {
                    None
                } else {
                    Some(self.output_groups)
                },
            },
        }
    }
}
