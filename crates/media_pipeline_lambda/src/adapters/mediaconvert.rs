use std::collections::HashMap;

use aws_sdk_mediaconvert::error::DisplayErrorContext;
use aws_sdk_mediaconvert::types::{
    AudioDefaultSelection, AudioSelector, AudioSelectorType, CmafGroupSettings, Input,
    JobSettings, LanguageCode, OutputGroup, OutputGroupSettings, OutputGroupType,
};

use crate::runtime::job_request;

pub trait EndpointDiscovery {
    /// Account-specific endpoint URLs in the order the service returned them.
    fn describe_endpoints(&self) -> Result<Vec<String>, String>;
}

pub trait JobSubmitter {
    fn create_job(&self, request: &job_request::ConversionJobRequest) -> Result<(), String>;
}

#[derive(Debug, Clone)]
pub struct MediaConvertAdapter {
    client: aws_sdk_mediaconvert::Client,
}

impl MediaConvertAdapter {
    pub fn new(sdk_config: &aws_config::SdkConfig, endpoint_url: Option<&str>) -> Self {
        let mut builder = aws_sdk_mediaconvert::config::Builder::from(sdk_config);
        if let Some(endpoint_url) = endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        Self {
            client: aws_sdk_mediaconvert::Client::from_conf(builder.build()),
        }
    }
}

impl EndpointDiscovery for MediaConvertAdapter {
    #[allow(deprecated)]
    fn describe_endpoints(&self) -> Result<Vec<String>, String> {
        let client = self.client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .describe_endpoints()
                    .send()
                    .await
                    .map(|output| {
                        output
                            .endpoints()
                            .iter()
                            .filter_map(|endpoint| endpoint.url())
                            .map(str::to_string)
                            .collect()
                    })
                    .map_err(|error| {
                        format!(
                            "failed to describe mediaconvert endpoints: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

impl JobSubmitter for MediaConvertAdapter {
    fn create_job(&self, request: &job_request::ConversionJobRequest) -> Result<(), String> {
        let client = self.client.clone();
        let job_template = request.job_template.clone();
        let role = request.role.clone();
        let settings = to_sdk_settings(&request.settings);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .create_job()
                    .job_template(job_template)
                    .role(role)
                    .settings(settings)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| DisplayErrorContext(&error).to_string())
            })
        })
    }
}

pub fn to_sdk_settings(settings: &job_request::JobSettings) -> JobSettings {
    let inputs = settings.inputs.iter().map(to_sdk_input).collect::<Vec<_>>();
    let output_groups = settings
        .output_groups
        .as_ref()
        .map(|groups| groups.iter().map(to_sdk_output_group).collect::<Vec<_>>());

    JobSettings::builder()
        .set_inputs(Some(inputs))
        .set_output_groups(output_groups)
        .build()
}

fn to_sdk_input(input: &job_request::JobInput) -> Input {
    let audio_selectors = input
        .audio_selectors
        .iter()
        .map(|(name, selector)| (name.clone(), to_sdk_audio_selector(selector)))
        .collect::<HashMap<_, _>>();

    Input::builder()
        .file_input(input.file_input.clone())
        .set_audio_selectors(Some(audio_selectors))
        .build()
}

fn to_sdk_audio_selector(selector: &job_request::AudioSelector) -> AudioSelector {
    AudioSelector::builder()
        .offset(selector.offset)
        .default_selection(AudioDefaultSelection::from(
            selector.default_selection.as_str(),
        ))
        .selector_type(AudioSelectorType::from(selector.selector_type.as_str()))
        .program_selection(selector.program_selection)
        .language_code(LanguageCode::from(selector.language_code.as_str()))
        .build()
}

fn to_sdk_output_group(group: &job_request::OutputGroup) -> OutputGroup {
    let settings = &group.output_group_settings;
    let cmaf = &settings.cmaf_group_settings;

    OutputGroup::builder()
        .set_outputs(Some(Vec::new()))
        .output_group_settings(
            OutputGroupSettings::builder()
                .r#type(OutputGroupType::from(settings.group_type.as_str()))
                .cmaf_group_settings(
                    CmafGroupSettings::builder()
                        .segment_length(cmaf.segment_length)
                        .destination(cmaf.destination.clone())
                        .fragment_length(cmaf.fragment_length)
                        .build(),
                )
                .build(),
        )
        .build()
}
