pub mod endpoint;
pub mod identifier;
pub mod provisioning;
pub mod transcode;
