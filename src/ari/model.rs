//! Entity records and request parameter sets for the ARI surface.
//!
//! Field names follow the ARI JSON wire format so records can be passed
//! through to subject consumers without translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller identification pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallerId {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: String,
}

/// Dialplan location (context/extension/priority).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialplanCep {
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub exten: String,
    #[serde(default)]
    pub priority: i64,
}

/// A channel as reported by Asterisk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub caller: CallerId,
    #[serde(default)]
    pub connected: CallerId,
    #[serde(default)]
    pub accountcode: String,
    #[serde(default)]
    pub dialplan: DialplanCep,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creationtime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub language: String,
}

/// A mixing bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeData {
    pub id: String,
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub bridge_type: String,
    #[serde(default)]
    pub bridge_class: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub channels: Vec<String>,
}

/// A media playback operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackData {
    pub id: String,
    #[serde(default)]
    pub media_uri: String,
    #[serde(default)]
    pub target_uri: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub state: String,
}

/// An in-progress recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveRecordingData {
    pub name: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub target_uri: String,
    #[serde(default)]
    pub cause: String,
}

/// A completed recording on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRecordingData {
    pub name: String,
    #[serde(default)]
    pub format: String,
}

/// State of one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStateData {
    pub name: String,
    #[serde(default)]
    pub state: String,
}

/// Message counts for one mailbox.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MailboxData {
    pub name: String,
    #[serde(default)]
    pub old_messages: i32,
    #[serde(default)]
    pub new_messages: i32,
}

/// A telephony endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointData {
    pub technology: String,
    pub resource: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub channel_ids: Vec<String>,
}

/// An ARI application and its subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationData {
    pub name: String,
    #[serde(default)]
    pub bridge_ids: Vec<String>,
    #[serde(default)]
    pub channel_ids: Vec<String>,
    #[serde(default)]
    pub device_names: Vec<String>,
    #[serde(default)]
    pub endpoint_ids: Vec<String>,
}

/// Identity block of the Asterisk info record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub version: String,
}

/// Asterisk system information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsteriskInfo {
    #[serde(default)]
    pub system: SystemInfo,
}

/// A loadable Asterisk module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub support_level: String,
    #[serde(default)]
    pub use_count: i32,
}

/// One attribute/value pair of a dynamic config object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigTuple {
    pub attribute: String,
    pub value: String,
}

/// A log channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogData {
    pub name: String,
    #[serde(default)]
    pub types: String,
    #[serde(default)]
    pub status: String,
}

/// Language/format availability of a sound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatLangPair {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub format: String,
}

/// An installed sound asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundData {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub formats: Vec<FormatLangPair>,
}

/// Parameters for creating a channel without dialing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelCreateRequest {
    pub endpoint: String,
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub app_args: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub other_channel_id: String,
    #[serde(default)]
    pub originator: String,
    #[serde(default)]
    pub formats: String,
}

/// Parameters for originating (creating and dialing) a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginateRequest {
    pub endpoint: String,
    #[serde(default)]
    pub timeout: i32,
    #[serde(default)]
    pub caller_id: String,
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub app_args: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub other_channel_id: String,
    #[serde(default)]
    pub originator: String,
    #[serde(default)]
    pub formats: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

/// Options governing a channel snoop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnoopOptions {
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub app_args: String,
    #[serde(default)]
    pub spy: String,
    #[serde(default)]
    pub whisper: String,
    #[serde(default)]
    pub snoop_id: String,
}

/// Options for an external-media channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalMediaOptions {
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub app: String,
    pub external_host: String,
    #[serde(default)]
    pub encapsulation: String,
    #[serde(default)]
    pub transport: String,
    #[serde(default)]
    pub connection_type: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

/// Options governing a live recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingOptions {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub max_duration_seconds: i32,
    #[serde(default)]
    pub max_silence_seconds: i32,
    #[serde(default)]
    pub if_exists: String,
    #[serde(default)]
    pub beep: bool,
    #[serde(default)]
    pub terminate_on: String,
}
