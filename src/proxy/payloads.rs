//! Transport structs decoded from request payloads.
//!
//! Shapes shared by many kinds (`Id`, `Name`) live here once; parameter-set
//! kinds (originate, external media, recording) reuse the ARI model structs
//! directly. Every field not required for addressing defaults so that a
//! missing optional never fails decoding — only a missing identifier does.

use serde::{Deserialize, Serialize};

use crate::ari::model::{RecordingOptions, SnoopOptions};

/// Payload addressing one entity by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Id {
    pub id: String,
}

/// Payload addressing one entity by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub name: String,
}

/// ApplicationSubscribe / ApplicationUnsubscribe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubscribe {
    pub name: String,
    pub event_source: String,
}

/// AsteriskVariableGet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableGet {
    pub key: String,
}

/// AsteriskVariableSet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableSet {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// AsteriskConfig* payloads: dynamic config object address plus tuples for
/// updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub class: String,
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub tuples: Vec<crate::ari::model::ConfigTuple>,
}

/// AsteriskLoggingCreate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingCreate {
    pub name: String,
    #[serde(default)]
    pub levels: String,
}

/// BridgeCreate / BridgeStageCreate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeCreate {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub bridge_type: String,
    #[serde(default)]
    pub name: String,
}

/// BridgeAddChannel / BridgeRemoveChannel / BridgeVideoSource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeChannel {
    pub id: String,
    pub channel: String,
}

/// BridgeMOH / ChannelMOH.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moh {
    pub id: String,
    #[serde(default)]
    pub class: String,
}

/// BridgePlay / ChannelPlay and their stage variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub id: String,
    #[serde(default)]
    pub playback_id: String,
    #[serde(default)]
    pub media_uri: String,
}

/// BridgeRecord / ChannelRecord and their stage variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub options: RecordingOptions,
}

/// ChannelHangup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hangup {
    pub id: String,
    #[serde(default)]
    pub reason: String,
}

/// ChannelContinue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Continue {
    pub id: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub priority: i64,
}

/// ChannelDial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dial {
    pub id: String,
    #[serde(default)]
    pub caller: String,
    #[serde(default)]
    pub timeout: i32,
}

/// ChannelMove.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub id: String,
    pub app: String,
    #[serde(default)]
    pub app_args: String,
}

/// ChannelMute / ChannelUnmute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mute {
    pub id: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_direction() -> String {
    "both".to_string()
}

/// ChannelSendDTMF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendDtmf {
    pub id: String,
    pub dtmf: String,
}

/// ChannelSnoop / ChannelStageSnoop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snoop {
    pub id: String,
    #[serde(default)]
    pub snoop_id: String,
    #[serde(default)]
    pub options: SnoopOptions,
}

/// ChannelVariableGet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelVariableGet {
    pub id: String,
    pub name: String,
}

/// ChannelVariableSet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelVariableSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// ChannelUserEvent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub variables: serde_json::Value,
}

/// DeviceStateUpdate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStateUpdate {
    pub name: String,
    pub state: String,
}

/// EndpointData / EndpointGet / EndpointListByTech.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub tech: String,
    #[serde(default)]
    pub resource: String,
}

/// MailboxUpdate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MailboxUpdate {
    pub name: String,
    #[serde(default)]
    pub old_messages: i32,
    #[serde(default)]
    pub new_messages: i32,
}

/// PlaybackControl.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackControl {
    pub id: String,
    pub operation: String,
}

/// RecordingStoredCopy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingCopy {
    pub name: String,
    pub destination: String,
}
