//! ARI client capability consumed by the server.
//!
//! The proxy does not implement the Asterisk REST Interface itself; it
//! drives an already-connected client through these traits. The surface
//! mirrors the ARI resource families, one operations trait per family,
//! reachable from [`Client`] accessors. Implementations are expected to be
//! internally concurrent-safe; the server adds no locking around them.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::types::Result;

pub mod events;
pub mod model;

pub use events::{EntityKind, Event};
pub use model::*;

/// A connected ARI client for exactly one application on one Asterisk node.
#[async_trait]
pub trait Client: Send + Sync {
    /// Name of the ARI application this client is registered as.
    fn application_name(&self) -> String;

    /// Whether the underlying connection is currently live.
    fn connected(&self) -> bool;

    /// Subscribe to the application's full event stream. Events arrive in
    /// Asterisk order; the receiver's backpressure is the stream's.
    async fn subscribe_events(&self) -> Result<mpsc::Receiver<Event>>;

    /// Close the connection and terminate the event stream.
    async fn close(&self);

    fn application(&self) -> &dyn Application;
    fn asterisk(&self) -> &dyn Asterisk;
    fn bridge(&self) -> &dyn Bridge;
    fn channel(&self) -> &dyn Channel;
    fn device_state(&self) -> &dyn DeviceState;
    fn endpoint(&self) -> &dyn Endpoint;
    fn mailbox(&self) -> &dyn Mailbox;
    fn playback(&self) -> &dyn Playback;
    fn stored_recording(&self) -> &dyn StoredRecording;
    fn live_recording(&self) -> &dyn LiveRecording;
    fn sound(&self) -> &dyn Sound;
}

/// ARI application operations.
#[async_trait]
pub trait Application: Send + Sync {
    async fn data(&self, name: &str) -> Result<ApplicationData>;
    async fn list(&self) -> Result<Vec<String>>;
    async fn subscribe(&self, name: &str, event_source: &str) -> Result<()>;
    async fn unsubscribe(&self, name: &str, event_source: &str) -> Result<()>;
}

/// Asterisk system operations: info, variables, dynamic config, logging,
/// and module management.
#[async_trait]
pub trait Asterisk: Send + Sync {
    async fn info(&self) -> Result<AsteriskInfo>;
    async fn variable_get(&self, key: &str) -> Result<String>;
    async fn variable_set(&self, key: &str, value: &str) -> Result<()>;

    async fn config_data(&self, class: &str, kind: &str, id: &str) -> Result<Vec<ConfigTuple>>;
    async fn config_update(
        &self,
        class: &str,
        kind: &str,
        id: &str,
        tuples: Vec<ConfigTuple>,
    ) -> Result<()>;
    async fn config_delete(&self, class: &str, kind: &str, id: &str) -> Result<()>;

    async fn logging_create(&self, name: &str, levels: &str) -> Result<()>;
    async fn logging_data(&self, name: &str) -> Result<LogData>;
    async fn logging_list(&self) -> Result<Vec<LogData>>;
    async fn logging_rotate(&self, name: &str) -> Result<()>;
    async fn logging_delete(&self, name: &str) -> Result<()>;

    async fn module_data(&self, name: &str) -> Result<ModuleData>;
    async fn module_list(&self) -> Result<Vec<ModuleData>>;
    async fn module_load(&self, name: &str) -> Result<()>;
    async fn module_reload(&self, name: &str) -> Result<()>;
    async fn module_unload(&self, name: &str) -> Result<()>;
}

/// Bridge operations.
#[async_trait]
pub trait Bridge: Send + Sync {
    async fn create(&self, id: &str, bridge_type: &str, name: &str) -> Result<BridgeData>;
    async fn data(&self, id: &str) -> Result<BridgeData>;
    async fn list(&self) -> Result<Vec<String>>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn add_channel(&self, id: &str, channel_id: &str) -> Result<()>;
    async fn remove_channel(&self, id: &str, channel_id: &str) -> Result<()>;
    async fn moh(&self, id: &str, moh_class: &str) -> Result<()>;
    async fn stop_moh(&self, id: &str) -> Result<()>;
    async fn play(&self, id: &str, playback_id: &str, media_uri: &str) -> Result<PlaybackData>;
    async fn record(
        &self,
        id: &str,
        name: &str,
        opts: &RecordingOptions,
    ) -> Result<LiveRecordingData>;
    async fn video_source(&self, id: &str, channel_id: &str) -> Result<()>;
    async fn video_source_delete(&self, id: &str) -> Result<()>;
}

/// Channel operations.
#[async_trait]
pub trait Channel: Send + Sync {
    async fn answer(&self, id: &str) -> Result<()>;
    async fn busy(&self, id: &str) -> Result<()>;
    async fn congestion(&self, id: &str) -> Result<()>;
    async fn create(&self, req: &ChannelCreateRequest) -> Result<ChannelData>;
    async fn continue_in_dialplan(
        &self,
        id: &str,
        context: &str,
        extension: &str,
        priority: i64,
    ) -> Result<()>;
    async fn data(&self, id: &str) -> Result<ChannelData>;
    async fn dial(&self, id: &str, caller: &str, timeout_seconds: i32) -> Result<()>;
    async fn list(&self) -> Result<Vec<String>>;
    async fn hangup(&self, id: &str, reason: &str) -> Result<()>;
    async fn hold(&self, id: &str) -> Result<()>;
    async fn stop_hold(&self, id: &str) -> Result<()>;
    async fn moh(&self, id: &str, moh_class: &str) -> Result<()>;
    async fn stop_moh(&self, id: &str) -> Result<()>;
    async fn move_to(&self, id: &str, app: &str, app_args: &str) -> Result<()>;
    async fn mute(&self, id: &str, direction: &str) -> Result<()>;
    async fn unmute(&self, id: &str, direction: &str) -> Result<()>;
    async fn originate(&self, req: &OriginateRequest) -> Result<ChannelData>;
    async fn play(&self, id: &str, playback_id: &str, media_uri: &str) -> Result<PlaybackData>;
    async fn record(
        &self,
        id: &str,
        name: &str,
        opts: &RecordingOptions,
    ) -> Result<LiveRecordingData>;
    async fn ring(&self, id: &str) -> Result<()>;
    async fn stop_ring(&self, id: &str) -> Result<()>;
    async fn send_dtmf(&self, id: &str, dtmf: &str) -> Result<()>;
    async fn silence(&self, id: &str) -> Result<()>;
    async fn stop_silence(&self, id: &str) -> Result<()>;
    async fn snoop(&self, id: &str, snoop_id: &str, opts: &SnoopOptions) -> Result<ChannelData>;
    async fn external_media(&self, opts: &ExternalMediaOptions) -> Result<ChannelData>;
    async fn variable_get(&self, id: &str, name: &str) -> Result<String>;
    async fn variable_set(&self, id: &str, name: &str, value: &str) -> Result<()>;
    async fn user_event(
        &self,
        id: &str,
        event_name: &str,
        app: &str,
        variables: serde_json::Value,
    ) -> Result<()>;
}

/// Device-state operations.
#[async_trait]
pub trait DeviceState: Send + Sync {
    async fn data(&self, name: &str) -> Result<DeviceStateData>;
    async fn list(&self) -> Result<Vec<String>>;
    async fn update(&self, name: &str, state: &str) -> Result<()>;
    async fn delete(&self, name: &str) -> Result<()>;
}

/// Endpoint operations.
#[async_trait]
pub trait Endpoint: Send + Sync {
    async fn data(&self, tech: &str, resource: &str) -> Result<EndpointData>;
    async fn list(&self) -> Result<Vec<EndpointData>>;
    async fn list_by_tech(&self, tech: &str) -> Result<Vec<EndpointData>>;
}

/// Mailbox operations.
#[async_trait]
pub trait Mailbox: Send + Sync {
    async fn data(&self, name: &str) -> Result<MailboxData>;
    async fn list(&self) -> Result<Vec<MailboxData>>;
    async fn update(&self, name: &str, old_messages: i32, new_messages: i32) -> Result<()>;
    async fn delete(&self, name: &str) -> Result<()>;
}

/// Playback operations.
#[async_trait]
pub trait Playback: Send + Sync {
    async fn data(&self, id: &str) -> Result<PlaybackData>;
    async fn control(&self, id: &str, operation: &str) -> Result<()>;
    async fn stop(&self, id: &str) -> Result<()>;
}

/// Stored-recording operations.
#[async_trait]
pub trait StoredRecording: Send + Sync {
    async fn list(&self) -> Result<Vec<String>>;
    async fn data(&self, name: &str) -> Result<StoredRecordingData>;
    async fn copy(&self, name: &str, dest: &str) -> Result<StoredRecordingData>;
    async fn delete(&self, name: &str) -> Result<()>;
}

/// Live-recording operations.
#[async_trait]
pub trait LiveRecording: Send + Sync {
    async fn data(&self, name: &str) -> Result<LiveRecordingData>;
    async fn stop(&self, name: &str) -> Result<()>;
    async fn pause(&self, name: &str) -> Result<()>;
    async fn resume(&self, name: &str) -> Result<()>;
    async fn mute(&self, name: &str) -> Result<()>;
    async fn unmute(&self, name: &str) -> Result<()>;
    async fn scrap(&self, name: &str) -> Result<()>;
}

/// Sound asset operations.
#[async_trait]
pub trait Sound: Send + Sync {
    async fn data(&self, name: &str) -> Result<SoundData>;
    async fn list(&self) -> Result<Vec<SoundData>>;
}
