//! Shared test fixtures: a scripted in-memory ARI client and decode
//! helpers for observed bus traffic.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::mpsc;

use ari_proxy::ari::{self, model::*, Event};
use ari_proxy::bus::Delivery;
use ari_proxy::types::{Error, Result};

/// In-memory ARI client: a handful of channels and bridges, a mutable
/// entity id for drift tests, and an injectable event stream.
pub struct TestAri {
    app: String,
    entity_id: RwLock<String>,
    connected: AtomicBool,
    channels: Mutex<HashMap<String, ChannelData>>,
    bridges: Mutex<HashMap<String, BridgeData>>,
    event_txs: Mutex<Vec<mpsc::Sender<Event>>>,
}

impl TestAri {
    pub fn new(app: &str, entity_id: &str) -> Arc<Self> {
        Arc::new(Self {
            app: app.to_string(),
            entity_id: RwLock::new(entity_id.to_string()),
            connected: AtomicBool::new(true),
            channels: Mutex::new(HashMap::new()),
            bridges: Mutex::new(HashMap::new()),
            event_txs: Mutex::new(Vec::new()),
        })
    }

    pub fn add_channel(&self, id: &str) {
        let data = ChannelData {
            id: id.to_string(),
            name: format!("PJSIP/test-{id}"),
            state: "Up".to_string(),
            ..Default::default()
        };
        self.channels.lock().unwrap().insert(id.to_string(), data);
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn set_entity_id(&self, id: &str) {
        *self.entity_id.write().unwrap() = id.to_string();
    }

    /// Inject an event into every live event subscription.
    pub async fn inject(&self, event: Event) {
        let txs: Vec<_> = self.event_txs.lock().unwrap().clone();
        for tx in txs {
            let _ = tx.send(event.clone()).await;
        }
    }

    fn channel_record(&self, id: &str) -> Result<ChannelData> {
        self.channels
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("no such channel: {id}")))
    }
}

#[async_trait]
impl ari::Client for TestAri {
    fn application_name(&self) -> String {
        self.app.clone()
    }

    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn subscribe_events(&self) -> Result<mpsc::Receiver<Event>> {
        let (tx, rx) = mpsc::channel(64);
        self.event_txs.lock().unwrap().push(tx);
        Ok(rx)
    }

    async fn close(&self) {
        self.set_connected(false);
        self.event_txs.lock().unwrap().clear();
    }

    fn application(&self) -> &dyn ari::Application {
        self
    }
    fn asterisk(&self) -> &dyn ari::Asterisk {
        self
    }
    fn bridge(&self) -> &dyn ari::Bridge {
        self
    }
    fn channel(&self) -> &dyn ari::Channel {
        self
    }
    fn device_state(&self) -> &dyn ari::DeviceState {
        self
    }
    fn endpoint(&self) -> &dyn ari::Endpoint {
        self
    }
    fn mailbox(&self) -> &dyn ari::Mailbox {
        self
    }
    fn playback(&self) -> &dyn ari::Playback {
        self
    }
    fn stored_recording(&self) -> &dyn ari::StoredRecording {
        self
    }
    fn live_recording(&self) -> &dyn ari::LiveRecording {
        self
    }
    fn sound(&self) -> &dyn ari::Sound {
        self
    }
}

#[async_trait]
impl ari::Application for TestAri {
    async fn data(&self, name: &str) -> Result<ApplicationData> {
        Ok(ApplicationData {
            name: name.to_string(),
            ..Default::default()
        })
    }
    async fn list(&self) -> Result<Vec<String>> {
        Ok(vec![self.app.clone()])
    }
    async fn subscribe(&self, _name: &str, _event_source: &str) -> Result<()> {
        Ok(())
    }
    async fn unsubscribe(&self, _name: &str, _event_source: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ari::Asterisk for TestAri {
    async fn info(&self) -> Result<AsteriskInfo> {
        Ok(AsteriskInfo {
            system: SystemInfo {
                entity_id: self.entity_id.read().unwrap().clone(),
                version: "21.0.0".to_string(),
            },
        })
    }
    async fn variable_get(&self, _key: &str) -> Result<String> {
        Ok(String::new())
    }
    async fn variable_set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
    async fn config_data(&self, _class: &str, _kind: &str, _id: &str) -> Result<Vec<ConfigTuple>> {
        Ok(Vec::new())
    }
    async fn config_update(
        &self,
        _class: &str,
        _kind: &str,
        _id: &str,
        _tuples: Vec<ConfigTuple>,
    ) -> Result<()> {
        Ok(())
    }
    async fn config_delete(&self, _class: &str, _kind: &str, _id: &str) -> Result<()> {
        Ok(())
    }
    async fn logging_create(&self, _name: &str, _levels: &str) -> Result<()> {
        Ok(())
    }
    async fn logging_data(&self, name: &str) -> Result<LogData> {
        Ok(LogData {
            name: name.to_string(),
            ..Default::default()
        })
    }
    async fn logging_list(&self) -> Result<Vec<LogData>> {
        Ok(Vec::new())
    }
    async fn logging_rotate(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn logging_delete(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn module_data(&self, name: &str) -> Result<ModuleData> {
        Ok(ModuleData {
            name: name.to_string(),
            ..Default::default()
        })
    }
    async fn module_list(&self) -> Result<Vec<ModuleData>> {
        Ok(Vec::new())
    }
    async fn module_load(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn module_reload(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn module_unload(&self, _name: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ari::Bridge for TestAri {
    async fn create(&self, id: &str, bridge_type: &str, name: &str) -> Result<BridgeData> {
        let data = BridgeData {
            id: if id.is_empty() { "bridge-auto" } else { id }.to_string(),
            bridge_type: bridge_type.to_string(),
            name: name.to_string(),
            technology: "simple_bridge".to_string(),
            ..Default::default()
        };
        self.bridges
            .lock()
            .unwrap()
            .insert(data.id.clone(), data.clone());
        Ok(data)
    }
    async fn data(&self, id: &str) -> Result<BridgeData> {
        self.bridges
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("no such bridge: {id}")))
    }
    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.bridges.lock().unwrap().keys().cloned().collect())
    }
    async fn delete(&self, id: &str) -> Result<()> {
        self.bridges
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("no such bridge: {id}")))
    }
    async fn add_channel(&self, _id: &str, _channel_id: &str) -> Result<()> {
        Ok(())
    }
    async fn remove_channel(&self, _id: &str, _channel_id: &str) -> Result<()> {
        Ok(())
    }
    async fn moh(&self, _id: &str, _moh_class: &str) -> Result<()> {
        Ok(())
    }
    async fn stop_moh(&self, _id: &str) -> Result<()> {
        Ok(())
    }
    async fn play(&self, _id: &str, playback_id: &str, media_uri: &str) -> Result<PlaybackData> {
        Ok(PlaybackData {
            id: playback_id.to_string(),
            media_uri: media_uri.to_string(),
            state: "queued".to_string(),
            ..Default::default()
        })
    }
    async fn record(
        &self,
        _id: &str,
        name: &str,
        opts: &RecordingOptions,
    ) -> Result<LiveRecordingData> {
        Ok(LiveRecordingData {
            name: name.to_string(),
            format: opts.format.clone(),
            state: "recording".to_string(),
            ..Default::default()
        })
    }
    async fn video_source(&self, _id: &str, _channel_id: &str) -> Result<()> {
        Ok(())
    }
    async fn video_source_delete(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ari::Channel for TestAri {
    async fn answer(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn busy(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn congestion(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn create(&self, req: &ChannelCreateRequest) -> Result<ChannelData> {
        let id = if req.channel_id.is_empty() {
            "channel-auto".to_string()
        } else {
            req.channel_id.clone()
        };
        self.add_channel(&id);
        self.channel_record(&id)
    }
    async fn continue_in_dialplan(
        &self,
        id: &str,
        _context: &str,
        _extension: &str,
        _priority: i64,
    ) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn data(&self, id: &str) -> Result<ChannelData> {
        self.channel_record(id)
    }
    async fn dial(&self, id: &str, _caller: &str, _timeout_seconds: i32) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.channels.lock().unwrap().keys().cloned().collect())
    }
    async fn hangup(&self, id: &str, _reason: &str) -> Result<()> {
        self.channels
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("no such channel: {id}")))
    }
    async fn hold(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn stop_hold(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn moh(&self, id: &str, _moh_class: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn stop_moh(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn move_to(&self, id: &str, _app: &str, _app_args: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn mute(&self, id: &str, _direction: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn unmute(&self, id: &str, _direction: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn originate(&self, req: &OriginateRequest) -> Result<ChannelData> {
        let id = if req.channel_id.is_empty() {
            "channel-auto".to_string()
        } else {
            req.channel_id.clone()
        };
        self.add_channel(&id);
        self.channel_record(&id)
    }
    async fn play(&self, id: &str, playback_id: &str, media_uri: &str) -> Result<PlaybackData> {
        self.channel_record(id)?;
        Ok(PlaybackData {
            id: playback_id.to_string(),
            media_uri: media_uri.to_string(),
            state: "queued".to_string(),
            ..Default::default()
        })
    }
    async fn record(
        &self,
        id: &str,
        name: &str,
        opts: &RecordingOptions,
    ) -> Result<LiveRecordingData> {
        self.channel_record(id)?;
        Ok(LiveRecordingData {
            name: name.to_string(),
            format: opts.format.clone(),
            state: "recording".to_string(),
            ..Default::default()
        })
    }
    async fn ring(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn stop_ring(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn send_dtmf(&self, id: &str, _dtmf: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn silence(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn stop_silence(&self, id: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn snoop(&self, id: &str, snoop_id: &str, _opts: &SnoopOptions) -> Result<ChannelData> {
        self.channel_record(id)?;
        self.add_channel(snoop_id);
        self.channel_record(snoop_id)
    }
    async fn external_media(&self, opts: &ExternalMediaOptions) -> Result<ChannelData> {
        let id = if opts.channel_id.is_empty() {
            "channel-auto".to_string()
        } else {
            opts.channel_id.clone()
        };
        self.add_channel(&id);
        self.channel_record(&id)
    }
    async fn variable_get(&self, id: &str, _name: &str) -> Result<String> {
        self.channel_record(id)?;
        Ok(String::new())
    }
    async fn variable_set(&self, id: &str, _name: &str, _value: &str) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
    async fn user_event(
        &self,
        id: &str,
        _event_name: &str,
        _app: &str,
        _variables: serde_json::Value,
    ) -> Result<()> {
        self.channel_record(id).map(|_| ())
    }
}

#[async_trait]
impl ari::DeviceState for TestAri {
    async fn data(&self, name: &str) -> Result<DeviceStateData> {
        Ok(DeviceStateData {
            name: name.to_string(),
            state: "NOT_INUSE".to_string(),
        })
    }
    async fn list(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
    async fn update(&self, _name: &str, _state: &str) -> Result<()> {
        Ok(())
    }
    async fn delete(&self, _name: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ari::Endpoint for TestAri {
    async fn data(&self, tech: &str, resource: &str) -> Result<EndpointData> {
        Ok(EndpointData {
            technology: tech.to_string(),
            resource: resource.to_string(),
            state: "online".to_string(),
            ..Default::default()
        })
    }
    async fn list(&self) -> Result<Vec<EndpointData>> {
        Ok(Vec::new())
    }
    async fn list_by_tech(&self, _tech: &str) -> Result<Vec<EndpointData>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl ari::Mailbox for TestAri {
    async fn data(&self, name: &str) -> Result<MailboxData> {
        Ok(MailboxData {
            name: name.to_string(),
            ..Default::default()
        })
    }
    async fn list(&self) -> Result<Vec<MailboxData>> {
        Ok(Vec::new())
    }
    async fn update(&self, _name: &str, _old: i32, _new: i32) -> Result<()> {
        Ok(())
    }
    async fn delete(&self, _name: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ari::Playback for TestAri {
    async fn data(&self, id: &str) -> Result<PlaybackData> {
        Ok(PlaybackData {
            id: id.to_string(),
            state: "playing".to_string(),
            ..Default::default()
        })
    }
    async fn control(&self, _id: &str, _operation: &str) -> Result<()> {
        Ok(())
    }
    async fn stop(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ari::StoredRecording for TestAri {
    async fn list(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
    async fn data(&self, name: &str) -> Result<StoredRecordingData> {
        Ok(StoredRecordingData {
            name: name.to_string(),
            format: "wav".to_string(),
        })
    }
    async fn copy(&self, _name: &str, dest: &str) -> Result<StoredRecordingData> {
        Ok(StoredRecordingData {
            name: dest.to_string(),
            format: "wav".to_string(),
        })
    }
    async fn delete(&self, _name: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ari::LiveRecording for TestAri {
    async fn data(&self, name: &str) -> Result<LiveRecordingData> {
        Ok(LiveRecordingData {
            name: name.to_string(),
            state: "recording".to_string(),
            ..Default::default()
        })
    }
    async fn stop(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn pause(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn resume(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn mute(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn unmute(&self, _name: &str) -> Result<()> {
        Ok(())
    }
    async fn scrap(&self, _name: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ari::Sound for TestAri {
    async fn data(&self, name: &str) -> Result<SoundData> {
        Ok(SoundData {
            id: name.to_string(),
            ..Default::default()
        })
    }
    async fn list(&self) -> Result<Vec<SoundData>> {
        Ok(Vec::new())
    }
}

/// Decode a JSON delivery payload.
pub fn decode<T: DeserializeOwned>(delivery: &Delivery) -> T {
    serde_json::from_slice(&delivery.payload).expect("delivery payload decodes")
}
