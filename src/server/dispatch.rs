//! Request dispatch — routes by operation kind, delegates to the family
//! handler modules, and publishes exactly one response per request.

use super::{ops, Core};
use crate::proxy::{Request, Response};
use crate::types::{Error, Result};

/// Dispatch one request and publish its response on `reply`.
pub(crate) async fn dispatch(core: &Core, reply: &str, request: Request) {
    tracing::debug!(kind = %request.kind, "received request");
    match route(core, &request).await {
        Ok(response) => core.publish(reply, &response).await,
        Err(e) => core.send_error(reply, &e).await,
    }
}

async fn route(core: &Core, req: &Request) -> Result<Response> {
    match req.kind.as_str() {
        "ApplicationData" => ops::application::data(core, req).await,
        "ApplicationGet" => ops::application::get(core, req).await,
        "ApplicationList" => ops::application::list(core, req).await,
        "ApplicationSubscribe" => ops::application::subscribe(core, req).await,
        "ApplicationUnsubscribe" => ops::application::unsubscribe(core, req).await,
        "AsteriskConfigData" => ops::asterisk::config_data(core, req).await,
        "AsteriskConfigDelete" => ops::asterisk::config_delete(core, req).await,
        "AsteriskConfigUpdate" => ops::asterisk::config_update(core, req).await,
        "AsteriskLoggingCreate" => ops::asterisk::logging_create(core, req).await,
        "AsteriskLoggingData" => ops::asterisk::logging_data(core, req).await,
        "AsteriskLoggingDelete" => ops::asterisk::logging_delete(core, req).await,
        "AsteriskLoggingGet" => ops::asterisk::logging_get(core, req).await,
        "AsteriskLoggingList" => ops::asterisk::logging_list(core, req).await,
        "AsteriskLoggingRotate" => ops::asterisk::logging_rotate(core, req).await,
        "AsteriskModuleData" => ops::asterisk::module_data(core, req).await,
        "AsteriskModuleGet" => ops::asterisk::module_get(core, req).await,
        "AsteriskModuleList" => ops::asterisk::module_list(core, req).await,
        "AsteriskModuleLoad" => ops::asterisk::module_load(core, req).await,
        "AsteriskModuleReload" => ops::asterisk::module_reload(core, req).await,
        "AsteriskModuleUnload" => ops::asterisk::module_unload(core, req).await,
        "AsteriskInfo" => ops::asterisk::info(core, req).await,
        "AsteriskVariableGet" => ops::asterisk::variable_get(core, req).await,
        "AsteriskVariableSet" => ops::asterisk::variable_set(core, req).await,
        "BridgeAddChannel" => ops::bridge::add_channel(core, req).await,
        "BridgeCreate" => ops::bridge::create(core, req).await,
        "BridgeStageCreate" => ops::bridge::stage_create(core, req).await,
        "BridgeData" => ops::bridge::data(core, req).await,
        "BridgeDelete" => ops::bridge::delete(core, req).await,
        "BridgeGet" => ops::bridge::get(core, req).await,
        "BridgeList" => ops::bridge::list(core, req).await,
        "BridgeMOH" => ops::bridge::moh(core, req).await,
        "BridgeStopMOH" => ops::bridge::stop_moh(core, req).await,
        "BridgePlay" => ops::bridge::play(core, req).await,
        "BridgeStagePlay" => ops::bridge::stage_play(core, req).await,
        "BridgeRecord" => ops::bridge::record(core, req).await,
        "BridgeStageRecord" => ops::bridge::stage_record(core, req).await,
        "BridgeRemoveChannel" => ops::bridge::remove_channel(core, req).await,
        "BridgeSubscribe" => ops::bridge::subscribe(core, req).await,
        "BridgeUnsubscribe" => ops::bridge::unsubscribe(core, req).await,
        "BridgeVideoSource" => ops::bridge::video_source(core, req).await,
        "BridgeVideoSourceDelete" => ops::bridge::video_source_delete(core, req).await,
        "ChannelAnswer" => ops::channel::answer(core, req).await,
        "ChannelBusy" => ops::channel::busy(core, req).await,
        "ChannelCongestion" => ops::channel::congestion(core, req).await,
        "ChannelCreate" => ops::channel::create(core, req).await,
        "ChannelContinue" => ops::channel::continue_in_dialplan(core, req).await,
        "ChannelData" => ops::channel::data(core, req).await,
        "ChannelDial" => ops::channel::dial(core, req).await,
        "ChannelGet" => ops::channel::get(core, req).await,
        "ChannelHangup" => ops::channel::hangup(core, req).await,
        "ChannelHold" => ops::channel::hold(core, req).await,
        "ChannelList" => ops::channel::list(core, req).await,
        "ChannelMOH" => ops::channel::moh(core, req).await,
        "ChannelMove" => ops::channel::move_to(core, req).await,
        "ChannelMute" => ops::channel::mute(core, req).await,
        "ChannelOriginate" => ops::channel::originate(core, req).await,
        "ChannelStageOriginate" => ops::channel::stage_originate(core, req).await,
        "ChannelPlay" => ops::channel::play(core, req).await,
        "ChannelStagePlay" => ops::channel::stage_play(core, req).await,
        "ChannelRecord" => ops::channel::record(core, req).await,
        "ChannelStageRecord" => ops::channel::stage_record(core, req).await,
        "ChannelRing" => ops::channel::ring(core, req).await,
        "ChannelSendDTMF" => ops::channel::send_dtmf(core, req).await,
        "ChannelSilence" => ops::channel::silence(core, req).await,
        "ChannelSnoop" => ops::channel::snoop(core, req).await,
        "ChannelStageSnoop" => ops::channel::stage_snoop(core, req).await,
        "ChannelExternalMedia" => ops::channel::external_media(core, req).await,
        "ChannelStageExternalMedia" => ops::channel::stage_external_media(core, req).await,
        "ChannelStopHold" => ops::channel::stop_hold(core, req).await,
        "ChannelStopMOH" => ops::channel::stop_moh(core, req).await,
        "ChannelStopRing" => ops::channel::stop_ring(core, req).await,
        "ChannelStopSilence" => ops::channel::stop_silence(core, req).await,
        "ChannelSubscribe" => ops::channel::subscribe(core, req).await,
        "ChannelUnsubscribe" => ops::channel::unsubscribe(core, req).await,
        "ChannelUnmute" => ops::channel::unmute(core, req).await,
        "ChannelVariableGet" => ops::channel::variable_get(core, req).await,
        "ChannelVariableSet" => ops::channel::variable_set(core, req).await,
        "ChannelUserEvent" => ops::channel::user_event(core, req).await,
        "DeviceStateData" => ops::device::data(core, req).await,
        "DeviceStateDelete" => ops::device::delete(core, req).await,
        "DeviceStateGet" => ops::device::get(core, req).await,
        "DeviceStateList" => ops::device::list(core, req).await,
        "DeviceStateUpdate" => ops::device::update(core, req).await,
        "EndpointData" => ops::endpoint::data(core, req).await,
        "EndpointGet" => ops::endpoint::get(core, req).await,
        "EndpointList" => ops::endpoint::list(core, req).await,
        "EndpointListByTech" => ops::endpoint::list_by_tech(core, req).await,
        "MailboxData" => ops::mailbox::data(core, req).await,
        "MailboxDelete" => ops::mailbox::delete(core, req).await,
        "MailboxGet" => ops::mailbox::get(core, req).await,
        "MailboxList" => ops::mailbox::list(core, req).await,
        "MailboxUpdate" => ops::mailbox::update(core, req).await,
        "PlaybackControl" => ops::playback::control(core, req).await,
        "PlaybackData" => ops::playback::data(core, req).await,
        "PlaybackGet" => ops::playback::get(core, req).await,
        "PlaybackStop" => ops::playback::stop(core, req).await,
        "PlaybackSubscribe" => ops::playback::subscribe(core, req).await,
        "PlaybackUnsubscribe" => ops::playback::unsubscribe(core, req).await,
        "RecordingStoredCopy" => ops::recording::stored_copy(core, req).await,
        "RecordingStoredData" => ops::recording::stored_data(core, req).await,
        "RecordingStoredDelete" => ops::recording::stored_delete(core, req).await,
        "RecordingStoredGet" => ops::recording::stored_get(core, req).await,
        "RecordingStoredList" => ops::recording::stored_list(core, req).await,
        "RecordingLiveData" => ops::recording::live_data(core, req).await,
        "RecordingLiveGet" => ops::recording::live_get(core, req).await,
        "RecordingLiveMute" => ops::recording::live_mute(core, req).await,
        "RecordingLivePause" => ops::recording::live_pause(core, req).await,
        "RecordingLiveResume" => ops::recording::live_resume(core, req).await,
        "RecordingLiveScrap" => ops::recording::live_scrap(core, req).await,
        "RecordingLiveSubscribe" => ops::recording::live_subscribe(core, req).await,
        "RecordingLiveUnsubscribe" => ops::recording::live_unsubscribe(core, req).await,
        "RecordingLiveStop" => ops::recording::live_stop(core, req).await,
        "RecordingLiveUnmute" => ops::recording::live_unmute(core, req).await,
        "SoundData" => ops::sound::data(core, req).await,
        "SoundList" => ops::sound::list(core, req).await,
        _ => Err(Error::not_implemented(req.kind.clone())),
    }
}
