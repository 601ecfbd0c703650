//! Channel operations — the largest family: call control, media, dialog
//! subscriptions, variables, and user events.

use crate::ari::model::{ChannelCreateRequest, ExternalMediaOptions, OriginateRequest};
use crate::ari::EntityKind;
use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

use super::{bind_dialog, cleanup_entity, id_or_new, unbind_dialog};

pub(crate) async fn answer(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().answer(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn busy(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().busy(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn congestion(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().congestion(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn create(core: &Core, req: &Request) -> Result<Response> {
    let p: ChannelCreateRequest = req.payload_as()?;
    Ok(Response::value(core.ari.channel().create(&p).await?))
}

pub(crate) async fn continue_in_dialplan(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Continue = req.payload_as()?;
    core.ari
        .channel()
        .continue_in_dialplan(&p.id, &p.context, &p.extension, p.priority)
        .await?;
    Ok(Response::empty())
}

pub(crate) async fn data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    Ok(Response::value(core.ari.channel().data(&p.id).await?))
}

pub(crate) async fn get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().data(&p.id).await?;
    Ok(Response::value(core.entity_ref("channel", &p.id)))
}

pub(crate) async fn dial(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Dial = req.payload_as()?;
    core.ari.channel().dial(&p.id, &p.caller, p.timeout).await?;
    Ok(Response::empty())
}

pub(crate) async fn list(core: &Core, _req: &Request) -> Result<Response> {
    let refs: Vec<_> = core
        .ari
        .channel()
        .list()
        .await?
        .into_iter()
        .map(|id| core.entity_ref("channel", &id))
        .collect();
    Ok(Response::value(refs))
}

pub(crate) async fn hangup(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Hangup = req.payload_as()?;
    core.ari.channel().hangup(&p.id, &p.reason).await?;
    cleanup_entity(core, EntityKind::Channel, &p.id);
    Ok(Response::empty())
}

pub(crate) async fn hold(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().hold(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn stop_hold(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().stop_hold(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn moh(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Moh = req.payload_as()?;
    core.ari.channel().moh(&p.id, &p.class).await?;
    Ok(Response::empty())
}

pub(crate) async fn stop_moh(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().stop_moh(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn move_to(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Move = req.payload_as()?;
    core.ari
        .channel()
        .move_to(&p.id, &p.app, &p.app_args)
        .await?;
    Ok(Response::empty())
}

pub(crate) async fn mute(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Mute = req.payload_as()?;
    core.ari.channel().mute(&p.id, &p.direction).await?;
    Ok(Response::empty())
}

pub(crate) async fn unmute(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Mute = req.payload_as()?;
    core.ari.channel().unmute(&p.id, &p.direction).await?;
    Ok(Response::empty())
}

pub(crate) async fn originate(core: &Core, req: &Request) -> Result<Response> {
    let p: OriginateRequest = req.payload_as()?;
    Ok(Response::value(core.ari.channel().originate(&p).await?))
}

pub(crate) async fn stage_originate(core: &Core, req: &Request) -> Result<Response> {
    let p: OriginateRequest = req.payload_as()?;
    Ok(Response::value(
        core.entity_ref("channel", &id_or_new(&p.channel_id)),
    ))
}

pub(crate) async fn play(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Play = req.payload_as()?;
    let playback_id = id_or_new(&p.playback_id);
    Ok(Response::value(
        core.ari
            .channel()
            .play(&p.id, &playback_id, &p.media_uri)
            .await?,
    ))
}

pub(crate) async fn stage_play(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Play = req.payload_as()?;
    Ok(Response::value(
        core.entity_ref("playback", &id_or_new(&p.playback_id)),
    ))
}

pub(crate) async fn record(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Record = req.payload_as()?;
    let name = id_or_new(&p.name);
    Ok(Response::value(
        core.ari.channel().record(&p.id, &name, &p.options).await?,
    ))
}

pub(crate) async fn stage_record(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Record = req.payload_as()?;
    Ok(Response::value(
        core.entity_ref("liveRecording", &id_or_new(&p.name)),
    ))
}

pub(crate) async fn ring(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().ring(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn stop_ring(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().stop_ring(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn send_dtmf(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::SendDtmf = req.payload_as()?;
    core.ari.channel().send_dtmf(&p.id, &p.dtmf).await?;
    Ok(Response::empty())
}

pub(crate) async fn silence(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().silence(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn stop_silence(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.channel().stop_silence(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn snoop(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Snoop = req.payload_as()?;
    let snoop_id = id_or_new(&p.snoop_id);
    Ok(Response::value(
        core.ari.channel().snoop(&p.id, &snoop_id, &p.options).await?,
    ))
}

pub(crate) async fn stage_snoop(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Snoop = req.payload_as()?;
    Ok(Response::value(
        core.entity_ref("channel", &id_or_new(&p.snoop_id)),
    ))
}

pub(crate) async fn external_media(core: &Core, req: &Request) -> Result<Response> {
    let p: ExternalMediaOptions = req.payload_as()?;
    Ok(Response::value(core.ari.channel().external_media(&p).await?))
}

pub(crate) async fn stage_external_media(core: &Core, req: &Request) -> Result<Response> {
    let p: ExternalMediaOptions = req.payload_as()?;
    Ok(Response::value(
        core.entity_ref("channel", &id_or_new(&p.channel_id)),
    ))
}

pub(crate) async fn subscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    bind_dialog(core, &req.metadata.dialog, EntityKind::Channel, &p.id);
    Ok(Response::empty())
}

pub(crate) async fn unsubscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    unbind_dialog(core, &req.metadata.dialog, EntityKind::Channel, &p.id);
    Ok(Response::empty())
}

pub(crate) async fn variable_get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::ChannelVariableGet = req.payload_as()?;
    Ok(Response::value(
        core.ari.channel().variable_get(&p.id, &p.name).await?,
    ))
}

pub(crate) async fn variable_set(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::ChannelVariableSet = req.payload_as()?;
    core.ari
        .channel()
        .variable_set(&p.id, &p.name, &p.value)
        .await?;
    Ok(Response::empty())
}

pub(crate) async fn user_event(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::UserEvent = req.payload_as()?;
    core.ari
        .channel()
        .user_event(&p.id, &p.name, &p.application, p.variables.clone())
        .await?;
    Ok(Response::empty())
}
