//! Bridge operations.

use crate::ari::EntityKind;
use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

use super::{bind_dialog, cleanup_entity, id_or_new, unbind_dialog};

pub(crate) async fn create(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::BridgeCreate = req.payload_as()?;
    Ok(Response::value(
        core.ari
            .bridge()
            .create(&p.id, &p.bridge_type, &p.name)
            .await?,
    ))
}

pub(crate) async fn stage_create(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::BridgeCreate = req.payload_as()?;
    Ok(Response::value(core.entity_ref("bridge", &id_or_new(&p.id))))
}

pub(crate) async fn data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    Ok(Response::value(core.ari.bridge().data(&p.id).await?))
}

pub(crate) async fn get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.bridge().data(&p.id).await?;
    Ok(Response::value(core.entity_ref("bridge", &p.id)))
}

pub(crate) async fn list(core: &Core, _req: &Request) -> Result<Response> {
    let refs: Vec<_> = core
        .ari
        .bridge()
        .list()
        .await?
        .into_iter()
        .map(|id| core.entity_ref("bridge", &id))
        .collect();
    Ok(Response::value(refs))
}

pub(crate) async fn delete(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.bridge().delete(&p.id).await?;
    cleanup_entity(core, EntityKind::Bridge, &p.id);
    Ok(Response::empty())
}

pub(crate) async fn add_channel(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::BridgeChannel = req.payload_as()?;
    core.ari.bridge().add_channel(&p.id, &p.channel).await?;
    Ok(Response::empty())
}

pub(crate) async fn remove_channel(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::BridgeChannel = req.payload_as()?;
    core.ari.bridge().remove_channel(&p.id, &p.channel).await?;
    Ok(Response::empty())
}

pub(crate) async fn moh(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Moh = req.payload_as()?;
    core.ari.bridge().moh(&p.id, &p.class).await?;
    Ok(Response::empty())
}

pub(crate) async fn stop_moh(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.bridge().stop_moh(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn play(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Play = req.payload_as()?;
    let playback_id = id_or_new(&p.playback_id);
    Ok(Response::value(
        core.ari
            .bridge()
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
        core.ari.bridge().record(&p.id, &name, &p.options).await?,
    ))
}

pub(crate) async fn stage_record(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Record = req.payload_as()?;
    Ok(Response::value(
        core.entity_ref("liveRecording", &id_or_new(&p.name)),
    ))
}

pub(crate) async fn subscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    bind_dialog(core, &req.metadata.dialog, EntityKind::Bridge, &p.id);
    Ok(Response::empty())
}

pub(crate) async fn unsubscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    unbind_dialog(core, &req.metadata.dialog, EntityKind::Bridge, &p.id);
    Ok(Response::empty())
}

pub(crate) async fn video_source(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::BridgeChannel = req.payload_as()?;
    core.ari.bridge().video_source(&p.id, &p.channel).await?;
    Ok(Response::empty())
}

pub(crate) async fn video_source_delete(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.bridge().video_source_delete(&p.id).await?;
    Ok(Response::empty())
}
