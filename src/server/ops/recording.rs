//! Stored- and live-recording operations.

use crate::ari::EntityKind;
use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

use super::{bind_dialog, cleanup_entity, unbind_dialog};

pub(crate) async fn stored_copy(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::RecordingCopy = req.payload_as()?;
    Ok(Response::value(
        core.ari
            .stored_recording()
            .copy(&p.name, &p.destination)
            .await?,
    ))
}

pub(crate) async fn stored_data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    Ok(Response::value(
        core.ari.stored_recording().data(&p.name).await?,
    ))
}

pub(crate) async fn stored_delete(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.stored_recording().delete(&p.name).await?;
    cleanup_entity(core, EntityKind::Recording, &p.name);
    Ok(Response::empty())
}

pub(crate) async fn stored_get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.stored_recording().data(&p.name).await?;
    Ok(Response::value(core.entity_ref("storedRecording", &p.name)))
}

pub(crate) async fn stored_list(core: &Core, _req: &Request) -> Result<Response> {
    let refs: Vec<_> = core
        .ari
        .stored_recording()
        .list()
        .await?
        .into_iter()
        .map(|name| core.entity_ref("storedRecording", &name))
        .collect();
    Ok(Response::value(refs))
}

pub(crate) async fn live_data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    Ok(Response::value(
        core.ari.live_recording().data(&p.name).await?,
    ))
}

pub(crate) async fn live_get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.live_recording().data(&p.name).await?;
    Ok(Response::value(core.entity_ref("liveRecording", &p.name)))
}

pub(crate) async fn live_mute(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.live_recording().mute(&p.name).await?;
    Ok(Response::empty())
}

pub(crate) async fn live_pause(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.live_recording().pause(&p.name).await?;
    Ok(Response::empty())
}

pub(crate) async fn live_resume(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.live_recording().resume(&p.name).await?;
    Ok(Response::empty())
}

pub(crate) async fn live_scrap(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.live_recording().scrap(&p.name).await?;
    cleanup_entity(core, EntityKind::Recording, &p.name);
    Ok(Response::empty())
}

pub(crate) async fn live_subscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    bind_dialog(core, &req.metadata.dialog, EntityKind::Recording, &p.name);
    Ok(Response::empty())
}

pub(crate) async fn live_unsubscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    unbind_dialog(core, &req.metadata.dialog, EntityKind::Recording, &p.name);
    Ok(Response::empty())
}

pub(crate) async fn live_stop(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.live_recording().stop(&p.name).await?;
    Ok(Response::empty())
}

pub(crate) async fn live_unmute(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.live_recording().unmute(&p.name).await?;
    Ok(Response::empty())
}
