//! Playback operations.

use crate::ari::EntityKind;
use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

use super::{bind_dialog, unbind_dialog};

pub(crate) async fn control(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::PlaybackControl = req.payload_as()?;
    core.ari.playback().control(&p.id, &p.operation).await?;
    Ok(Response::empty())
}

pub(crate) async fn data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    Ok(Response::value(core.ari.playback().data(&p.id).await?))
}

pub(crate) async fn get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.playback().data(&p.id).await?;
    Ok(Response::value(core.entity_ref("playback", &p.id)))
}

pub(crate) async fn stop(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    core.ari.playback().stop(&p.id).await?;
    Ok(Response::empty())
}

pub(crate) async fn subscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    bind_dialog(core, &req.metadata.dialog, EntityKind::Playback, &p.id);
    Ok(Response::empty())
}

pub(crate) async fn unsubscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Id = req.payload_as()?;
    unbind_dialog(core, &req.metadata.dialog, EntityKind::Playback, &p.id);
    Ok(Response::empty())
}
