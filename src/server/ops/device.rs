//! Device-state operations.

use crate::ari::EntityKind;
use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

use super::cleanup_entity;

pub(crate) async fn data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    Ok(Response::value(core.ari.device_state().data(&p.name).await?))
}

pub(crate) async fn get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.device_state().data(&p.name).await?;
    Ok(Response::value(core.entity_ref("deviceState", &p.name)))
}

pub(crate) async fn list(core: &Core, _req: &Request) -> Result<Response> {
    let refs: Vec<_> = core
        .ari
        .device_state()
        .list()
        .await?
        .into_iter()
        .map(|name| core.entity_ref("deviceState", &name))
        .collect();
    Ok(Response::value(refs))
}

pub(crate) async fn update(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::DeviceStateUpdate = req.payload_as()?;
    core.ari.device_state().update(&p.name, &p.state).await?;
    Ok(Response::empty())
}

pub(crate) async fn delete(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.device_state().delete(&p.name).await?;
    cleanup_entity(core, EntityKind::DeviceState, &p.name);
    Ok(Response::empty())
}
