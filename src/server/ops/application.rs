//! ARI application operations.

use super::{bind_dialog, event_source_entity, unbind_dialog};
use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

pub(crate) async fn data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    Ok(Response::value(core.ari.application().data(&p.name).await?))
}

pub(crate) async fn get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.application().data(&p.name).await?;
    Ok(Response::value(core.entity_ref("application", &p.name)))
}

pub(crate) async fn list(core: &Core, _req: &Request) -> Result<Response> {
    let refs: Vec<_> = core
        .ari
        .application()
        .list()
        .await?
        .into_iter()
        .map(|name| core.entity_ref("application", &name))
        .collect();
    Ok(Response::value(refs))
}

pub(crate) async fn subscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::ApplicationSubscribe = req.payload_as()?;
    core.ari
        .application()
        .subscribe(&p.name, &p.event_source)
        .await?;
    if let Some((kind, id)) = event_source_entity(&p.event_source) {
        bind_dialog(core, &req.metadata.dialog, kind, id);
    }
    Ok(Response::empty())
}

pub(crate) async fn unsubscribe(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::ApplicationSubscribe = req.payload_as()?;
    core.ari
        .application()
        .unsubscribe(&p.name, &p.event_source)
        .await?;
    if let Some((kind, id)) = event_source_entity(&p.event_source) {
        unbind_dialog(core, &req.metadata.dialog, kind, id);
    }
    Ok(Response::empty())
}
