//! Mailbox operations.

use crate::ari::EntityKind;
use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

use super::cleanup_entity;

pub(crate) async fn data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    Ok(Response::value(core.ari.mailbox().data(&p.name).await?))
}

pub(crate) async fn get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.mailbox().data(&p.name).await?;
    Ok(Response::value(core.entity_ref("mailbox", &p.name)))
}

pub(crate) async fn list(core: &Core, _req: &Request) -> Result<Response> {
    let refs: Vec<_> = core
        .ari
        .mailbox()
        .list()
        .await?
        .into_iter()
        .map(|m| core.entity_ref("mailbox", &m.name))
        .collect();
    Ok(Response::value(refs))
}

pub(crate) async fn update(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::MailboxUpdate = req.payload_as()?;
    core.ari
        .mailbox()
        .update(&p.name, p.old_messages, p.new_messages)
        .await?;
    Ok(Response::empty())
}

pub(crate) async fn delete(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.mailbox().delete(&p.name).await?;
    cleanup_entity(core, EntityKind::Mailbox, &p.name);
    Ok(Response::empty())
}
