//! Asterisk system operations: info, global variables, dynamic config,
//! log channels, and modules.

use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

pub(crate) async fn info(core: &Core, _req: &Request) -> Result<Response> {
    Ok(Response::value(core.ari.asterisk().info().await?))
}

pub(crate) async fn variable_get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::VariableGet = req.payload_as()?;
    Ok(Response::value(
        core.ari.asterisk().variable_get(&p.key).await?,
    ))
}

pub(crate) async fn variable_set(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::VariableSet = req.payload_as()?;
    core.ari.asterisk().variable_set(&p.key, &p.value).await?;
    Ok(Response::empty())
}

pub(crate) async fn config_data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Config = req.payload_as()?;
    Ok(Response::value(
        core.ari
            .asterisk()
            .config_data(&p.class, &p.kind, &p.id)
            .await?,
    ))
}

pub(crate) async fn config_update(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Config = req.payload_as()?;
    core.ari
        .asterisk()
        .config_update(&p.class, &p.kind, &p.id, p.tuples.clone())
        .await?;
    Ok(Response::empty())
}

pub(crate) async fn config_delete(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Config = req.payload_as()?;
    core.ari
        .asterisk()
        .config_delete(&p.class, &p.kind, &p.id)
        .await?;
    Ok(Response::empty())
}

pub(crate) async fn logging_create(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::LoggingCreate = req.payload_as()?;
    core.ari
        .asterisk()
        .logging_create(&p.name, &p.levels)
        .await?;
    Ok(Response::empty())
}

pub(crate) async fn logging_data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    Ok(Response::value(
        core.ari.asterisk().logging_data(&p.name).await?,
    ))
}

pub(crate) async fn logging_get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.asterisk().logging_data(&p.name).await?;
    Ok(Response::value(core.entity_ref("logging", &p.name)))
}

pub(crate) async fn logging_list(core: &Core, _req: &Request) -> Result<Response> {
    Ok(Response::value(core.ari.asterisk().logging_list().await?))
}

pub(crate) async fn logging_rotate(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.asterisk().logging_rotate(&p.name).await?;
    Ok(Response::empty())
}

pub(crate) async fn logging_delete(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.asterisk().logging_delete(&p.name).await?;
    Ok(Response::empty())
}

pub(crate) async fn module_data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    Ok(Response::value(
        core.ari.asterisk().module_data(&p.name).await?,
    ))
}

pub(crate) async fn module_get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.asterisk().module_data(&p.name).await?;
    Ok(Response::value(core.entity_ref("module", &p.name)))
}

pub(crate) async fn module_list(core: &Core, _req: &Request) -> Result<Response> {
    Ok(Response::value(core.ari.asterisk().module_list().await?))
}

pub(crate) async fn module_load(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.asterisk().module_load(&p.name).await?;
    Ok(Response::empty())
}

pub(crate) async fn module_reload(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.asterisk().module_reload(&p.name).await?;
    Ok(Response::empty())
}

pub(crate) async fn module_unload(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    core.ari.asterisk().module_unload(&p.name).await?;
    Ok(Response::empty())
}
