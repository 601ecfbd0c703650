//! Endpoint operations. Endpoint handles use the `tech/resource` pair as
//! their identifier.

use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

pub(crate) async fn data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Endpoint = req.payload_as()?;
    Ok(Response::value(
        core.ari.endpoint().data(&p.tech, &p.resource).await?,
    ))
}

pub(crate) async fn get(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Endpoint = req.payload_as()?;
    core.ari.endpoint().data(&p.tech, &p.resource).await?;
    Ok(Response::value(core.entity_ref(
        "endpoint",
        &format!("{}/{}", p.tech, p.resource),
    )))
}

pub(crate) async fn list(core: &Core, _req: &Request) -> Result<Response> {
    let refs: Vec<_> = core
        .ari
        .endpoint()
        .list()
        .await?
        .into_iter()
        .map(|e| core.entity_ref("endpoint", &format!("{}/{}", e.technology, e.resource)))
        .collect();
    Ok(Response::value(refs))
}

pub(crate) async fn list_by_tech(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Endpoint = req.payload_as()?;
    let refs: Vec<_> = core
        .ari
        .endpoint()
        .list_by_tech(&p.tech)
        .await?
        .into_iter()
        .map(|e| core.entity_ref("endpoint", &format!("{}/{}", e.technology, e.resource)))
        .collect();
    Ok(Response::value(refs))
}
