//! Sound asset operations.

use crate::proxy::{payloads, Request, Response};
use crate::server::Core;
use crate::types::Result;

pub(crate) async fn data(core: &Core, req: &Request) -> Result<Response> {
    let p: payloads::Name = req.payload_as()?;
    Ok(Response::value(core.ari.sound().data(&p.name).await?))
}

pub(crate) async fn list(core: &Core, _req: &Request) -> Result<Response> {
    Ok(Response::value(core.ari.sound().list().await?))
}
