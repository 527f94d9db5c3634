use std::sync::Arc;

use axum::Router;

use crate::{
    AppOptions, MercadoPublicoClient, ReqwestTransport, RequestGovernor, StartupError, router,
};

/// Assemble the full application from configuration.
///
/// Wires the production transport, the request governor and the upstream
/// client into the API router. The returned router is ready to serve.
pub fn build_app(options: &AppOptions) -> Result<Router, StartupError> {
    let transport = Arc::new(ReqwestTransport::new(options.upstream.request_timeout)?);
    let governor = RequestGovernor::new(options.governor.clone());
    let client = MercadoPublicoClient::new(&options.upstream, governor, transport)?;

    Ok(router(Arc::new(client)))
}
