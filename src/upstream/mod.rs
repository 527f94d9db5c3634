//! Mercado Público upstream client.
//!
//! This module owns everything that touches the wire on the outbound side:
//!
//! - [`UpstreamTransport`]: the seam between the governor and the network,
//!   implemented by [`ReqwestTransport`] in production and by scripted mocks
//!   in tests
//! - [`UpstreamRequest`] / [`UpstreamResponse`]: a fully-formed GET and the
//!   raw reply, not yet interpreted
//! - [`MercadoPublicoClient`]: builds the three upstream URLs, dispatches
//!   them through the governor and exposes typed views over the JSON payloads
//!
//! The upstream is a GET-only JSON API that requires an access ticket as a
//! query parameter on every call. Request labels, not URLs, are what reaches
//! the log stream, so the ticket is never logged.

mod transport;
pub use transport::*;

mod client;
pub use client::*;

mod models;
pub use models::*;
