use std::sync::Arc;

use reqwest::Url;

use crate::{
    ConfigError, RequestGovernor, SupplierListing, TenderListing, UpstreamError, UpstreamOptions,
    UpstreamRequest, UpstreamTransport,
};

/// Client for the three Mercado Público read endpoints.
///
/// Owns the governor and the transport; handlers validate their parameters
/// first and then call one of the lookup methods with already-validated
/// values. Every lookup is an independent upstream call (no caching), paced
/// and retried by the governor.
pub struct MercadoPublicoClient {
    governor: RequestGovernor,
    transport: Arc<dyn UpstreamTransport>,
    tenders_url: Url,
    suppliers_url: Url,
    ticket: String,
}

impl MercadoPublicoClient {
    /// Build a client against `options.base_url`.
    pub fn new(
        options: &UpstreamOptions,
        governor: RequestGovernor,
        transport: Arc<dyn UpstreamTransport>,
    ) -> Result<Self, ConfigError> {
        let base = options.base_url.trim_end_matches('/');

        let tenders_url = parse_endpoint(&format!("{base}/publico/licitaciones.json"))?;
        let suppliers_url =
            parse_endpoint(&format!("{base}/Publico/Empresas/BuscarProveedor"))?;

        Ok(Self {
            governor,
            transport,
            tenders_url,
            suppliers_url,
            ticket: options.ticket.clone(),
        })
    } // end constructor

    /// Tender listing for a publication date (`DDMMYYYY`) and status.
    pub async fn search_tenders(
        &self,
        fecha: &str,
        estado: &str,
    ) -> Result<TenderListing, UpstreamError> {
        let request = self.request(
            &self.tenders_url,
            &[("fecha", fecha), ("estado", estado)],
            "licitaciones_by_fecha",
        );

        let response = self.governor.dispatch(self.transport.as_ref(), &request).await?;
        TenderListing::from_body(response.body())
    }

    /// Tender listing for one external code (e.g. `2669-126-L125`).
    ///
    /// The upstream still answers with a `Listado` array; the caller takes
    /// its first element.
    pub async fn tender_by_code(&self, codigo: &str) -> Result<TenderListing, UpstreamError> {
        let request = self.request(
            &self.tenders_url,
            &[("codigo", codigo)],
            "licitacion_by_codigo",
        );

        let response = self.governor.dispatch(self.transport.as_ref(), &request).await?;
        TenderListing::from_body(response.body())
    }

    /// Supplier lookup by formatted RUT (e.g. `77.596.940-7`).
    pub async fn supplier_by_rut(&self, rut: &str) -> Result<SupplierListing, UpstreamError> {
        let request = self.request(
            &self.suppliers_url,
            &[("rutempresaproveedor", rut)],
            "proveedor_by_rut",
        );

        let response = self.governor.dispatch(self.transport.as_ref(), &request).await?;
        SupplierListing::from_body(response.body())
    }

    fn request(&self, endpoint: &Url, params: &[(&str, &str)], label: &'static str) -> UpstreamRequest {
        let mut url = endpoint.clone();

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("ticket", &self.ticket);
        }

        UpstreamRequest::new(url, label)
    } // end method request
} // end of impl

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidVar {
        var: "MP_BASE_URL",
        reason: e.to_string(),
    })
}
