use serde_json::{Map, Value, json};

use crate::UpstreamError;

/// View over a tender listing payload (`licitaciones.json`).
///
/// The upstream wraps results in a `Listado` array, even when queried for a
/// single code. Records are kept verbatim as JSON so the proxy never has to
/// chase upstream schema drift.
#[derive(Clone, Debug)]
pub struct TenderListing {
    raw: Value,
}

impl TenderListing {
    pub(crate) fn from_body(body: &str) -> Result<Self, UpstreamError> {
        let raw = serde_json::from_str(body)?;
        Ok(Self { raw })
    }

    /// The records in `Listado`, or an empty slice when absent.
    pub fn records(&self) -> &[Value] {
        static EMPTY: [Value; 0] = [];
        self.raw
            .get("Listado")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&EMPTY)
    }

    /// Whether the listing matched no records (the not-found outcome).
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// First record in the listing, if any.
    pub fn first(&self) -> Option<&Value> {
        self.records().first()
    }

    /// The full payload, verbatim.
    pub fn into_value(self) -> Value {
        self.raw
    }
}

/// View over a supplier lookup payload (`BuscarProveedor`).
#[derive(Clone, Debug)]
pub struct SupplierListing {
    raw: Value,
}

impl SupplierListing {
    pub(crate) fn from_body(body: &str) -> Result<Self, UpstreamError> {
        let raw = serde_json::from_str(body)?;
        Ok(Self { raw })
    }

    /// The companies in `listaEmpresas`, or an empty slice when absent.
    pub fn companies(&self) -> &[Value] {
        static EMPTY: [Value; 0] = [];
        self.raw
            .get("listaEmpresas")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&EMPTY)
    }

    /// Whether the lookup matched no companies.
    pub fn is_empty(&self) -> bool {
        self.companies().is_empty()
    }

    /// The `{Cantidad, FechaCreacion, listaEmpresas}` subset the frontend
    /// consumes, fields passed through verbatim.
    pub fn into_payload(self) -> Value {
        let mut out = Map::new();
        let raw = self.raw;

        for field in ["Cantidad", "FechaCreacion", "listaEmpresas"] {
            out.insert(
                field.to_string(),
                raw.get(field).cloned().unwrap_or(json!(null)),
            );
        }

        Value::Object(out)
    }
}
