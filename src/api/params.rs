//! Request-parameter validation.
//!
//! Each newtype rejects malformed input with the Spanish message the API has
//! always returned, before any upstream call is made. Conversion errors are
//! `&'static str` so handlers can surface them directly as `400` bodies.

/// Tender publication date in the upstream's `DDMMYYYY` format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fecha(String);

impl TryFrom<&str> for Fecha {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err("La fecha debe tener el formato DDMMYYYY (ej: 11062025).")
        }
    }
}

impl Fecha {
    /// The validated date string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Tender status filter accepted by the listing endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Estado {
    /// Published and open for bids.
    Publicada,
    /// Closed to new bids.
    Cerrada,
    /// Declared void (no valid bids).
    Desierta,
    /// Awarded.
    Adjudicada,
    /// Revoked.
    Revocada,
    /// Suspended.
    Suspendida,
    /// Every active status.
    Activas,
    /// No status filter.
    Todos,
}

impl TryFrom<&str> for Estado {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "publicada" => Ok(Self::Publicada),
            "cerrada" => Ok(Self::Cerrada),
            "desierta" => Ok(Self::Desierta),
            "adjudicada" => Ok(Self::Adjudicada),
            "revocada" => Ok(Self::Revocada),
            "suspendida" => Ok(Self::Suspendida),
            "activas" => Ok(Self::Activas),
            "todos" => Ok(Self::Todos),
            _ => Err(
                "Estado inválido. Usa uno de: publicada, cerrada, desierta, adjudicada, \
                 revocada, suspendida, activas, todos",
            ),
        }
    }
}

impl Estado {
    /// Lowercase form used as the upstream query value.
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Publicada => "publicada",
            Self::Cerrada => "cerrada",
            Self::Desierta => "desierta",
            Self::Adjudicada => "adjudicada",
            Self::Revocada => "revocada",
            Self::Suspendida => "suspendida",
            Self::Activas => "activas",
            Self::Todos => "todos",
        }
    }
}

/// Tender external code: `digits-digits-alphanumeric`, e.g. `2669-126-L125`.
///
/// The leading segments carry any number of digits (`1057539-17-LR25` is
/// valid too).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TenderCode(String);

impl TryFrom<&str> for TenderCode {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        const INVALID: &str = "Código de licitación inválido";

        let parts: Vec<&str> = value.split('-').collect();
        let [numeric_a, numeric_b, suffix] = parts.as_slice() else {
            return Err(INVALID);
        };

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        let alnum = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric());

        if all_digits(numeric_a) && all_digits(numeric_b) && alnum(suffix) {
            Ok(Self(value.to_string()))
        } else {
            Err(INVALID)
        }
    }
}

impl TenderCode {
    /// The validated code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Supplier tax ID (RUT), cleaned and formatted for the upstream query.
///
/// Input may arrive with or without dots, dash or check digit casing; it is
/// reduced to `[0-9kK]`, rejected when fewer than two characters remain, and
/// reformatted as `NN.NNN.NNN-D` the way the upstream expects. Check-digit
/// verification is out of scope here; the upstream simply finds no supplier
/// for a RUT that does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rut {
    formatted: String,
}

impl TryFrom<&str> for Rut {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let clean: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
            .collect();

        if clean.len() < 2 {
            return Err("RUT inválido");
        }

        let (body, check) = clean.split_at(clean.len() - 1);

        Ok(Self {
            formatted: format!("{}-{}", group_thousands(body), check.to_ascii_uppercase()),
        })
    }
}

impl Rut {
    /// Formatted RUT used as the upstream query value.
    pub fn as_query(&self) -> &str {
        &self.formatted
    }
}

/// Insert a dot every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }

    out
}
