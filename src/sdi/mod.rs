//! FatturaPA XML generation and validation.
//!
//! Implements the Sistema di Interscambio document format (tracciato
//! v1.2): a generator from [`crate::core::InvoiceDocument`] values and an
//! independent validator for untrusted documents.
//!
//! # Example
//!
//! ```no_run
//! use fatturapa::core::*;
//! use fatturapa::sdi;
//!
//! let invoice: InvoiceDocument = todo!(); // build via InvoiceBuilder
//! let generated = sdi::generate(&invoice, "00001").unwrap();
//! assert!(sdi::quick_validate(&generated.xml));
//! ```

mod generate;
mod validate;
pub(crate) mod xml_utils;

pub use generate::{GeneratedDocument, generate, generate_file_name};
pub use validate::{ValidationReport, quick_validate, validate};

/// FatturaPA schema namespace.
pub const FATTURA_NS: &str = "http://ivaservizi.agenziaentrate.gov.it/docs/xsd/fatture/v1.2";

/// Maximum Descrizione length — longer text is truncated, not rejected.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// 1.1.3 — FormatoTrasmissione: the two document profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionFormat {
    /// FPR12 — private-sector recipients.
    Private,
    /// FPA12 — public-administration recipients.
    PublicAdministration,
}

impl TransmissionFormat {
    /// Five-character format code, also the root `versione` attribute.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Private => "FPR12",
            Self::PublicAdministration => "FPA12",
        }
    }

    /// Parse from the format code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FPR12" => Some(Self::Private),
            "FPA12" => Some(Self::PublicAdministration),
            _ => None,
        }
    }

    /// Required CodiceDestinatario length under this profile.
    pub fn routing_code_len(&self) -> usize {
        match self {
            Self::Private => 7,
            Self::PublicAdministration => 6,
        }
    }
}
