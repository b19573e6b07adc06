//! # fatturapa
//!
//! Italian e-invoicing library: FatturaPA v1.2 document generation and
//! SdI-style validation.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! The core types follow the FatturaPA tracciato published by the Agenzia
//! delle Entrate; the generator and validator are independent, pure
//! functions sharing only the code registries.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "sdi")] {
//! use chrono::NaiveDate;
//! use fatturapa::core::*;
//! use fatturapa::sdi;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("42/A", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
//!     .issuer(IssuerBuilder::new(
//!         PartyIdentity::company("ACME S.r.l."),
//!         AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT").province("RM").build())
//!         .vat_number("06363391001")
//!         .fiscal_regime(FiscalRegime::Ordinary)
//!         .build())
//!     .recipient(RecipientBuilder::new(
//!         PartyIdentity::company("Cliente S.p.A."),
//!         AddressBuilder::new("Corso Milano 2", "20121", "Milano", "IT").province("MI").build(),
//!         RecipientRouting::Channel("ABC1234".into()))
//!         .vat_number("01234567897")
//!         .build())
//!     .add_line(LineItemBuilder::new(1, "Consulenza", dec!(100.00), dec!(100.00)).build())
//!     .add_vat_summary(VatSummary::new(dec!(22), dec!(100.00), dec!(22.00)))
//!     .build()
//!     .unwrap();
//!
//! let generated = sdi::generate(&invoice, "00001").unwrap();
//! assert_eq!(generated.file_name, "IT06363391001_00001.xml");
//! assert!(sdi::quick_validate(&generated.xml));
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, code registries, checksums |
//! | `sdi` | FatturaPA XML generation & validation |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "sdi")]
pub mod sdi;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
