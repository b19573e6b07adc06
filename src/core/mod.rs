//! Core invoice types, rule tables, and checksums.
//!
//! This module provides the foundational types of the FatturaPA v1.2
//! semantic model, the closed code registries shared by the generator
//! and the validator, and the Italian tax-id checksum.

mod builder;
pub mod checksum;
mod error;
pub mod iban;
pub mod provinces;
mod types;

pub use builder::*;
pub use checksum::{is_plausible_fiscal_code, is_valid_vat_number, vat_check_digit};
pub use error::*;
pub use iban::validate_iban;
pub use provinces::is_known_province_code;
pub use types::*;
