//! IBAN shape validation.
//!
//! Checks the general IBAN structure: two-letter country prefix, two
//! check digits, alphanumeric BBAN, and the total length registered for
//! the country. The mod-97 proof is left to the banking network; a
//! shape-valid IBAN is all the exchange system requires.

use std::fmt;

/// Error returned when an IBAN fails shape validation.
#[derive(Debug, Clone)]
pub struct IbanError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for IbanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid IBAN '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for IbanError {}

/// Validate the shape of an IBAN (no mod-97 proof).
pub fn validate_iban(iban: &str) -> Result<(), IbanError> {
    let iban = iban.trim();

    if iban.len() < 5 {
        return Err(IbanError {
            value: iban.into(),
            reason: "too short — expected country code, check digits and BBAN".into(),
        });
    }

    let bytes = iban.as_bytes();
    if !bytes[..2].iter().all(|b| b.is_ascii_uppercase()) {
        return Err(IbanError {
            value: iban.into(),
            reason: "must start with a 2-letter uppercase country code".into(),
        });
    }
    if !bytes[2..4].iter().all(|b| b.is_ascii_digit()) {
        return Err(IbanError {
            value: iban.into(),
            reason: "characters 3-4 must be the numeric check digits".into(),
        });
    }
    if !bytes[4..]
        .iter()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return Err(IbanError {
            value: iban.into(),
            reason: "BBAN must be uppercase alphanumeric".into(),
        });
    }

    let country = &iban[..2];
    match iban_length(country) {
        Some(expected) if iban.len() == expected => Ok(()),
        Some(expected) => Err(IbanError {
            value: iban.into(),
            reason: format!(
                "wrong length for country {country}: expected {expected}, got {}",
                iban.len()
            ),
        }),
        None => Err(IbanError {
            value: iban.into(),
            reason: format!("unknown IBAN country code '{country}'"),
        }),
    }
}

/// Registered IBAN length for a country, if known.
fn iban_length(country: &str) -> Option<usize> {
    IBAN_LENGTHS
        .binary_search_by_key(&country, |&(cc, _)| cc)
        .ok()
        .map(|i| IBAN_LENGTHS[i].1)
}

/// IBAN registry lengths (sorted by country code for binary search).
static IBAN_LENGTHS: &[(&str, usize)] = &[
    ("AD", 24),
    ("AE", 23),
    ("AL", 28),
    ("AT", 20),
    ("AZ", 28),
    ("BA", 20),
    ("BE", 16),
    ("BG", 22),
    ("BH", 22),
    ("BR", 29),
    ("CH", 21),
    ("CY", 28),
    ("CZ", 24),
    ("DE", 22),
    ("DK", 18),
    ("DO", 28),
    ("EE", 20),
    ("ES", 24),
    ("FI", 18),
    ("FO", 18),
    ("FR", 27),
    ("GB", 22),
    ("GE", 22),
    ("GI", 23),
    ("GL", 18),
    ("GR", 27),
    ("HR", 21),
    ("HU", 28),
    ("IE", 22),
    ("IL", 23),
    ("IS", 26),
    ("IT", 27),
    ("JO", 30),
    ("KW", 30),
    ("KZ", 20),
    ("LB", 28),
    ("LI", 21),
    ("LT", 20),
    ("LU", 20),
    ("LV", 21),
    ("MC", 27),
    ("MD", 24),
    ("ME", 22),
    ("MK", 19),
    ("MR", 27),
    ("MT", 31),
    ("MU", 30),
    ("NL", 18),
    ("NO", 15),
    ("PK", 24),
    ("PL", 28),
    ("PT", 25),
    ("QA", 29),
    ("RO", 24),
    ("RS", 22),
    ("SA", 24),
    ("SE", 24),
    ("SI", 19),
    ("SK", 24),
    ("SM", 27),
    ("TN", 24),
    ("TR", 26),
    ("UA", 29),
    ("VA", 22),
    ("XK", 20),
];
