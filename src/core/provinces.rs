//! Italian province code validation.
//!
//! Two-letter sigle of the Italian provinces and metropolitan cities,
//! as used in the Provincia element of domestic addresses.

/// Check whether `code` is a known Italian province code.
pub fn is_known_province_code(code: &str) -> bool {
    PROVINCE_CODES.binary_search(&code).is_ok()
}

/// Current province and metropolitan-city codes (sorted for binary search).
/// Includes the South Sardinia ("SU") code that replaced CI/VS/OT/OG.
static PROVINCE_CODES: &[&str] = &[
    "AG", "AL", "AN", "AO", "AP", "AQ", "AR", "AT", "AV", "BA", "BG", "BI", "BL", "BN", "BO",
    "BR", "BS", "BT", "BZ", "CA", "CB", "CE", "CH", "CL", "CN", "CO", "CR", "CS", "CT", "CZ",
    "EN", "FC", "FE", "FG", "FI", "FM", "FR", "GE", "GO", "GR", "IM", "IS", "KR", "LC", "LE",
    "LI", "LO", "LT", "LU", "MB", "MC", "ME", "MI", "MN", "MO", "MS", "MT", "NA", "NO", "NU",
    "OR", "PA", "PC", "PD", "PE", "PG", "PI", "PN", "PO", "PR", "PT", "PU", "PV", "PZ", "RA",
    "RC", "RE", "RG", "RI", "RM", "RN", "RO", "SA", "SI", "SO", "SP", "SR", "SS", "SU", "SV",
    "TA", "TE", "TN", "TO", "TP", "TR", "TS", "TV", "UD", "VA", "VB", "VC", "VE", "VI", "VR",
    "VT", "VV",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_provinces() {
        assert!(is_known_province_code("RM"));
        assert!(is_known_province_code("MI"));
        assert!(is_known_province_code("NA"));
        assert!(is_known_province_code("SU"));
    }

    #[test]
    fn unknown_provinces() {
        assert!(!is_known_province_code("XX"));
        assert!(!is_known_province_code("rm"));
        assert!(!is_known_province_code(""));
        // Retired Sardinian provinces.
        assert!(!is_known_province_code("CI"));
        assert!(!is_known_province_code("OT"));
    }

    #[test]
    fn list_is_sorted() {
        for window in PROVINCE_CODES.windows(2) {
            assert!(
                window[0] < window[1],
                "province codes not sorted: {} >= {}",
                window[0],
                window[1]
            );
        }
    }
}
