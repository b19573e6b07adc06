//! Italian tax-identifier checksums and shape checks.
//!
//! The partita IVA check digit is the alternating-weight mod-10 algorithm
//! of DM 23/12/1976: odd-position digits (1st, 3rd, ...) count once,
//! even-position digits count twice with 9 subtracted when the double
//! exceeds 9; the check digit makes the total a multiple of 10.

/// Compute the check digit for the first ten digits of a partita IVA.
///
/// Returns `None` unless `digits` is exactly ten ASCII digits.
pub fn vat_check_digit(digits: &str) -> Option<u32> {
    if digits.len() != 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut sum = 0;
    for (i, b) in digits.bytes().enumerate() {
        let d = u32::from(b - b'0');
        if i % 2 == 0 {
            sum += d;
        } else {
            let doubled = d * 2;
            sum += if doubled > 9 { doubled - 9 } else { doubled };
        }
    }
    Some((10 - sum % 10) % 10)
}

/// Whether an 11-digit string is a checksum-valid partita IVA.
pub fn is_valid_vat_number(code: &str) -> bool {
    if code.len() != 11 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let expected = vat_check_digit(&code[..10]);
    let last = u32::from(code.as_bytes()[10] - b'0');
    expected == Some(last)
}

/// Shape check for a codice fiscale: the 16-character alphanumeric
/// personal form, or the 11-digit form used by legal entities.
///
/// The personal form's own check character is validated by the revenue
/// agency out-of-band; here only the shape is enforced.
pub fn is_plausible_fiscal_code(code: &str) -> bool {
    match code.len() {
        11 => code.bytes().all(|b| b.is_ascii_digit()),
        16 => code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_digit_known_vectors() {
        assert_eq!(vat_check_digit("0123456789"), Some(7));
        assert_eq!(vat_check_digit("0000000000"), Some(0));
        // Agenzia delle Entrate's own number ends in its check digit.
        assert!(is_valid_vat_number("06363391001"));
    }

    #[test]
    fn valid_vat_numbers_accepted() {
        assert!(is_valid_vat_number("01234567897"));
        assert!(is_valid_vat_number("12345678903"));
        assert!(is_valid_vat_number("00000000000"));
    }

    #[test]
    fn wrong_check_digit_rejected() {
        assert!(!is_valid_vat_number("12345678901"));
        assert!(!is_valid_vat_number("01234567891"));
    }

    #[test]
    fn malformed_input_rejected() {
        assert!(!is_valid_vat_number(""));
        assert!(!is_valid_vat_number("1234567890"));
        assert!(!is_valid_vat_number("123456789012"));
        assert!(!is_valid_vat_number("1234567890A"));
        assert_eq!(vat_check_digit("123"), None);
        assert_eq!(vat_check_digit("12345678 0"), None);
    }

    #[test]
    fn fiscal_code_shapes() {
        assert!(is_plausible_fiscal_code("RSSMRA80A01H501U"));
        assert!(is_plausible_fiscal_code("01234567890"));
        assert!(!is_plausible_fiscal_code("rssmra80a01h501u"));
        assert!(!is_plausible_fiscal_code("RSSMRA80A01H501"));
        assert!(!is_plausible_fiscal_code(""));
    }
}
