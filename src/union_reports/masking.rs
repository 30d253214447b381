//! SSN masking.
//!
//! Raw SSNs enter the engine on payee records and must never leave it. Every
//! SSN that reaches a report goes through [`mask_ssn`] first.

/// Placeholder shown when fewer than four digits are on file.
pub const MASKED_SSN_UNKNOWN: &str = "XXXX";

/// Masks an SSN down to its last four digits.
///
/// Non-digit characters are ignored. With fewer than four digits available
/// (or no SSN at all) the result is `XXXX`.
///
/// ```
/// use payroll_engine::union_reports::mask_ssn;
///
/// assert_eq!(mask_ssn(Some("123-45-6789")), "XXX-XX-6789");
/// assert_eq!(mask_ssn(Some("12")), "XXXX");
/// assert_eq!(mask_ssn(None), "XXXX");
/// ```
pub fn mask_ssn(ssn: Option<&str>) -> String {
    let digits: Vec<char> = ssn
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    if digits.len() < 4 {
        return MASKED_SSN_UNKNOWN.to_string();
    }

    let last_four: String = digits[digits.len() - 4..].iter().collect();
    format!("XXX-XX-{}", last_four)
}
