// ============================================================================
// Code Validation & Input Normalization
// ============================================================================
//
// Validation is a shape check only (letters-digits-letters with dashes); it
// does not restrict input to the derivation alphabets, so operators can type
// anything of the right shape and let the reverse lookup decide.
//
// ============================================================================

/// Check whether a string has the `LLL-NNN-LLL` shape. Case-insensitive.
pub fn is_valid_code_format(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() != 11 || bytes[3] != b'-' || bytes[7] != b'-' {
        return false;
    }
    bytes[0..3].iter().all(|b| b.is_ascii_alphabetic())
        && bytes[4..7].iter().all(|b| b.is_ascii_digit())
        && bytes[8..11].iter().all(|b| b.is_ascii_alphabetic())
}

/// Normalize free-text code entry for live formatting.
///
/// Keeps only letters and digits, uppercases them, caps the result at 9
/// meaningful characters, and inserts dashes after the 3rd and 6th.
/// Idempotent on already-formatted input.
pub fn format_code_input(raw: &str) -> String {
    let cleaned: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(9)
        .collect();

    let mut formatted = String::with_capacity(11);
    for (index, c) in cleaned.into_iter().enumerate() {
        if index == 3 || index == 6 {
            formatted.push('-');
        }
        formatted.push(c);
    }
    formatted
}
