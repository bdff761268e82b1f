// ============================================================================
// Customer Codes - Derivation, Validation, Input Normalization
// ============================================================================
//
// A customer code is a short, human-typable string of the shape LLL-NNN-LLL,
// computed as a pure function of the customer's opaque identifier. Codes are
// never persisted: anywhere a code is needed it is recomputed from the
// identifier, and reverse lookup recomputes codes over the population.
//
// ============================================================================

pub mod derive;
pub mod format;

// Re-export for convenience
pub use derive::{derive_code, CustomerCode, DIGIT_ALPHABET, LETTER_ALPHABET};
pub use format::{format_code_input, is_valid_code_format};
