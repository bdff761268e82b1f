use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Display name used when a customer has no name on file.
pub const FALLBACK_DISPLAY_NAME: &str = "Customer";

/// Opaque customer identifier assigned by the external account system.
/// Immutable once assigned; this service only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A customer-role account record, as listed by the directory. Candidates
/// for reverse code lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub display_name: Option<String>,
}

impl CustomerRecord {
    pub fn new(id: impl Into<String>, display_name: Option<&str>) -> Self {
        Self {
            id: CustomerId::new(id),
            display_name: display_name.map(str::to_string),
        }
    }
}

/// Result of a successful reverse code lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerMatch {
    pub customer_id: CustomerId,
    pub customer_name: String,
}

impl CustomerMatch {
    pub fn from_record(record: &CustomerRecord) -> Self {
        Self {
            customer_id: record.id.clone(),
            customer_name: record
                .display_name
                .clone()
                .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_uses_display_name_when_present() {
        let record = CustomerRecord::new("u1", Some("Alice"));
        let matched = CustomerMatch::from_record(&record);
        assert_eq!(matched.customer_id, CustomerId::new("u1"));
        assert_eq!(matched.customer_name, "Alice");
    }

    #[test]
    fn test_match_falls_back_to_generic_name() {
        let record = CustomerRecord::new("u2", None);
        let matched = CustomerMatch::from_record(&record);
        assert_eq!(matched.customer_name, FALLBACK_DISPLAY_NAME);
    }
}
