use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::customer::CustomerId;

// ============================================================================
// Enrollment Value Objects
// ============================================================================

/// Identifier of a participating business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessId(pub String);

impl BusinessId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relationship recording that a customer participates in a business's
/// loyalty program. Read-only from this service's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub customer_id: CustomerId,
    pub business_id: BusinessId,
    pub enrolled_at: DateTime<Utc>,
}
