use async_trait::async_trait;

use crate::domain::{BusinessId, CustomerId, CustomerRecord, Enrollment};

mod memory;
mod scylla;

// Re-export for public API
pub use self::memory::InMemoryDirectory;
pub use self::scylla::ScyllaDirectory;

// ============================================================================
// Customer Directory - Data-Access Collaborator
// ============================================================================
//
// The code service's only external dependency: something that can list
// customer-role accounts and point-query the enrollment relation. "No row
// found" is Ok(None), kept distinct from backend failures.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// All customer-role account records known to the external store.
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryError>;

    /// Point query on the enrollment relation for `(customer_id, business_id)`.
    async fn find_enrollment(
        &self,
        customer_id: &CustomerId,
        business_id: &BusinessId,
    ) -> Result<Option<Enrollment>, DirectoryError>;
}
