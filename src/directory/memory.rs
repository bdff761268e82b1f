use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{BusinessId, CustomerId, CustomerRecord, Enrollment};

use super::{CustomerDirectory, DirectoryError};

// ============================================================================
// In-Memory Directory
// ============================================================================
//
// Seedable in-process implementation for tests and local demos. Immutable
// after construction, so it is trivially safe to share across tasks.
//
// ============================================================================

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    customers: Vec<CustomerRecord>,
    enrollments: Vec<Enrollment>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, id: impl Into<String>, display_name: Option<&str>) -> Self {
        self.customers.push(CustomerRecord::new(id, display_name));
        self
    }

    pub fn with_enrollment(
        mut self,
        customer_id: impl Into<String>,
        business_id: impl Into<String>,
    ) -> Self {
        self.enrollments.push(Enrollment {
            customer_id: CustomerId::new(customer_id),
            business_id: BusinessId::new(business_id),
            enrolled_at: Utc::now(),
        });
        self
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryDirectory {
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryError> {
        Ok(self.customers.clone())
    }

    async fn find_enrollment(
        &self,
        customer_id: &CustomerId,
        business_id: &BusinessId,
    ) -> Result<Option<Enrollment>, DirectoryError> {
        Ok(self
            .enrollments
            .iter()
            .find(|e| &e.customer_id == customer_id && &e.business_id == business_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_seeded_customers() {
        let directory = InMemoryDirectory::new()
            .with_customer("u1", Some("Alice"))
            .with_customer("u2", None);

        let customers = directory.list_customers().await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].id, CustomerId::new("u1"));
        assert_eq!(customers[1].display_name, None);
    }

    #[tokio::test]
    async fn test_enrollment_point_query() {
        let directory = InMemoryDirectory::new()
            .with_customer("u1", Some("Alice"))
            .with_enrollment("u1", "b1");

        let hit = directory
            .find_enrollment(&CustomerId::new("u1"), &BusinessId::new("b1"))
            .await
            .unwrap();
        assert!(hit.is_some());

        let miss = directory
            .find_enrollment(&CustomerId::new("u1"), &BusinessId::new("b2"))
            .await
            .unwrap();
        assert!(miss.is_none());
    }
}
