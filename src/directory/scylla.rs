use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::client::session::Session;

use crate::domain::{BusinessId, CustomerId, CustomerRecord, Enrollment};
use crate::utils::{retry_with_backoff, RetryConfig};

use super::{CustomerDirectory, DirectoryError};

// ============================================================================
// ScyllaDB Directory
// ============================================================================
//
// Production directory over two read-only tables:
// - accounts(account_id, display_name, role)
// - enrollments(customer_id, business_id, enrolled_at), keyed by the pair
//
// The bulk account read backs the reverse lookup's linear scan and is
// retried with backoff; the enrollment point read is a single-partition
// query and is not.
//
// ============================================================================

const LIST_CUSTOMERS_CQL: &str =
    "SELECT account_id, display_name FROM accounts WHERE role = 'customer' ALLOW FILTERING";

const FIND_ENROLLMENT_CQL: &str = "SELECT customer_id, business_id, enrolled_at \
     FROM enrollments WHERE customer_id = ? AND business_id = ?";

pub struct ScyllaDirectory {
    session: Arc<Session>,
    retry: RetryConfig,
}

impl ScyllaDirectory {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            retry: RetryConfig::conservative(),
        }
    }

    pub fn with_retry(session: Arc<Session>, retry: RetryConfig) -> Self {
        Self { session, retry }
    }

    /// Create the tables this directory reads. For local and demo setups;
    /// production schemas are managed elsewhere.
    pub async fn ensure_schema(session: &Session) -> anyhow::Result<()> {
        session
            .query_unpaged(
                "CREATE TABLE IF NOT EXISTS accounts (
                    account_id text PRIMARY KEY,
                    display_name text,
                    role text
                )",
                &[],
            )
            .await?;

        session
            .query_unpaged(
                "CREATE TABLE IF NOT EXISTS enrollments (
                    customer_id text,
                    business_id text,
                    enrolled_at timestamp,
                    PRIMARY KEY (customer_id, business_id)
                )",
                &[],
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CustomerDirectory for ScyllaDirectory {
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryError> {
        let session = self.session.clone();
        let result = retry_with_backoff(self.retry.clone(), move |_attempt| {
            let session = session.clone();
            async move { session.query_unpaged(LIST_CUSTOMERS_CQL, &[]).await }
        })
        .await
        .map_err(|e| DirectoryError::Backend(anyhow::Error::new(e)))?;

        let rows_result = match result.into_rows_result() {
            Ok(rows) => rows,
            Err(_) => return Ok(Vec::new()), // No rows
        };

        let mut customers = Vec::new();
        for row in rows_result
            .rows::<(String, Option<String>)>()
            .map_err(|e| DirectoryError::Backend(anyhow::Error::new(e)))?
        {
            let (account_id, display_name) =
                row.map_err(|e| DirectoryError::Backend(anyhow::Error::new(e)))?;
            customers.push(CustomerRecord {
                id: CustomerId::new(account_id),
                display_name,
            });
        }

        tracing::debug!(count = customers.len(), "Loaded customer accounts");
        Ok(customers)
    }

    async fn find_enrollment(
        &self,
        customer_id: &CustomerId,
        business_id: &BusinessId,
    ) -> Result<Option<Enrollment>, DirectoryError> {
        let result = self
            .session
            .query_unpaged(
                FIND_ENROLLMENT_CQL,
                (customer_id.as_str(), business_id.as_str()),
            )
            .await
            .map_err(|e| DirectoryError::Backend(anyhow::Error::new(e)))?;

        let rows_result = match result.into_rows_result() {
            Ok(rows) => rows,
            Err(_) => return Ok(None), // No rows
        };

        match rows_result.maybe_first_row::<(String, String, DateTime<Utc>)>() {
            Ok(Some((customer_id, business_id, enrolled_at))) => Ok(Some(Enrollment {
                customer_id: CustomerId::new(customer_id),
                business_id: BusinessId::new(business_id),
                enrolled_at,
            })),
            Ok(None) => Ok(None),
            Err(e) => Err(DirectoryError::Backend(anyhow::Error::new(e))),
        }
    }
}

// Database-backed behavior (retry on node loss, filtering by role, point
// reads on the enrollment pair) is covered by integration runs against a
// local ScyllaDB; unit coverage for the lookup logic lives in the resolver
// against InMemoryDirectory.
