use std::sync::Arc;
use std::time::Instant;

use crate::code::derive_code;
use crate::directory::{CustomerDirectory, DirectoryError};
use crate::domain::{BusinessId, CustomerId, CustomerMatch};
use crate::metrics::Metrics;

// ============================================================================
// Reverse Code Lookup
// ============================================================================
//
// Codes are never stored, so resolving one means recomputing the code for
// every customer-role account and comparing. Linear over the population,
// which is acceptable at loyalty-program scale; a write-time
// identifier → code index would replace the scan if populations grow.
//
// Candidates are sorted by identifier before the scan so that, should two
// identifiers ever collide on a code, the winner does not depend on store
// return order.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("missing business context for code lookup")]
    MissingBusinessContext,

    #[error("directory query failed: {0}")]
    Directory(#[from] DirectoryError),
}

/// Non-error result of a reverse lookup. The three no-match cases are kept
/// distinct so callers can message them differently.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Match(CustomerMatch),
    NoMatch(NoMatchReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    /// The store holds no customer-role accounts at all
    NoCandidates,
    /// No customer's derived code equals the submitted one
    UnknownCode,
    /// A customer matched the code but is not enrolled at this business
    NotEnrolled,
}

pub struct CodeResolver<D> {
    directory: Arc<D>,
    metrics: Option<Arc<Metrics>>,
}

impl<D: CustomerDirectory> CodeResolver<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            metrics: None,
        }
    }

    pub fn with_metrics(directory: Arc<D>, metrics: Arc<Metrics>) -> Self {
        Self {
            directory,
            metrics: Some(metrics),
        }
    }

    /// Resolve a submitted code to an enrolled customer of `business_id`.
    ///
    /// Performs one bulk read plus at most one point read; no writes, no
    /// caching, safe to call concurrently.
    pub async fn resolve_customer_by_code(
        &self,
        code: &str,
        business_id: &BusinessId,
    ) -> Result<ResolveOutcome, LookupError> {
        let started = Instant::now();
        let outcome = self.resolve_inner(code, business_id).await;

        if let Some(metrics) = &self.metrics {
            metrics.record_lookup(outcome_label(&outcome), started.elapsed().as_secs_f64());
        }

        outcome
    }

    async fn resolve_inner(
        &self,
        code: &str,
        business_id: &BusinessId,
    ) -> Result<ResolveOutcome, LookupError> {
        if business_id.as_str().trim().is_empty() {
            tracing::warn!(code = %code, "Code lookup rejected: no business context");
            return Err(LookupError::MissingBusinessContext);
        }

        let needle = code.trim().to_ascii_uppercase();

        let mut candidates = self.directory.list_customers().await.map_err(|error| {
            tracing::error!(
                code = %needle,
                business_id = %business_id,
                error = %error,
                "Failed to list candidates for code lookup"
            );
            error
        })?;

        if candidates.is_empty() {
            tracing::debug!(
                code = %needle,
                business_id = %business_id,
                "No customer accounts to scan"
            );
            return Ok(ResolveOutcome::NoMatch(NoMatchReason::NoCandidates));
        }

        // Reproducible first-match tie-break on code collisions.
        candidates.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        let Some(candidate) = candidates
            .iter()
            .find(|c| derive_code(c.id.as_str()).as_str() == needle)
        else {
            tracing::debug!(
                code = %needle,
                business_id = %business_id,
                scanned = candidates.len(),
                "No customer derives this code"
            );
            return Ok(ResolveOutcome::NoMatch(NoMatchReason::UnknownCode));
        };

        match self
            .directory
            .find_enrollment(&candidate.id, business_id)
            .await
        {
            Ok(Some(_)) => {
                tracing::info!(
                    customer_id = %candidate.id,
                    business_id = %business_id,
                    "Code resolved to enrolled customer"
                );
                Ok(ResolveOutcome::Match(CustomerMatch::from_record(candidate)))
            }
            Ok(None) => {
                tracing::info!(
                    customer_id = %candidate.id,
                    business_id = %business_id,
                    "Code matched a customer not enrolled at this business"
                );
                Ok(ResolveOutcome::NoMatch(NoMatchReason::NotEnrolled))
            }
            Err(error) => {
                tracing::error!(
                    customer_id = %candidate.id,
                    business_id = %business_id,
                    error = %error,
                    "Enrollment check failed during code lookup"
                );
                Err(error.into())
            }
        }
    }

    /// Direct existence check on the enrollment relation. Query failures are
    /// logged and reported as "not enrolled" rather than propagated.
    pub async fn is_customer_enrolled(
        &self,
        customer_id: &CustomerId,
        business_id: &BusinessId,
    ) -> bool {
        match self.directory.find_enrollment(customer_id, business_id).await {
            Ok(enrollment) => {
                let enrolled = enrollment.is_some();
                if let Some(metrics) = &self.metrics {
                    metrics.record_enrollment_check(enrolled);
                }
                enrolled
            }
            Err(error) => {
                tracing::error!(
                    customer_id = %customer_id,
                    business_id = %business_id,
                    error = %error,
                    "Enrollment check failed, treating customer as not enrolled"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_directory_error("find_enrollment");
                }
                false
            }
        }
    }
}

fn outcome_label(outcome: &Result<ResolveOutcome, LookupError>) -> &'static str {
    match outcome {
        Ok(ResolveOutcome::Match(_)) => "match",
        Ok(ResolveOutcome::NoMatch(NoMatchReason::NoCandidates)) => "no_candidates",
        Ok(ResolveOutcome::NoMatch(NoMatchReason::UnknownCode)) => "unknown_code",
        Ok(ResolveOutcome::NoMatch(NoMatchReason::NotEnrolled)) => "not_enrolled",
        Err(LookupError::MissingBusinessContext) => "missing_business",
        Err(LookupError::Directory(_)) => "directory_error",
    }
}
