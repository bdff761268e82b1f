//! Customer code service for the loyalty platform.
//!
//! Derives short human-typable codes (`LLL-NNN-LLL`) from opaque customer
//! identifiers and resolves submitted codes back to enrolled customers. A
//! code is a pure function of the identifier and is never persisted: reverse
//! lookup recomputes codes over the customer population and checks that the
//! matched customer is enrolled with the requesting business.

pub mod code;
pub mod config;
pub mod directory;
pub mod domain;
pub mod metrics;
pub mod resolver;
pub mod utils;

// Re-export the service surface
pub use code::{derive_code, format_code_input, is_valid_code_format, CustomerCode};
pub use directory::{CustomerDirectory, DirectoryError, InMemoryDirectory, ScyllaDirectory};
pub use domain::{BusinessId, CustomerId, CustomerMatch, CustomerRecord, Enrollment};
pub use resolver::{CodeResolver, LookupError, NoMatchReason, ResolveOutcome};
