// ============================================================================
// Loyalty Domain - Value Objects
// ============================================================================
//
// Identifiers here are opaque strings owned by the external account system;
// this service only reads them. Enrollment records are created when a
// customer first earns or redeems at a business and are never mutated here.
//
// ============================================================================

pub mod customer;
pub mod enrollment;

// Re-export for convenience
pub use customer::*;
pub use enrollment::*;
