//! Backend test support utilities
//!
//! Shared by the backend's unit tests (via `ctor`) and its integration tests:
//! idempotent logging setup, RFC 7807 problem-details assertions and fresh
//! player identities.

pub mod identities;
pub mod logging;
pub mod problem_details;
