//! Shared helpers for the classroom API test suites.
//!
//! Quiet tracing initialisation, problem-details response assertions, and
//! ULID-based unique values so tests never collide on the unique email index.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;

pub use problem_details::{assert_problem_details, assert_unauthorized_challenge};
pub use unique_helpers::{unique_email, unique_str};
