//! Infrastructure layer - database, state assembly, and error translation.

pub mod db;
pub mod db_errors;
pub mod state;
