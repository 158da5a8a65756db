//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod students;
pub mod teachers;
pub mod users;
