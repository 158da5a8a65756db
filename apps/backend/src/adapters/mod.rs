//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps to
//! `DomainError`.

pub mod students_sea;
pub mod teachers_sea;
pub mod users_sea;
