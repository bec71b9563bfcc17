//! Database models and DTOs for the domain entities.

pub mod contact;
pub mod debt;
pub mod user;
