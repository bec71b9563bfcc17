//! Route definitions for the Kithbook API.

pub mod auth;
pub mod dashboard;
pub mod health;
