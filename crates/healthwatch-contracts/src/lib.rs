//! # healthwatch-contracts
//!
//! Shared types, enumerations, and errors for the HealthWatch migrant health
//! dashboard.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, closed enumerations, and the role
//! table that drives navigation.

pub mod alert;
pub mod case;
pub mod district;
pub mod error;
pub mod patient;
pub mod profile;
