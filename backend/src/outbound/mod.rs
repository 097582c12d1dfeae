//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories for database-less runs and tests
//! - **identity**: HTTP client for the managed authentication service

pub mod identity;
pub mod memory;
pub mod persistence;
