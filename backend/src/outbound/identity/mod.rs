//! Adapter for the managed authentication service.

mod dto;
mod http_provider;

pub use http_provider::{HttpIdentityProvider, user_endpoint};
