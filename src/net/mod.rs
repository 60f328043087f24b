//! Networking modules for the REST gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` is the only entry point views use. `middleware` holds the
//! token/401/403 stages. `transport` performs the exchange, and `types`
//! defines the request model and wire payloads.

pub mod error;
pub mod gateway;
pub mod middleware;
pub mod transport;
pub mod types;
