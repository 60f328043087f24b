//! Authenticated application shell for a Leptos CSR frontend.
//!
//! ARCHITECTURE
//! ============
//! - `state`: roles, key-value persistence, and the session store.
//! - `net`: request/response types, middleware pipeline, the transport
//!   seam, and the gateway that exposes login, register, logout.
//! - `router`: route table, navigation guard, and redirect-following.
//! - `app`: Leptos components binding the above to the browser.
//!
//! Everything outside `app` is plain Rust and testable natively. Browser
//! bindings are gated behind the `csr` feature.

pub mod app;
pub mod config;
pub mod net;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
