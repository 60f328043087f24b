//! Client-side routing: route table, navigation guard, transitions.
//!
//! ARCHITECTURE
//! ============
//! `routes` is static data, `guard` is the per-transition decision, and
//! `transition` combines the two for the host router. `navigator` is the
//! side-effect seam shared with the gateway.

pub mod guard;
pub mod navigator;
pub mod routes;
pub mod transition;
