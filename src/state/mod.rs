//! Client-side session state.
//!
//! DESIGN
//! ======
//! `role` holds the privilege order, `storage` the durable backends, and
//! `session` the token/profile pair built on top of them.

pub mod role;
pub mod session;
pub mod storage;
