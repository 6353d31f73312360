//! Credential discovery and the deployment client shape (§6.3, §6.4).
//!
//! Deliberately thin per the spec's non-goals: this crate models the
//! *shape* of the external FaaS client `deploy()` drives — an
//! [`ActionClient`] trait plus a [`NullActionClient`] for tests and
//! offline use — rather than embedding a real HTTP implementation.

pub mod client;
pub mod config;
mod deploy;
pub mod error;

pub use client::{ActionClient, Call, NullActionClient};
pub use config::{read_wskprops, Credentials};
pub use deploy::deploy;
pub use error::WskError;
