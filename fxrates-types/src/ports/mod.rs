//! Port traits (interfaces for adapters).
//!
//! The handler depends on these traits, not on concrete HTTP clients.

mod provider;

pub use provider::RateProvider;
