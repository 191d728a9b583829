//! # FX Rates Handler
//!
//! The stable query interface the host application uses for currency codes,
//! names and rate factors.
//!
//! ## Architecture
//!
//! - `handler/` - `RateHandler`, which caches one symbol table and one rate
//!   snapshot per instance and derives cross rates from that snapshot
//!
//! The handler is generic over `P: RateProvider`, allowing the HTTP client to
//! be swapped for an in-memory provider in tests.

pub mod handler;


pub use handler::RateHandler;
