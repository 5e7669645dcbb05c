//! National health-data platform client
//!
//! Companion integration to the insurance gateway: looks up patients and
//! practitioners on the national FHIR platform. Authentication is an OAuth
//! client-credentials token that is lazily fetched and cached until close to
//! its measured expiry; the cache is owned by the client instance so tests
//! can seed it deterministically.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod token;

pub use client::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use token::*;
