//! Deezer proxy - search and lookup against the Deezer catalog
//!
//! This library forwards catalog requests to the Deezer API and reshapes the
//! responses into a stable, filtered output contract served over HTTP.

/// HTTP routes and error responses
pub mod api;
/// Client modules for interacting with the upstream catalog
pub mod clients;
/// Configuration and the catalog proxy service
pub mod proxy;
