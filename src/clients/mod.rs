/// Deezer API client and upstream-to-output projections
pub mod deezer;
/// Output records exposed to clients
pub mod entities;
/// Error types and result aliases
pub mod errors;

pub use deezer::DeezerClient;
