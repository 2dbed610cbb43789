//! sparktrack-core
//!
//! Pure domain types and endpoint conventions. No HTTP or storage
//! dependency; the shared vocabulary of the SparkTrack server, client and forms.

pub mod api_paths;
pub mod error;
pub mod models;
