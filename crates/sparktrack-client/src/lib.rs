//! sparktrack-client
//!
//! HTTP client for the SparkTrack API, and the on-disk session file.

pub mod api;
pub mod error;
pub mod session_file;
