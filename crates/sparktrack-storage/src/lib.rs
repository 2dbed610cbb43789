//! sparktrack-storage
//!
//! JSON state persistence. One state file holds the whole database; every
//! write lands on disk before it becomes visible in memory.

pub mod database;
pub mod error;
pub mod state;
pub mod store;
