//! sparktrack-auth
//!
//! Token issuing and validation, the client-side session gate, and the typed
//! session context that replaces ad-hoc browser storage keys.

pub mod error;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod session;
