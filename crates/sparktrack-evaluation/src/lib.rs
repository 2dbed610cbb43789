//! sparktrack-evaluation
//!
//! Which review is open, and the per-group evaluation form: loading existing
//! marks, locking, status blockers, mark entry and submission. Network access
//! goes through [`backend::EvaluationBackend`].

pub mod backend;
pub mod envelope;
pub mod error;
pub mod form;
pub mod payload;
pub mod resolver;
pub mod status;
