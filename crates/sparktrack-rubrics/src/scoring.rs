use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::RubricError;

/// One row of a rubric: a mark field and its maximum.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Criterion {
    /// Wire field name: `A`–`E` for reviews 1 and 2, `m1`–`m6` for review 3.
    pub field: String,
    pub title: String,
    pub max: u32,
    pub description: Option<String>,
}

impl Criterion {
    pub fn clamp(&self, raw: i64) -> u32 {
        clamp_mark(raw, self.max)
    }
}

/// Clamp a typed-in mark to `[0, max]`.
pub fn clamp_mark(raw: i64, max: u32) -> u32 {
    raw.clamp(0, i64::from(max)) as u32
}

/// Parse a mark as typed into a form field. Blank means "no mark yet".
/// Marks are whole numbers; anything else is rejected rather than rounded.
/// The value is then clamped.
pub fn parse_mark(text: &str, max: u32) -> Result<Option<u32>, RubricError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| RubricError::NotANumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(RubricError::NotANumber(text.to_string()));
    }
    if value.fract() != 0.0 {
        return Err(RubricError::NotAWholeNumber(text.to_string()));
    }
    Ok(Some(clamp_mark(value as i64, max)))
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub value: Option<u32>,
    pub max: u32,
    pub message: String,
}

pub(crate) fn criterion(field: &str, title: &str, max: u32) -> Criterion {
    Criterion {
        field: field.to_string(),
        title: title.to_string(),
        max,
        description: None,
    }
}
