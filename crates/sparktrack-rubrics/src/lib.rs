//! sparktrack-rubrics
//!
//! Evaluation rubric definitions. Pure data, no HTTP or storage dependency.
//! Each review has its own criteria, and the criterion wording varies with
//! the group's year; the maximum marks do not.

pub mod error;
pub mod rubrics;
pub mod scoring;

use std::collections::BTreeMap;

use sparktrack_core::models::evaluation::MarkValue;
use sparktrack_core::models::group::YearPrefix;
use sparktrack_core::models::review::ReviewType;

use scoring::{Criterion, ValidationError};

/// Trait implemented by each review's rubric.
pub trait Rubric: Send + Sync {
    /// Unique identifier, e.g. "pbl_review_2_ty".
    fn id(&self) -> String {
        format!("{}_{}", self.review().deadline_key(), self.year().as_str().to_lowercase())
    }

    /// Human-readable name, e.g. "PBL Review 2 (TY)".
    fn name(&self) -> String {
        format!("{} ({})", self.review().label(), self.year())
    }

    fn review(&self) -> ReviewType;

    fn year(&self) -> YearPrefix;

    /// Criteria in display order.
    fn criteria(&self) -> &[Criterion];

    fn criterion(&self, field: &str) -> Option<&Criterion> {
        self.criteria().iter().find(|c| c.field == field)
    }

    fn fields(&self) -> Vec<&str> {
        self.criteria().iter().map(|c| c.field.as_str()).collect()
    }

    fn max_total(&self) -> u32 {
        self.criteria().iter().map(|c| c.max).sum()
    }

    /// Sum of the scored criterion fields, each clamped to its maximum.
    /// Unknown fields, blanks and `"AB"` contribute nothing.
    fn total(&self, marks: &BTreeMap<String, Option<MarkValue>>) -> u32 {
        self.criteria()
            .iter()
            .filter_map(|c| {
                let score = marks.get(&c.field).copied().flatten()?.score()?;
                Some(c.clamp(i64::from(score)))
            })
            .sum()
    }

    /// Check marks against this rubric's fields and maxima.
    fn validate_marks(&self, marks: &BTreeMap<String, Option<MarkValue>>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (field, value) in marks {
            let Some(criterion) = self.criterion(field) else {
                errors.push(ValidationError {
                    field: field.clone(),
                    value: value.and_then(|v| v.score()),
                    max: 0,
                    message: format!("{}: unknown field '{field}'", self.name()),
                });
                continue;
            };
            if let Some(MarkValue::Score(score)) = value
                && *score > criterion.max
            {
                errors.push(ValidationError {
                    field: field.clone(),
                    value: Some(*score),
                    max: criterion.max,
                    message: format!(
                        "{}: {} mark {} is outside range [0, {}]",
                        self.name(),
                        criterion.title,
                        score,
                        criterion.max,
                    ),
                });
            }
        }
        errors
    }

    /// Plain-text rubric, as shown above the marks table.
    fn describe(&self) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for c in self.criteria() {
            output.push_str(&format!("- {} ({}): {} marks\n", c.field, c.title, c.max));
        }
        output.push_str(&format!("\nTotal: {}\n", self.max_total()));
        output
    }
}

/// Return every rubric: each review for each year.
pub fn all_rubrics() -> Vec<Box<dyn Rubric>> {
    let years = [YearPrefix::SY, YearPrefix::TY, YearPrefix::LY];
    ReviewType::ALL
        .iter()
        .flat_map(|review| years.iter().map(move |year| rubric_for(*review, *year)))
        .collect()
}

/// The rubric used for `review` on a group of `year`.
pub fn rubric_for(review: ReviewType, year: YearPrefix) -> Box<dyn Rubric> {
    match review {
        ReviewType::Review1 => Box::new(rubrics::pbl_review1::PblReview1 { year }),
        ReviewType::Review2 => Box::new(rubrics::pbl_review2::PblReview2 { year }),
        ReviewType::Review3 => Box::new(rubrics::pbl_review3::PblReview3 { year }),
    }
}

/// Look up a rubric by ID.
pub fn get_rubric(id: &str) -> Option<Box<dyn Rubric>> {
    all_rubrics().into_iter().find(|r| r.id() == id)
}
