use std::future::Future;

use sparktrack_core::models::evaluation::SubmitResponse;
use sparktrack_core::models::review::ReviewType;
use sparktrack_core::models::role::Role;

use crate::envelope::EvaluationsEnvelope;
use crate::error::EvaluationError;
use crate::payload::EvaluationPayload;

/// The evaluation endpoints a form talks to. Which concrete endpoint is hit
/// depends on the role (mentors have their own) and the review.
pub trait EvaluationBackend {
    fn fetch_evaluations(
        &self,
        role: Role,
        review: ReviewType,
        group_id: &str,
    ) -> impl Future<Output = Result<EvaluationsEnvelope, EvaluationError>> + Send;

    fn submit_evaluation(
        &self,
        role: Role,
        payload: &EvaluationPayload,
    ) -> impl Future<Output = Result<SubmitResponse, EvaluationError>> + Send;
}
