//! HTTP path conventions.
//!
//! Pure string functions shared by the server router and the client. The
//! per-review endpoints differ in shape for historical reasons; every branch
//! on review type lives here, keyed by [`ReviewType`].

use crate::models::review::ReviewType;

pub const HEALTH: &str = "/health";
pub const LOGIN: &str = "/api/auth/login";
pub const VALIDATE: &str = "/api/auth/validate";
pub const DEADLINES: &str = "/api/deadlines";
pub const ACTIVE_REVIEW: &str = "/api/external/active-pbl-review";
pub const GROUPS: &str = "/api/groups";
pub const ADMIN_GROUPS: &str = "/api/admin/groups";
pub const MENTOR_EVALUATION: &str = "/api/mentor/evaluation";

pub fn deadline(key: &str) -> String {
    format!("{DEADLINES}/{key}")
}

pub fn group(group_id: &str) -> String {
    format!("{GROUPS}/{group_id}")
}

/// Fetch endpoint used by externals and admins.
pub fn evaluation_fetch(review: ReviewType, group_id: &str) -> String {
    match review {
        ReviewType::Review1 => format!("/api/evaluation/pbl1/{group_id}"),
        ReviewType::Review2 => format!("/api/evaluation/pbl2/{group_id}"),
        ReviewType::Review3 => format!("/api/pbl3/evaluation/{group_id}"),
    }
}

/// Legacy alias still used by the review 2 group view.
pub fn review2_group(group_id: &str) -> String {
    format!("/api/evaluation/review2/group/{group_id}")
}

/// Fetch endpoint used by mentors.
pub fn mentor_students(review: ReviewType, group_id: &str) -> String {
    format!("/api/mentor/students/{group_id}?review={}", review.number())
}

/// Submission endpoint used by externals.
pub fn evaluation_submit(review: ReviewType) -> &'static str {
    match review {
        ReviewType::Review1 => "/api/evaluation/pbl1",
        ReviewType::Review2 => "/api/evaluation/pbl2/save-evaluation",
        ReviewType::Review3 => "/api/pbl3/evaluation/save",
    }
}

pub fn problem_statement(group_id: &str) -> String {
    format!("/api/mentor/problem-statement/{group_id}")
}

pub fn evaluations_export(review: ReviewType) -> String {
    format!("/api/admin/evaluations/{}/export", review.number())
}
