use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Extension;

use sparktrack_core::models::evaluation::{EvaluationRecord, MarkValue};
use sparktrack_core::models::group::YearPrefix;
use sparktrack_core::models::review::ReviewType;
use sparktrack_core::models::role::Role;
use sparktrack_rubrics::rubric_for;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// CSV of every stored record for one review, one row per student.
pub async fn export_evaluations(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(review): Path<u8>,
) -> Result<impl IntoResponse, ApiError> {
    user.require(&[Role::Admin])?;
    let review = ReviewType::from_number(review)?;

    let csv = state
        .store
        .read(|db| render_csv(review, &db.all_evaluations(review)))
        .await;

    tracing::info!(review = %review, bytes = csv.len(), by = %user.sub, "evaluations exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{review}-evaluations.csv\""),
            ),
        ],
        csv,
    ))
}

/// Criterion fields are the same for every year of a review, only the
/// wording differs.
pub fn render_csv(review: ReviewType, records: &[&EvaluationRecord]) -> String {
    let fields: Vec<String> = rubric_for(review, YearPrefix::SY)
        .fields()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut columns: Vec<String> =
        vec!["group_id".into(), "enrollment_no".into(), "student_name".into()];
    columns.extend(fields.iter().cloned());
    columns.extend(["total", "absent", "feedback", "evaluated_by"].map(String::from));

    let mut out = csv_line(&columns);
    for record in records {
        let mut row = vec![
            record.group_id.clone(),
            record.enrollment_no.clone(),
            record.student_name.clone(),
        ];
        for field in &fields {
            row.push(mark_cell(record.marks.get(field).copied().flatten()));
        }
        row.push(mark_cell(record.total));
        row.push(record.absent.to_string());
        row.push(record.feedback.clone());
        row.push(record.evaluated_by.clone().unwrap_or_default());
        out.push_str(&csv_line(&row));
    }
    out
}

fn mark_cell(value: Option<MarkValue>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_line(cells: &[String]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| escape(c)).collect();
    format!("{}\r\n", escaped.join(","))
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
