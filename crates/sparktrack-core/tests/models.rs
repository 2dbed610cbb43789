use sparktrack_core::api_paths;
use sparktrack_core::models::evaluation::{EvaluationRecord, MarkValue, PublicationStatus};
use sparktrack_core::models::group::{NewGroup, YearPrefix};
use sparktrack_core::models::review::ReviewType;
use sparktrack_core::models::role::Role;

#[test]
fn role_parse_ignores_case_and_separators() {
    assert_eq!(Role::parse("reviewerAdmin"), Some(Role::ReviewerAdmin));
    assert_eq!(Role::parse("REVIEWER_ADMIN"), Some(Role::ReviewerAdmin));
    assert_eq!(Role::parse(" Mentor "), Some(Role::Mentor));
    assert_eq!(Role::parse("EXTERNAL"), Some(Role::External));
    assert_eq!(Role::parse("superuser"), None);
    assert!("guest".parse::<Role>().is_err());
}

#[test]
fn only_mentors_edit_after_submission() {
    for role in Role::ALL {
        assert_eq!(role.can_edit_after_submission(), role == Role::Mentor);
    }
}

#[test]
fn year_prefix_comes_from_group_id() {
    assert_eq!(YearPrefix::from_group_id("SY-04").unwrap(), YearPrefix::SY);
    assert_eq!(YearPrefix::from_group_id("ty12").unwrap(), YearPrefix::TY);
    assert_eq!(YearPrefix::from_group_id("LY7").unwrap(), YearPrefix::LY);
    assert!(YearPrefix::from_group_id("FY1").is_err());
    assert!(YearPrefix::from_group_id("").is_err());
}

#[test]
fn new_group_derives_year() {
    let group = NewGroup {
        group_id: " TY-3 ".to_string(),
        guide_name: "Dr. Rao".to_string(),
        members: vec![],
    }
    .into_group()
    .unwrap();
    assert_eq!(group.group_id, "TY-3");
    assert_eq!(group.year, YearPrefix::TY);
}

#[test]
fn marks_accept_numbers_numeric_strings_and_absent() {
    let marks: Vec<Option<MarkValue>> =
        serde_json::from_str(r#"[7, "8", "AB", "ab", null, 9.0]"#).unwrap();
    assert_eq!(
        marks,
        vec![
            Some(MarkValue::Score(7)),
            Some(MarkValue::Score(8)),
            Some(MarkValue::Absent),
            Some(MarkValue::Absent),
            None,
            Some(MarkValue::Score(9)),
        ]
    );
    assert!(serde_json::from_str::<MarkValue>(r#""ten""#).is_err());
    assert!(serde_json::from_str::<MarkValue>("-1").is_err());
}

#[test]
fn fractional_and_oversized_marks_are_rejected() {
    assert!(serde_json::from_str::<MarkValue>("7.6").is_err());
    assert!(serde_json::from_str::<MarkValue>("4294967296").is_err());
    assert!(serde_json::from_str::<MarkValue>(r#""4294967296""#).is_err());
    assert_eq!(
        serde_json::from_str::<MarkValue>("4294967295").unwrap(),
        MarkValue::Score(u32::MAX)
    );
}

#[test]
fn marks_serialize_as_number_or_sentinel() {
    let json = serde_json::to_string(&[MarkValue::Score(10), MarkValue::Absent]).unwrap();
    assert_eq!(json, r#"[10,"AB"]"#);
}

#[test]
fn publication_status_wire_names() {
    assert_eq!(PublicationStatus::parse("NA").unwrap(), PublicationStatus::NotSet);
    assert_eq!(
        PublicationStatus::parse("In progress").unwrap(),
        PublicationStatus::InProgress
    );
    assert_eq!(PublicationStatus::parse("Prepared").unwrap(), PublicationStatus::Prepared);
    assert!(PublicationStatus::parse("maybe").is_err());
    assert!(!PublicationStatus::default().is_set());
}

#[test]
fn review_type_is_a_number_on_the_wire() {
    assert_eq!(serde_json::to_string(&ReviewType::Review2).unwrap(), "2");
    assert_eq!(serde_json::from_str::<ReviewType>("3").unwrap(), ReviewType::Review3);
    assert!(serde_json::from_str::<ReviewType>("4").is_err());
    assert!(!ReviewType::Review1.has_status_fields());
    assert!(ReviewType::Review3.has_status_fields());
}

#[test]
fn record_with_any_mark_is_detected() {
    let record: EvaluationRecord = serde_json::from_value(serde_json::json!({
        "group_id": "SY-1",
        "review": 1,
        "enrollment_no": "E1",
        "marks": { "A": null, "B": 4 }
    }))
    .unwrap();
    assert!(record.has_any_mark());

    let empty: EvaluationRecord = serde_json::from_value(serde_json::json!({
        "group_id": "SY-1",
        "review": 1,
        "enrollment_no": "E2",
        "marks": { "A": null }
    }))
    .unwrap();
    assert!(!empty.has_any_mark());
}

#[test]
fn endpoint_table_per_review() {
    assert_eq!(
        api_paths::evaluation_fetch(ReviewType::Review1, "SY-1"),
        "/api/evaluation/pbl1/SY-1"
    );
    assert_eq!(
        api_paths::evaluation_fetch(ReviewType::Review3, "LY-2"),
        "/api/pbl3/evaluation/LY-2"
    );
    assert_eq!(
        api_paths::evaluation_submit(ReviewType::Review2),
        "/api/evaluation/pbl2/save-evaluation"
    );
    assert_eq!(
        api_paths::mentor_students(ReviewType::Review2, "TY-9"),
        "/api/mentor/students/TY-9?review=2"
    );
}
