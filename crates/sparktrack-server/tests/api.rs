mod common;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use sparktrack_core::models::role::Role;

use common::{test_app, token_for};

fn review1_payload(group_id: &str) -> Value {
    json!({
        "group_id": group_id,
        "review": 1,
        "students": [
            {
                "enrollment_no": "E1",
                "student_name": "Asha",
                "marks": { "A": 15, "B": 7, "C": null, "D": null, "E": null },
                "total": 22,
                "absent": false,
                "feedback": "  solid start  "
            },
            {
                "enrollment_no": "E2",
                "student_name": "Bilal",
                "marks": {},
                "total": "AB",
                "absent": true
            }
        ]
    })
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = test_app();
    let (status, body) = app.call_json(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn login_issues_a_token_the_server_accepts() {
    let app = test_app();
    let (status, body) = app
        .call_json(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "mentor", "password": "mentor" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "mentor");

    let token = body["token"].as_str().unwrap().to_string();
    let (status, _) = app
        .call(Method::GET, "/api/groups", Some(token.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app();
    let (status, body) = app
        .call_json(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "mentor", "password": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "invalid username or password");
}

#[tokio::test]
async fn validate_reports_token_validity() {
    let app = test_app();
    let token = token_for("external", Role::External);

    let (status, body) = app
        .call_json(Method::POST, "/api/auth/validate", None, Some(json!({ "token": token })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true, "role": "external" }));

    let forged = format!("{}x", token);
    let (status, body) = app
        .call_json(Method::POST, "/api/auth/validate", None, Some(json!({ "token": forged })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": false }));
}

#[tokio::test]
async fn protected_routes_require_a_verified_token() {
    let app = test_app();
    let (status, _) = app.call(Method::GET, "/api/groups", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other_secret = sparktrack_auth::jwt::issue_token(
        "admin",
        Role::Admin,
        std::time::Duration::from_secs(60),
        b"some-other-secret",
        jiff::Timestamp::now(),
    )
    .unwrap();
    let (status, _) = app
        .call(Method::GET, "/api/groups", Some(other_secret.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deadlines_start_closed_and_review_toggles_are_exclusive() {
    let app = test_app();
    let admin = token_for("admin", Role::Admin);

    let (status, body) = app
        .call_json(Method::GET, "/api/deadlines", Some(admin.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let toggles = body["data"].as_array().unwrap();
    assert_eq!(toggles.len(), 3);
    assert!(toggles.iter().all(|t| t["enabled"] == false));

    let (_, body) = app
        .call_json(Method::GET, "/api/external/active-pbl-review", Some(admin.as_str()), None)
        .await;
    assert_eq!(body, json!({ "activeReview": null }));

    app.open_review("pbl_review_1").await;
    let (_, body) = app
        .call_json(Method::GET, "/api/external/active-pbl-review", Some(admin.as_str()), None)
        .await;
    assert_eq!(body, json!({ "activeReview": 1 }));

    let (status, body) = app
        .call_json(
            Method::PUT,
            "/api/deadlines/pbl_review_2",
            Some(admin.as_str()),
            Some(json!({ "enabled": true })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn only_admins_toggle_deadlines() {
    let app = test_app();
    let mentor = token_for("mentor", Role::Mentor);
    let (status, _) = app
        .call(
            Method::PUT,
            "/api/deadlines/pbl_review_1",
            Some(mentor.as_str()),
            Some(json!({ "enabled": true })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_adds_groups_with_derived_year() {
    let app = test_app();
    let admin = token_for("admin", Role::Admin);
    let new_group = json!({
        "group_id": "ly07",
        "guide_name": "Dr. Iyer",
        "members": [{ "enrollment_no": "E9", "name": "Chen" }]
    });

    let (status, body) = app
        .call_json(Method::POST, "/api/admin/groups", Some(admin.as_str()), Some(new_group.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], "LY");

    let (status, _) = app
        .call(Method::POST, "/api/admin/groups", Some(admin.as_str()), Some(new_group))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .call(Method::GET, "/api/groups/ly07", Some(admin.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn submission_is_refused_while_the_review_is_closed() {
    let app = test_app();
    let external = token_for("external", Role::External);
    let (status, body) = app
        .call_json(
            Method::POST,
            "/api/evaluation/pbl1",
            Some(external.as_str()),
            Some(review1_payload("TY01")),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "PBL Review 1 is not open for submissions");
}

#[tokio::test]
async fn external_submission_is_clamped_stored_and_one_shot() {
    let app = test_app();
    app.open_review("pbl_review_1").await;
    let external = token_for("external", Role::External);

    let (status, body) = app
        .call_json(
            Method::POST,
            "/api/evaluation/pbl1",
            Some(external.as_str()),
            Some(review1_payload("TY01")),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = app
        .call_json(Method::GET, "/api/evaluation/pbl1/TY01", Some(external.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"]["evaluations"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let asha = rows.iter().find(|r| r["enrollment_no"] == "E1").unwrap();
    assert_eq!(asha["marks"]["A"], 10);
    assert_eq!(asha["marks"]["B"], 7);
    assert_eq!(asha["marks"]["C"], Value::Null);
    assert_eq!(asha["total"], 17);
    assert_eq!(asha["feedback"], "solid start");
    assert_eq!(asha["evaluated_by"], "external");

    let bilal = rows.iter().find(|r| r["enrollment_no"] == "E2").unwrap();
    assert_eq!(bilal["absent"], true);
    assert_eq!(bilal["total"], "AB");
    assert_eq!(bilal["marks"]["E"], "AB");

    // A second external on the same group loses.
    let other = token_for("external2", Role::External);
    let (status, body) = app
        .call_json(
            Method::POST,
            "/api/evaluation/pbl1",
            Some(other.as_str()),
            Some(review1_payload("TY01")),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn concurrent_external_submissions_store_exactly_one() {
    let app = test_app();
    app.open_review("pbl_review_1").await;
    let first = token_for("external", Role::External);
    let second = token_for("external2", Role::External);

    let (a, b) = tokio::join!(
        app.call(
            Method::POST,
            "/api/evaluation/pbl1",
            Some(first.as_str()),
            Some(review1_payload("SY01")),
        ),
        app.call(
            Method::POST,
            "/api/evaluation/pbl1",
            Some(second.as_str()),
            Some(review1_payload("SY01")),
        ),
    );
    let mut statuses = [a.0, b.0];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn payload_review_must_match_the_endpoint() {
    let app = test_app();
    app.open_review("pbl_review_1").await;
    let external = token_for("external", Role::External);
    let mut payload = review1_payload("TY01");
    payload["review"] = json!(3);

    let (status, _) = app
        .call(Method::POST, "/api/evaluation/pbl1", Some(external.as_str()), Some(payload))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review2_requires_statuses_for_the_year() {
    let app = test_app();
    app.open_review("pbl_review_2").await;
    let external = token_for("external", Role::External);

    let mut payload = review1_payload("TY01");
    payload["review"] = json!(2);
    payload["statuses"] = json!({
        "copyright": "NA",
        "patent": "Filed",
        "research_paper": "NA"
    });
    let (status, body) = app
        .call_json(
            Method::POST,
            "/api/evaluation/pbl2/save-evaluation",
            Some(external.as_str()),
            Some(payload.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "set research paper status before entering marks");

    payload["statuses"]["research_paper"] = json!("In progress");
    let (status, _) = app
        .call(
            Method::POST,
            "/api/evaluation/pbl2/save-evaluation",
            Some(external.as_str()),
            Some(payload),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .call_json(Method::GET, "/api/evaluation/pbl2/TY01", Some(external.as_str()), None)
        .await;
    let rows = body["evaluations"].as_array().unwrap();
    assert_eq!(rows[0]["statuses"]["patent"], "Filed");

    let (_, alias) = app
        .call_json(
            Method::GET,
            "/api/evaluation/review2/group/TY01",
            Some(external.as_str()),
            None,
        )
        .await;
    assert_eq!(alias, body);
}

#[tokio::test]
async fn review3_fetch_is_a_bare_array() {
    let app = test_app();
    let external = token_for("external", Role::External);
    let (status, body) = app
        .call_json(Method::GET, "/api/pbl3/evaluation/TY01", Some(external.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn unknown_rubric_field_is_rejected() {
    let app = test_app();
    app.open_review("pbl_review_1").await;
    let external = token_for("external", Role::External);
    let mut payload = review1_payload("TY01");
    payload["students"][0]["marks"]["m1"] = json!(3);

    let (status, body) = app
        .call_json(Method::POST, "/api/evaluation/pbl1", Some(external.as_str()), Some(payload))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("unknown field 'm1'"));
}

#[tokio::test]
async fn mentors_may_resubmit_through_their_own_endpoint() {
    let app = test_app();
    app.open_review("pbl_review_1").await;
    let mentor = token_for("mentor", Role::Mentor);

    for _ in 0..2 {
        let (status, _) = app
            .call(
                Method::POST,
                "/api/mentor/evaluation",
                Some(mentor.as_str()),
                Some(review1_payload("TY01")),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app
        .call_json(
            Method::GET,
            "/api/mentor/students/TY01?review=1",
            Some(mentor.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["evaluations"].as_array().unwrap().len(), 2);

    // Externals cannot use the mentor endpoints.
    let external = token_for("external", Role::External);
    let (status, _) = app
        .call(
            Method::GET,
            "/api/mentor/students/TY01?review=1",
            Some(external.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn problem_statement_locks_once_evaluation_starts() {
    let app = test_app();
    let mentor = token_for("mentor", Role::Mentor);
    let draft = json!({
        "title": "Smart irrigation",
        "kind": "Product",
        "technology_bucket": ["IoT"],
        "domain": ["Agriculture"],
        "description": "Soil moisture driven watering"
    });

    let (status, first) = app
        .call_json(
            Method::PUT,
            "/api/mentor/problem-statement/TY01",
            Some(mentor.as_str()),
            Some(draft.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, second) = app
        .call_json(
            Method::PUT,
            "/api/mentor/problem-statement/TY01",
            Some(mentor.as_str()),
            Some(draft.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);

    app.open_review("pbl_review_1").await;
    let external = token_for("external", Role::External);
    let (status, _) = app
        .call(
            Method::POST,
            "/api/evaluation/pbl1",
            Some(external.as_str()),
            Some(review1_payload("TY01")),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .call(
            Method::PUT,
            "/api/mentor/problem-statement/TY01",
            Some(mentor.as_str()),
            Some(draft),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .call_json(
            Method::GET,
            "/api/mentor/problem-statement/TY01",
            Some(external.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Smart irrigation");
}

#[tokio::test]
async fn admin_exports_review_as_csv() {
    let app = test_app();
    app.open_review("pbl_review_1").await;
    let external = token_for("external", Role::External);
    let mut payload = review1_payload("TY01");
    payload["students"][0]["feedback"] = json!("good, keep going");
    app.call(Method::POST, "/api/evaluation/pbl1", Some(external.as_str()), Some(payload))
        .await;

    let admin = token_for("admin", Role::Admin);
    let (status, csv) = app
        .call(Method::GET, "/api/admin/evaluations/1/export", Some(admin.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let lines: Vec<&str> = csv.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(
        lines[0],
        "group_id,enrollment_no,student_name,A,B,C,D,E,total,absent,feedback,evaluated_by"
    );
    assert!(lines.contains(&"TY01,E1,Asha,10,7,,,,17,false,\"good, keep going\",external"));
    assert!(lines.contains(&"TY01,E2,Bilal,AB,AB,AB,AB,AB,AB,true,,external"));

    let (status, _) = app
        .call(Method::GET, "/api/admin/evaluations/1/export", Some(external.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
