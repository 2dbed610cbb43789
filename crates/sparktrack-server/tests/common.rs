#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use sparktrack_auth::{jwt, password};
use sparktrack_core::models::group::{Member, NewGroup};
use sparktrack_core::models::role::Role;
use sparktrack_core::models::user::UserAccount;
use sparktrack_server::state::AppState;
use sparktrack_storage::database::Database;
use sparktrack_storage::store::Store;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub fn members() -> Vec<Member> {
    vec![
        Member {
            enrollment_no: "E1".to_string(),
            name: "Asha".to_string(),
        },
        Member {
            enrollment_no: "E2".to_string(),
            name: "Bilal".to_string(),
        },
    ]
}

/// Users `admin`, `mentor` and `external` (password = username), and groups
/// `SY01` and `TY01`. All deadlines start closed.
pub fn seeded_database() -> Database {
    let mut db = Database::default();
    for (username, role) in [
        ("admin", Role::Admin),
        ("mentor", Role::Mentor),
        ("external", Role::External),
        ("external2", Role::External),
    ] {
        db.put_user(UserAccount {
            username: username.to_string(),
            role,
            password_hash: password::hash_password(username).unwrap(),
            display_name: None,
        });
    }
    for group_id in ["SY01", "TY01"] {
        let group = NewGroup {
            group_id: group_id.to_string(),
            guide_name: "Dr. Rao".to_string(),
            members: members(),
        }
        .into_group()
        .unwrap();
        db.add_group(group).unwrap();
    }
    db
}

pub fn test_app() -> TestApp {
    test_app_with(seeded_database())
}

pub fn test_app_with(db: Database) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::with_database(dir.path().join("db.json"), db);
    let state = AppState::new(store, SECRET, Duration::from_secs(3600));
    TestApp {
        app: sparktrack_server::app(state.clone()),
        state,
        _dir: dir,
    }
}

pub fn token_for(username: &str, role: Role) -> String {
    jwt::issue_token(
        username,
        role,
        Duration::from_secs(3600),
        SECRET.as_bytes(),
        jiff::Timestamp::now(),
    )
    .unwrap()
}

impl TestApp {
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn call_json(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, text) = self.call(method, path, token, body).await;
        let json = serde_json::from_str(&text).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn open_review(&self, key: &str) {
        let admin = token_for("admin", Role::Admin);
        let (status, _) = self
            .call(
                Method::PUT,
                &format!("/api/deadlines/{key}"),
                Some(admin.as_str()),
                Some(serde_json::json!({ "enabled": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}
