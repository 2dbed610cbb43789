//! Async HTTP client for the SparkTrack API.
//!
//! Every call goes through [`ApiClient::api_request`], which attaches the
//! bearer token and turns non-2xx answers into [`ClientError::Status`] with
//! the server's own message.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use sparktrack_auth::error::AuthError;
use sparktrack_auth::gate::SessionValidator;
use sparktrack_core::api_paths;
use sparktrack_core::models::auth::{LoginRequest, LoginResponse, ValidateRequest, ValidateResponse};
use sparktrack_core::models::deadline::{DeadlineToggle, SetDeadlineRequest};
use sparktrack_core::models::evaluation::SubmitResponse;
use sparktrack_core::models::group::{Group, NewGroup};
use sparktrack_core::models::problem_statement::{ProblemStatement, ProblemStatementDraft};
use sparktrack_core::models::review::ReviewType;
use sparktrack_core::models::role::Role;
use sparktrack_evaluation::backend::EvaluationBackend;
use sparktrack_evaluation::envelope::{DeadlinesEnvelope, EvaluationsEnvelope};
use sparktrack_evaluation::error::EvaluationError;
use sparktrack_evaluation::payload::EvaluationPayload;
use sparktrack_evaluation::resolver::ActiveReviewResponse;

use crate::error::ClientError;
use crate::session_file::DEFAULT_API_BASE;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// Base URL from `SPARKTRACK_API_BASE`, defaulting to a local server.
    pub fn from_env() -> Self {
        let base = std::env::var("SPARKTRACK_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let request = self.http.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ClientError> {
        let mut request = self.build(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        tracing::warn!(%method, path, status = status.as_u16(), error = %message, "request rejected");
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Send a request and decode the JSON answer.
    pub async fn api_request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, body).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.api_request::<T, ()>(Method::GET, path, None).await
    }

    /// Log in and keep the issued token for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .api_request(Method::POST, api_paths::LOGIN, Some(&body))
            .await?;
        self.token = Some(response.token.clone());
        tracing::info!(username, role = %response.role, "logged in");
        Ok(response)
    }

    pub async fn validate_token(&self, token: &str) -> Result<ValidateResponse, ClientError> {
        let body = ValidateRequest {
            token: token.to_string(),
        };
        self.api_request(Method::POST, api_paths::VALIDATE, Some(&body))
            .await
    }

    pub async fn deadlines(&self) -> Result<Vec<DeadlineToggle>, ClientError> {
        let envelope: DeadlinesEnvelope = self.get(api_paths::DEADLINES).await?;
        Ok(envelope.into_toggles())
    }

    pub async fn set_deadline(&self, key: &str, enabled: bool) -> Result<DeadlineToggle, ClientError> {
        self.api_request(
            Method::PUT,
            &api_paths::deadline(key),
            Some(&SetDeadlineRequest { enabled }),
        )
        .await
    }

    pub async fn active_review(&self) -> Result<Option<ReviewType>, ClientError> {
        let response: ActiveReviewResponse = self.get(api_paths::ACTIVE_REVIEW).await?;
        Ok(response.active_review)
    }

    pub async fn groups(&self) -> Result<Vec<Group>, ClientError> {
        self.get(api_paths::GROUPS).await
    }

    pub async fn group(&self, group_id: &str) -> Result<Group, ClientError> {
        self.get(&api_paths::group(group_id)).await
    }

    pub async fn add_group(&self, group: &NewGroup) -> Result<Group, ClientError> {
        self.api_request(Method::POST, api_paths::ADMIN_GROUPS, Some(group))
            .await
    }

    pub async fn problem_statement(&self, group_id: &str) -> Result<ProblemStatement, ClientError> {
        self.get(&api_paths::problem_statement(group_id)).await
    }

    pub async fn put_problem_statement(
        &self,
        group_id: &str,
        draft: &ProblemStatementDraft,
    ) -> Result<ProblemStatement, ClientError> {
        self.api_request(
            Method::PUT,
            &api_paths::problem_statement(group_id),
            Some(draft),
        )
        .await
    }

    /// CSV export of every record for a review.
    pub async fn export_evaluations(&self, review: ReviewType) -> Result<String, ClientError> {
        let response = self
            .send::<()>(Method::GET, &api_paths::evaluations_export(review), None)
            .await?;
        Ok(response.text().await?)
    }
}

/// Pull a human-readable message out of an error body. Servers answer with
/// `{message}` or `{error}`; anything else is passed through when short.
fn error_message(body: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        return json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
    }
    let trimmed = body.trim();
    (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
}

impl EvaluationBackend for ApiClient {
    async fn fetch_evaluations(
        &self,
        role: Role,
        review: ReviewType,
        group_id: &str,
    ) -> Result<EvaluationsEnvelope, EvaluationError> {
        let path = match role {
            Role::Mentor => api_paths::mentor_students(review, group_id),
            _ => api_paths::evaluation_fetch(review, group_id),
        };
        self.get(&path)
            .await
            .map_err(|e| EvaluationError::Backend(e.user_message()))
    }

    async fn submit_evaluation(
        &self,
        role: Role,
        payload: &EvaluationPayload,
    ) -> Result<SubmitResponse, EvaluationError> {
        let path = match role {
            Role::Mentor => api_paths::MENTOR_EVALUATION,
            _ => api_paths::evaluation_submit(payload.review),
        };
        match self.api_request(Method::POST, path, Some(payload)).await {
            Ok(response) => Ok(response),
            // Rejections carry a message meant for the evaluator.
            Err(ClientError::Status { message, .. }) => Ok(SubmitResponse::failed(message)),
            Err(e) => Err(EvaluationError::Backend(e.user_message())),
        }
    }
}

impl SessionValidator for ApiClient {
    async fn validate(&self, token: &str) -> Result<bool, AuthError> {
        self.validate_token(token)
            .await
            .map(|response| response.valid)
            .map_err(|e| AuthError::Validation(e.to_string()))
    }
}
