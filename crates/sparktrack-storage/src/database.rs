use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sparktrack_core::models::evaluation::EvaluationRecord;
use sparktrack_core::models::group::Group;
use sparktrack_core::models::problem_statement::ProblemStatement;
use sparktrack_core::models::review::ReviewType;
use sparktrack_core::models::user::UserAccount;
use sparktrack_evaluation::resolver::DeadlineRegistry;

use crate::error::StorageError;

/// Everything the server persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    /// Bumped on every committed write.
    #[serde(default)]
    pub revision: u64,
    #[serde(default = "DeadlineRegistry::with_defaults")]
    pub deadlines: DeadlineRegistry,
    #[serde(default)]
    pub groups: BTreeMap<String, Group>,
    #[serde(default)]
    pub evaluations: Vec<EvaluationRecord>,
    #[serde(default)]
    pub problem_statements: BTreeMap<String, ProblemStatement>,
    #[serde(default)]
    pub users: BTreeMap<String, UserAccount>,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            revision: 0,
            deadlines: DeadlineRegistry::with_defaults(),
            groups: BTreeMap::new(),
            evaluations: Vec::new(),
            problem_statements: BTreeMap::new(),
            users: BTreeMap::new(),
        }
    }
}

impl Database {
    pub fn group(&self, group_id: &str) -> Result<&Group, StorageError> {
        self.groups.get(group_id).ok_or_else(|| StorageError::Missing {
            kind: "group",
            id: group_id.to_string(),
        })
    }

    pub fn add_group(&mut self, group: Group) -> Result<(), StorageError> {
        if self.groups.contains_key(&group.group_id) {
            return Err(StorageError::AlreadyExists {
                kind: "group",
                id: group.group_id,
            });
        }
        self.groups.insert(group.group_id.clone(), group);
        Ok(())
    }

    pub fn evaluations(&self, group_id: &str, review: ReviewType) -> Vec<EvaluationRecord> {
        self.evaluations
            .iter()
            .filter(|r| r.group_id == group_id && r.review == review)
            .cloned()
            .collect()
    }

    pub fn all_evaluations(&self, review: ReviewType) -> Vec<&EvaluationRecord> {
        self.evaluations
            .iter()
            .filter(|r| r.review == review)
            .collect()
    }

    /// Whether any student of the group already has a mark for `review`.
    pub fn has_marks(&self, group_id: &str, review: ReviewType) -> bool {
        self.evaluations
            .iter()
            .any(|r| r.group_id == group_id && r.review == review && r.has_any_mark())
    }

    /// Whether evaluation of the group has started in any review.
    pub fn evaluation_started(&self, group_id: &str) -> bool {
        ReviewType::ALL
            .iter()
            .any(|review| self.has_marks(group_id, *review))
    }

    /// Insert or replace the row keyed by (group, review, student).
    pub fn upsert_evaluation(&mut self, record: EvaluationRecord) {
        match self.evaluations.iter_mut().find(|r| {
            r.group_id == record.group_id
                && r.review == record.review
                && r.enrollment_no == record.enrollment_no
        }) {
            Some(existing) => *existing = record,
            None => self.evaluations.push(record),
        }
    }

    pub fn problem_statement(&self, group_id: &str) -> Option<&ProblemStatement> {
        self.problem_statements.get(group_id)
    }

    pub fn put_problem_statement(&mut self, statement: ProblemStatement) {
        self.problem_statements
            .insert(statement.group_id.clone(), statement);
    }

    pub fn user(&self, username: &str) -> Option<&UserAccount> {
        self.users.get(username)
    }

    pub fn put_user(&mut self, user: UserAccount) {
        self.users.insert(user.username.clone(), user);
    }
}
