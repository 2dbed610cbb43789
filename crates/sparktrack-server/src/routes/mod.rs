pub mod auth;
pub mod deadlines;
pub mod evaluations;
pub mod export;
pub mod groups;
pub mod health;
pub mod problem_statements;
