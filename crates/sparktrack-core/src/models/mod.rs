pub mod auth;
pub mod deadline;
pub mod evaluation;
pub mod group;
pub mod problem_statement;
pub mod review;
pub mod role;
pub mod session;
pub mod user;
