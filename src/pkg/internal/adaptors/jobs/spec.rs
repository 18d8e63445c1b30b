use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const JOB_COLUMNS: &str = "id, company_name, job_title, location, job_type, \
     min_salary, max_salary, deadline, description, created_at";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i32,
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub job_type: String,
    pub min_salary: i64,
    pub max_salary: i64,
    pub deadline: chrono::NaiveDate,
    pub description: String,
    pub created_at: chrono::NaiveDateTime,
}

/// A fully validated posting, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub job_type: String,
    pub min_salary: i64,
    pub max_salary: i64,
    pub deadline: chrono::NaiveDate,
    pub description: String,
}
