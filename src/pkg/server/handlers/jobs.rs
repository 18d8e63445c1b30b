use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{
                mutators::JobMutator,
                selectors::JobSelector,
                spec::{JobEntry, NewJob},
            },
            display::JobCard,
            filters::{FilterCriteria, SearchParams},
        },
        server::state::AppState,
    },
    prelude::{Error, Result},
};

/// Candidate posting as submitted by the client. Everything is optional at
/// the serde level so that presence checks produce the API's own error
/// message instead of a deserialization rejection; salaries stay as raw JSON
/// values until the numeric check runs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub min_salary: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub max_salary: Option<Value>,
    pub job_type: Option<String>,
    pub deadline: Option<String>,
    pub description: Option<String>,
}

/// Keeps an explicit JSON `null` distinguishable from an absent field: a
/// null salary is present but fails the numeric check, it is not missing.
fn deserialize_present<'de, D>(deserializer: D) -> core::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn missing(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.is_empty())
}

fn as_whole_number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

impl CreateJobInput {
    /// Checks completeness and numeric sanity, short-circuiting at the first
    /// failure. Order and messages follow the API contract: missing fields,
    /// then non-numeric salaries, then negative salaries, then inverted
    /// bounds. Equal bounds are fine.
    pub fn validate(self) -> Result<NewJob> {
        if missing(&self.company_name)
            || missing(&self.job_title)
            || missing(&self.location)
            || missing(&self.job_type)
            || missing(&self.deadline)
            || missing(&self.description)
            || self.min_salary.is_none()
            || self.max_salary.is_none()
        {
            return Err(Error::validation("Missing required fields"));
        }

        let min_salary = self.min_salary.as_ref().and_then(as_whole_number);
        let max_salary = self.max_salary.as_ref().and_then(as_whole_number);
        let (Some(min_salary), Some(max_salary)) = (min_salary, max_salary) else {
            return Err(Error::validation("Salary fields must be numbers"));
        };

        if min_salary < 0 || max_salary < 0 {
            return Err(Error::validation("Salary fields must be non-negative"));
        }

        if min_salary > max_salary {
            return Err(Error::validation("minSalary cannot be greater than maxSalary"));
        }

        let deadline_raw = self.deadline.unwrap_or_default();
        let deadline = NaiveDate::parse_from_str(&deadline_raw, "%Y-%m-%d")
            .map_err(|_| Error::validation("deadline must be a date (YYYY-MM-DD)"))?;

        Ok(NewJob {
            company_name: self.company_name.unwrap_or_default(),
            job_title: self.job_title.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            job_type: self.job_type.unwrap_or_default(),
            min_salary,
            max_salary,
            deadline,
            description: self.description.unwrap_or_default(),
        })
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<JobEntry>)> {
    let job = input.validate()?;
    let mut conn = state.db_pool.acquire().await?;
    let entry = JobMutator::new(&mut conn).create(job).await?;
    tracing::info!("created job posting {}", entry.id);

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JobEntry>>> {
    let criteria = FilterCriteria::try_from(params)?;
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).search(&criteria).await?;

    Ok(Json(jobs))
}

pub async fn cards(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JobCard>>> {
    let criteria = FilterCriteria::try_from(params)?;
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).search(&criteria).await?;
    let now = Utc::now().naive_utc();
    let cards = jobs.iter().map(|job| JobCard::from_entry(job, now)).collect();

    Ok(Json(cards))
}
