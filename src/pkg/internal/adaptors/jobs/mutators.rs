use sqlx::PgConnection;

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, NewJob, JOB_COLUMNS};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        JobMutator { conn }
    }

    pub async fn create(&mut self, job: NewJob) -> Result<JobEntry> {
        let sql = format!(
            r#"
            INSERT INTO jobs (company_name, job_title, location, job_type,
                              min_salary, max_salary, deadline, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            JOB_COLUMNS
        );
        let row = sqlx::query_as::<_, JobEntry>(&sql)
            .bind(&job.company_name)
            .bind(&job.job_title)
            .bind(&job.location)
            .bind(&job.job_type)
            .bind(job.min_salary)
            .bind(job.max_salary)
            .bind(job.deadline)
            .bind(&job.description)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::{
        internal::{adaptors::jobs::selectors::JobSelector, filters::FilterCriteria},
        server::state::AppState,
    };

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a migrated postgres at DATABASE_URL"]
    async fn create_then_search_round_trip() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;

        let job = NewJob {
            company_name: "Acme".into(),
            job_title: "Engineer".into(),
            location: "Pune".into(),
            job_type: "Full-Time".into(),
            min_salary: 50000,
            max_salary: 100000,
            deadline: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            description: "Build things".into(),
        };
        let created = JobMutator::new(&mut conn).create(job.clone()).await?;
        assert!(created.id > 0);
        assert_eq!(created.company_name, job.company_name);
        assert_eq!(created.max_salary, job.max_salary);

        let listed = JobSelector::new(&mut conn)
            .search(&FilterCriteria::default())
            .await?;
        let newest = &listed[0];
        assert_eq!(newest.id, created.id);
        assert_eq!(newest.deadline, job.deadline);

        let bounded = JobSelector::new(&mut conn)
            .search(&FilterCriteria {
                min_salary: Some(60000),
                ..Default::default()
            })
            .await?;
        assert!(bounded.iter().any(|entry| entry.id == created.id));

        Ok(())
    }
}
