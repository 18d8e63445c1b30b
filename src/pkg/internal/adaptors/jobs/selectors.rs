use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::jobs::spec::{JobEntry, JOB_COLUMNS},
    pkg::internal::filters::{Bind, FilterCriteria},
    prelude::Result,
};

pub struct JobSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        JobSelector { conn }
    }

    /// Runs the listing query for the given criteria, newest first. With no
    /// criteria the predicate is empty and every posting comes back.
    pub async fn search(&mut self, criteria: &FilterCriteria) -> Result<Vec<JobEntry>> {
        let predicate = criteria.predicate();
        let sql = format!(
            "SELECT {} FROM jobs {} ORDER BY created_at DESC",
            JOB_COLUMNS,
            predicate.where_clause()
        );
        let mut query = sqlx::query_as::<_, JobEntry>(&sql);
        for bind in predicate.into_binds() {
            query = match bind {
                Bind::Text(value) => query.bind(value),
                Bind::Int(value) => query.bind(value),
            };
        }
        let rows = query.fetch_all(&mut *self.conn).await?;

        Ok(rows)
    }
}
