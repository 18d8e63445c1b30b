use serde::Deserialize;

use crate::prelude::{Error, Result};

/// Search criteria for the job listing, parsed from query parameters.
///
/// The UI always sends every parameter, with empty strings standing in for
/// unset text filters, so presence is decided by non-emptiness rather than
/// by the parameter being absent. Salary bounds arrive as numeric strings;
/// a bound that is present but unparseable is rejected outright instead of
/// being coerced into a nonsense comparison.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub job_type: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub job_type: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_bound(value: Option<String>, name: &str) -> Result<Option<i64>> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::validation(format!("{} must be a number", name))),
    }
}

impl TryFrom<SearchParams> for FilterCriteria {
    type Error = Error;

    fn try_from(params: SearchParams) -> Result<Self> {
        Ok(FilterCriteria {
            job_type: non_empty(params.job_type),
            job_title: non_empty(params.job_title),
            location: non_empty(params.location),
            min_salary: parse_bound(params.min_salary, "minSalary")?,
            max_salary: parse_bound(params.max_salary, "maxSalary")?,
        })
    }
}

/// A bound value for one `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Text(String),
    Int(i64),
}

/// Accumulates (condition, bound value) pairs and renders them as a
/// parameterized `WHERE` clause. Values only ever travel through binds;
/// nothing user-supplied is interpolated into the SQL text.
#[derive(Debug, Default)]
pub struct FilterQuery {
    conditions: Vec<String>,
    binds: Vec<Bind>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&mut self, value: Bind) -> usize {
        self.binds.push(value);
        self.binds.len()
    }

    /// Case-insensitive substring match on a column.
    pub fn contains(&mut self, column: &str, needle: &str) {
        let n = self.bind(Bind::Text(format!("%{}%", needle)));
        self.conditions.push(format!("{} ILIKE ${}", column, n));
    }

    /// Inclusive range match on a column.
    pub fn between(&mut self, column: &str, lo: i64, hi: i64) {
        let a = self.bind(Bind::Int(lo));
        let b = self.bind(Bind::Int(hi));
        self.conditions.push(format!("{} BETWEEN ${} AND ${}", column, a, b));
    }

    pub fn at_least(&mut self, column: &str, lo: i64) {
        let n = self.bind(Bind::Int(lo));
        self.conditions.push(format!("{} >= ${}", column, n));
    }

    pub fn at_most(&mut self, column: &str, hi: i64) {
        let n = self.bind(Bind::Int(hi));
        self.conditions.push(format!("{} <= ${}", column, n));
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Renders `WHERE c1 AND c2 AND ...`, or an empty string when no
    /// criteria were supplied so the caller's SELECT stays unfiltered.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn into_binds(self) -> Vec<Bind> {
        self.binds
    }
}

impl FilterCriteria {
    /// Builds the listing predicate: substring matches on job type, title
    /// and location, plus a salary window compared against the posting's
    /// max_salary. All supplied criteria are ANDed together.
    pub fn predicate(&self) -> FilterQuery {
        let mut query = FilterQuery::new();
        if let Some(job_type) = &self.job_type {
            query.contains("job_type", job_type);
        }
        if let Some(job_title) = &self.job_title {
            query.contains("job_title", job_title);
        }
        if let Some(location) = &self.location {
            query.contains("location", location);
        }
        match (self.min_salary, self.max_salary) {
            (Some(lo), Some(hi)) => query.between("max_salary", lo, hi),
            (Some(lo), None) => query.at_least("max_salary", lo),
            (None, Some(hi)) => query.at_most("max_salary", hi),
            (None, None) => {}
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        job_type: &str,
        job_title: &str,
        location: &str,
        min_salary: &str,
        max_salary: &str,
    ) -> SearchParams {
        SearchParams {
            job_type: Some(job_type.into()),
            job_title: Some(job_title.into()),
            location: Some(location.into()),
            min_salary: Some(min_salary.into()),
            max_salary: Some(max_salary.into()),
        }
    }

    #[test]
    fn empty_criteria_renders_no_predicate() {
        let criteria = FilterCriteria::default();
        let query = criteria.predicate();
        assert!(query.is_empty());
        assert_eq!(query.where_clause(), "");
        assert!(query.into_binds().is_empty());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let criteria = FilterCriteria::try_from(params("", "", "", "", "")).unwrap();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn substring_criteria_render_ilike_in_order() {
        let criteria =
            FilterCriteria::try_from(params("Full-Time", "Engineer", "Pune", "", "")).unwrap();
        let query = criteria.predicate();
        assert_eq!(
            query.where_clause(),
            "WHERE job_type ILIKE $1 AND job_title ILIKE $2 AND location ILIKE $3"
        );
        assert_eq!(
            query.into_binds(),
            vec![
                Bind::Text("%Full-Time%".into()),
                Bind::Text("%Engineer%".into()),
                Bind::Text("%Pune%".into()),
            ]
        );
    }

    #[test]
    fn both_salary_bounds_render_between() {
        let criteria =
            FilterCriteria::try_from(params("", "", "", "50000", "100000")).unwrap();
        let query = criteria.predicate();
        assert_eq!(query.where_clause(), "WHERE max_salary BETWEEN $1 AND $2");
        assert_eq!(query.into_binds(), vec![Bind::Int(50000), Bind::Int(100000)]);
    }

    #[test]
    fn single_salary_bound_renders_one_sided_comparison() {
        let lo = FilterCriteria::try_from(params("", "", "", "60000", "")).unwrap();
        assert_eq!(lo.predicate().where_clause(), "WHERE max_salary >= $1");

        let hi = FilterCriteria::try_from(params("", "", "", "", "60000")).unwrap();
        assert_eq!(hi.predicate().where_clause(), "WHERE max_salary <= $1");
    }

    #[test]
    fn text_and_salary_criteria_share_the_placeholder_sequence() {
        let criteria =
            FilterCriteria::try_from(params("", "Engineer", "", "50000", "100000")).unwrap();
        let query = criteria.predicate();
        assert_eq!(
            query.where_clause(),
            "WHERE job_title ILIKE $1 AND max_salary BETWEEN $2 AND $3"
        );
        assert_eq!(
            query.into_binds(),
            vec![
                Bind::Text("%Engineer%".into()),
                Bind::Int(50000),
                Bind::Int(100000),
            ]
        );
    }

    #[test]
    fn malformed_salary_bound_is_rejected() {
        let err = FilterCriteria::try_from(params("", "", "", "lots", "")).unwrap_err();
        assert!(matches!(err, Error::Validation(ref reason) if reason.contains("minSalary")));

        let err = FilterCriteria::try_from(params("", "", "", "", "1e5")).unwrap_err();
        assert!(matches!(err, Error::Validation(ref reason) if reason.contains("maxSalary")));
    }
}
