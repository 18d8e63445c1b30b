//! Card shaping for the listing view: compact salary labels, relative
//! posted-at text, and description highlights.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::pkg::internal::adaptors::jobs::spec::JobEntry;

const HIGHLIGHT_WORD_BUDGET: usize = 14;

/// Compact INR salary label: crores per annum above 1e7, lakhs per annum
/// above 1e5, thousands below that.
pub fn salary_label(value: i64) -> String {
    let value = value as f64;
    if value >= 1e7 {
        format!("₹{:.2} CPA", value / 1e7)
    } else if value >= 1e5 {
        format!("₹{:.1} LPA", value / 1e5)
    } else {
        format!("₹{:.0}K", value / 1e3)
    }
}

/// Relative age of a posting, coarsening with distance.
pub fn posted_ago(created_at: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - created_at).num_seconds().max(0);
    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86400)
    }
}

/// Splits a description into trimmed, non-empty lines and keeps them until
/// the word budget runs out. A line that would overflow the budget is cut at
/// the remaining word count and marked with an ellipsis.
pub fn description_bullets(text: &str, max_words: usize) -> Vec<String> {
    let mut bullets = Vec::new();
    let mut word_count = 0;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let words: Vec<&str> = line.split_whitespace().collect();
        if word_count + words.len() <= max_words {
            word_count += words.len();
            bullets.push(line.to_string());
        } else {
            let remaining = max_words - word_count;
            if remaining > 0 {
                bullets.push(format!("{}...", words[..remaining].join(" ")));
            }
            break;
        }
    }

    bullets
}

#[derive(Debug, Serialize)]
pub struct JobCard {
    pub id: i32,
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub posted: String,
    pub highlights: Vec<String>,
}

impl JobCard {
    pub fn from_entry(entry: &JobEntry, now: NaiveDateTime) -> Self {
        JobCard {
            id: entry.id,
            company_name: entry.company_name.clone(),
            job_title: entry.job_title.clone(),
            location: entry.location.clone(),
            job_type: entry.job_type.clone(),
            // postings carry monthly figures; the card shows the annualized
            // max salary
            salary: salary_label(entry.max_salary * 12),
            posted: posted_ago(entry.created_at, now),
            highlights: description_bullets(&entry.description, HIGHLIGHT_WORD_BUDGET),
        }
    }
}
