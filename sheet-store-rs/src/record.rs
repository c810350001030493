//! Row layouts for the survey and contact sheets
//!
//! Columns are 1-based, matching spreadsheet addressing.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Number of free-text answers on the survey
pub const ANSWER_COUNT: usize = 10;

/// Columns in a survey row
pub const SURVEY_COLUMN_COUNT: usize = 4 + ANSWER_COUNT + 1;

/// Rows taken by the header
pub const HEADER_ROWS: usize = 1;

/// Column holding the first answer (q1)
pub const FIRST_ANSWER_COLUMN: usize = 5;

/// Column holding the generated summary
pub const SUMMARY_COLUMN: usize = 15;

/// Header row written when the survey sheet is created
pub const SURVEY_HEADER: [&str; SURVEY_COLUMN_COUNT] = [
    "タイムスタンプ",
    "医療機関名",
    "役職",
    "お名前",
    "質問①",
    "質問②",
    "質問③",
    "質問④",
    "質問⑤",
    "質問⑥",
    "質問⑦",
    "質問⑧",
    "質問⑨",
    "質問⑩",
    "要約",
];

/// Header row written when the contact sheet is created
pub const CONTACT_HEADER: [&str; 5] = ["タイムスタンプ", "お名前", "メールアドレス", "会社名", "お問い合わせ内容"];

/// Format a timestamp the way every sheet stores it
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One accepted survey submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub timestamp: DateTime<Utc>,
    pub facility: String,
    pub position: String,
    pub name: String,
    pub answers: [String; ANSWER_COUNT],
    pub summary: String,
}

impl SubmissionRecord {
    /// Lay the record out in fixed column order
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(SURVEY_COLUMN_COUNT);
        row.push(format_timestamp(&self.timestamp));
        row.push(self.facility.clone());
        row.push(self.position.clone());
        row.push(self.name.clone());
        row.extend(self.answers.iter().cloned());
        row.push(self.summary.clone());
        row
    }
}

/// One accepted contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactRecord {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.timestamp),
            self.name.clone(),
            self.email.clone(),
            self.company.clone(),
            self.message.clone(),
        ]
    }
}
