//! Export formatter: serializes signup records into a CSV payload with a
//! fixed column schema.
//!
//! Every cell is wrapped in double quotes and embedded quotes are doubled
//! (RFC 4180), so free-text fields such as beta feedback cannot break the
//! row structure. Rows are joined with `\n` and there is no trailing newline;
//! an empty record set produces the header row alone.

use crate::types::SignupRecord;
use chrono::{FixedOffset, NaiveDate};

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 11] = [
    "Signup Date",
    "Venue Name",
    "Contact Name",
    "Email",
    "Phone",
    "Address",
    "City",
    "State",
    "Zip",
    "Source",
    "Beta Feedback",
];

/// MIME type offered with the download.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// `created_at` rendering in the "Signup Date" column.
pub const SIGNUP_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A ready-to-download CSV artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

impl CsvExport {
    /// Format `records` and name the file after `today`.
    pub fn new(records: &[&SignupRecord], offset: FixedOffset, today: NaiveDate) -> Self {
        Self {
            filename: export_filename(today),
            content_type: CSV_CONTENT_TYPE,
            body: to_csv(records, offset),
        }
    }
}

/// `waitlist-signups-<YYYY-MM-DD>.csv`
pub fn export_filename(today: NaiveDate) -> String {
    format!("waitlist-signups-{}.csv", today.format("%Y-%m-%d"))
}

/// Wrap `value` in quotes, doubling any quote characters inside it.
pub fn quote_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Cell values of one record, in [`CSV_HEADERS`] order.
pub fn row_fields(record: &SignupRecord, offset: FixedOffset) -> [String; 11] {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        record.created_at.with_timezone(&offset).format(SIGNUP_DATE_FORMAT).to_string(),
        record.establishment_name.clone(),
        record.contact_name.clone(),
        record.email.clone(),
        opt(&record.phone),
        record.full_address(),
        record.city.clone(),
        record.state.clone(),
        record.zip_code.clone(),
        opt(&record.how_heard_about_us),
        opt(&record.beta_feedback),
    ]
}

fn join_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|c| quote_field(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize `records` to CSV. Dates are rendered in `offset`.
pub fn to_csv(records: &[&SignupRecord], offset: FixedOffset) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(CSV_HEADERS));
    lines.extend(records.iter().map(|r| join_row(row_fields(r, offset))));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
