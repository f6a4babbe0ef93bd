//! Domain-specific assertion macros for gigafter harnesses.
//!
//! These add context to failures: which ids were expected versus present,
//! or which field errors a rejected form actually carried.

use gigafter_core::SignupRecord;

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Read an export back with the `csv` crate, header row included.
pub fn csv_rows(input: &str) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(input.as_bytes())
        .records()
        .map(|record| record.expect("export is valid CSV").iter().map(str::to_string).collect())
        .collect()
}

// ---------------------------------------------------------------------------
// Filter result assertions
// ---------------------------------------------------------------------------

/// Assert that a filter result holds exactly these record ids, in order.
///
/// ```rust
/// assert_ids!(filter(&records, &criteria), ["1", "3"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($results:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<String> = $results.iter().map(|r| r.id.0.clone()).collect();
        let expected: Vec<String> = vec![$($id.to_string()),*];
        if actual != expected {
            panic!(
                "assert_ids! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

/// Assert that every record in a result set satisfies a predicate.
///
/// ```rust
/// assert_all_match!(results, |r| r.state == "TX");
/// ```
#[macro_export]
macro_rules! assert_all_match {
    ($results:expr, $pred:expr) => {{
        let pred = $pred;
        let failing: Vec<&str> = $results
            .iter()
            .filter(|r| !pred(r))
            .map(|r| r.id.0.as_str())
            .collect();
        if !failing.is_empty() {
            panic!(
                "assert_all_match! failed: {} of {} records did not satisfy predicate: {:?}",
                failing.len(),
                $results.len(),
                failing
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Validation assertions
// ---------------------------------------------------------------------------

/// Assert that a validation result failed on exactly these fields.
///
/// ```rust
/// assert_field_errors!(validate(&form), [Field::Email, Field::ZipCode]);
/// ```
#[macro_export]
macro_rules! assert_field_errors {
    ($result:expr, [$($field:expr),* $(,)?]) => {{
        let expected: Vec<gigafter_core::Field> = vec![$($field),*];
        match $result {
            Ok(signup) => panic!(
                "assert_field_errors! failed: form was accepted.\n  expected errors on: {:?}\n  signup: {:?}",
                expected, signup
            ),
            Err(errs) => {
                let actual: Vec<gigafter_core::Field> =
                    errs.errors.iter().map(|e| e.field).collect();
                if actual != expected {
                    panic!(
                        "assert_field_errors! failed:\n  expected: {:?}\n  actual:   {:?}\n  messages: {:?}",
                        expected,
                        actual,
                        errs.errors.iter().map(|e| e.message).collect::<Vec<_>>()
                    );
                }
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// True when `needle` occurs case-insensitively in one of the searchable
/// columns of `record`.
pub fn searchable_contains(record: &SignupRecord, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [&record.establishment_name, &record.contact_name, &record.email, &record.city]
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}
