//! Core types for gigafter-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! stored [`SignupRecord`], the validated [`NewSignup`] awaiting insert, and
//! the static option lists (state codes, "how did you hear about us")
//! offered by the signup form.
//!
//! Field names are snake_case so the serde representation matches the
//! column names of the `waitlist_signups` table one-to-one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the table holding waitlist applications.
pub const SIGNUPS_TABLE: &str = "waitlist_signups";

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Opaque record identifier assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignupId(pub String);

impl std::fmt::Display for SignupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SignupId {
    fn from(s: &str) -> Self {
        SignupId(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One venue's waitlist application as held by the record store.
///
/// Records are created exactly once by a successful form submission and are
/// never mutated afterwards. Optional fields are `None` when the applicant
/// left them blank; they are never stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRecord {
    pub id: SignupId,
    pub created_at: DateTime<Utc>,
    pub contact_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub establishment_name: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub how_heard_about_us: Option<String>,
    #[serde(default)]
    pub beta_feedback: Option<String>,
}

impl SignupRecord {
    /// Build a stored record from a validated submission plus the
    /// store-assigned identity.
    pub fn from_new(id: SignupId, created_at: DateTime<Utc>, new: NewSignup) -> Self {
        Self {
            id,
            created_at,
            contact_name: new.contact_name,
            email: new.email,
            phone: new.phone,
            establishment_name: new.establishment_name,
            address_line1: new.address_line1,
            address_line2: new.address_line2,
            city: new.city,
            state: new.state,
            zip_code: new.zip_code,
            how_heard_about_us: new.how_heard_about_us,
            beta_feedback: new.beta_feedback,
        }
    }

    /// Street address on one line: `address_line1`, followed by a single
    /// space and `address_line2` when one was given.
    pub fn full_address(&self) -> String {
        match &self.address_line2 {
            Some(line2) => format!("{} {}", self.address_line1, line2),
            None => self.address_line1.clone(),
        }
    }
}

/// A validated signup ready to be inserted. Produced only by
/// [`validate`](crate::validate::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSignup {
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub establishment_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub how_heard_about_us: Option<String>,
    pub beta_feedback: Option<String>,
}

// ---------------------------------------------------------------------------
// Form option lists
// ---------------------------------------------------------------------------

/// The 50 US state codes in the order the state selectors list them.
pub const US_STATE_CODES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", //
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD", //
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", //
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", //
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

static US_STATES: phf::Set<&'static str> = phf::phf_set! {
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA",
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD",
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC",
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
};

/// Returns true for one of the 50 upper-case US state codes.
pub fn is_us_state(code: &str) -> bool {
    US_STATES.contains(code)
}

/// Answers offered by the "how did you hear about us" selector. The field
/// itself is free text; these are suggestions only.
pub const HOW_HEARD_OPTIONS: [&str; 5] = [
    "Social media",
    "Word of mouth",
    "Search engine",
    "Event or conference",
    "Other",
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_set_matches_ordered_list() {
        assert_eq!(US_STATES.len(), US_STATE_CODES.len());
        for code in US_STATE_CODES {
            assert!(is_us_state(code), "{code} missing from set");
        }
        assert!(!is_us_state("DC"));
        assert!(!is_us_state("tx"));
    }

    #[test]
    fn record_deserializes_with_absent_optionals() {
        let json = r#"{
            "id": "7d1c",
            "created_at": "2025-11-02T18:30:00Z",
            "contact_name": "Sarah Mitchell",
            "email": "sarah@bluenote.com",
            "establishment_name": "Blue Note",
            "address_line1": "131 W 3rd St",
            "city": "Austin",
            "state": "TX",
            "zip_code": "78701",
            "phone": null
        }"#;
        let record: SignupRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, SignupId::from("7d1c"));
        assert_eq!(record.phone, None);
        assert_eq!(record.beta_feedback, None);
        assert_eq!(record.full_address(), "131 W 3rd St");
    }

    #[test]
    fn full_address_joins_second_line() {
        let json = r#"{
            "id": "1", "created_at": "2025-11-02T18:30:00Z",
            "contact_name": "Marcus Chen", "email": "marcus@jazz.com",
            "establishment_name": "Jazz Hall", "address_line1": "1600 Blake St",
            "address_line2": "Suite 100", "city": "Denver", "state": "CO",
            "zip_code": "80202"
        }"#;
        let record: SignupRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.full_address(), "1600 Blake St Suite 100");
    }
}
