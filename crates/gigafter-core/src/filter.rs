//! Filter engine: narrows the signup list by free-text search and the
//! state / source facets.
//!
//! [`filter`] is a pure function of its inputs and returns an
//! order-preserving subsequence of the records it is given. It runs in a
//! single linear pass; the expected volume (hundreds to low thousands of
//! records) needs no index.

use crate::types::SignupRecord;
use serde::{Deserialize, Serialize};

/// A facet selection: either no restriction, or one specific value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    /// Parse a selector value. The literal `"all"` and the empty string mean
    /// [`Facet::All`]; anything else selects that value.
    pub fn parse(value: &str) -> Self {
        match value {
            "" | "all" => Facet::All,
            other => Facet::Only(other.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Facet::All => None,
            Facet::Only(v) => Some(v),
        }
    }
}

impl From<&str> for Facet {
    fn from(value: &str) -> Self {
        Facet::parse(value)
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facet::All => f.write_str("all"),
            Facet::Only(v) => f.write_str(v),
        }
    }
}

impl Serialize for Facet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Facet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Facet::parse(&raw))
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// The admin view's current search text and facet selections.
///
/// Held only for the lifetime of an admin session; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Matched case-insensitively as a substring of venue name, contact
    /// name, email, or city.
    #[serde(alias = "search")]
    pub search_text: String,
    /// Exact, case-sensitive match on the record's state code.
    #[serde(alias = "state")]
    pub state_filter: Facet,
    /// Case-insensitive match on `how_heard_about_us`.
    #[serde(alias = "source")]
    pub source_filter: Facet,
}

impl FilterCriteria {
    pub fn new(search_text: impl Into<String>, state: Facet, source: Facet) -> Self {
        Self { search_text: search_text.into(), state_filter: state, source_filter: source }
    }

    /// Criteria that match a single record if and only if it satisfies
    /// every active restriction.
    pub fn matches(&self, record: &SignupRecord) -> bool {
        self.matches_search(record) && self.matches_state(record) && self.matches_source(record)
    }

    fn matches_search(&self, record: &SignupRecord) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        [
            &record.establishment_name,
            &record.contact_name,
            &record.email,
            &record.city,
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    fn matches_state(&self, record: &SignupRecord) -> bool {
        match &self.state_filter {
            Facet::All => true,
            Facet::Only(state) => record.state == *state,
        }
    }

    fn matches_source(&self, record: &SignupRecord) -> bool {
        match (&self.source_filter, &record.how_heard_about_us) {
            (Facet::All, _) => true,
            (Facet::Only(_), None) => false,
            (Facet::Only(wanted), Some(source)) => source.to_lowercase() == wanted.to_lowercase(),
        }
    }

    /// True when any restriction is in effect.
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty() || !self.state_filter.is_all() || !self.source_filter.is_all()
    }

    /// Reset to "show everything".
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Records matching `criteria`, in their original relative order.
pub fn filter<'a>(records: &'a [SignupRecord], criteria: &FilterCriteria) -> Vec<&'a SignupRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Positions (into `records`) of the records matching `criteria`, ascending.
pub fn filter_indices(records: &[SignupRecord], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| criteria.matches(r).then_some(i))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
