//! Signup validator: checks a raw form against the field-rule table and
//! produces a normalized [`NewSignup`].
//!
//! Every field is checked; violations are collected rather than returned on
//! the first failure, so the form can flag all offending fields at once.
//!
//! | field | rule |
//! |-------|------|
//! | `contact_name` | at least 2 characters |
//! | `email` | email syntax |
//! | `establishment_name` | at least 2 characters |
//! | `address_line1` | at least 5 characters |
//! | `city` | at least 2 characters |
//! | `state` | at least 2 characters, one of the 50 state codes |
//! | `zip_code` | `NNNNN` or `NNNNN-NNNN` |
//!
//! Values are trimmed before the rules run. Optional fields that are blank
//! after trimming become `None`.

use crate::error::{Field, ValidationError, ValidationErrors};
use crate::types::{is_us_state, NewSignup};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(?:-[0-9]{4})?$").expect("zip pattern is valid"));

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Untrusted signup form input. Missing and `null` fields deserialize as
/// empty strings.
///
/// Keys are accepted in snake_case (storage naming) and in the camelCase
/// used by the browser form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawSignupForm {
    #[serde(alias = "contactName", deserialize_with = "null_as_empty")]
    pub contact_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(alias = "establishmentName", deserialize_with = "null_as_empty")]
    pub establishment_name: String,
    #[serde(alias = "addressLine1", deserialize_with = "null_as_empty")]
    pub address_line1: String,
    #[serde(alias = "addressLine2", deserialize_with = "null_as_empty")]
    pub address_line2: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(alias = "zipCode", deserialize_with = "null_as_empty")]
    pub zip_code: String,
    #[serde(alias = "howHeardAboutUs", deserialize_with = "null_as_empty")]
    pub how_heard_about_us: String,
    #[serde(alias = "betaFeedback", deserialize_with = "null_as_empty")]
    pub beta_feedback: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Syntactic email check.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Five-digit or ZIP+4 code.
pub fn is_valid_zip(zip: &str) -> bool {
    ZIP_RE.is_match(zip)
}

fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Validate `form`, returning the normalized signup or every field error.
pub fn validate(form: &RawSignupForm) -> Result<NewSignup, ValidationErrors> {
    let contact_name = form.contact_name.trim();
    let email = form.email.trim();
    let establishment_name = form.establishment_name.trim();
    let address_line1 = form.address_line1.trim();
    let city = form.city.trim();
    let state = form.state.trim();
    let zip_code = form.zip_code.trim();

    let mut errors = Vec::new();
    let mut check = |ok: bool, field: Field, message: &'static str| {
        if !ok {
            errors.push(ValidationError { field, message });
        }
    };

    check(
        min_chars(contact_name, 2),
        Field::ContactName,
        "Name must be at least 2 characters",
    );
    check(is_valid_email(email), Field::Email, "Please enter a valid email");
    check(
        min_chars(establishment_name, 2),
        Field::EstablishmentName,
        "Establishment name is required",
    );
    check(min_chars(address_line1, 5), Field::AddressLine1, "Address is required");
    check(min_chars(city, 2), Field::City, "City is required");
    if !min_chars(state, 2) {
        check(false, Field::State, "State is required");
    } else {
        check(is_us_state(state), Field::State, "Please select a valid state");
    }
    check(is_valid_zip(zip_code), Field::ZipCode, "Please enter a valid zip code");

    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "signup form rejected");
        return Err(ValidationErrors { errors });
    }

    Ok(NewSignup {
        contact_name: contact_name.to_string(),
        email: email.to_string(),
        phone: optional(&form.phone),
        establishment_name: establishment_name.to_string(),
        address_line1: address_line1.to_string(),
        address_line2: optional(&form.address_line2),
        city: city.to_string(),
        state: state.to_string(),
        zip_code: zip_code.to_string(),
        how_heard_about_us: optional(&form.how_heard_about_us),
        beta_feedback: optional(&form.beta_feedback),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
