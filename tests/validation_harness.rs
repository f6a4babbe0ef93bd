#![allow(unused)]
//! Signup validator integration harness.
//!
//! # What this covers
//!
//! - **Field rule table**: each rule exercised with rstest cases at and
//!   around its boundary.
//! - **Error collection**: every failing field is reported in one pass, in
//!   form order.
//! - **Normalization**: trimmed values; blank optionals become `None`.
//! - **Wire shape**: the JSON error body the HTTP service returns.
//!
//! # Running
//!
//! ```sh
//! cargo test --test validation_harness
//! ```

mod common;
use common::*;

use gigafter_core::validate::{validate, RawSignupForm};
use gigafter_core::Field;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn valid_form_is_accepted() {
    let signup = validate(&RawFormBuilder::valid().build()).unwrap();
    assert_eq!(signup.establishment_name, "The Blue Note");
    assert_eq!(signup.phone, None);
    assert_eq!(signup.how_heard_about_us, None);
}

#[test]
fn empty_form_flags_every_required_field() {
    assert_field_errors!(
        validate(&RawFormBuilder::empty().build()),
        [
            Field::ContactName,
            Field::Email,
            Field::EstablishmentName,
            Field::AddressLine1,
            Field::City,
            Field::State,
            Field::ZipCode,
        ]
    );
}

#[test]
fn bad_zip_flags_only_zip() {
    assert_field_errors!(validate(&RawFormBuilder::valid().zip("abc").build()), [Field::ZipCode]);
}

#[rstest]
#[case("A", false)]
#[case("Al", true)]
#[case("  A  ", false)]
fn contact_name_needs_two_chars(#[case] name: &str, #[case] ok: bool) {
    let result = validate(&RawFormBuilder::valid().contact(name).build());
    assert_eq!(result.is_ok(), ok, "contact {name:?}");
}

#[rstest]
#[case("ana@bluenote.com", true)]
#[case("ana.ruiz+waitlist@blue-note.co.uk", true)]
#[case("ana@bluenote", false)]
#[case("ana@@bluenote.com", false)]
#[case("@bluenote.com", false)]
#[case("ana bluenote.com", false)]
#[case("", false)]
fn email_syntax(#[case] email: &str, #[case] ok: bool) {
    let result = validate(&RawFormBuilder::valid().email(email).build());
    assert_eq!(result.is_ok(), ok, "email {email:?}");
}

#[rstest]
#[case("1 Ma", false)]
#[case("1 Mai", true)]
fn address_needs_five_chars(#[case] line1: &str, #[case] ok: bool) {
    let result = validate(&RawFormBuilder::valid().address(line1, "").build());
    assert_eq!(result.is_ok(), ok, "address {line1:?}");
}

#[rstest]
#[case("78701", true)]
#[case("78701-1234", true)]
#[case("7870", false)]
#[case("787011", false)]
#[case("78701-12", false)]
#[case("7870a", false)]
fn zip_format(#[case] zip: &str, #[case] ok: bool) {
    let result = validate(&RawFormBuilder::valid().zip(zip).build());
    assert_eq!(result.is_ok(), ok, "zip {zip:?}");
}

#[rstest]
#[case("TX", true)]
#[case("WY", true)]
#[case("tx", false)]
#[case("DC", false)]
#[case("T", false)]
fn state_must_be_a_known_code(#[case] state: &str, #[case] ok: bool) {
    let result = validate(&RawFormBuilder::valid().state(state).build());
    assert_eq!(result.is_ok(), ok, "state {state:?}");
}

#[test]
fn missing_state_reads_required() {
    let errs = validate(&RawFormBuilder::valid().state("").build()).unwrap_err();
    assert_eq!(errs.get(Field::State).unwrap().message, "State is required");
    let errs = validate(&RawFormBuilder::valid().state("ZZ").build()).unwrap_err();
    assert_eq!(errs.get(Field::State).unwrap().message, "Please select a valid state");
}

#[test]
fn values_are_trimmed_and_blanks_dropped() {
    let form = RawFormBuilder::valid()
        .venue("  The Blue Note ")
        .phone("   ")
        .address("100 Main Street", "  ")
        .source(" Social media ")
        .feedback("\n")
        .build();
    let signup = validate(&form).unwrap();
    assert_eq!(signup.establishment_name, "The Blue Note");
    assert_eq!(signup.phone, None);
    assert_eq!(signup.address_line2, None);
    assert_eq!(signup.how_heard_about_us.as_deref(), Some("Social media"));
    assert_eq!(signup.beta_feedback, None);
}

#[test]
fn browser_payload_deserializes() {
    let json = RawFormBuilder::valid().source("Other").to_json();
    let form: RawSignupForm = serde_json::from_value(json).unwrap();
    assert_eq!(form, RawFormBuilder::valid().source("Other").build());
}

#[test]
fn error_body_shape() {
    let errs = validate(&RawFormBuilder::valid().zip("abc").build()).unwrap_err();
    assert_eq!(
        serde_json::to_value(&errs).unwrap(),
        serde_json::json!({
            "errors": [{ "field": "zip_code", "message": "Please enter a valid zip code" }]
        })
    );
}
