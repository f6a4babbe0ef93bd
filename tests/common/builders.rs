//! Test builders: ergonomic constructors for records and raw forms.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use chrono::{DateTime, TimeZone, Utc};
use gigafter_core::validate::RawSignupForm;
use gigafter_core::{SignupId, SignupRecord};

// ---------------------------------------------------------------------------
// SignupRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`SignupRecord`] fixtures.
///
/// # Example
///
/// ```rust
/// let record = SignupRecordBuilder::new("1", "The Blue Note")
///     .state("TX")
///     .source("Social media")
///     .build();
/// ```
pub struct SignupRecordBuilder {
    record: SignupRecord,
}

impl SignupRecordBuilder {
    pub fn new(id: &str, venue: &str) -> Self {
        Self {
            record: SignupRecord {
                id: SignupId::from(id),
                created_at: Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0).unwrap(),
                contact_name: "Ana Ruiz".to_string(),
                email: "ana@venue.com".to_string(),
                phone: None,
                establishment_name: venue.to_string(),
                address_line1: "100 Main Street".to_string(),
                address_line2: None,
                city: "Austin".to_string(),
                state: "TX".to_string(),
                zip_code: "78701".to_string(),
                how_heard_about_us: None,
                beta_feedback: None,
            },
        }
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.record.created_at = at;
        self
    }

    pub fn contact(mut self, name: &str) -> Self {
        self.record.contact_name = name.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.record.email = email.to_string();
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.record.phone = Some(phone.to_string());
        self
    }

    pub fn address(mut self, line1: &str, line2: Option<&str>) -> Self {
        self.record.address_line1 = line1.to_string();
        self.record.address_line2 = line2.map(str::to_string);
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.record.city = city.to_string();
        self
    }

    pub fn state(mut self, state: &str) -> Self {
        self.record.state = state.to_string();
        self
    }

    pub fn zip(mut self, zip: &str) -> Self {
        self.record.zip_code = zip.to_string();
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.record.how_heard_about_us = Some(source.to_string());
        self
    }

    pub fn feedback(mut self, text: &str) -> Self {
        self.record.beta_feedback = Some(text.to_string());
        self
    }

    pub fn build(self) -> SignupRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// RawFormBuilder
// ---------------------------------------------------------------------------

/// Builder for [`RawSignupForm`], starting from a form that passes every rule.
pub struct RawFormBuilder {
    form: RawSignupForm,
}

impl RawFormBuilder {
    pub fn valid() -> Self {
        Self {
            form: RawSignupForm {
                contact_name: "Ana Ruiz".to_string(),
                email: "ana@bluenote.com".to_string(),
                establishment_name: "The Blue Note".to_string(),
                address_line1: "100 Main Street".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                zip_code: "78701".to_string(),
                ..RawSignupForm::default()
            },
        }
    }

    pub fn empty() -> Self {
        Self { form: RawSignupForm::default() }
    }

    pub fn contact(mut self, v: &str) -> Self {
        self.form.contact_name = v.to_string();
        self
    }

    pub fn email(mut self, v: &str) -> Self {
        self.form.email = v.to_string();
        self
    }

    pub fn phone(mut self, v: &str) -> Self {
        self.form.phone = v.to_string();
        self
    }

    pub fn venue(mut self, v: &str) -> Self {
        self.form.establishment_name = v.to_string();
        self
    }

    pub fn address(mut self, line1: &str, line2: &str) -> Self {
        self.form.address_line1 = line1.to_string();
        self.form.address_line2 = line2.to_string();
        self
    }

    pub fn city(mut self, v: &str) -> Self {
        self.form.city = v.to_string();
        self
    }

    pub fn state(mut self, v: &str) -> Self {
        self.form.state = v.to_string();
        self
    }

    pub fn zip(mut self, v: &str) -> Self {
        self.form.zip_code = v.to_string();
        self
    }

    pub fn source(mut self, v: &str) -> Self {
        self.form.how_heard_about_us = v.to_string();
        self
    }

    pub fn feedback(mut self, v: &str) -> Self {
        self.form.beta_feedback = v.to_string();
        self
    }

    pub fn build(self) -> RawSignupForm {
        self.form
    }

    /// The form as the browser would post it (camelCase keys).
    pub fn to_json(&self) -> serde_json::Value {
        let f = &self.form;
        serde_json::json!({
            "contactName": f.contact_name,
            "email": f.email,
            "phone": f.phone,
            "establishmentName": f.establishment_name,
            "addressLine1": f.address_line1,
            "addressLine2": f.address_line2,
            "city": f.city,
            "state": f.state,
            "zipCode": f.zip_code,
            "howHeardAboutUs": f.how_heard_about_us,
            "betaFeedback": f.beta_feedback,
        })
    }
}
