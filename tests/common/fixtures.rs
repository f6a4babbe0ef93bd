//! Static record sets used across harnesses.

use super::builders::SignupRecordBuilder;
use chrono::{FixedOffset, TimeZone, Utc};
use gigafter_core::SignupRecord;

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// The two-venue scenario: an Austin club found by word of mouth and a
/// Denver hall found through social media.
pub fn two_venues() -> Vec<SignupRecord> {
    vec![
        SignupRecordBuilder::new("1", "Blue Note")
            .contact("Sarah Mitchell")
            .email("sarah@bluenote.com")
            .city("Austin")
            .state("TX")
            .source("Word of mouth")
            .build(),
        SignupRecordBuilder::new("2", "Jazz Hall")
            .contact("Marcus Chen")
            .email("marcus@jazz.com")
            .city("Denver")
            .state("CO")
            .zip("80202")
            .source("Social media")
            .build(),
    ]
}

/// A mixed set, newest first, covering every source value, missing
/// optionals, a second address line, and feedback that needs CSV quoting.
pub fn waitlist() -> Vec<SignupRecord> {
    let at = |d, h| Utc.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap();
    vec![
        SignupRecordBuilder::new("w6", "Red Rocks Lounge")
            .created_at(at(20, 22))
            .contact("Priya Patel")
            .email("priya@redrocks.co")
            .phone("303-555-0100")
            .city("Morrison")
            .state("CO")
            .zip("80465")
            .source("Event or conference")
            .feedback("Need \"split payouts\", and\nmultiple stages")
            .build(),
        SignupRecordBuilder::new("w5", "Blue Bayou")
            .created_at(at(19, 15))
            .contact("Luc Martin")
            .email("luc@bluebayou.com")
            .city("New Orleans")
            .state("LA")
            .zip("70112")
            .source("Word of mouth")
            .build(),
        SignupRecordBuilder::new("w4", "The Basement")
            .created_at(at(18, 12))
            .contact("Kim Cho")
            .email("kim@basement.net")
            .address("12 Elm Street", Some("Unit B"))
            .city("Nashville")
            .state("TN")
            .zip("37201-1234")
            .source("social media")
            .build(),
        SignupRecordBuilder::new("w3", "Austin City Stage")
            .created_at(at(17, 9))
            .contact("Jo Adams")
            .email("jo@acstage.com")
            .state("TX")
            .source("Search engine")
            .feedback("Looking forward to it")
            .build(),
        SignupRecordBuilder::new("w2", "Denver Jazz Hall")
            .created_at(at(16, 20))
            .contact("Sam Lee")
            .email("sam@jazzhall.com")
            .city("Denver")
            .state("CO")
            .zip("80202")
            .build(),
        SignupRecordBuilder::new("w1", "The Blue Note")
            .created_at(at(15, 18))
            .state("TX")
            .source("Social media")
            .build(),
    ]
}
