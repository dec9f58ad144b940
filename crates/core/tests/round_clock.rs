mod common;

use chrono::{TimeZone, Utc};
use common::{at, round_config};
use roundvote_core::domain::round::{RoundAction, RoundClock, RoundKey, round_offset_seconds};

#[test]
fn round_key_is_zero_padded_utc_minute() {
    let t = Utc.with_ymd_and_hms(2026, 3, 5, 7, 4, 59).single().expect("valid");
    assert_eq!(RoundKey::from_time(t).as_str(), "2026-03-05 07:04");
    assert_eq!(round_offset_seconds(t), 59);
}

#[test]
fn same_minute_shares_a_key() {
    assert_eq!(RoundKey::from_time(at(4, 25)), RoundKey::from_time(at(4, 29)));
    assert_ne!(RoundKey::from_time(at(4, 25)), RoundKey::from_time(at(5, 25)));
}

#[test]
fn nothing_is_due_before_the_prepare_offset() {
    let clock = RoundClock::new(&round_config());
    assert_eq!(clock.due(at(4, 0)), None);
    assert_eq!(clock.due(at(4, 24)), None);
}

#[test]
fn prepare_is_due_until_the_finalize_offset() {
    let clock = RoundClock::new(&round_config());
    let key = RoundKey::from_time(at(4, 0));
    assert_eq!(clock.due(at(4, 25)), Some(RoundAction::Prepare(key.clone())));
    assert_eq!(clock.due(at(4, 29)), Some(RoundAction::Prepare(key)));
}

#[test]
fn finalize_is_due_from_its_offset_to_the_end_of_the_round() {
    let clock = RoundClock::new(&round_config());
    assert_eq!(clock.due(at(4, 30)), Some(RoundAction::Finalize));
    assert_eq!(clock.due(at(4, 59)), Some(RoundAction::Finalize));
}

#[test]
fn sub_second_precision_stays_in_the_same_window() {
    let clock = RoundClock::new(&round_config());
    let t = at(4, 29) + chrono::Duration::milliseconds(999);
    assert!(matches!(clock.due(t), Some(RoundAction::Prepare(_))));
}
