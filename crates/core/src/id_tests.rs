// SPDX-License-Identifier: MIT

use super::*;

crate::define_id! {
    pub struct TestId;
}

#[test]
fn short_truncates_long_strings() {
    let id = TestId::new("session-12345");
    assert_eq!(id.short(7), "session");
}

#[test]
fn short_leaves_short_strings_untouched() {
    let id = TestId::new("abc");
    assert_eq!(id.short(10), "abc");
}

#[test]
fn display_matches_inner_string() {
    let id = TestId::new("session-1");
    assert_eq!(id.to_string(), "session-1");
}

#[test]
fn equality_against_str() {
    let id = TestId::new("session-1");
    assert_eq!(id, "session-1");
    assert_eq!(id.as_str(), "session-1");
}
