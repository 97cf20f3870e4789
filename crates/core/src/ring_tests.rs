// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn overflow_keeps_last_n_oldest_first() {
    let mut log: RingLog<String> = RingLog::new(16);
    for i in 0..20 {
        log.push(format!("tool_{i}"));
    }
    assert_eq!(log.count(), 16);
    let got: Vec<&String> = log.iter().collect();
    let expected: Vec<String> = (4..20).map(|i| format!("tool_{i}")).collect();
    assert_eq!(got, expected.iter().collect::<Vec<_>>());
}

#[test]
fn below_capacity_keeps_everything() {
    let mut log: RingLog<i32> = RingLog::new(16);
    log.push(1);
    log.push(2);
    log.push(3);
    assert_eq!(log.count(), 3);
    assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn zero_capacity_is_always_empty() {
    let mut log: RingLog<i32> = RingLog::new(0);
    log.push(1);
    log.push(2);
    assert_eq!(log.count(), 0);
    assert!(log.is_empty());
}

#[test]
fn default_uses_shared_capacity_constant() {
    let log: RingLog<i32> = RingLog::default();
    assert_eq!(log.capacity(), crate::limits::RING_LOG_CAPACITY);
}
