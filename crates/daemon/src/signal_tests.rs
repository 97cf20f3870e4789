// SPDX-License-Identifier: MIT

use super::*;

fn empty_storage() -> ([AtomicU8; PATH_CAP], AtomicUsize) {
    (make_zeroed_atomics(), AtomicUsize::new(0))
}

#[test]
fn write_then_unlink_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("victim.sock");
    std::fs::write(&target, b"").unwrap();
    assert!(target.exists());

    let (storage, len) = empty_storage();
    write_path(&storage, &len, &target);
    unlink_path(&storage, &len);

    assert!(!target.exists());
}

#[test]
fn unlink_of_unwritten_storage_is_a_no_op() {
    let (storage, len) = empty_storage();
    // Never called write_path; len stays zero, so unlink_path must not
    // attempt to unlink path "" (which would touch an unrelated file).
    unlink_path(&storage, &len);
}

#[test]
fn long_paths_are_truncated_to_the_buffer_capacity_not_overrun() {
    let dir = tempfile::tempdir().unwrap();
    let long_name = "x".repeat(PATH_CAP * 2);
    let target = dir.path().join(long_name);

    let (storage, len) = empty_storage();
    write_path(&storage, &len, &target);
    assert!(len.load(std::sync::atomic::Ordering::Relaxed) <= PATH_CAP - 1);
}

#[test]
fn written_path_round_trips_through_the_atomic_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("a.sock");

    let (storage, len) = empty_storage();
    write_path(&storage, &len, &target);

    let n = len.load(std::sync::atomic::Ordering::Relaxed);
    let mut buf = vec![0u8; n];
    for (slot, atom) in buf.iter_mut().zip(storage.iter()) {
        *slot = atom.load(std::sync::atomic::Ordering::Relaxed);
    }
    assert_eq!(buf, target.as_os_str().as_bytes());
}
