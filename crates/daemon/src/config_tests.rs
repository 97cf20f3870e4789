// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn paths_are_namespaced_by_uid() {
    let config = Config::for_uid(1000).unwrap();
    assert_eq!(config.socket_path, PathBuf::from("/tmp/cog-debug-1000.sock"));
    assert_eq!(
        config.dashboard_socket_path,
        PathBuf::from("/tmp/cog-debug-dashboard-1000.sock")
    );
    assert_eq!(config.pid_path, PathBuf::from("/tmp/cog-debug-1000.pid"));
}

#[test]
fn load_picks_up_the_real_uid() {
    let config = Config::load().unwrap();
    assert!(config.socket_path.to_string_lossy().contains("cog-debug-"));
}

#[test]
fn under_roots_paths_at_an_explicit_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::under(dir.path(), 42);
    assert_eq!(config.socket_path, dir.path().join("cog-debug-42.sock"));
    assert!(config.socket_path.starts_with(dir.path()));
}
