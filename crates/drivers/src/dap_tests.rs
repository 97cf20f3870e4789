// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn dap_driver_supports_modules_native_does_not() {
    let dap = DapDriver::new();
    assert!(dap.modules().await.is_ok());
}

#[tokio::test]
async fn dap_driver_lacks_raw_memory_access() {
    let dap = DapDriver::new();
    let err = dap.read_memory(0, 8).await.unwrap_err();
    assert!(matches!(err, DriverError::NotSupported("read_memory")));
}

#[tokio::test]
async fn kind_is_dap() {
    let dap = DapDriver::new();
    assert_eq!(dap.kind(), DriverKind::Dap);
}
