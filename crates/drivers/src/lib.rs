// SPDX-License-Identifier: MIT

//! Concrete stand-ins for the `cogdbg_core::Driver` capability contract.
//!
//! Real DWARF and DAP engines are out of scope for this crate.
//! `NativeDriver` and `DapDriver` model the capability *profile*
//! each family typically exposes over an in-process fake debuggee, so the
//! dispatcher, session manager and dashboard can be exercised end to end
//! without an external debugger process.

mod debuggee;
pub mod dap;
pub mod native;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use dap::DapDriver;
pub use native::NativeDriver;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{DriverCall, FakeDriver};
