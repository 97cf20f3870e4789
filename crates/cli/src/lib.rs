// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cogdbg: a thin operator CLI around the cog-debug daemon. It carries no
//! debugging logic of its own — it discovers/starts the daemon binary,
//! sends one request, and prints the response.

pub mod client;
pub mod daemon_process;
