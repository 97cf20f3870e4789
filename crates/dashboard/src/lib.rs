// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cogdbg-dashboard: the dashboard process — a separate
//! terminal UI that accepts event streams from one or more daemons,
//! maintains per-session view models, and renders an in-place multi-pane
//! TUI.
//!
//! The `cogdbg-dashboard` binary (`src/main.rs`) wires this library's
//! pieces (config, raw-mode terminal, accept loop, view model, renderer)
//! together with logging.

pub mod config;
pub mod events;
pub mod keyboard;
pub mod limits;
pub mod listener;
pub mod render;
pub mod sidebar;
pub mod signal;
pub mod source;
pub mod state;
pub mod terminal;

pub use config::{Config, ConfigError};
pub use state::DashboardState;
