// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera property and chroma-key control over a shared device session.
//!
//! Two components share one [`DeviceSession`](mrcam_session::DeviceSession):
//!
//! - [`PropertyCycler`] enumerates camera property modes and manual values and
//!   steps a property through its two-tier (mode, value) cycle.
//! - [`LockedConfigStore`] reads and writes chroma-key configuration slots
//!   behind the chroma-key lock, shadowing the lock and enable state locally.
//!
//! Every mutation runs under a try-once lock that is always released. Public
//! operations log failures through `tracing` and report a plain success flag.
//!
//! # Modules
//!
//! - [`cycle`] - Pure state machine deciding value step vs mode step
//! - [`lock`] - [`ResourceLock`] scoped guard
#![forbid(unsafe_code)]

mod camera;
mod chroma;
pub mod cycle;
mod error;
pub mod lock;
mod report;

pub use camera::{find_mode_index, find_value_index, PropertyCycler};
pub use chroma::LockedConfigStore;
pub use cycle::{cycle_period, CyclePosition, CycleStep, Slot};
pub use error::ControlError;
pub use lock::ResourceLock;
pub use report::PropertyReport;
