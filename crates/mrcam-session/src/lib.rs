// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Device session port for the mixed-reality camera runtime.
//!
//! This crate defines the contract between client-side control code and the
//! closed-source runtime. It contains NO control logic; that lives in
//! `mrcam-control`.
//!
//! # Design Principles
//!
//! - **The runtime is authoritative**: Every value here is a transient view of
//!   live device state. Nothing is cached or persisted by this crate.
//! - **C calling convention, Rust types**: Calls return plain values and park
//!   failures in a per-session error slot, exactly like the runtime does.
//!   [`DeviceSessionExt::checked`] turns that into a `Result`.
//! - **Locks are cross-process**: [`DeviceSession::lock`] is a try-acquire
//!   brokered by the runtime. It never blocks and may fail at any time.

mod chroma;
mod error;
mod port;
mod property;

pub use chroma::{ChromaKeyConfig, HsvParams};
pub use error::{DeviceError, ErrorCode};
pub use port::{DeviceSession, DeviceSessionExt, LockType};
pub use property::{
    ParsePropertyTypeError, PropertyConfigType, PropertyDataType, PropertyMode, PropertyType,
    PropertyValue,
};
