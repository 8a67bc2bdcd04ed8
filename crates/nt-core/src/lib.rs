//! `nt-core` — foundational types for the `nettrace` recorder.
//!
//! This crate is a dependency of every other `nt-*` crate.  It intentionally
//! has no `nt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `DeviceId`, `PacketHandle`, `PacketUid`     |
//! | [`time`]    | `SimTime`, `TimeWindow`                               |
//! | [`vector`]  | `Vec3`, position epsilon comparison                   |
//! | [`addr`]    | `LinkLayerAddr` (MAC-48 and grid forms)               |
//! | [`rng`]     | `SimRng` (deterministic, instance-owned)              |
//! | [`error`]   | `AddressError`                                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod addr;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vector;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use addr::LinkLayerAddr;
pub use error::AddressError;
pub use ids::{DeviceId, NodeId, PacketHandle, PacketUid};
pub use rng::SimRng;
pub use time::{SimTime, TimeWindow};
pub use vector::{Vec3, POSITION_EPSILON};
