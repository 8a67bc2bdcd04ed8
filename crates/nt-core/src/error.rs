//! Core error types.
//!
//! Sub-crates define their own error enums and either wrap these as variants
//! or convert via `From` impls, whichever keeps their error sites clean.

use thiserror::Error;

/// Failures in link-layer address handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Grid addresses carry no defined MAC-48 representation.
    #[error("grid address ({x},{y},{z}) has no 48-bit MAC form (conversion not yet supported)")]
    GridConversionUnsupported { x: u8, y: u8, z: u8 },
}
