//! Link-layer addresses.
//!
//! Two address families appear at the notification points: ordinary 48-bit
//! MAC addresses, and the structured grid addresses used by mesh devices
//! (three coordinate octets plus a reserved octet).  Both forms are carried
//! verbatim; only the MAC form can key the address→node map.

use std::fmt;

use crate::error::AddressError;

/// A link-layer address as reported by a device handle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkLayerAddr {
    /// An IEEE 802 48-bit MAC address.
    Mac48([u8; 6]),

    /// A 3-D grid coordinate address (mesh interconnects).
    Grid { x: u8, y: u8, z: u8 },
}

impl LinkLayerAddr {
    /// View this address as a 48-bit MAC.
    ///
    /// # Errors
    ///
    /// Grid addresses have no defined 48-bit form — the conversion is not
    /// yet supported and fails explicitly rather than inventing a zero
    /// address.
    pub fn as_mac48(&self) -> Result<[u8; 6], AddressError> {
        match *self {
            LinkLayerAddr::Mac48(octets) => Ok(octets),
            LinkLayerAddr::Grid { x, y, z } => {
                Err(AddressError::GridConversionUnsupported { x, y, z })
            }
        }
    }

    /// `true` for the MAC-48 family.
    #[inline]
    pub fn is_mac48(&self) -> bool {
        matches!(self, LinkLayerAddr::Mac48(_))
    }
}

impl fmt::Display for LinkLayerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LinkLayerAddr::Mac48(o) => write!(
                f,
                "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                o[0], o[1], o[2], o[3], o[4], o[5]
            ),
            LinkLayerAddr::Grid { x, y, z } => write!(f, "grid({x},{y},{z})"),
        }
    }
}
