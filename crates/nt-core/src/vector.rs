//! Node position type.
//!
//! Positions use `f64` throughout: the mobility collaborators report double
//! precision, and the serialized output carries the same values, so there is
//! no narrower representation to save memory with.

/// Positions closer than this in every component compare as "not moved".
/// Suppresses event noise from floating-point jitter in mobility models.
pub const POSITION_EPSILON: f64 = 1e-6;

/// A 3-D position in the simulation's coordinate space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise comparison with [`POSITION_EPSILON`] tolerance.
    #[inline]
    pub fn approx_eq(self, other: Vec3) -> bool {
        (self.x - other.x).abs() <= POSITION_EPSILON
            && (self.y - other.y).abs() <= POSITION_EPSILON
            && (self.z - other.z).abs() <= POSITION_EPSILON
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
