//! Physical properties of objects.

use serde::{Deserialize, Serialize};

/// Bounding box of a rigid object, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width.
    pub x: f64,
    /// Depth.
    pub y: f64,
    /// Height.
    pub z: f64,
}

impl Dimensions {
    /// Create a bounding box.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The three extents, smallest first.
    #[must_use]
    pub fn sorted(&self) -> [f64; 3] {
        let mut extents = [self.x, self.y, self.z];
        extents.sort_by(f64::total_cmp);
        extents
    }
}

/// Mass, volume and shape of an object.
///
/// Non-rigid containers grow: their mass and volume include whatever has
/// been put into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProfile {
    /// What it is made of (`ferrum`, `lāna` …).
    pub material: String,
    /// Mass in kilograms.
    pub mass: f64,
    /// Volume in litres.
    pub volume: f64,
    /// Rigid objects keep their shape and are fit by dimensions.
    pub rigid: bool,
    /// Bounding box, for rigid objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

impl PhysicalProfile {
    /// A soft object of the given mass and volume.
    #[must_use]
    pub fn soft(material: &str, mass: f64, volume: f64) -> Self {
        Self {
            material: material.to_string(),
            mass,
            volume,
            rigid: false,
            dimensions: None,
        }
    }

    /// A rigid object, optionally with a bounding box.
    #[must_use]
    pub fn rigid(material: &str, mass: f64, volume: f64, dimensions: Option<Dimensions>) -> Self {
        Self {
            material: material.to_string(),
            mass,
            volume,
            rigid: true,
            dimensions,
        }
    }
}
