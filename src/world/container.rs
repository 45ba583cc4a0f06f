//! Container fit model.
//!
//! A container has a fixed capacity and tracks the volume still free. An
//! object fits when its volume is at most the free volume and, for rigid
//! objects with a known shape, its sorted extents fit the container's sorted
//! extents. The longest extent may stick out of the container by up to half
//! its length, so it may be as long as twice the container's middle extent.

use serde::{Deserialize, Serialize};

use crate::world::physical::{Dimensions, PhysicalProfile};

/// Capacity bookkeeping of a container.
///
/// `0 <= remaining_volume <= max_volume`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerState {
    /// Total capacity in litres.
    pub max_volume: f64,
    /// Free capacity in litres.
    pub remaining_volume: f64,
    /// Inner extents, if the opening constrains shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

/// Outcome of a fit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// The object fits.
    Fits,
    /// Not enough free volume.
    TooBig,
    /// The longest extent would stick out more than half.
    NotTallEnough,
    /// One of the two shorter extents does not fit.
    WrongShape,
}

impl ContainerState {
    /// An empty container.
    #[must_use]
    pub fn new(max_volume: f64, dimensions: Option<Dimensions>) -> Self {
        Self {
            max_volume,
            remaining_volume: max_volume,
            dimensions,
        }
    }

    /// Volume taken up by contents.
    #[must_use]
    pub fn used_volume(&self) -> f64 {
        self.max_volume - self.remaining_volume
    }

    /// Check whether an object fits right now.
    #[must_use]
    pub fn check_fit(&self, target: &PhysicalProfile) -> Fit {
        if target.volume > self.remaining_volume {
            return Fit::TooBig;
        }

        match (target.rigid, target.dimensions, self.dimensions) {
            (true, Some(item), Some(inner)) => fit_shape(&item, &inner),
            _ => Fit::Fits,
        }
    }

    /// Take up `volume`. Callers check the fit first.
    ///
    /// Returns `false` if `volume` did not fit; the free volume then stays
    /// at zero.
    #[must_use]
    pub(crate) fn insert(&mut self, volume: f64) -> bool {
        let fitted = volume <= self.remaining_volume;
        self.remaining_volume = (self.remaining_volume - volume).max(0.0);
        fitted
    }

    /// Free `volume`.
    pub(crate) fn extract(&mut self, volume: f64) {
        self.remaining_volume = (self.remaining_volume + volume).min(self.max_volume);
    }
}

/// Compare sorted extents.
#[must_use]
pub fn fit_shape(item: &Dimensions, inner: &Dimensions) -> Fit {
    let [item_short, item_mid, item_long] = item.sorted();
    let [inner_short, inner_mid, inner_long] = inner.sorted();

    if item_long > inner_long && item_long > 2.0 * inner_mid {
        return Fit::NotTallEnough;
    }
    if item_short > inner_short || item_mid > inner_mid {
        return Fit::WrongShape;
    }
    Fit::Fits
}
