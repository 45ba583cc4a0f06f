//! World configuration.
//!
//! Every table the rules consult (clothing types and limits, carrying
//! factors, character-creation points, wander timing) lives here so a game
//! can retune them from a TOML file. Every field has a default, so an empty
//! file is a valid configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Clothing type rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothingConfig {
    /// Display order of clothing types. Unlisted types go last.
    pub type_order: Vec<String>,
    /// Maximum number of garments of a type worn at once.
    pub type_limits: BTreeMap<String, usize>,
    /// Maximum number of garments worn at once.
    pub overall_limit: Option<usize>,
    /// Types that a newly worn type covers when they are already worn.
    pub autocover: BTreeMap<String, Vec<String>>,
    /// Types that never cover anything.
    pub cant_cover_with: Vec<String>,
}

impl Default for ClothingConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(ToString::to_string).collect::<Vec<_>>();

        let type_order = strings(&[
            "hat",
            "cloak",
            "jewelry",
            "top",
            "undershirt",
            "gloves",
            "fullbody",
            "shoulder",
            "bottom",
            "underpants",
            "socks",
            "shoes",
            "accessory",
        ]);

        let type_limits = [
            ("hat", 1),
            ("gloves", 1),
            ("socks", 1),
            ("shoes", 1),
            ("cloak", 1),
            ("undershirt", 1),
            ("bottom", 1),
            ("underpants", 1),
            ("fullbody", 2),
            ("shoulder", 2),
        ]
        .into_iter()
        .map(|(kind, limit)| (kind.to_string(), limit))
        .collect();

        let autocover = [
            ("top", strings(&["undershirt"])),
            ("bottom", strings(&["underpants"])),
            ("fullbody", strings(&["undershirt", "underpants"])),
            ("shoes", strings(&["socks"])),
        ]
        .into_iter()
        .map(|(kind, covered)| (kind.to_string(), covered))
        .collect();

        Self {
            type_order,
            type_limits,
            overall_limit: Some(20),
            autocover,
            cant_cover_with: strings(&["jewelry"]),
        }
    }
}

/// Carrying capacity derived from strength.
///
/// Each limit is `round1(strength × multiplier × factor)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryConfig {
    /// Kilograms per point of strength and multiplier.
    pub factor: f64,
    /// Multiplier for the most that can be lifted briefly.
    pub lift: f64,
    /// Multiplier for the encumbered threshold.
    pub encumbered: f64,
    /// Multiplier for the heavily encumbered threshold.
    pub heavily_encumbered: f64,
    /// Multiplier for the carrying maximum.
    pub max: f64,
}

impl Default for CarryConfig {
    fn default() -> Self {
        Self {
            factor: 0.45,
            lift: 30.0,
            encumbered: 5.0,
            heavily_encumbered: 10.0,
            max: 15.0,
        }
    }
}

/// Character creation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargenConfig {
    /// Points spent at random over the six abilities.
    pub ability_points: u32,
    /// Added to every ability after spending.
    pub ability_base: u32,
    /// Probability that a new character is left-handed.
    pub left_handed_chance: f64,
}

impl Default for ChargenConfig {
    fn default() -> Self {
        Self {
            ability_points: 27,
            ability_base: 9,
            left_handed_chance: 0.1,
        }
    }
}

/// Complete world configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seconds of game time between moves of a wandering character.
    pub wander_interval_secs: u64,
    /// Clothing rules.
    pub clothing: ClothingConfig,
    /// Carrying capacity.
    pub carrying: CarryConfig,
    /// Character creation.
    pub chargen: ChargenConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            wander_interval_secs: 60,
            clothing: ClothingConfig::default(),
            carrying: CarryConfig::default(),
            chargen: ChargenConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML for this
    /// structure, or [`ConfigError::Invalid`] if values are out of range.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`WorldConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let carrying = &self.carrying;
        for (name, value) in [
            ("carrying.factor", carrying.factor),
            ("carrying.lift", carrying.lift),
            ("carrying.encumbered", carrying.encumbered),
            ("carrying.heavily_encumbered", carrying.heavily_encumbered),
            ("carrying.max", carrying.max),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.chargen.left_handed_chance) {
            return Err(ConfigError::Invalid(format!(
                "chargen.left_handed_chance must be within 0..=1, got {}",
                self.chargen.left_handed_chance
            )));
        }

        if self.wander_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "wander_interval_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
