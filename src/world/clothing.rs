//! Clothing rules: wear limits, auto-cover and display order.
//!
//! Covering is a single level deep: a garment records at most one garment
//! covering it, and taking a garment off uncovers only what it covered
//! directly.

use serde::{Deserialize, Serialize};

use crate::config::ClothingConfig;
use crate::world::entity::EntityId;

/// Wear state of a garment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingState {
    /// Clothing type (`hat`, `fullbody` …). Untyped garments have no limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing_type: Option<String>,
    /// Whether the garment is being worn.
    #[serde(default)]
    pub worn: bool,
    /// The garment covering this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_by: Option<EntityId>,
}

impl ClothingState {
    /// An unworn garment of the given type.
    #[must_use]
    pub fn new(clothing_type: Option<&str>) -> Self {
        Self {
            clothing_type: clothing_type.map(ToString::to_string),
            worn: false,
            covered_by: None,
        }
    }
}

/// Why a garment cannot be put on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WearRefusal {
    /// The overall number of worn garments is at its limit.
    OverallLimit,
    /// The limit for this garment's type is reached.
    TypeLimit,
    /// The garment is already worn.
    AlreadyWorn,
}

/// Check whether `garment` may be put on over the garments already `worn`.
///
/// # Errors
///
/// Returns the first rule that forbids it, checked in the order overall
/// limit, type limit, already worn.
pub fn check_wear(
    rules: &ClothingConfig,
    garment: &ClothingState,
    worn: &[&ClothingState],
) -> Result<(), WearRefusal> {
    if rules.overall_limit.is_some_and(|limit| worn.len() >= limit) {
        return Err(WearRefusal::OverallLimit);
    }

    if !garment.worn {
        if let Some(kind) = garment.clothing_type.as_deref() {
            if let Some(&limit) = rules.type_limits.get(kind) {
                let same_type = worn
                    .iter()
                    .filter(|other| other.clothing_type.as_deref() == Some(kind))
                    .count();
                if same_type >= limit {
                    return Err(WearRefusal::TypeLimit);
                }
            }
        }
    }

    if garment.worn {
        return Err(WearRefusal::AlreadyWorn);
    }

    Ok(())
}

/// Whether putting on a garment of type `outer` covers an already-worn
/// garment of type `inner`.
#[must_use]
pub fn auto_covers(rules: &ClothingConfig, outer: Option<&str>, inner: Option<&str>) -> bool {
    let (Some(outer), Some(inner)) = (outer, inner) else {
        return false;
    };
    if rules.cant_cover_with.iter().any(|kind| kind == outer) {
        return false;
    }
    rules
        .autocover
        .get(outer)
        .is_some_and(|covered| covered.iter().any(|kind| kind == inner))
}

/// Sort key for display: position in the configured type order, untyped and
/// unknown types last.
#[must_use]
pub fn display_rank(rules: &ClothingConfig, clothing_type: Option<&str>) -> usize {
    clothing_type
        .and_then(|kind| rules.type_order.iter().position(|t| t == kind))
        .unwrap_or(rules.type_order.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worn(kind: &str) -> ClothingState {
        ClothingState {
            clothing_type: Some(kind.to_string()),
            worn: true,
            covered_by: None,
        }
    }

    #[test]
    fn test_type_limit() {
        let rules = ClothingConfig::default();
        let hat = worn("hat");
        let second_hat = ClothingState::new(Some("hat"));
        assert_eq!(
            check_wear(&rules, &second_hat, &[&hat]),
            Err(WearRefusal::TypeLimit)
        );

        let tunic = worn("fullbody");
        let second_tunic = ClothingState::new(Some("fullbody"));
        assert_eq!(check_wear(&rules, &second_tunic, &[&tunic]), Ok(()));
    }

    #[test]
    fn test_overall_limit() {
        let rules = ClothingConfig {
            overall_limit: Some(1),
            ..ClothingConfig::default()
        };
        let ring = worn("jewelry");
        let cloak = ClothingState::new(Some("cloak"));
        assert_eq!(
            check_wear(&rules, &cloak, &[&ring]),
            Err(WearRefusal::OverallLimit)
        );
    }

    #[test]
    fn test_already_worn() {
        let rules = ClothingConfig::default();
        let hat = worn("hat");
        assert_eq!(check_wear(&rules, &hat, &[&hat]), Err(WearRefusal::AlreadyWorn));
    }

    #[test]
    fn test_untyped_unlimited() {
        let rules = ClothingConfig::default();
        let scarf = ClothingState::new(None);
        let others = [worn("hat"), worn("cloak")];
        let refs: Vec<&ClothingState> = others.iter().collect();
        assert_eq!(check_wear(&rules, &scarf, &refs), Ok(()));
    }

    #[test]
    fn test_auto_covers() {
        let rules = ClothingConfig::default();
        assert!(auto_covers(&rules, Some("fullbody"), Some("undershirt")));
        assert!(auto_covers(&rules, Some("fullbody"), Some("underpants")));
        assert!(auto_covers(&rules, Some("shoes"), Some("socks")));
        assert!(!auto_covers(&rules, Some("hat"), Some("undershirt")));
        assert!(!auto_covers(&rules, None, Some("undershirt")));
    }

    #[test]
    fn test_cant_cover_with() {
        let mut rules = ClothingConfig::default();
        rules
            .autocover
            .insert("jewelry".to_string(), vec!["undershirt".to_string()]);
        assert!(!auto_covers(&rules, Some("jewelry"), Some("undershirt")));
    }

    #[test]
    fn test_display_rank() {
        let rules = ClothingConfig::default();
        assert!(display_rank(&rules, Some("hat")) < display_rank(&rules, Some("shoes")));
        assert_eq!(display_rank(&rules, None), rules.type_order.len());
        assert_eq!(display_rank(&rules, Some("back")), rules.type_order.len());
    }
}
