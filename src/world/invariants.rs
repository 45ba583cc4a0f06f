//! World invariants - sanity checks that detect bugs.
//!
//! Command handlers validate before they mutate, so none of these should
//! ever trigger. If one does, a transition forgot half of its bookkeeping.

use std::collections::BTreeSet;

use crate::world::hands::MASS_EPSILON;
use crate::world::{Entity, World};

/// Tolerance for summed carried mass.
const LOAD_TOLERANCE: f64 = 1e-6;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(violations: &mut Vec<InvariantViolation>, message: String) {
    violations.push(InvariantViolation { message });
}

/// Check all world invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for entity in world.entities() {
        check_location(world, entity, &mut violations);
        check_character(world, entity, &mut violations);
        check_container(entity, &mut violations);
        check_clothing(world, entity, &mut violations);

        if let Some(target) = entity.leash.and_then(|l| l.bound_to) {
            if world.get(target).is_none() {
                violation(
                    &mut violations,
                    format!("Leash {} is tied to missing entity {target}", entity.id),
                );
            }
        }
    }

    violations
}

fn check_location(world: &World, entity: &Entity, violations: &mut Vec<InvariantViolation>) {
    let Some(location) = entity.location else {
        return;
    };
    let Some(holder) = world.get(location) else {
        violation(
            violations,
            format!("{} is inside missing entity {location}", entity.id),
        );
        return;
    };
    if world.is_within(location, entity.id) || location == entity.id {
        violation(violations, format!("{} contains itself", entity.id));
    }

    let held = entity.held.is_some();
    let worn = entity.is_worn();
    if holder.is_character() && !entity.is_character() {
        if held == worn {
            violation(
                violations,
                format!(
                    "{} carried by {location} is {} held and worn",
                    entity.id,
                    if held { "both" } else { "neither" }
                ),
            );
        }
    } else if held || worn {
        violation(
            violations,
            format!("{} is held or worn outside a character", entity.id),
        );
    }
}

fn check_character(world: &World, entity: &Entity, violations: &mut Vec<InvariantViolation>) {
    let Some(state) = entity.character() else {
        return;
    };
    let id = entity.id;

    if !state.hands.is_consistent() {
        violation(
            violations,
            format!("Character {id} hands do not partition dextrā and sinistrā"),
        );
    }

    let held = world.held_by(id);
    let held_hands: BTreeSet<_> = held.iter().map(|&(_, hand)| hand).collect();
    let occupied: BTreeSet<_> = state.hands.occupied().iter().copied().collect();
    if held_hands.len() != held.len() {
        violation(
            violations,
            format!("Character {id} holds two things in one hand"),
        );
    }
    if held_hands != occupied {
        violation(
            violations,
            format!("Character {id} occupied hands {occupied:?} differ from held {held_hands:?}"),
        );
    }

    let carry = &state.carry;
    if carry.current < -MASS_EPSILON || carry.current > carry.max + MASS_EPSILON {
        violation(
            violations,
            format!(
                "Character {id} load {} outside 0..={}",
                carry.current, carry.max
            ),
        );
    }

    let expected: f64 = world
        .contents(id)
        .into_iter()
        .filter(|&content| world.get(content).is_some_and(|e| !e.is_character()))
        .map(|content| world.gross_mass(content))
        .sum();
    if (expected - carry.current).abs() > LOAD_TOLERANCE {
        violation(
            violations,
            format!(
                "Character {id} load {} differs from carried mass {expected}",
                carry.current
            ),
        );
    }
}

fn check_container(entity: &Entity, violations: &mut Vec<InvariantViolation>) {
    let Some(container) = entity.container.as_ref() else {
        return;
    };
    if container.remaining_volume < -MASS_EPSILON
        || container.remaining_volume > container.max_volume + MASS_EPSILON
    {
        violation(
            violations,
            format!(
                "Container {} free volume {} outside 0..={}",
                entity.id, container.remaining_volume, container.max_volume
            ),
        );
    }
}

fn check_clothing(world: &World, entity: &Entity, violations: &mut Vec<InvariantViolation>) {
    let Some(clothing) = entity.clothing.as_ref() else {
        return;
    };
    let Some(cover) = clothing.covered_by else {
        return;
    };
    let id = entity.id;
    if cover == id {
        violation(violations, format!("Garment {id} covers itself"));
        return;
    }
    if !clothing.worn {
        violation(violations, format!("Garment {id} is covered but not worn"));
    }
    match world.get(cover) {
        Some(outer) if outer.is_worn() && outer.location == entity.location => {}
        _ => violation(
            violations,
            format!("Garment {id} is covered by {cover}, which its wearer does not wear"),
        ),
    }
}

/// Assert all world invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(world: &World) {
    let violations = check_invariants(world);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("World invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_world: &World) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::latin::Gender;
    use crate::world::{
        Abilities, CharacterState, ClothingState, ContainerState, EntityId, Hand, Lemma,
        PhysicalProfile,
    };

    fn create_valid_world() -> (World, EntityId, EntityId) {
        let mut world = World::new(WorldConfig::default(), 1);
        let room = world.create_room("ātrium", None).unwrap();
        let state = CharacterState::new(Abilities::uniform(10), Hand::Right, &world.config().carrying);
        let actor = world
            .create_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), state, room)
            .unwrap();
        let sword = world
            .create_thing("gladius", Some(&Lemma::new("gladius", "gladiī", Gender::Masculine)), room)
            .unwrap();
        world.get_mut(sword).unwrap().physical = Some(PhysicalProfile::soft("ferrum", 0.6, 0.08));
        world.relocate(sword, actor, None).unwrap();
        (world, actor, sword)
    }

    #[test]
    fn test_valid_world_passes() {
        let (world, _, _) = create_valid_world();
        assert!(check_invariants(&world).is_empty());
    }

    #[test]
    fn test_held_and_occupied_mismatch_detected() {
        let (mut world, _, sword) = create_valid_world();
        world.get_mut(sword).unwrap().held = Some(Hand::Left);

        let violations = check_invariants(&world);
        assert!(!violations.is_empty());
        assert!(violations[0].message.contains("occupied hands"));
    }

    #[test]
    fn test_load_mismatch_detected() {
        let (mut world, actor, _) = create_valid_world();
        world
            .get_mut(actor)
            .unwrap()
            .character_mut()
            .unwrap()
            .carry
            .current = 5.0;

        let violations = check_invariants(&world);
        assert!(violations.iter().any(|v| v.message.contains("differs from carried mass")));
    }

    #[test]
    fn test_held_and_worn_detected() {
        let (mut world, _, sword) = create_valid_world();
        world.get_mut(sword).unwrap().clothing = Some(ClothingState {
            clothing_type: None,
            worn: true,
            covered_by: None,
        });

        let violations = check_invariants(&world);
        assert!(violations.iter().any(|v| v.message.contains("both held and worn")));
    }

    #[test]
    fn test_container_overflow_detected() {
        let (mut world, _, sword) = create_valid_world();
        let mut bag = ContainerState::new(1.0, None);
        bag.remaining_volume = 2.0;
        world.get_mut(sword).unwrap().container = Some(bag);

        let violations = check_invariants(&world);
        assert!(violations.iter().any(|v| v.message.contains("free volume")));
    }

    #[test]
    fn test_self_cover_detected() {
        let (mut world, _, sword) = create_valid_world();
        world.get_mut(sword).unwrap().clothing = Some(ClothingState {
            clothing_type: None,
            worn: false,
            covered_by: Some(sword),
        });

        let violations = check_invariants(&world);
        assert!(violations.iter().any(|v| v.message.contains("covers itself")));
    }

    #[test]
    #[should_panic(expected = "World invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_invariants_panics() {
        let (mut world, _, sword) = create_valid_world();
        world.get_mut(sword).unwrap().held = None;
        assert_invariants(&world);
    }
}
