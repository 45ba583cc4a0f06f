//! Entities of the world and their capabilities.
//!
//! An entity is a room, a thing, a character or an exit. Capabilities that
//! cut across kinds (container, garment, leash, light) are optional parts
//! queried directly instead of by type name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CarryConfig;
use crate::latin::{Aliases, CaseLabel, Gender, NounForms};
use crate::world::clothing::ClothingState;
use crate::world::container::ContainerState;
use crate::world::hands::{CarryLimits, Grip, Hand, HandState};
use crate::world::physical::PhysicalProfile;

/// Identifier of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether an entity has a Latin noun behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Noun {
    /// Referred to by its key only; grammar checks pass.
    Plain,
    /// A declined noun.
    Inflected {
        /// Grammatical gender.
        gender: Gender,
        /// Declined forms.
        forms: NounForms,
    },
}

/// The six abilities rolled at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    /// Strength; sets carrying capacity.
    #[serde(rename = "vīrēs")]
    pub vires: u32,
    /// Agility.
    #[serde(rename = "pernīcitās")]
    pub pernicitas: u32,
    /// Constitution; sets vitality.
    #[serde(rename = "valētūdō")]
    pub valetudo: u32,
    /// Reasoning.
    #[serde(rename = "ratiō")]
    pub ratio: u32,
    /// Wisdom.
    pub sapientia: u32,
    /// Charm.
    #[serde(rename = "grātia")]
    pub gratia: u32,
}

impl Abilities {
    /// Every ability at the same score.
    #[must_use]
    pub const fn uniform(score: u32) -> Self {
        Self {
            vires: score,
            pernicitas: score,
            valetudo: score,
            ratio: score,
            sapientia: score,
            gratia: score,
        }
    }
}

/// Current and maximum vitality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitality {
    /// Current.
    pub current: i32,
    /// Maximum.
    pub max: i32,
}

impl Vitality {
    /// Full vitality for a constitution score: odd scores give `score - 11`
    /// as bonus, even ones `score - 10`, and the maximum is at least 1.
    #[must_use]
    pub fn from_valetudo(valetudo: u32) -> Self {
        let score = i32::try_from(valetudo).unwrap_or(i32::MAX);
        let bonus = if score % 2 == 1 { score - 11 } else { score - 10 };
        let max = (10 + bonus).max(1);
        Self { current: max, max }
    }
}

/// State only characters have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    /// Ability scores.
    pub abilities: Abilities,
    /// Vitality.
    pub vitality: Vitality,
    /// Dominant hand.
    pub handedness: Hand,
    /// Hand occupancy.
    pub hands: HandState,
    /// Carrying limits and load.
    pub carry: CarryLimits,
    /// May use the building commands.
    #[serde(default)]
    pub builder: bool,
    /// Moves on its own through open exits.
    #[serde(default)]
    pub wanderer: bool,
    /// Seconds accumulated towards the next wander step.
    #[serde(default)]
    pub wander_elapsed: u64,
}

impl CharacterState {
    /// A character with empty hands and no load.
    #[must_use]
    pub fn new(abilities: Abilities, handedness: Hand, carrying: &CarryConfig) -> Self {
        Self {
            abilities,
            vitality: Vitality::from_valetudo(abilities.valetudo),
            handedness,
            hands: HandState::new(),
            carry: CarryLimits::from_strength(abilities.vires, carrying),
            builder: false,
            wanderer: false,
            wander_elapsed: 0,
        }
    }

    /// Borrow hands and load together.
    pub fn grip(&mut self) -> Grip<'_> {
        Grip::new(&mut self.hands, &mut self.carry, self.handedness)
    }
}

/// A two-sided door on an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorState {
    /// Whether the door is shut.
    pub closed: bool,
    /// The exit on the other side of the same door.
    pub return_exit: Option<EntityId>,
}

/// What an entity is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    /// A location.
    Room {
        /// Nothing can be seen without a light.
        #[serde(default)]
        dark: bool,
    },
    /// An object.
    Thing,
    /// A player or non-player character.
    Character(Box<CharacterState>),
    /// A passage to another room.
    Exit {
        /// Where it leads.
        destination: EntityId,
        /// Door, if the passage can be shut.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        door: Option<DoorState>,
    },
}

/// Access rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locks {
    /// Can be picked up.
    pub get: bool,
    /// Message shown instead of the default when picking up is refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_err_msg: Option<String>,
    /// Can be traversed (exits).
    pub traverse: bool,
}

impl Default for Locks {
    fn default() -> Self {
        Self {
            get: true,
            get_err_msg: None,
            traverse: true,
        }
    }
}

/// Something that can tie another entity (`lōrum`, `ligātūra`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeashState {
    /// What it is tied to.
    pub bound_to: Option<EntityId>,
}

/// One entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier.
    pub id: EntityId,
    /// Display key.
    pub key: String,
    /// Names the entity answers to besides its key.
    #[serde(default)]
    pub aliases: Aliases,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Where the entity is. Rooms have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<EntityId>,
    /// Kind.
    pub kind: EntityKind,
    /// Noun data.
    pub noun: Noun,
    /// Mass, volume and shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<PhysicalProfile>,
    /// Container capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerState>,
    /// Garment state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing: Option<ClothingState>,
    /// Leash state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leash: Option<LeashState>,
    /// The hand holding this entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held: Option<Hand>,
    /// Burning (lamps, torches).
    #[serde(default)]
    pub lit: bool,
    /// Access rules.
    #[serde(default)]
    pub locks: Locks,
}

impl Entity {
    /// A new entity with no capabilities.
    #[must_use]
    pub fn new(id: EntityId, key: &str, kind: EntityKind) -> Self {
        let mut aliases = Aliases::new();
        aliases.add(key);
        Self {
            id,
            key: key.to_string(),
            aliases,
            desc: None,
            location: None,
            kind,
            noun: Noun::Plain,
            physical: None,
            container: None,
            clothing: None,
            leash: None,
            held: None,
            lit: false,
            locks: Locks::default(),
        }
    }

    /// Declined forms, if the entity is inflected.
    #[must_use]
    pub fn forms(&self) -> Option<&NounForms> {
        match &self.noun {
            Noun::Inflected { forms, .. } => Some(forms),
            Noun::Plain => None,
        }
    }

    /// Grammatical gender, if the entity is inflected.
    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        match &self.noun {
            Noun::Inflected { gender, .. } => Some(*gender),
            Noun::Plain => None,
        }
    }

    /// Gender for agreement, masculine for plain entities.
    #[must_use]
    pub fn gender_or_default(&self) -> Gender {
        self.gender().unwrap_or(Gender::Masculine)
    }

    /// Canonical form for a case slot, falling back to the key.
    #[must_use]
    pub fn form(&self, label: CaseLabel) -> &str {
        self.forms()
            .and_then(|forms| forms.first(label))
            .unwrap_or(&self.key)
    }

    /// Whether the entity has declined forms.
    #[must_use]
    pub fn is_inflected(&self) -> bool {
        matches!(self.noun, Noun::Inflected { .. })
    }

    /// Character state, if a character.
    #[must_use]
    pub fn character(&self) -> Option<&CharacterState> {
        match &self.kind {
            EntityKind::Character(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable character state, if a character.
    pub fn character_mut(&mut self) -> Option<&mut CharacterState> {
        match &mut self.kind {
            EntityKind::Character(state) => Some(state),
            _ => None,
        }
    }

    /// Whether this is a character.
    #[must_use]
    pub fn is_character(&self) -> bool {
        matches!(self.kind, EntityKind::Character(_))
    }

    /// Whether this is a room.
    #[must_use]
    pub fn is_room(&self) -> bool {
        matches!(self.kind, EntityKind::Room { .. })
    }

    /// Destination, if an exit.
    #[must_use]
    pub fn destination(&self) -> Option<EntityId> {
        match self.kind {
            EntityKind::Exit { destination, .. } => Some(destination),
            _ => None,
        }
    }

    /// Door state, if a door.
    #[must_use]
    pub fn door(&self) -> Option<&DoorState> {
        match &self.kind {
            EntityKind::Exit { door, .. } => door.as_ref(),
            _ => None,
        }
    }

    /// Whether the entity is worn.
    #[must_use]
    pub fn is_worn(&self) -> bool {
        self.clothing.as_ref().is_some_and(|c| c.worn)
    }

    /// Own mass, zero if the entity has no physical profile.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.physical.as_ref().map_or(0.0, |p| p.mass)
    }

    /// Own volume, zero if the entity has no physical profile.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.physical.as_ref().map_or(0.0, |p| p.volume)
    }

    /// Whether the entity keeps its shape.
    #[must_use]
    pub fn is_rigid(&self) -> bool {
        self.physical.as_ref().is_some_and(|p| p.rigid)
    }

    /// Whether `token` names this entity, by key or alias.
    #[must_use]
    pub fn answers_to(&self, token: &str) -> bool {
        crate::latin::fold(&self.key) == crate::latin::fold(token) || self.aliases.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latin::populate_forms;

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(12).to_string(), "#12");
    }

    #[test]
    fn test_vitality() {
        assert_eq!(Vitality::from_valetudo(10).max, 10);
        assert_eq!(Vitality::from_valetudo(13).max, 12);
        assert_eq!(Vitality::from_valetudo(16).max, 16);
        assert_eq!(Vitality::from_valetudo(0).max, 1);
    }

    #[test]
    fn test_plain_form_falls_back_to_key() {
        let entity = Entity::new(EntityId(1), "lapis", EntityKind::Thing);
        assert_eq!(entity.form(CaseLabel::AccSg), "lapis");
        assert!(!entity.is_inflected());
        assert!(entity.answers_to("LAPIS"));
    }

    #[test]
    fn test_inflected_form() {
        let mut entity = Entity::new(EntityId(1), "gladius", EntityKind::Thing);
        let mut forms = NounForms::new();
        populate_forms(&mut forms, &mut entity.aliases, "gladius", "gladiī", Gender::Masculine)
            .unwrap();
        entity.noun = Noun::Inflected {
            gender: Gender::Masculine,
            forms,
        };
        assert_eq!(entity.form(CaseLabel::AccSg), "gladium");
        assert!(entity.answers_to("gladio"));
        assert_eq!(entity.gender(), Some(Gender::Masculine));
    }

    #[test]
    fn test_character_state_new() {
        let state = CharacterState::new(Abilities::uniform(10), Hand::Left, &CarryConfig::default());
        assert!((state.carry.max - 67.5).abs() < 1e-9);
        assert_eq!(state.vitality.max, 10);
        assert_eq!(state.hands.free().len(), 2);
    }
}
