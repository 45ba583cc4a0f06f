//! World layer for Mundus.
//!
//! The in-memory stand-in for the game host:
//! - Entities (rooms, things, characters, exits) and their capabilities
//! - Hands and encumbrance, containers and clothing
//! - The world store with its paired state transitions and message outbox
//! - Leashes, travel and the day clock
//! - Character creation, prototypes and JSON snapshots

mod chargen;
mod clothing;
mod container;
mod entity;
mod hands;
mod invariants;
mod physical;
mod prototypes;
mod rng;
mod snapshot;
mod state;
mod travel;

pub use chargen::{NameBook, Praenomina, roll_abilities, roll_handedness, roman_name};
pub use clothing::{ClothingState, WearRefusal, auto_covers, check_wear, display_rank};
pub use container::{ContainerState, Fit, fit_shape};
pub use entity::{
    Abilities, CharacterState, DoorState, Entity, EntityId, EntityKind, LeashState, Locks, Noun,
    Vitality,
};
pub use hands::{Burden, CarryLimits, Encumbrance, Grip, Hand, HandState, MASS_EPSILON};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use physical::{Dimensions, PhysicalProfile};
pub use prototypes::{Prototype, find_prototype, prototypes};
pub use rng::Rng;
pub use snapshot::SNAPSHOT_VERSION;
pub use state::{Lemma, Message, ObjectHooks, PassThrough, Relocation, World};
pub use travel::{DAWN, HOURS_PER_DAY, SECONDS_PER_HOUR};
