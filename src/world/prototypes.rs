//! Built-in object prototypes for `creātur`.

use serde::Serialize;
use tracing::debug;

use crate::error::WorldError;
use crate::latin::{Gender, fold};
use crate::world::clothing::ClothingState;
use crate::world::container::ContainerState;
use crate::world::entity::{EntityId, LeashState};
use crate::world::physical::{Dimensions, PhysicalProfile};
use crate::world::state::{Lemma, World};

/// Template for spawning an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prototype {
    /// Name used with `creātur`, also the object's key.
    pub name: &'static str,
    /// Genitive singular.
    pub genitive: &'static str,
    /// Gender.
    pub gender: Gender,
    /// Description.
    pub desc: &'static str,
    /// Physical profile.
    pub physical: PhysicalProfile,
    /// Capacity, if a container.
    pub container: Option<ContainerState>,
    /// Clothing type, if wearable. `Some("")` is an untyped garment.
    pub clothing_type: Option<&'static str>,
    /// Burning.
    pub lit: bool,
    /// Can tie things.
    pub leash: bool,
    /// Refusal shown when someone tries to pick it up; `None` if it can be.
    pub immovable: Option<&'static str>,
}

impl Prototype {
    fn new(name: &'static str, genitive: &'static str, gender: Gender, desc: &'static str, physical: PhysicalProfile) -> Self {
        Self {
            name,
            genitive,
            gender,
            desc,
            physical,
            container: None,
            clothing_type: None,
            lit: false,
            leash: false,
            immovable: None,
        }
    }

    fn wearable(mut self, clothing_type: &'static str) -> Self {
        self.clothing_type = Some(clothing_type);
        self
    }
}

/// Every built-in prototype, in listing order.
#[must_use]
pub fn prototypes() -> Vec<Prototype> {
    vec![
        Prototype {
            container: Some(ContainerState::new(24.0, Some(Dimensions::new(0.3, 0.4, 0.2)))),
            ..Prototype::new("saccus", "saccī", Gender::Masculine, "A bag", PhysicalProfile::soft("linum", 0.45, 0.75))
        }
        .wearable("back"),
        Prototype::new("strophium", "strophiī", Gender::Neuter, "A bandeau", PhysicalProfile::soft("linum", 0.45, 0.5))
            .wearable("undershirt"),
        Prototype::new("subligāculum", "subligāculī", Gender::Neuter, "Briefs", PhysicalProfile::soft("linum", 0.45, 0.5))
            .wearable("underpants"),
        Prototype::new(
            "gladius",
            "gladiī",
            Gender::Masculine,
            "A shortsword",
            PhysicalProfile::rigid("ferrum", 0.6, 0.08, Some(Dimensions::new(0.04, 0.65, 0.003))),
        ),
        Prototype::new("lāna", "lānae", Gender::Feminine, "A small bale of wool", PhysicalProfile::soft("lāna", 3.0, 23.0)),
        Prototype::new(
            "pallium",
            "palliī",
            Gender::Neuter,
            "A simple, well-woven cloth, to wrap about your top",
            PhysicalProfile {
                dimensions: Some(Dimensions::new(3.04, 1.52, 0.005)),
                ..PhysicalProfile::soft("lāna", 3.0, 23.0)
            },
        )
        .wearable("cloak"),
        Prototype::new("petasus", "petasī", Gender::Masculine, "A broad-brimmed, traveler's hat", PhysicalProfile::soft("lāna", 0.17, 2.21))
            .wearable("hat"),
        Prototype::new(
            "soleae",
            "soleārum",
            Gender::Feminine,
            "A pair of simple sandals",
            PhysicalProfile::rigid("corium", 0.48, 0.07, Some(Dimensions::new(0.107, 0.253, 0.0026))),
        )
        .wearable("shoes"),
        Prototype::new("tunica", "tunicae", Gender::Feminine, "A sleeveless, knee-length tunic", PhysicalProfile::soft("linum", 1.0, 2.0))
            .wearable("fullbody"),
        Prototype {
            lit: true,
            ..Prototype::new(
                "lūmen",
                "lūminis",
                Gender::Neuter,
                "a small, simple, terracotta oil lamp",
                PhysicalProfile::rigid("argilla", 0.15, 0.2, Some(Dimensions::new(0.05, 0.05, 0.08))),
            )
        },
        Prototype {
            lit: true,
            immovable: Some("Focus nimis gravis est."),
            ..Prototype::new(
                "focus",
                "focī",
                Gender::Masculine,
                "A large hearth; its diameter is nearly one passus.",
                PhysicalProfile::rigid("lapis", 8512.0, 3140.0, None),
            )
        },
        Prototype {
            leash: true,
            ..Prototype::new("lōrum", "lōrī", Gender::Neuter, "A leather leash", PhysicalProfile::soft("corium", 0.2, 0.1))
        },
    ]
}

/// Look up a prototype by name, ignoring case and macrons.
#[must_use]
pub fn find_prototype(name: &str) -> Option<Prototype> {
    let wanted = fold(name);
    prototypes().into_iter().find(|p| fold(p.name) == wanted)
}

impl World {
    /// Spawn a prototype at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownPrototype`], or any error of
    /// [`World::create_thing`].
    pub fn spawn_prototype(&mut self, name: &str, location: EntityId) -> Result<EntityId, WorldError> {
        let proto = find_prototype(name).ok_or_else(|| WorldError::UnknownPrototype(name.to_string()))?;
        let lemma = Lemma::new(proto.name, proto.genitive, proto.gender);

        // physical data first so the placement accounts for mass and volume
        let id = self.create_thing(proto.name, Some(&lemma), self.room_of(location).unwrap_or(location))?;
        if let Some(entity) = self.get_mut(id) {
            entity.desc = Some(proto.desc.to_string());
            entity.physical = Some(proto.physical.clone());
            entity.container = proto.container;
            entity.clothing = proto
                .clothing_type
                .map(|kind| ClothingState::new((!kind.is_empty()).then_some(kind)));
            entity.lit = proto.lit;
            entity.leash = proto.leash.then(LeashState::default);
            if let Some(refusal) = proto.immovable {
                entity.locks.get = false;
                entity.locks.get_err_msg = Some(refusal.to_string());
            }
        }
        if self.get(id).and_then(|e| e.location) != Some(location) {
            if let Err(err) = self.relocate(id, location, None) {
                self.entities.remove(&id);
                return Err(err);
            }
        }
        debug!(%id, prototype = proto.name, %location, "prototype spawned");
        Ok(id)
    }
}
