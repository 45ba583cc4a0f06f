//! Character creation.
//!
//! Abilities are bought at random with a fixed number of points, handedness
//! is rolled, and carrying limits and vitality follow from the abilities.
//! Player names are Roman: a praenomen chosen from those customary in a
//! gens, followed by the nomen derived from the gens.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ChargenConfig;
use crate::error::WorldError;
use crate::latin::{Gender, drop_chars};
use crate::world::entity::{Abilities, CharacterState, EntityId};
use crate::world::hands::Hand;
use crate::world::rng::Rng;
use crate::world::state::{Lemma, World};

/// Ability scores bought with points: one point per step up to 5, two per
/// step from 5 to 7.
const CHEAP_STEPS: u32 = 5;
const MAX_STEPS: u32 = 7;

/// Customary praenomina of one gens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Praenomina {
    /// For men.
    pub masculine: Vec<String>,
    /// For women.
    pub feminine: Vec<String>,
}

impl Praenomina {
    /// Praenomina for a gender. Neuter has none.
    #[must_use]
    pub fn for_gender(&self, gender: Gender) -> &[String] {
        match gender {
            Gender::Masculine => &self.masculine,
            Gender::Feminine => &self.feminine,
            Gender::Neuter => &[],
        }
    }
}

/// Gentes (in their feminine form, `Iūlia`) and their praenomina.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameBook {
    gentes: BTreeMap<String, Praenomina>,
}

impl Default for NameBook {
    fn default() -> Self {
        let entry = |gens: &str, masculine: &[&str], feminine: &[&str]| {
            let list = |names: &[&str]| names.iter().map(ToString::to_string).collect();
            (
                gens.to_string(),
                Praenomina {
                    masculine: list(masculine),
                    feminine: list(feminine),
                },
            )
        };
        Self {
            gentes: [
                entry("Iūlia", &["Gaius", "Lūcius", "Sextus"], &["Gaia", "Lūcia", "Sexta"]),
                entry("Cornēlia", &["Pūblius", "Gnaeus", "Servius"], &["Pūblia", "Gnaea", "Servia"]),
                entry("Fabia", &["Quīntus", "Mārcus", "Caesō"], &["Quīnta", "Mārca"]),
                entry("Verginia", &["Opiter", "Titus", "Aulus"], &["Tita", "Aula"]),
                entry("Sulpicia", &["Servius", "Sertor", "Pūblius"], &["Servia", "Pūblia"]),
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl NameBook {
    /// A name book from explicit entries.
    #[must_use]
    pub fn new(gentes: BTreeMap<String, Praenomina>) -> Self {
        Self { gentes }
    }

    /// Gentes in alphabetical order.
    pub fn gentes(&self) -> impl Iterator<Item = &str> {
        self.gentes.keys().map(String::as_str)
    }

    /// Praenomina customary in a gens.
    #[must_use]
    pub fn praenomina(&self, gens: &str) -> Option<&Praenomina> {
        self.gentes.get(gens)
    }

    /// Pick a gens and a fitting praenomen at random and build the name.
    pub fn random_name(&self, rng: &mut Rng, gender: Gender) -> Option<Lemma> {
        let gentes: Vec<&String> = self
            .gentes
            .iter()
            .filter(|(_, names)| !names.for_gender(gender).is_empty())
            .map(|(gens, _)| gens)
            .collect();
        let gens = *rng.pick(&gentes)?;
        let praenomen = rng.pick(self.gentes.get(gens)?.for_gender(gender))?;
        Some(roman_name(gens, praenomen, gender))
    }
}

/// Build the two-part name of a character.
///
/// A man takes the masculine nomen (`Iūlia` → `Iūlius`, genitive `Iūliī`),
/// a woman the gens itself (genitive `Iūliae`). Praenomina in `-us` form the
/// genitive in `-ī`, apart from `Opiter`, `Caesō` and `Sertor`.
#[must_use]
pub fn roman_name(gens: &str, praenomen: &str, gender: Gender) -> Lemma {
    let (nomen, nomen_gen, praenomen_gen) = if gender == Gender::Masculine {
        let nomen = format!("{}us", drop_chars(gens, 1));
        let nomen_gen = format!("{}ī", drop_chars(&nomen, 2));
        let praenomen_gen = match praenomen {
            "Opiter" => "Opitris".to_string(),
            "Caesō" => "Caesōnis".to_string(),
            "Sertor" => "Sertōris".to_string(),
            _ => format!("{}ī", drop_chars(praenomen, 2)),
        };
        (nomen, nomen_gen, praenomen_gen)
    } else {
        (gens.to_string(), format!("{gens}e"), format!("{praenomen}e"))
    };
    Lemma {
        nominative: format!("{praenomen} {nomen}"),
        genitive: format!("{praenomen_gen} {nomen_gen}"),
        gender,
    }
}

/// Spend the ability points at random, then add the base to every score.
#[must_use]
pub fn roll_abilities(rng: &mut Rng, config: &ChargenConfig) -> Abilities {
    let mut steps = [0u32; 6];
    let mut points = config.ability_points;

    let affordable = |step: u32, points: u32| {
        step < CHEAP_STEPS || (step < MAX_STEPS && points > 1)
    };
    while points > 0 && steps.iter().any(|&step| affordable(step, points)) {
        let index = rng.below(steps.len());
        let step = steps[index];
        if step < CHEAP_STEPS {
            steps[index] += 1;
            points -= 1;
        } else if step < MAX_STEPS && points > 1 {
            steps[index] += 1;
            points -= 2;
        }
    }

    let [vires, pernicitas, valetudo, ratio, sapientia, gratia] =
        steps.map(|step| step + config.ability_base);
    Abilities {
        vires,
        pernicitas,
        valetudo,
        ratio,
        sapientia,
        gratia,
    }
}

/// Roll the dominant hand.
#[must_use]
pub fn roll_handedness(rng: &mut Rng, config: &ChargenConfig) -> Hand {
    if rng.next_f64() >= 1.0 - config.left_handed_chance {
        Hand::Left
    } else {
        Hand::Right
    }
}

impl World {
    /// Create a character with rolled abilities and handedness.
    ///
    /// # Errors
    ///
    /// As [`World::create_character`].
    pub fn spawn_character(&mut self, lemma: &Lemma, location: EntityId) -> Result<EntityId, WorldError> {
        let chargen = self.config.chargen;
        let abilities = roll_abilities(&mut self.rng, &chargen);
        let handedness = roll_handedness(&mut self.rng, &chargen);
        let state = CharacterState::new(abilities, handedness, &self.config.carrying);
        let id = self.create_character(lemma, state, location)?;
        debug!(%id, ?abilities, %handedness, "character rolled");
        Ok(id)
    }

    /// Create a player character with a random Roman name.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownPrototype`] if the name book has no name
    /// for the gender, otherwise as [`World::create_character`].
    pub fn spawn_roman(&mut self, gender: Gender, location: EntityId) -> Result<EntityId, WorldError> {
        let lemma = self
            .names()
            .clone()
            .random_name(&mut self.rng, gender)
            .ok_or_else(|| WorldError::UnknownPrototype(format!("nōmen {}", gender.as_str())))?;
        self.spawn_character(&lemma, location)
    }
}
