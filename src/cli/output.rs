//! Output formatting utilities for CLI.

use mundus::Paradigm;
use mundus::world::Prototype;
use serde::Serialize;

/// JSON-serializable paradigm.
#[derive(Debug, Serialize)]
pub(super) struct JsonParadigm {
    /// Declension family.
    pub(super) declension: String,
    /// Forms keyed by slot label (`nom_sg`, `gen_sg`, …), in paradigm order.
    pub(super) forms: Vec<JsonForm>,
}

/// One slot of a paradigm.
#[derive(Debug, Serialize)]
pub(super) struct JsonForm {
    /// Slot label.
    pub(super) label: &'static str,
    /// The form.
    pub(super) form: String,
}

impl JsonParadigm {
    /// Create from a Paradigm.
    pub(super) fn from_paradigm(paradigm: &Paradigm) -> Self {
        Self {
            declension: paradigm.declension.to_string(),
            forms: paradigm
                .iter()
                .map(|(label, form)| JsonForm {
                    label: label.as_str(),
                    form: form.to_string(),
                })
                .collect(),
        }
    }
}

/// JSON-serializable prototype summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonPrototype {
    /// Name used with `creātur`.
    pub(super) name: &'static str,
    /// Genitive singular.
    pub(super) genitive: &'static str,
    /// Gender.
    pub(super) gender: &'static str,
    /// Mass in kilograms.
    pub(super) mass: f64,
    /// Volume in litres.
    pub(super) volume: f64,
    /// Clothing type, if wearable.
    pub(super) clothing: Option<&'static str>,
    /// Description.
    pub(super) desc: &'static str,
}

impl JsonPrototype {
    /// Create from a Prototype.
    pub(super) fn from_prototype(proto: &Prototype) -> Self {
        Self {
            name: proto.name,
            genitive: proto.genitive,
            gender: proto.gender.as_str(),
            mass: proto.physical.mass,
            volume: proto.physical.volume,
            clothing: proto.clothing_type,
            desc: proto.desc,
        }
    }
}
