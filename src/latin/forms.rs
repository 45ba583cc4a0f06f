//! Form Registry.
//!
//! Stores the declined forms of a noun per case slot and the alias set used
//! for free-text matching. Merging is append-if-absent, so registering the
//! same lemma twice leaves both collections unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::latin::case::CaseLabel;
use crate::latin::declension::{DeclensionError, Paradigm, decline};
use crate::latin::gender::Gender;
use crate::latin::translit::{fold, transliterate};

/// Surface forms per case slot.
///
/// The first entry of every slot is the canonical display form; later entries
/// are accepted alternatives (for example the nomen of a two-part name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NounForms {
    slots: BTreeMap<CaseLabel, Vec<String>>,
}

impl NounForms {
    /// Empty form table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forms for a slot, empty if none are registered.
    #[must_use]
    pub fn get(&self, label: CaseLabel) -> &[String] {
        self.slots.get(&label).map_or(&[], Vec::as_slice)
    }

    /// Canonical form for a slot.
    #[must_use]
    pub fn first(&self, label: CaseLabel) -> Option<&str> {
        self.get(label).first().map(String::as_str)
    }

    /// Append `form` to a slot unless it is already present.
    ///
    /// Returns `true` if the form was added.
    pub fn insert(&mut self, label: CaseLabel, form: impl Into<String>) -> bool {
        let form = form.into();
        let slot = self.slots.entry(label).or_default();
        if slot.contains(&form) {
            false
        } else {
            slot.push(form);
            true
        }
    }

    /// Merge every slot of a paradigm.
    pub fn merge(&mut self, paradigm: &Paradigm) {
        for (label, form) in paradigm.iter() {
            self.insert(label, form);
        }
    }

    /// Whether `token` names this noun in the given slot, ignoring letter
    /// case and macrons.
    #[must_use]
    pub fn matches(&self, label: CaseLabel, token: &str) -> bool {
        let token = fold(token);
        self.get(label).iter().any(|form| fold(form) == token)
    }

    /// Whether the noun only exists in the plural (genitive singular in `-um`).
    #[must_use]
    pub fn is_plural_only(&self) -> bool {
        self.first(CaseLabel::GenSg)
            .is_some_and(|genitive| genitive.ends_with("um"))
    }

    /// Number of slots with at least one form.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.values().filter(|forms| !forms.is_empty()).count()
    }

    /// Whether no form has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over slots and their forms.
    pub fn iter(&self) -> impl Iterator<Item = (CaseLabel, &[String])> {
        self.slots.iter().map(|(label, forms)| (*label, forms.as_slice()))
    }
}

/// Case-insensitive alias set, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aliases(Vec<String>);

impl Aliases {
    /// Empty alias set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias (stored lowercased). Returns `true` if it was new.
    pub fn add(&mut self, alias: &str) -> bool {
        let alias = alias.trim().to_lowercase();
        if alias.is_empty() || self.0.contains(&alias) {
            return false;
        }
        self.0.push(alias);
        true
    }

    /// Whether `token` equals an alias, ignoring letter case and macrons.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        let token = fold(token);
        self.0.iter().any(|alias| fold(alias) == token)
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the aliases.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Decline a lemma and merge the result into `forms` and `aliases`.
///
/// A lemma may hold several whitespace-separated components (praenomen and
/// nomen, `"Gaia Iūlia"` / `"Gaiae Iūliae"`); when the nominative and genitive
/// have the same number of components each pair is declined separately, in
/// order, so the first form of every slot belongs to the first component.
///
/// Every form and its transliteration becomes an alias. Nothing is stored if
/// any component fails to decline.
///
/// # Errors
///
/// Propagates [`DeclensionError`] from the declension engine.
pub fn populate_forms(
    forms: &mut NounForms,
    aliases: &mut Aliases,
    nominative: &str,
    genitive: &str,
    gender: Gender,
) -> Result<(), DeclensionError> {
    let noms: Vec<&str> = nominative.split_whitespace().collect();
    let gens: Vec<&str> = genitive.split_whitespace().collect();

    let paradigms = if noms.len() > 1 && noms.len() == gens.len() {
        noms.iter()
            .zip(&gens)
            .map(|(nom, gen_sg)| decline(nom, gen_sg, gender))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        vec![decline(nominative, genitive, gender)?]
    };

    for paradigm in &paradigms {
        forms.merge(paradigm);
        for (_, form) in paradigm.iter() {
            aliases.add(form);
            aliases.add(&transliterate(form));
        }
    }

    Ok(())
}
