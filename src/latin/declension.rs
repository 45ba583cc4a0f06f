//! Noun declension engine.
//!
//! Given the dictionary lemma of a noun (nominative singular, genitive
//! singular, gender) this classifies it into one of the five classical
//! declensions, or one of three plural-only patterns, and generates the full
//! twelve-slot paradigm.
//!
//! # Classification order
//!
//! ```text
//! genitive -ae            → 1st
//! genitive -is            → 3rd
//! genitive -ūs            → 4th
//! nominative -ēs          → 5th
//! genitive -um, nom. -ae  → plural-only 1st  (soleae, soleārum)
//! genitive -um, nom. -ī   → plural-only 2nd masculine (līberī, līberōrum)
//! genitive -um, nom. -a   → plural-only 2nd neuter (arma, armōrum)
//! genitive -ī             → 2nd
//! anything else           → UnrecognizedDeclension
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::latin::case::CaseLabel;
use crate::latin::gender::Gender;
use crate::latin::syllables;
use crate::latin::translit::{drop_chars, fold, strip_mark};

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Endings for dat_sg through voc_pl.
type Endings = [&'static str; 10];

const FIRST: Endings = ["ae", "am", "ā", "a", "ae", "ārum", "īs", "ās", "īs", "ae"];
const SECOND: Endings = ["ō", "um", "ō", "e", "ī", "ōrum", "īs", "ōs", "īs", "ī"];
const THIRD: Endings = ["ī", "em", "e", "", "ēs", "um", "ibus", "ēs", "ibus", "ēs"];
const FOURTH: Endings = ["uī", "um", "ū", "us", "ūs", "uum", "ibus", "ūs", "ibus", "ūs"];
const FIFTH: Endings = ["ī", "m", "", "s", "s", "rum", "bus", "s", "bus", "s"];

/// Plural-only nouns use the plural endings in both halves of the paradigm.
type PluralEndings = [&'static str; 6];

const FIRST_PLURAL: PluralEndings = ["ae", "ārum", "īs", "ās", "īs", "ae"];
const SECOND_PLURAL_MASCULINE: PluralEndings = ["ī", "ōrum", "īs", "ōs", "īs", "ī"];
const SECOND_PLURAL_NEUTER: PluralEndings = ["a", "ōrum", "īs", "a", "īs", "a"];

/// Error returned when a lemma cannot be declined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclensionError {
    /// Nominative or genitive was empty.
    #[error("empty lemma: nominative {nominative:?}, genitive {genitive:?}")]
    EmptyLemma {
        /// Nominative given.
        nominative: String,
        /// Genitive given.
        genitive: String,
    },
    /// The genitive (and nominative) match no known declension pattern.
    #[error("unrecognized declension for {nominative}, {genitive}")]
    UnrecognizedDeclension {
        /// Nominative given.
        nominative: String,
        /// Genitive given.
        genitive: String,
    },
}

/// Declension family of a noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Declension {
    /// First declension (puella, puellae).
    First,
    /// Second declension (gladius, gladiī).
    Second,
    /// Third declension (lūmen, lūminis).
    Third,
    /// Fourth declension (manus, manūs).
    Fourth,
    /// Fifth declension (rēs, reī).
    Fifth,
    /// Plural-only, first-declension endings (soleae, soleārum).
    PluralFirst,
    /// Plural-only, second-declension masculine (līberī, līberōrum).
    PluralSecondMasculine,
    /// Plural-only, second-declension neuter (arma, armōrum).
    PluralSecondNeuter,
}

impl Declension {
    /// Whether nouns of this family only exist in the plural.
    #[must_use]
    pub const fn is_plural_only(self) -> bool {
        matches!(
            self,
            Declension::PluralFirst
                | Declension::PluralSecondMasculine
                | Declension::PluralSecondNeuter
        )
    }
}

impl fmt::Display for Declension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Declension::First => "1st",
            Declension::Second => "2nd",
            Declension::Third => "3rd",
            Declension::Fourth => "4th",
            Declension::Fifth => "5th",
            Declension::PluralFirst => "1st (plural only)",
            Declension::PluralSecondMasculine => "2nd masculine (plural only)",
            Declension::PluralSecondNeuter => "2nd neuter (plural only)",
        };
        f.write_str(name)
    }
}

/// A declension family together with the stem its endings attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Declension family.
    pub declension: Declension,
    /// Stem the endings are appended to.
    pub stem: String,
}

/// The twelve case/number forms of one noun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paradigm {
    /// Declension the forms were generated with.
    pub declension: Declension,
    forms: [String; 12],
}

impl Paradigm {
    /// The form in a given slot.
    #[must_use]
    pub fn get(&self, label: CaseLabel) -> &str {
        &self.forms[label.index()]
    }

    /// All slots in paradigm order.
    pub fn iter(&self) -> impl Iterator<Item = (CaseLabel, &str)> {
        CaseLabel::ALL
            .into_iter()
            .zip(self.forms.iter().map(String::as_str))
    }
}

/// The `n`th character counting from the end (0 = last), unmarked.
fn char_from_end(s: &str, n: usize) -> Option<char> {
    s.chars().rev().nth(n).map(strip_mark)
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c.to_ascii_lowercase())
}

fn ends_with_any(s: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| s.ends_with(suffix))
}

/// Classify a lemma and compute its stem.
///
/// # Errors
///
/// Returns [`DeclensionError::EmptyLemma`] if either part is blank and
/// [`DeclensionError::UnrecognizedDeclension`] when no pattern matches.
pub fn classify(nominative: &str, genitive: &str) -> Result<Classification, DeclensionError> {
    let nom = nominative.trim();
    let gen_sg = genitive.trim();

    if nom.is_empty() || gen_sg.is_empty() {
        return Err(DeclensionError::EmptyLemma {
            nominative: nominative.to_string(),
            genitive: genitive.to_string(),
        });
    }

    let found = |declension: Declension, stem: &str| {
        Ok(Classification {
            declension,
            stem: stem.to_string(),
        })
    };

    if gen_sg.ends_with("ae") {
        return found(Declension::First, drop_chars(gen_sg, 2));
    }
    if gen_sg.ends_with("is") {
        return found(Declension::Third, drop_chars(gen_sg, 2));
    }
    if ends_with_any(gen_sg, &["ūs", "us"]) {
        return found(Declension::Fourth, drop_chars(gen_sg, 2));
    }
    if ends_with_any(nom, &["ēs", "es"]) && ends_with_any(gen_sg, &["ī", "i"]) {
        return found(Declension::Fifth, drop_chars(gen_sg, 1));
    }
    if gen_sg.ends_with("um") {
        if nom.ends_with("ae") {
            return found(Declension::PluralFirst, drop_chars(nom, 2));
        }
        if ends_with_any(nom, &["ī", "i"]) {
            return found(Declension::PluralSecondMasculine, drop_chars(nom, 1));
        }
        if nom.ends_with('a') {
            return found(Declension::PluralSecondNeuter, drop_chars(nom, 1));
        }
        return Err(DeclensionError::UnrecognizedDeclension {
            nominative: nom.to_string(),
            genitive: gen_sg.to_string(),
        });
    }
    if ends_with_any(gen_sg, &["ī", "i"]) {
        return found(Declension::Second, drop_chars(gen_sg, 1));
    }

    Err(DeclensionError::UnrecognizedDeclension {
        nominative: nom.to_string(),
        genitive: gen_sg.to_string(),
    })
}

/// Generate the complete paradigm of a noun.
///
/// `nom_sg` and `gen_sg` of the result are always the inputs, trimmed.
///
/// # Errors
///
/// See [`classify`].
pub fn decline(
    nominative: &str,
    genitive: &str,
    gender: Gender,
) -> Result<Paradigm, DeclensionError> {
    let Classification { declension, stem } = classify(nominative, genitive)?;
    let nom = nominative.trim();
    let gen_sg = genitive.trim();

    let mut forms = match declension {
        Declension::First => with_endings(nom, gen_sg, &stem, &FIRST),
        Declension::Second => second(nom, gen_sg, &stem, gender),
        Declension::Third => third(nom, gen_sg, &stem, gender),
        Declension::Fourth => fourth(nom, gen_sg, &stem, gender),
        Declension::Fifth => fifth(nom, gen_sg, &stem),
        Declension::PluralFirst => plural_only(&stem, &FIRST_PLURAL),
        Declension::PluralSecondMasculine => plural_only(&stem, &SECOND_PLURAL_MASCULINE),
        Declension::PluralSecondNeuter => plural_only(&stem, &SECOND_PLURAL_NEUTER),
    };

    forms[CaseLabel::NomSg.index()] = nom.to_string();
    forms[CaseLabel::GenSg.index()] = gen_sg.to_string();

    Ok(Paradigm { declension, forms })
}

fn with_endings(nom: &str, gen_sg: &str, stem: &str, endings: &Endings) -> [String; 12] {
    let mut forms: [String; 12] = Default::default();
    forms[0] = nom.to_string();
    forms[1] = gen_sg.to_string();
    for (slot, ending) in forms[2..].iter_mut().zip(endings) {
        *slot = format!("{stem}{ending}");
    }
    forms
}

fn plural_only(stem: &str, endings: &PluralEndings) -> [String; 12] {
    let mut forms: [String; 12] = Default::default();
    for (i, slot) in forms.iter_mut().enumerate() {
        *slot = format!("{stem}{}", endings[i % 6]);
    }
    forms
}

/// Neuters share nominative, accusative and vocative in each number.
fn apply_neuter(forms: &mut [String; 12], nom: &str, plural: &str) {
    forms[CaseLabel::AccSg.index()] = nom.to_string();
    forms[CaseLabel::VocSg.index()] = nom.to_string();
    forms[CaseLabel::NomPl.index()] = plural.to_string();
    forms[CaseLabel::AccPl.index()] = plural.to_string();
    forms[CaseLabel::VocPl.index()] = plural.to_string();
}

fn second(nom: &str, gen_sg: &str, stem: &str, gender: Gender) -> [String; 12] {
    let mut forms = with_endings(nom, gen_sg, stem, &SECOND);

    match char_from_end(stem, 0) {
        // puer, ager: vocative is the nominative
        Some('r') => forms[CaseLabel::VocSg.index()] = nom.to_string(),
        // gladius, fīlius: short vocative in -ī
        Some('i') => forms[CaseLabel::VocSg.index()] = format!("{}ī", drop_chars(stem, 1)),
        _ => {}
    }

    if gender == Gender::Neuter {
        apply_neuter(&mut forms, nom, &format!("{stem}a"));
    }

    forms
}

/// Whether a third-declension noun takes `-ium` in the genitive plural.
fn is_i_stem(nom: &str, gen_sg: &str, stem: &str) -> bool {
    let folded_nom = fold(nom);

    if syllables::count(nom) == syllables::count(gen_sg) {
        // parisyllabic: hostis, hostis; nūbēs, nūbis
        return folded_nom.ends_with("is") || folded_nom.ends_with("es");
    }

    if folded_nom.ends_with('x') || folded_nom.ends_with('s') {
        // two consonants before the genitive ending: urbs, urbis; nox, noctis
        return match (char_from_end(stem, 0), char_from_end(stem, 1)) {
            (Some(last), Some(before)) => !is_vowel(last) && !is_vowel(before),
            _ => false,
        };
    }

    false
}

fn third(nom: &str, gen_sg: &str, stem: &str, gender: Gender) -> [String; 12] {
    let mut forms = with_endings(nom, gen_sg, stem, &THIRD);
    forms[CaseLabel::VocSg.index()] = nom.to_string();

    if is_i_stem(nom, gen_sg, stem) {
        forms[CaseLabel::GenPl.index()] = format!("{stem}ium");
    }

    if gender == Gender::Neuter {
        let folded_nom = fold(nom);
        if folded_nom.ends_with('e') || folded_nom.ends_with("al") || folded_nom.ends_with("ar") {
            // mare, animal, exemplar
            apply_neuter(&mut forms, nom, &format!("{stem}ia"));
            forms[CaseLabel::AblSg.index()] = format!("{stem}ī");
            forms[CaseLabel::GenPl.index()] = format!("{stem}ium");
        } else {
            apply_neuter(&mut forms, nom, &format!("{stem}a"));
        }
    }

    forms
}

fn fourth(nom: &str, gen_sg: &str, stem: &str, gender: Gender) -> [String; 12] {
    let mut forms = with_endings(nom, gen_sg, stem, &FOURTH);

    if gender == Gender::Neuter {
        apply_neuter(&mut forms, nom, &format!("{stem}ua"));
        forms[CaseLabel::DatSg.index()] = format!("{stem}ū");
    }

    forms
}

fn fifth(nom: &str, gen_sg: &str, stem: &str) -> [String; 12] {
    // the endings attach to a long-ē stem: re- → rē-, die- → diē-
    let base = format!("{}ē", drop_chars(stem, 1));
    let mut forms = with_endings(nom, gen_sg, &base, &FIFTH);
    let short = drop_chars(&base, 1);

    forms[CaseLabel::AccSg.index()] = format!("{short}em");

    // after a consonant the ē shortens before ī: reī, fideī (but diēī)
    if char_from_end(&base, 1) != Some('i') {
        forms[CaseLabel::DatSg.index()] = format!("{short}eī");
    }

    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(nom: &str, gen_sg: &str, gender: Gender) -> Vec<String> {
        decline(nom, gen_sg, gender)
            .unwrap()
            .iter()
            .map(|(_, f)| f.to_string())
            .collect()
    }

    #[test]
    fn test_first_declension() {
        assert_eq!(
            forms("puella", "puellae", Gender::Feminine),
            [
                "puella", "puellae", "puellae", "puellam", "puellā", "puella", "puellae",
                "puellārum", "puellīs", "puellās", "puellīs", "puellae"
            ]
        );
    }

    #[test]
    fn test_second_declension_ius() {
        let p = decline("gladius", "gladiī", Gender::Masculine).unwrap();
        assert_eq!(p.declension, Declension::Second);
        assert_eq!(p.get(CaseLabel::AccSg), "gladium");
        assert_eq!(p.get(CaseLabel::VocSg), "gladī");
        assert_eq!(p.get(CaseLabel::NomPl), "gladiī");
        assert_eq!(p.get(CaseLabel::GenPl), "gladiōrum");
    }

    #[test]
    fn test_second_declension_r_keeps_vocative() {
        let p = decline("ager", "agrī", Gender::Masculine).unwrap();
        assert_eq!(p.get(CaseLabel::VocSg), "ager");
        assert_eq!(p.get(CaseLabel::AccSg), "agrum");
    }

    #[test]
    fn test_second_declension_plain_vocative() {
        let p = decline("focus", "focī", Gender::Masculine).unwrap();
        assert_eq!(p.get(CaseLabel::VocSg), "foce");
        assert_eq!(p.get(CaseLabel::DatPl), "focīs");
    }

    #[test]
    fn test_second_declension_neuter() {
        let p = decline("strophium", "strophiī", Gender::Neuter).unwrap();
        assert_eq!(p.get(CaseLabel::AccSg), "strophium");
        assert_eq!(p.get(CaseLabel::VocSg), "strophium");
        assert_eq!(p.get(CaseLabel::NomPl), "strophia");
        assert_eq!(p.get(CaseLabel::AccPl), "strophia");
        assert_eq!(p.get(CaseLabel::AblSg), "strophiō");
    }

    #[test]
    fn test_third_declension_consonant_stem() {
        let p = decline("rēx", "rēgis", Gender::Masculine).unwrap();
        assert_eq!(p.get(CaseLabel::AccSg), "rēgem");
        assert_eq!(p.get(CaseLabel::VocSg), "rēx");
        assert_eq!(p.get(CaseLabel::GenPl), "rēgum");
        assert_eq!(p.get(CaseLabel::DatPl), "rēgibus");
    }

    #[test]
    fn test_third_declension_i_stems() {
        let hostis = decline("hostis", "hostis", Gender::Masculine).unwrap();
        assert_eq!(hostis.get(CaseLabel::GenPl), "hostium");

        let urbs = decline("urbs", "urbis", Gender::Feminine).unwrap();
        assert_eq!(urbs.get(CaseLabel::GenPl), "urbium");

        let nubes = decline("nūbēs", "nūbis", Gender::Feminine).unwrap();
        assert_eq!(nubes.declension, Declension::Third);
        assert_eq!(nubes.get(CaseLabel::GenPl), "nūbium");
    }

    #[test]
    fn test_third_declension_neuter() {
        assert_eq!(
            forms("lūmen", "lūminis", Gender::Neuter),
            [
                "lūmen", "lūminis", "lūminī", "lūmen", "lūmine", "lūmen", "lūmina", "lūminum",
                "lūminibus", "lūmina", "lūminibus", "lūmina"
            ]
        );
    }

    #[test]
    fn test_third_declension_neuter_i_stem() {
        let p = decline("animal", "animālis", Gender::Neuter).unwrap();
        assert_eq!(p.get(CaseLabel::AblSg), "animālī");
        assert_eq!(p.get(CaseLabel::NomPl), "animālia");
        assert_eq!(p.get(CaseLabel::GenPl), "animālium");

        let mare = decline("mare", "maris", Gender::Neuter).unwrap();
        assert_eq!(mare.get(CaseLabel::AblSg), "marī");
        assert_eq!(mare.get(CaseLabel::AccPl), "maria");
    }

    #[test]
    fn test_fourth_declension() {
        let p = decline("manus", "manūs", Gender::Feminine).unwrap();
        assert_eq!(p.declension, Declension::Fourth);
        assert_eq!(p.get(CaseLabel::DatSg), "manuī");
        assert_eq!(p.get(CaseLabel::GenPl), "manuum");

        let cornu = decline("cornū", "cornūs", Gender::Neuter).unwrap();
        assert_eq!(cornu.get(CaseLabel::DatSg), "cornū");
        assert_eq!(cornu.get(CaseLabel::NomPl), "cornua");
    }

    #[test]
    fn test_fifth_declension() {
        let res = decline("rēs", "reī", Gender::Feminine).unwrap();
        assert_eq!(res.declension, Declension::Fifth);
        assert_eq!(res.get(CaseLabel::GenSg), "reī");
        assert_eq!(res.get(CaseLabel::DatSg), "reī");
        assert_eq!(res.get(CaseLabel::AccSg), "rem");
        assert_eq!(res.get(CaseLabel::AblSg), "rē");
        assert_eq!(res.get(CaseLabel::GenPl), "rērum");

        let dies = decline("diēs", "diēī", Gender::Masculine).unwrap();
        assert_eq!(dies.get(CaseLabel::DatSg), "diēī");
        assert_eq!(dies.get(CaseLabel::AccSg), "diem");
        assert_eq!(dies.get(CaseLabel::DatPl), "diēbus");
    }

    #[test]
    fn test_plural_only() {
        let soleae = decline("soleae", "soleārum", Gender::Feminine).unwrap();
        assert_eq!(soleae.declension, Declension::PluralFirst);
        assert_eq!(soleae.get(CaseLabel::AccSg), "soleās");
        assert_eq!(soleae.get(CaseLabel::AccPl), "soleās");

        let liberi = decline("līberī", "līberōrum", Gender::Masculine).unwrap();
        assert_eq!(liberi.get(CaseLabel::AccSg), "līberōs");

        let arma = decline("arma", "armōrum", Gender::Neuter).unwrap();
        assert_eq!(arma.get(CaseLabel::DatSg), "armīs");
        assert!(arma.declension.is_plural_only());
    }

    #[test]
    fn test_nom_and_gen_kept_verbatim() {
        let p = decline("rēs", "rēī", Gender::Feminine).unwrap();
        assert_eq!(p.get(CaseLabel::NomSg), "rēs");
        assert_eq!(p.get(CaseLabel::GenSg), "rēī");
    }

    #[test]
    fn test_unrecognized_declension() {
        assert!(matches!(
            decline("foo", "foox", Gender::Neuter),
            Err(DeclensionError::UnrecognizedDeclension { .. })
        ));
        assert!(matches!(
            decline("templo", "templum", Gender::Neuter),
            Err(DeclensionError::UnrecognizedDeclension { .. })
        ));
    }

    #[test]
    fn test_empty_lemma() {
        assert!(matches!(
            decline("", "puellae", Gender::Feminine),
            Err(DeclensionError::EmptyLemma { .. })
        ));
    }
}
