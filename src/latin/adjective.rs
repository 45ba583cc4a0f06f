//! Adjective and participle agreement.
//!
//! Messages build participles and adjectives on the fly (`claus` + ending,
//! `nūd` + ending), so only the ending tables are needed.

use crate::latin::case::CaseLabel;
use crate::latin::forms::NounForms;
use crate::latin::gender::Gender;

/// Ending of a first/second-declension adjective (`-us, -a, -um`).
#[must_use]
pub const fn us_a_um(label: CaseLabel, gender: Gender) -> &'static str {
    use CaseLabel as L;
    use Gender as G;

    match (label, gender) {
        (L::NomSg, G::Masculine) => "us",
        (L::NomSg, G::Feminine) => "a",
        (L::NomSg, G::Neuter) => "um",
        (L::GenSg, G::Feminine) => "ae",
        (L::GenSg, _) => "ī",
        (L::DatSg, G::Feminine) => "ae",
        (L::DatSg, _) => "ō",
        (L::AccSg, G::Feminine) => "am",
        (L::AccSg, _) => "um",
        (L::AblSg, G::Feminine) => "ā",
        (L::AblSg, _) => "ō",
        (L::VocSg, G::Masculine) => "e",
        (L::VocSg, G::Feminine) => "a",
        (L::VocSg, G::Neuter) => "um",
        (L::NomPl | L::VocPl, G::Masculine) => "ī",
        (L::NomPl | L::VocPl, G::Feminine) => "ae",
        (L::NomPl | L::VocPl, G::Neuter) => "a",
        (L::GenPl, G::Feminine) => "ārum",
        (L::GenPl, _) => "ōrum",
        (L::DatPl | L::AblPl, _) => "īs",
        (L::AccPl, G::Masculine) => "ōs",
        (L::AccPl, G::Feminine) => "ās",
        (L::AccPl, G::Neuter) => "a",
    }
}

/// Ending agreeing with a specific noun.
///
/// Plural-only nouns (`soleae`) take the plural ending for every slot.
#[must_use]
pub fn agreeing(label: CaseLabel, gender: Gender, forms: &NounForms) -> &'static str {
    if forms.is_plural_only() {
        us_a_um(label.pluralized(), gender)
    } else {
        us_a_um(label, gender)
    }
}

/// `est` or `sunt` for a noun used as subject.
#[must_use]
pub fn esse(forms: &NounForms) -> &'static str {
    if forms.is_plural_only() { "sunt" } else { "est" }
}

/// Ending of the demonstrative `ille, illa, illud` in the nominative.
#[must_use]
pub const fn ille(gender: Gender) -> &'static str {
    match gender {
        Gender::Masculine => "e",
        Gender::Feminine => "a",
        Gender::Neuter => "ud",
    }
}

/// Ablative participle ending agreeing with a list of uncovered or covered
/// garments: plural for several, otherwise by the single garment's gender.
#[must_use]
pub fn ablative_participle(genders: &[Gender]) -> &'static str {
    match genders {
        [single] => us_a_um(CaseLabel::AblSg, *single),
        _ => us_a_um(CaseLabel::AblPl, Gender::Feminine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latin::forms::{Aliases, populate_forms};

    #[test]
    fn test_table() {
        assert_eq!(us_a_um(CaseLabel::NomSg, Gender::Feminine), "a");
        assert_eq!(us_a_um(CaseLabel::NomSg, Gender::Masculine), "us");
        assert_eq!(us_a_um(CaseLabel::AccPl, Gender::Neuter), "a");
        assert_eq!(us_a_um(CaseLabel::GenPl, Gender::Feminine), "ārum");
    }

    #[test]
    fn test_plural_only_agreement() {
        let mut forms = NounForms::new();
        let mut aliases = Aliases::new();
        populate_forms(&mut forms, &mut aliases, "soleae", "soleārum", Gender::Feminine).unwrap();

        assert_eq!(agreeing(CaseLabel::NomSg, Gender::Feminine, &forms), "ae");
        assert_eq!(esse(&forms), "sunt");
    }

    #[test]
    fn test_esse_singular() {
        let mut forms = NounForms::new();
        let mut aliases = Aliases::new();
        populate_forms(&mut forms, &mut aliases, "iānua", "iānuae", Gender::Feminine).unwrap();
        assert_eq!(esse(&forms), "est");
        assert_eq!(agreeing(CaseLabel::NomSg, Gender::Feminine, &forms), "a");
    }

    #[test]
    fn test_ablative_participle() {
        assert_eq!(ablative_participle(&[Gender::Feminine]), "ā");
        assert_eq!(ablative_participle(&[Gender::Neuter]), "ō");
        assert_eq!(ablative_participle(&[Gender::Neuter, Gender::Feminine]), "īs");
    }

    #[test]
    fn test_ille() {
        assert_eq!(ille(Gender::Neuter), "ud");
    }
}
