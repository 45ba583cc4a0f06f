#![no_main]

//! Declension fuzzer.
//!
//! Any nominative/genitive pair either fails with an error or yields twelve
//! forms whose nominative and genitive singular are the trimmed inputs.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mundus::latin::{Aliases, CaseLabel, NounForms, decline, populate_forms};
use mundus::Gender;

#[derive(Arbitrary, Debug)]
struct LemmaInput {
    nominative: String,
    genitive: String,
    gender: u8,
}

fuzz_target!(|input: LemmaInput| {
    let gender = match input.gender % 3 {
        0 => Gender::Masculine,
        1 => Gender::Feminine,
        _ => Gender::Neuter,
    };

    if let Ok(paradigm) = decline(&input.nominative, &input.genitive, gender) {
        assert_eq!(paradigm.iter().count(), 12);
        assert_eq!(paradigm.get(CaseLabel::NomSg), input.nominative.trim());
        assert_eq!(paradigm.get(CaseLabel::GenSg), input.genitive.trim());
    }

    let mut forms = NounForms::new();
    let mut aliases = Aliases::new();
    if populate_forms(&mut forms, &mut aliases, &input.nominative, &input.genitive, gender).is_err() {
        assert!(forms.is_empty(), "failed registration left forms behind");
    }
});
