//! Latin language layer.
//!
//! Everything the game needs to talk about objects in Latin:
//! - Noun declension (five declensions plus plural-only patterns)
//! - The per-object form table and alias set
//! - Adjective agreement endings for generated messages
//! - Transliteration so players can type without macrons

mod adjective;
mod case;
mod declension;
mod forms;
mod gender;
mod list;
mod syllables;
mod translit;

pub use adjective::{ablative_participle, agreeing, esse, ille, us_a_um};
pub use case::{Case, CaseLabel, Number};
pub use declension::{Classification, Declension, DeclensionError, Paradigm, classify, decline};
pub use forms::{Aliases, NounForms, populate_forms};
pub use gender::Gender;
pub use list::list_to_string;
pub use syllables::count as count_syllables;
pub use translit::{drop_chars, fold, has_marks, strip_mark, transliterate};
