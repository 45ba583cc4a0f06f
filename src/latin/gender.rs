//! Grammatical gender.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::latin::translit::transliterate;

/// Grammatical gender of a noun. Fixed when the noun is created.
///
/// The game data names the genders with the Latin adjectives
/// `māre`, `muliebre` and `neutrum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Masculine.
    #[serde(rename = "māre", alias = "mare", alias = "masculine")]
    Masculine,
    /// Feminine.
    #[serde(rename = "muliebre", alias = "feminine")]
    Feminine,
    /// Neuter.
    #[serde(rename = "neutrum", alias = "neuter")]
    Neuter,
}

impl Gender {
    /// All genders.
    pub const ALL: [Gender; 3] = [Gender::Masculine, Gender::Feminine, Gender::Neuter];

    /// Latin name as stored in game data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Masculine => "māre",
            Gender::Feminine => "muliebre",
            Gender::Neuter => "neutrum",
        }
    }

    /// Parse a gender name, with or without macrons.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match transliterate(name.trim()).to_lowercase().as_str() {
            "mare" | "masculine" | "m" => Some(Gender::Masculine),
            "muliebre" | "feminine" | "f" => Some(Gender::Feminine),
            "neutrum" | "neuter" | "n" => Some(Gender::Neuter),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_macrons() {
        assert_eq!(Gender::parse("māre"), Some(Gender::Masculine));
        assert_eq!(Gender::parse("mare"), Some(Gender::Masculine));
        assert_eq!(Gender::parse("Muliebre"), Some(Gender::Feminine));
        assert_eq!(Gender::parse("neutrum"), Some(Gender::Neuter));
        assert_eq!(Gender::parse("commūne"), None);
    }

    #[test]
    fn test_serde_uses_latin_names() {
        assert_eq!(serde_json::to_string(&Gender::Masculine).unwrap(), "\"māre\"");
        let g: Gender = serde_json::from_str("\"mare\"").unwrap();
        assert_eq!(g, Gender::Masculine);
    }
}
