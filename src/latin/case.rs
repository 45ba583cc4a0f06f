//! Grammatical case and number labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grammatical case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Case {
    /// Subject.
    Nominative,
    /// Possessive.
    Genitive,
    /// Indirect object.
    Dative,
    /// Direct object.
    Accusative,
    /// Instrument, place, separation.
    Ablative,
    /// Direct address.
    Vocative,
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Number {
    /// One.
    Singular,
    /// More than one.
    Plural,
}

/// One of the twelve case/number slots of a noun paradigm.
///
/// Serialized as the short labels used throughout the game data
/// (`nom_sg`, `gen_sg`, ... `voc_pl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseLabel {
    /// Nominative singular.
    NomSg,
    /// Genitive singular.
    GenSg,
    /// Dative singular.
    DatSg,
    /// Accusative singular.
    AccSg,
    /// Ablative singular.
    AblSg,
    /// Vocative singular.
    VocSg,
    /// Nominative plural.
    NomPl,
    /// Genitive plural.
    GenPl,
    /// Dative plural.
    DatPl,
    /// Accusative plural.
    AccPl,
    /// Ablative plural.
    AblPl,
    /// Vocative plural.
    VocPl,
}

impl CaseLabel {
    /// All twelve labels in paradigm order.
    pub const ALL: [CaseLabel; 12] = [
        CaseLabel::NomSg,
        CaseLabel::GenSg,
        CaseLabel::DatSg,
        CaseLabel::AccSg,
        CaseLabel::AblSg,
        CaseLabel::VocSg,
        CaseLabel::NomPl,
        CaseLabel::GenPl,
        CaseLabel::DatPl,
        CaseLabel::AccPl,
        CaseLabel::AblPl,
        CaseLabel::VocPl,
    ];

    /// Build a label from its case and number.
    #[must_use]
    pub const fn new(case: Case, number: Number) -> Self {
        match (case, number) {
            (Case::Nominative, Number::Singular) => CaseLabel::NomSg,
            (Case::Genitive, Number::Singular) => CaseLabel::GenSg,
            (Case::Dative, Number::Singular) => CaseLabel::DatSg,
            (Case::Accusative, Number::Singular) => CaseLabel::AccSg,
            (Case::Ablative, Number::Singular) => CaseLabel::AblSg,
            (Case::Vocative, Number::Singular) => CaseLabel::VocSg,
            (Case::Nominative, Number::Plural) => CaseLabel::NomPl,
            (Case::Genitive, Number::Plural) => CaseLabel::GenPl,
            (Case::Dative, Number::Plural) => CaseLabel::DatPl,
            (Case::Accusative, Number::Plural) => CaseLabel::AccPl,
            (Case::Ablative, Number::Plural) => CaseLabel::AblPl,
            (Case::Vocative, Number::Plural) => CaseLabel::VocPl,
        }
    }

    /// Position of this slot in a paradigm (0..12).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The grammatical case of this slot.
    #[must_use]
    pub const fn case(self) -> Case {
        match self {
            CaseLabel::NomSg | CaseLabel::NomPl => Case::Nominative,
            CaseLabel::GenSg | CaseLabel::GenPl => Case::Genitive,
            CaseLabel::DatSg | CaseLabel::DatPl => Case::Dative,
            CaseLabel::AccSg | CaseLabel::AccPl => Case::Accusative,
            CaseLabel::AblSg | CaseLabel::AblPl => Case::Ablative,
            CaseLabel::VocSg | CaseLabel::VocPl => Case::Vocative,
        }
    }

    /// The grammatical number of this slot.
    #[must_use]
    pub const fn number(self) -> Number {
        if self.index() < 6 {
            Number::Singular
        } else {
            Number::Plural
        }
    }

    /// The same case in the plural.
    #[must_use]
    pub const fn pluralized(self) -> Self {
        Self::new(self.case(), Number::Plural)
    }

    /// Short label, e.g. `acc_sg`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CaseLabel::NomSg => "nom_sg",
            CaseLabel::GenSg => "gen_sg",
            CaseLabel::DatSg => "dat_sg",
            CaseLabel::AccSg => "acc_sg",
            CaseLabel::AblSg => "abl_sg",
            CaseLabel::VocSg => "voc_sg",
            CaseLabel::NomPl => "nom_pl",
            CaseLabel::GenPl => "gen_pl",
            CaseLabel::DatPl => "dat_pl",
            CaseLabel::AccPl => "acc_pl",
            CaseLabel::AblPl => "abl_pl",
            CaseLabel::VocPl => "voc_pl",
        }
    }

    /// Parse a short label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|l| l.as_str() == label)
    }
}

impl fmt::Display for CaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
