//! Hand and encumbrance tracking.
//!
//! Every character has two hands, tracked as two disjoint lists of
//! occupied and free hand labels, and a carried-mass counter bounded by a
//! strength-derived maximum.
//!
//! Hand occupancy and carried mass always change together, through
//! [`Grip::occupy`] and [`Grip::release`]. The [`Burden`] passed alongside
//! says whether the object's mass enters (or leaves) the counter or is
//! already accounted for, as when a garment moves from the body to a hand.
//!
//! Validation belongs to the callers: they check capacity and free hands
//! first, then commit through a grip.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CarryConfig;
use crate::latin::fold;

/// Tolerance for floating point mass comparisons.
pub const MASS_EPSILON: f64 = 1e-9;

/// One of the two hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hand {
    /// Right hand, `dextrā`.
    #[serde(rename = "dextrā")]
    Right,
    /// Left hand, `sinistrā`.
    #[serde(rename = "sinistrā")]
    Left,
}

impl Hand {
    /// Both hands.
    pub const BOTH: [Hand; 2] = [Hand::Right, Hand::Left];

    /// Ablative name, as used in `tenē gladium dextrā`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Hand::Right => "dextrā",
            Hand::Left => "sinistrā",
        }
    }

    /// Nominative name.
    #[must_use]
    pub const fn nominative(self) -> &'static str {
        match self {
            Hand::Right => "dextra",
            Hand::Left => "sinistra",
        }
    }

    /// The other hand.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Hand::Right => Hand::Left,
            Hand::Left => Hand::Right,
        }
    }

    /// Parse a hand name, with or without macrons.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match fold(name).as_str() {
            "dextra" | "dextram" | "right" => Some(Hand::Right),
            "sinistra" | "sinistram" | "left" => Some(Hand::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupied and free hands of one character.
///
/// `occupied.len() + free.len() == 2` and the lists are disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandState {
    occupied: Vec<Hand>,
    free: Vec<Hand>,
}

impl Default for HandState {
    fn default() -> Self {
        Self {
            occupied: Vec::new(),
            free: Hand::BOTH.to_vec(),
        }
    }
}

impl HandState {
    /// Both hands free.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupied hands, in the order they were filled.
    #[must_use]
    pub fn occupied(&self) -> &[Hand] {
        &self.occupied
    }

    /// Free hands.
    #[must_use]
    pub fn free(&self) -> &[Hand] {
        &self.free
    }

    /// Whether both hands hold something.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Whether a specific hand is free.
    #[must_use]
    pub fn is_free(&self, hand: Hand) -> bool {
        self.free.contains(&hand)
    }

    /// The hand a fresh pickup goes to: the dominant hand if free, else the
    /// other one.
    #[must_use]
    pub fn preferred(&self, dominant: Hand) -> Option<Hand> {
        if self.is_free(dominant) {
            Some(dominant)
        } else if self.is_free(dominant.other()) {
            Some(dominant.other())
        } else {
            None
        }
    }

    /// Move a hand from free to occupied. Returns `false` if it was not free.
    fn fill(&mut self, hand: Hand) -> bool {
        match self.free.iter().position(|&h| h == hand) {
            Some(index) => {
                self.free.remove(index);
                self.occupied.push(hand);
                true
            }
            None => false,
        }
    }

    /// Move a hand from occupied to free. Returns `false` if it was not
    /// occupied.
    fn empty(&mut self, hand: Hand) -> bool {
        match self.occupied.iter().position(|&h| h == hand) {
            Some(index) => {
                self.occupied.remove(index);
                self.free.push(hand);
                true
            }
            None => false,
        }
    }

    /// Whether the two lists partition both hands.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.occupied.len() + self.free.len() == 2
            && Hand::BOTH
                .iter()
                .all(|h| self.occupied.contains(h) != self.free.contains(h))
    }
}

/// How encumbered a character is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encumbrance {
    /// Below the encumbered threshold.
    Unburdened,
    /// Above the encumbered threshold.
    Encumbered,
    /// Above the heavily encumbered threshold.
    HeavilyEncumbered,
}

/// Carrying limits and current load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarryLimits {
    /// Most that can be lifted briefly.
    pub lift: f64,
    /// Load above which the character is encumbered.
    pub encumbered: f64,
    /// Load above which the character is heavily encumbered.
    pub heavily_encumbered: f64,
    /// Most that can be carried.
    pub max: f64,
    /// Mass currently carried.
    pub current: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl CarryLimits {
    /// Limits for a character of the given strength, carrying nothing.
    #[must_use]
    pub fn from_strength(strength: u32, config: &CarryConfig) -> Self {
        let strength = f64::from(strength);
        let limit = |multiplier: f64| round1(strength * multiplier * config.factor);
        Self {
            lift: limit(config.lift),
            encumbered: limit(config.encumbered),
            heavily_encumbered: limit(config.heavily_encumbered),
            max: limit(config.max),
            current: 0.0,
        }
    }

    /// Limits with only a maximum, for tests and scripted characters.
    #[must_use]
    pub fn with_max(max: f64) -> Self {
        Self {
            lift: max * 2.0,
            encumbered: max / 3.0,
            heavily_encumbered: max * 2.0 / 3.0,
            max,
            current: 0.0,
        }
    }

    /// Whether `mass` more can be carried without exceeding the maximum.
    #[must_use]
    pub fn can_carry(&self, mass: f64) -> bool {
        self.current + mass <= self.max + MASS_EPSILON
    }

    /// Encumbrance level at the current load.
    #[must_use]
    pub fn encumbrance(&self) -> Encumbrance {
        if self.current > self.heavily_encumbered {
            Encumbrance::HeavilyEncumbered
        } else if self.current > self.encumbered {
            Encumbrance::Encumbered
        } else {
            Encumbrance::Unburdened
        }
    }

    fn add(&mut self, mass: f64) {
        self.current += mass;
    }

    fn remove(&mut self, mass: f64) {
        self.current -= mass;
        if self.current.abs() < MASS_EPSILON {
            self.current = 0.0;
        }
    }
}

/// Whether a hand transition also moves mass in or out of the carried load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Burden {
    /// The object's mass enters or leaves the load.
    Carry(f64),
    /// The mass is already accounted for (garment taken off, item taken out
    /// of a bag the character is carrying).
    Counted,
}

/// Paired mutable access to a character's hands and load.
#[derive(Debug)]
pub struct Grip<'a> {
    hands: &'a mut HandState,
    carry: &'a mut CarryLimits,
    dominant: Hand,
}

impl<'a> Grip<'a> {
    /// Borrow a character's hands and load together.
    pub fn new(hands: &'a mut HandState, carry: &'a mut CarryLimits, dominant: Hand) -> Self {
        Self {
            hands,
            carry,
            dominant,
        }
    }

    /// Fill the preferred free hand and add the burden.
    ///
    /// Returns the hand used, or `None` (and changes nothing) when both
    /// hands are occupied.
    pub fn occupy(&mut self, burden: Burden) -> Option<Hand> {
        let hand = self.hands.preferred(self.dominant)?;
        self.occupy_hand(hand, burden).then_some(hand)
    }

    /// Fill a specific hand and add the burden. Returns `false` (and changes
    /// nothing) if that hand is occupied.
    pub fn occupy_hand(&mut self, hand: Hand, burden: Burden) -> bool {
        if !self.hands.fill(hand) {
            return false;
        }
        if let Burden::Carry(mass) = burden {
            self.carry.add(mass);
        }
        true
    }

    /// Free a hand and remove the burden. Returns `false` (and changes
    /// nothing) if the hand was not occupied.
    pub fn release(&mut self, hand: Hand, burden: Burden) -> bool {
        if !self.hands.empty(hand) {
            return false;
        }
        if let Burden::Carry(mass) = burden {
            self.carry.remove(mass);
        }
        true
    }

    /// Add or remove mass that is not held in a hand (a worn garment given
    /// away, an item put into a bag on the ground).
    pub fn adjust(&mut self, burden: Burden, adding: bool) {
        if let Burden::Carry(mass) = burden {
            if adding {
                self.carry.add(mass);
            } else {
                self.carry.remove(mass);
            }
        }
    }
}
