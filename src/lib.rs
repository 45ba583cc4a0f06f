// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Mundus: the core of a Latin-language text adventure.
//!
//! Players type Latin commands (`cape gladium`, `pōne lānam in saccō`,
//! `da gladium Lūciae`) and every noun must stand in the right case. This
//! crate provides:
//! - A noun declension engine producing all twelve forms of a noun
//! - Object resolution among same-named things (`2-gladium`)
//! - Hands, carrying limits and encumbrance
//! - Containers with volume and shape fit, layered clothing
//! - The player commands themselves, over an in-memory world
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     commands (verbs, messages)      │
//! ├──────────────────┬──────────────────┤
//! │ resolve, grammar │      world       │
//! ├──────────────────┴──────────────────┤
//! │      latin (declension, forms)      │
//! └─────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod grammar;
pub mod latin;
pub mod resolve;
pub mod world;

pub use commands::{CommandError, Outcome, Verb, execute};
pub use config::WorldConfig;
pub use error::{ConfigError, SnapshotError, WorldError};
pub use latin::{CaseLabel, DeclensionError, Gender, Paradigm, decline};
pub use world::{Entity, EntityId, Hand, Lemma, World};
