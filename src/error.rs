//! Error types for the world store, configuration and snapshots.
//!
//! Player mistakes are not errors here: they are answered with an in-game
//! Latin message. These types cover faults in the caller's use of the API
//! and I/O.

use std::path::PathBuf;

use thiserror::Error;

use crate::latin::DeclensionError;
use crate::world::EntityId;

/// Fault raised by a world operation.
#[derive(Debug, Error)]
pub enum WorldError {
    /// No entity with this id.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
    /// The entity is not a character.
    #[error("entity {0} is not a character")]
    NotACharacter(EntityId),
    /// The entity is not a container.
    #[error("entity {0} is not a container")]
    NotAContainer(EntityId),
    /// The entity is not a garment.
    #[error("entity {0} is not clothing")]
    NotClothing(EntityId),
    /// The entity is not an exit.
    #[error("entity {0} is not an exit")]
    NotAnExit(EntityId),
    /// Both hands of the character are occupied.
    #[error("character {0} has no free hand")]
    NoFreeHand(EntityId),
    /// The requested hand is already occupied.
    #[error("hand {hand} of character {holder} is occupied")]
    HandOccupied {
        /// Character.
        holder: EntityId,
        /// Hand name.
        hand: &'static str,
    },
    /// The object is not held by this character.
    #[error("entity {target} is not held by {holder}")]
    NotHeld {
        /// Character expected to hold it.
        holder: EntityId,
        /// Object.
        target: EntityId,
    },
    /// The garment is not worn by this character.
    #[error("entity {target} is not worn by {wearer}")]
    NotWorn {
        /// Character expected to wear it.
        wearer: EntityId,
        /// Garment.
        target: EntityId,
    },
    /// The garment is covered by another one.
    #[error("entity {target} is covered by {by}")]
    Covered {
        /// Covered garment.
        target: EntityId,
        /// Covering garment.
        by: EntityId,
    },
    /// A flexible container would outgrow the container around it.
    #[error("no room for {volume} l more in {container}")]
    NoRoom {
        /// Enclosing container that is too full.
        container: EntityId,
        /// Volume that did not fit.
        volume: f64,
    },
    /// Moving an entity would place it inside itself.
    #[error("cannot move {entity} into {destination}: it would contain itself")]
    WouldContainItself {
        /// Entity being moved.
        entity: EntityId,
        /// Requested destination.
        destination: EntityId,
    },
    /// No prototype with this name.
    #[error("unknown prototype: {0}")]
    UnknownPrototype(String),
    /// A lemma could not be declined.
    #[error(transparent)]
    Declension(#[from] DeclensionError),
}

/// Failure to load a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The TOML did not parse.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// Rendering to TOML failed.
    #[error("failed to render configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure to save or load a world snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// File I/O failed.
    #[error("snapshot I/O error on {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// JSON encoding or decoding failed.
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// The snapshot was written by an incompatible version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    Version {
        /// Version in the file.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },
    /// The snapshot describes an inconsistent world.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}
