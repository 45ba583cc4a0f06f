//! Interactive play command implementation.

use super::CliError;
use mundus::world::{DoorState, EntityKind};
use mundus::commands;
use mundus::{EntityId, Gender, Lemma, World, WorldConfig};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, trace, warn};

/// Options for the play command.
#[derive(Debug)]
pub(crate) struct PlayOptions {
    /// Snapshot to start from.
    pub(crate) world: Option<PathBuf>,
    /// TOML configuration for a fresh world.
    pub(crate) config: Option<PathBuf>,
    /// Random seed.
    pub(crate) seed: Option<u64>,
    /// Read commands from a file instead of stdin.
    pub(crate) script: Option<PathBuf>,
    /// Save the world here on exit.
    pub(crate) save: Option<PathBuf>,
    /// Simulated seconds that pass after every command.
    pub(crate) wander_every: Option<u64>,
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration, snapshot or script cannot be read,
/// or the world cannot be saved.
pub(crate) fn execute(options: PlayOptions) -> Result<(), CliError> {
    let (mut world, player) = match &options.world {
        Some(path) => {
            let world = World::load(path)?;
            let player = world
                .entities()
                .find(|e| e.is_character())
                .map(|e| e.id)
                .ok_or_else(|| CliError::new(format!("{} has no character to play", path.display())))?;
            (world, player)
        }
        None => {
            let config = match &options.config {
                Some(path) => WorldConfig::load(path)?,
                None => WorldConfig::default(),
            };
            let seed = options.seed.unwrap_or_else(|| {
                use std::time::{SystemTime, UNIX_EPOCH};
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
                    .unwrap_or(42)
            });
            starter_world(config, seed)?
        }
    };
    info!(%player, entities = world.len(), "starting");

    let input: Box<dyn BufRead> = match &options.script {
        Some(path) => Box::new(io::BufReader::new(fs::File::open(path).map_err(|e| {
            CliError::new(format!("Failed to read {}: {e}", path.display()))
        })?)),
        None => Box::new(io::BufReader::new(io::stdin())),
    };

    commands::execute(&mut world, player, "spectā")?;
    flush(&mut world, player)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "valē" | "vale" | "quit") {
            break;
        }
        if options.script.is_some() {
            println!("> {line}");
        }
        commands::execute(&mut world, player, line)?;
        if let Some(seconds) = options.wander_every {
            world.advance_time(seconds);
        }
        flush(&mut world, player)?;
    }

    if let Some(path) = &options.save {
        world.save(path)?;
        println!("Mundus servātus est: {}", path.display());
    }
    Ok(())
}

/// Print the player's messages and drop everyone else's.
fn flush(world: &mut World, player: EntityId) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    for text in world.take_messages(player) {
        writeln!(out, "{text}")?;
    }
    out.flush()?;
    let dropped = world.take_all_messages().len();
    if dropped > 0 {
        trace!(dropped, "messages for other characters");
    }
    Ok(())
}

/// A small house: hall with a hearth, a garden, a kitchen behind a door,
/// and a wandering slave.
fn starter_world(config: WorldConfig, seed: u64) -> Result<(World, EntityId), CliError> {
    let mut world = World::new(config, seed);

    let hall = world.create_room("ātrium", Some(&Lemma::new("ātrium", "ātriī", Gender::Neuter)))?;
    let garden = world.create_room("hortus", Some(&Lemma::new("hortus", "hortī", Gender::Masculine)))?;
    let kitchen = world.create_room("culīna", Some(&Lemma::new("culīna", "culīnae", Gender::Feminine)))?;
    for (room, desc) in [
        (hall, "Ātrium magnum et obscūrum; in mediō focus ardet."),
        (garden, "Hortus parvus, rosīs plēnus."),
        (kitchen, "Culīna fūmōsa."),
    ] {
        if let Some(entity) = world.get_mut(room) {
            entity.desc = Some(desc.to_string());
        }
    }

    world.create_exit("hortus", hall, garden, None)?;
    world.create_exit("ātrium", garden, hall, None)?;
    let door = Lemma::new("iānua", "iānuae", Gender::Feminine);
    let forth = world.create_exit("culīna", hall, kitchen, Some(&door))?;
    let back = world.create_exit("ātrium", kitchen, hall, Some(&door))?;
    for (side, other) in [(forth, back), (back, forth)] {
        if let Some(EntityKind::Exit { door: leaf, .. }) = world.get_mut(side).map(|e| &mut e.kind) {
            *leaf = Some(DoorState {
                closed: true,
                return_exit: Some(other),
            });
        }
    }

    for name in ["focus", "lūmen", "saccus", "gladius"] {
        world.spawn_prototype(name, hall)?;
    }
    for name in ["tunica", "pallium", "petasus", "lōrum"] {
        world.spawn_prototype(name, garden)?;
    }
    world.spawn_prototype("lāna", kitchen)?;

    let gender = if world.rng_mut().chance(0.5) {
        Gender::Masculine
    } else {
        Gender::Feminine
    };
    let player = world.spawn_roman(gender, hall)?;
    if let Some(state) = world.get_mut(player).and_then(|e| e.character_mut()) {
        state.builder = true;
    }

    match world.spawn_character(&Lemma::new("Dāvus", "Dāvī", Gender::Masculine), garden) {
        Ok(slave) => {
            if let Some(state) = world.get_mut(slave).and_then(|e| e.character_mut()) {
                state.wanderer = true;
            }
        }
        Err(e) => warn!(%e, "no wanderer"),
    }

    Ok((world, player))
}
