//! Player commands.
//!
//! Every command runs the same pipeline: argument shape, object resolution,
//! grammatical case of every noun, domain preconditions, and only then the
//! state change followed by messages to the actor, the room and (for
//! transfers) the recipient. A refusal is a Latin message to the actor and
//! [`CommandError::Rejected`]; nothing has changed when it is returned.

mod build;
mod clothing;
mod container;
mod doors;
mod give;
mod leash;
mod look;
mod movement;
mod speech;
mod take;
mod time;

use thiserror::Error;
use tracing::{debug, trace};

use crate::error::WorldError;
use crate::grammar::check_case;
use crate::latin::{CaseLabel, agreeing, esse, fold, us_a_um};
use crate::resolve::which_one;
use crate::world::{EntityId, World};

pub use look::{describe_character, describe_room};
pub use time::time_of_day;

/// Why a command stopped.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A precondition failed and the actor has been told why.
    #[error("command rejected")]
    Rejected,
    /// The world was used inconsistently.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Result of a command handler.
pub type CommandResult = Result<(), CommandError>;

/// What became of a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran and changed the world or showed something.
    Done,
    /// The command was refused.
    Rejected,
    /// No verb or exit matched.
    Unknown,
}

/// Command verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Take.
    Cape,
    /// Drop.
    Relinque,
    /// Give.
    Da,
    /// Say.
    Dic,
    /// Look.
    Specta,
    /// Put into a container.
    Pone,
    /// Take out of a container.
    Excipe,
    /// Look into a container.
    Inspice,
    /// Hold in a given hand.
    Tene,
    /// Tie with a leash.
    Liga,
    /// Untie.
    Solve,
    /// Put on.
    Indue,
    /// Take off.
    Exue,
    /// Inventory.
    Habeo,
    /// Build a room.
    Muniatur,
    /// Create an object.
    Creatur,
    /// Create a character.
    Nascatur,
    /// Build a door.
    Aperiatur,
    /// Open a door.
    Aperi,
    /// Close a door.
    Claude,
    /// Tell the time.
    Tempus,
}

impl Verb {
    /// Every verb.
    pub const ALL: [Verb; 21] = [
        Verb::Cape,
        Verb::Relinque,
        Verb::Da,
        Verb::Dic,
        Verb::Specta,
        Verb::Pone,
        Verb::Excipe,
        Verb::Inspice,
        Verb::Tene,
        Verb::Liga,
        Verb::Solve,
        Verb::Indue,
        Verb::Exue,
        Verb::Habeo,
        Verb::Muniatur,
        Verb::Creatur,
        Verb::Nascatur,
        Verb::Aperiatur,
        Verb::Aperi,
        Verb::Claude,
        Verb::Tempus,
    ];

    /// The verb as written in Latin.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::Cape => "cape",
            Verb::Relinque => "relinque",
            Verb::Da => "da",
            Verb::Dic => "dīc",
            Verb::Specta => "spectā",
            Verb::Pone => "pōne",
            Verb::Excipe => "excipe",
            Verb::Inspice => "inspice",
            Verb::Tene => "tenē",
            Verb::Liga => "ligā",
            Verb::Solve => "solve",
            Verb::Indue => "indue",
            Verb::Exue => "exue",
            Verb::Habeo => "habeō",
            Verb::Muniatur => "mūniātur",
            Verb::Creatur => "creātur",
            Verb::Nascatur => "nascātur",
            Verb::Aperiatur => "aperiātur",
            Verb::Aperi => "aperī",
            Verb::Claude => "claude",
            Verb::Tempus => "tempus",
        }
    }

    /// Recognise a verb, with or without macrons.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        let word = fold(word);
        Self::ALL.into_iter().find(|verb| fold(verb.as_str()) == word)
    }

    fn run(self, world: &mut World, actor: EntityId, args: &str) -> CommandResult {
        match self {
            Verb::Cape => take::cape(world, actor, args),
            Verb::Relinque => take::relinque(world, actor, args),
            Verb::Tene => take::tene(world, actor, args),
            Verb::Da => give::da(world, actor, args),
            Verb::Dic => speech::dic(world, actor, args),
            Verb::Specta => look::specta(world, actor, args),
            Verb::Habeo => look::habeo(world, actor, args),
            Verb::Pone => container::pone(world, actor, args),
            Verb::Excipe => container::excipe(world, actor, args),
            Verb::Inspice => container::inspice(world, actor, args),
            Verb::Liga => leash::liga(world, actor, args),
            Verb::Solve => leash::solve(world, actor, args),
            Verb::Indue => clothing::indue(world, actor, args),
            Verb::Exue => clothing::exue(world, actor, args),
            Verb::Muniatur => build::muniatur(world, actor, args),
            Verb::Creatur => build::creatur(world, actor, args),
            Verb::Nascatur => build::nascatur(world, actor, args),
            Verb::Aperiatur => doors::aperiatur(world, actor, args),
            Verb::Aperi => doors::aperi(world, actor, args),
            Verb::Claude => doors::claude(world, actor, args),
            Verb::Tempus => time::tempus(world, actor, args),
        }
    }
}

/// Run one line of input typed by `actor`.
///
/// The first word is matched against the verbs; failing that, the whole
/// line against the exits of the actor's room. Characters with vitality
/// get a `Vīta` prompt afterwards.
///
/// # Errors
///
/// Returns a [`WorldError`] if `actor` is not a character or a command
/// met an inconsistent world. Player mistakes are not errors.
pub fn execute(world: &mut World, actor: EntityId, line: &str) -> Result<Outcome, WorldError> {
    world.character(actor)?;
    let line = line.trim();
    let (word, args) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, args)| (word, args.trim()));
    if word.is_empty() {
        return Ok(Outcome::Unknown);
    }

    let result = if let Some(verb) = Verb::parse(word) {
        debug!(%actor, verb = verb.as_str(), args, "command");
        Some(verb.run(world, actor, args))
    } else {
        movement::find_exit(world, actor, line).map(|exit| movement::go(world, actor, exit))
    };

    let outcome = match result {
        Some(Ok(())) => Outcome::Done,
        Some(Err(CommandError::Rejected)) => Outcome::Rejected,
        Some(Err(CommandError::World(err))) => return Err(err),
        None => {
            world.msg(actor, format!("Nōn intellegō '{word}'."));
            Outcome::Unknown
        }
    };
    trace!(%actor, ?outcome, "command finished");

    prompt(world, actor);
    Ok(outcome)
}

fn prompt(world: &mut World, actor: EntityId) {
    if let Ok(state) = world.character(actor) {
        let text = format!("Vīta: {}/{}", state.vitality.current, state.vitality.max);
        world.msg(actor, text);
    }
}

/// Tell the actor why the command stops.
fn refuse<T>(world: &mut World, actor: EntityId, text: impl Into<String>) -> Result<T, CommandError> {
    let text = text.into();
    trace!(%actor, text, "refused");
    world.msg(actor, text);
    Err(CommandError::Rejected)
}

/// Resolve a word among candidates, or stop.
fn resolve(
    world: &mut World,
    actor: EntityId,
    arg: &str,
    candidates: &[EntityId],
) -> Result<(EntityId, String), CommandError> {
    match which_one(world, actor, arg, candidates) {
        (Some(target), word) => Ok((target, word)),
        (None, _) => Err(CommandError::Rejected),
    }
}

/// Check a case, or stop.
fn require_case(
    world: &mut World,
    actor: EntityId,
    target: EntityId,
    token: &str,
    label: CaseLabel,
) -> CommandResult {
    if check_case(world, actor, target, token, label) {
        Ok(())
    } else {
        Err(CommandError::Rejected)
    }
}

/// Only builders may use the creation commands.
fn require_builder(world: &mut World, actor: EntityId) -> CommandResult {
    if world.character(actor)?.builder {
        Ok(())
    } else {
        refuse(world, actor, "Hoc facere nōn licet.")
    }
}

/// An entity's form for a case slot, or its key if it has none.
fn form(world: &World, id: EntityId, label: CaseLabel) -> String {
    world
        .get(id)
        .map(|e| e.form(label).to_string())
        .unwrap_or_default()
}

/// An entity's key.
fn key(world: &World, id: EntityId) -> String {
    world.get(id).map(|e| e.key.clone()).unwrap_or_default()
}

/// The room the actor stands in.
fn here(world: &World, actor: EntityId) -> Result<EntityId, CommandError> {
    world
        .entity(actor)?
        .location
        .ok_or(CommandError::World(WorldError::UnknownEntity(actor)))
}

/// Tell everyone else in the actor's room.
fn announce(world: &mut World, actor: EntityId, text: &str, also_exclude: &[EntityId]) {
    if let Some(room) = world.get(actor).and_then(|e| e.location) {
        let mut exclude = vec![actor];
        exclude.extend_from_slice(also_exclude);
        world.msg_contents(room, text, &exclude);
    }
}

/// A participle or adjective with its copula, agreeing with the entity:
/// `vacuus est`, `apertae sunt`.
fn predicate(world: &World, id: EntityId, stem: &str) -> String {
    let Some(entity) = world.get(id) else {
        return format!("{stem}us est");
    };
    let gender = entity.gender_or_default();
    match entity.forms() {
        Some(forms) => format!(
            "{stem}{} {}",
            agreeing(CaseLabel::NomSg, gender, forms),
            esse(forms)
        ),
        None => format!("{stem}{} est", us_a_um(CaseLabel::NomSg, gender)),
    }
}

/// Upper-case the first letter.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
