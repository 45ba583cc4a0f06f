//! Builder commands: `mūniātur`, `creātur` and `nascātur`, plus the exit
//! digging shared with `aperiātur`.

use tracing::{debug, info};

use crate::commands::{
    CommandError, CommandResult, capitalize, form, here, key, predicate, refuse, require_builder,
};
use crate::error::WorldError;
use crate::latin::{CaseLabel, Gender, decline};
use crate::world::{DoorState, EntityId, EntityKind, Lemma, PhysicalProfile, World};

/// Split `<a> <b> … = <hinc>, <illinc>` into the left-hand words and the
/// two exit names.
pub(super) fn split_assignment(args: &str) -> Option<(Vec<&str>, &str, &str)> {
    let (lhs, rhs) = args.split_once('=')?;
    let (hence, thence) = rhs.split_once(',')?;
    let (hence, thence) = (hence.trim(), thence.trim());
    if hence.is_empty() || thence.is_empty() || thence.contains(',') {
        return None;
    }
    Some((lhs.split_whitespace().collect(), hence, thence))
}

/// A lemma from three typed words, or a refusal naming what is wrong.
pub(super) fn lemma(
    world: &mut World,
    actor: EntityId,
    nominative: &str,
    genitive: &str,
    gender: &str,
) -> Result<Lemma, CommandError> {
    let Some(gender) = Gender::parse(gender) else {
        return refuse(world, actor, "Quod sexus est?");
    };
    if let Err(err) = decline(nominative, genitive, gender) {
        debug!(%actor, nominative, genitive, %err, "cannot decline");
        return refuse(world, actor, format!("'{nominative}, {genitive}' dēclīnāre nōn possum."));
    }
    Ok(Lemma::new(nominative, genitive, gender))
}

/// Refuse if `room` already has an exit called `name`.
fn require_no_exit(world: &mut World, actor: EntityId, room: EntityId, name: &str) -> CommandResult {
    let taken = world
        .exits(room)
        .into_iter()
        .any(|id| world.get(id).is_some_and(|e| e.answers_to(name)));
    if taken {
        return refuse(world, actor, format!("Exitus {name} iam est."));
    }
    Ok(())
}

/// Dig a pair of exits between `here` and `there`. With a door lemma both
/// exits are the two sides of one open door.
pub(super) fn dig(
    world: &mut World,
    actor: EntityId,
    (here, there): (EntityId, EntityId),
    (hence, thence): (&str, &str),
    door: Option<&Lemma>,
) -> CommandResult {
    require_no_exit(world, actor, here, hence)?;
    require_no_exit(world, actor, there, thence)?;

    let forth = world.create_exit(hence, here, there, door)?;
    let back = world.create_exit(thence, there, here, door)?;
    if let Some(lemma) = door {
        for (side, other) in [(forth, back), (back, forth)] {
            if let Some(exit) = world.get_mut(side) {
                if let EntityKind::Exit { door, .. } = &mut exit.kind {
                    *door = Some(DoorState {
                        closed: false,
                        return_exit: Some(other),
                    });
                }
                exit.desc = Some(lemma.nominative.clone());
            }
        }
    }
    info!(%here, %there, hence, thence, door = door.is_some(), "exits dug");

    let text = format!(
        "Exitus novus '{hence}' factus est ab {} ad {}.",
        form(world, here, CaseLabel::AblSg),
        key(world, there)
    );
    world.msg(actor, text);
    let text = format!(
        "Reditus novus '{thence}' factus est ab {} ad {}.",
        form(world, there, CaseLabel::AblSg),
        key(world, here)
    );
    world.msg(actor, text);
    Ok(())
}

/// `mūniātur <nom> <gen> <sexus> = <hinc>, <illinc>`: build a room joined to
/// this one.
pub(super) fn muniatur(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    require_builder(world, actor)?;
    let Some((words, hence, thence)) = split_assignment(args) else {
        return refuse(world, actor, "Ūsus: mūniātur <nom> <gen> <sexus> = <hinc>, <illinc>");
    };
    let [nominative, genitive, gender] = words.as_slice() else {
        return refuse(world, actor, "Ūsus: mūniātur <nom> <gen> <sexus> = <hinc>, <illinc>");
    };
    let lemma = lemma(world, actor, nominative, genitive, gender)?;
    let here = here(world, actor)?;
    require_no_exit(world, actor, here, hence)?;

    let room = world.create_room(nominative, Some(&lemma))?;
    let text = format!(
        "{} {}.",
        capitalize(&form(world, room, CaseLabel::NomSg)),
        predicate(world, room, "mūnīt")
    );
    world.msg(actor, text);
    dig(world, actor, (here, room), (hence, thence), None)
}

/// `creātur <prototypum>` or `creātur <nom> <gen> <sexus> [massa] [litra]`:
/// make an object, in hand if one is free.
pub(super) fn creatur(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    const USAGE: &str = "Ūsus: creātur <prototypum> vel creātur <nom> <gen> <sexus> [massa] [litra]";

    require_builder(world, actor)?;
    let room = here(world, actor)?;
    let words: Vec<&str> = args.split_whitespace().collect();
    let id = match words.as_slice() {
        [name] => match world.spawn_prototype(name, room) {
            Ok(id) => id,
            Err(WorldError::UnknownPrototype(_)) => {
                return refuse(world, actor, format!("Exemplar '{name}' nūllum est."));
            }
            Err(err) => return Err(err.into()),
        },
        [nominative, genitive, gender, measures @ ..] if measures.len() <= 2 => {
            let mut numbers = Vec::with_capacity(measures.len());
            for word in measures {
                match word.replace(',', ".").parse::<f64>() {
                    Ok(value) if value.is_finite() && value >= 0.0 => numbers.push(value),
                    _ => return refuse(world, actor, USAGE),
                }
            }
            let lemma = lemma(world, actor, nominative, genitive, gender)?;
            let id = world.create_thing(nominative, Some(&lemma), room)?;
            if let (Some(&mass), Some(entity)) = (numbers.first(), world.get_mut(id)) {
                let volume = numbers.get(1).copied().unwrap_or(0.0);
                entity.physical = Some(PhysicalProfile::soft("", mass, volume));
            }
            id
        }
        _ => return refuse(world, actor, USAGE),
    };

    let state = world.character(actor)?;
    let fits = !state.hands.is_full() && state.carry.can_carry(world.gross_mass(id));
    let nom = capitalize(&form(world, id, CaseLabel::NomSg));
    if fits {
        world.relocate(id, actor, None)?;
        world.msg(actor, format!("{nom} nunc tuīs in manibus."));
    } else {
        let text = format!("{nom} {}.", predicate(world, id, "fact"));
        world.msg(actor, text);
    }
    info!(%actor, %id, in_hand = fits, "object created");
    Ok(())
}

/// `nascātur <nom> <gen> <sexus>`: bring a new character into this room.
pub(super) fn nascatur(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    require_builder(world, actor)?;
    let words: Vec<&str> = args.split_whitespace().collect();
    let [nominative, genitive, gender] = words.as_slice() else {
        return refuse(world, actor, "Ūsus: nascātur <nom> <gen> <sexus>");
    };
    let lemma = lemma(world, actor, nominative, genitive, gender)?;
    let room = here(world, actor)?;
    let id = world.spawn_character(&lemma, room)?;
    info!(%actor, %id, "character born");

    let text = format!(
        "{} {}.",
        capitalize(&form(world, id, CaseLabel::NomSg)),
        predicate(world, id, "nāt")
    );
    world.msg(actor, text);
    Ok(())
}
