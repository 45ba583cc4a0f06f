//! Doors: `aperiātur` builds one, `aperī` and `claude` open and shut both
//! sides at once.

use tracing::debug;

use crate::commands::build::{dig, lemma, split_assignment};
use crate::commands::{
    CommandResult, announce, capitalize, form, here, key, refuse, require_builder, require_case,
};
use crate::latin::{CaseLabel, fold, us_a_um};
use crate::world::{EntityId, EntityKind, World};

/// `aperiātur <iānua> <gen> <sexus> <locus> = <hinc>, <illinc>`: join this
/// room to an existing one through a door.
pub(super) fn aperiatur(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    const USAGE: &str = "Ūsus: aperiātur <iānua> <gen> <sexus> <locus> = <hinc>, <illinc>";

    require_builder(world, actor)?;
    let Some((words, hence, thence)) = split_assignment(args) else {
        return refuse(world, actor, USAGE);
    };
    let [nominative, genitive, gender, place] = words.as_slice() else {
        return refuse(world, actor, USAGE);
    };
    let lemma = lemma(world, actor, nominative, genitive, gender)?;

    let here = here(world, actor)?;
    let destination = world
        .entities()
        .find(|e| e.is_room() && e.id != here && e.answers_to(place))
        .map(|e| e.id);
    let Some(destination) = destination else {
        return refuse(world, actor, format!("Nūllus locus '{place}' invenītur."));
    };

    dig(world, actor, (here, destination), (hence, thence), Some(&lemma))
}

/// The door word and the exit it names, from `<iānuam> [partem]`.
///
/// With a single door in the room the direction may be left out.
fn pick_door(world: &World, room: EntityId, args: &str) -> (Option<EntityId>, Option<String>) {
    let exits = world.exits(room);
    let doors: Vec<EntityId> = exits
        .iter()
        .copied()
        .filter(|&id| world.get(id).is_some_and(|e| e.door().is_some()))
        .collect();
    let words: Vec<&str> = args.split_whitespace().collect();

    let mut direction = match doors.as_slice() {
        [only] => Some(*only),
        _ => None,
    };
    if let [word] = words.as_slice() {
        return (direction, Some((*word).to_string()));
    }

    let mut door_word = None;
    for &exit in &exits {
        let Some(name) = world.get(exit).map(|e| fold(&e.key)) else {
            continue;
        };
        if let Some(at) = words.iter().position(|w| fold(w) == name) {
            let rest: Vec<&str> = words
                .iter()
                .enumerate()
                .filter(|&(i, w)| i != at && fold(w) != "in")
                .map(|(_, w)| *w)
                .collect();
            direction = Some(exit);
            door_word = (!rest.is_empty()).then(|| rest.join(" "));
            break;
        }
    }
    (direction, door_word)
}

/// Open (`closing == false`) or shut a door on both sides.
fn swing(world: &mut World, actor: EntityId, args: &str, closing: bool) -> CommandResult {
    if args.is_empty() {
        return refuse(world, actor, "Ūsus: aperī||claude <iānuam> [in quandam partem]");
    }
    let room = here(world, actor)?;
    let any_door = world
        .exits(room)
        .into_iter()
        .any(|id| world.get(id).is_some_and(|e| e.door().is_some()));
    if !any_door {
        return refuse(world, actor, "Nihil est quod aperīrī possit.");
    }

    let (Some(door), Some(word)) = pick_door(world, room, args) else {
        return refuse(world, actor, "Quid in quam partem aperīre vīs?");
    };
    let Some(state) = world.entity(door)?.door().copied() else {
        return refuse(world, actor, "Nihil est quod in eam partem aperīrī possit.");
    };
    require_case(world, actor, door, &word, CaseLabel::AccSg)?;

    let stem = if closing { "claus" } else { "apert" };
    let gender = world.entity(door)?.gender_or_default();
    let participle = format!("{stem}{}", us_a_um(CaseLabel::NomSg, gender));
    let nom = capitalize(&form(world, door, CaseLabel::NomSg));
    if state.closed == closing {
        return refuse(world, actor, format!("{nom} iam {participle} est"));
    }

    for side in std::iter::once(door).chain(state.return_exit) {
        if let Some(exit) = world.get_mut(side) {
            if let EntityKind::Exit { door: Some(leaf), .. } = &mut exit.kind {
                leaf.closed = closing;
            }
            exit.desc = Some(format!("{nom} {participle}"));
        }
    }
    debug!(%actor, %door, closing, "door swung");

    let acc = capitalize(&form(world, door, CaseLabel::AccSg));
    let verb = if closing { "clausistī" } else { "aperuistī" };
    world.msg(actor, format!("{acc} {verb}."));
    let text = format!(
        "{nom} {} ab {} {participle} est.",
        key(world, door),
        form(world, actor, CaseLabel::AblSg)
    );
    announce(world, actor, &text, &[]);

    if let Some(back) = state.return_exit {
        if let Some(far_room) = world.get(back).and_then(|e| e.location) {
            let text = format!("{nom} {} {participle} est.", key(world, back));
            world.msg_contents(far_room, &text, &[]);
        }
    }
    Ok(())
}

/// `aperī <iānuam> [partem]`.
pub(super) fn aperi(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    swing(world, actor, args, false)
}

/// `claude <iānuam> [partem]`.
pub(super) fn claude(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    swing(world, actor, args, true)
}
