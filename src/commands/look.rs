//! `spectā` and `habeō`.

use crate::commands::{CommandResult, form, here, predicate, refuse, require_case, resolve};
use crate::latin::{CaseLabel, Gender, list_to_string, us_a_um};
use crate::world::{EntityId, EntityKind, Encumbrance, World};

/// Marker for a burning object, agreeing in the accusative.
fn burning_acc(gender: Gender) -> &'static str {
    match gender {
        Gender::Neuter => "(ardēns)",
        Gender::Masculine | Gender::Feminine => "(ardentem)",
    }
}

/// Whether the looker has light to see by in `room`.
fn can_see(world: &World, looker: EntityId, room: EntityId) -> bool {
    let dark = matches!(world.get(room).map(|e| &e.kind), Some(EntityKind::Room { dark: true }));
    if !dark {
        return true;
    }
    world
        .contents(looker)
        .into_iter()
        .chain(world.contents(room))
        .any(|id| world.get(id).is_some_and(|e| e.lit))
}

/// What `looker` sees in `room`.
///
/// Same-named things are grouped under their nominative plural
/// (`2 gladiī`); burning things are marked `(ardēns)`.
#[must_use]
pub fn describe_room(world: &World, looker: EntityId, room: EntityId) -> String {
    if !can_see(world, looker, room) {
        return "Nihil per tenebrās vidēre potes.".to_string();
    }
    let Some(place) = world.get(room) else {
        return String::new();
    };

    let mut lines = vec![place.key.clone()];
    if let Some(desc) = &place.desc {
        lines.push(desc.clone());
    }

    let exits: Vec<String> = world
        .exits(room)
        .into_iter()
        .filter_map(|id| world.get(id))
        .map(|exit| match exit.door() {
            Some(door) if door.closed => format!("[{}]", exit.key),
            _ => exit.key.clone(),
        })
        .collect();
    if !exits.is_empty() {
        lines.push(String::new());
        lines.push("Ad hōs locōs īre licet:".to_string());
        lines.push(list_to_string(&exits));
    }

    let mut people = Vec::new();
    // (key, lit, count, first id)
    let mut groups: Vec<(String, bool, usize, EntityId)> = Vec::new();
    for id in world.contents(room) {
        if id == looker {
            continue;
        }
        let Some(entity) = world.get(id) else { continue };
        match entity.kind {
            EntityKind::Character(_) => people.push(entity.key.clone()),
            EntityKind::Thing => {
                match groups
                    .iter_mut()
                    .find(|(k, lit, _, _)| *k == entity.key && *lit == entity.lit)
                {
                    Some(group) => group.2 += 1,
                    None => groups.push((entity.key.clone(), entity.lit, 1, id)),
                }
            }
            EntityKind::Room { .. } | EntityKind::Exit { .. } => {}
        }
    }
    let mut visible = people;
    visible.extend(groups.into_iter().map(|(name, lit, count, first)| {
        let name = if count > 1 {
            let plural = world
                .get(first)
                .map_or(name, |e| e.form(CaseLabel::NomPl).to_string());
            format!("{count} {plural}")
        } else {
            name
        };
        if lit { format!("(ardēns) {name}") } else { name }
    }));
    if !visible.is_empty() {
        lines.push(String::new());
        lines.push("Ecce:".to_string());
        lines.push(list_to_string(&visible));
    }

    lines.join("\n")
}

/// A character as others see them: what they hold and the garments not
/// covered by others, or that they are naked.
#[must_use]
pub fn describe_character(world: &World, target: EntityId) -> String {
    let Some(person) = world.get(target) else {
        return String::new();
    };
    let mut lines = vec![person.key.clone()];
    if let Some(desc) = &person.desc {
        lines.push(desc.clone());
    }

    let held: Vec<String> = world
        .held_by(target)
        .into_iter()
        .map(|(id, _)| form(world, id, CaseLabel::AccSg))
        .collect();
    if !held.is_empty() {
        lines.push(String::new());
        lines.push(format!("tenet: {}", list_to_string(&held)));
    }

    let worn: Vec<String> = world
        .worn_by(target)
        .into_iter()
        .filter(|&id| {
            world
                .get(id)
                .and_then(|e| e.clothing.as_ref())
                .is_some_and(|c| c.covered_by.is_none())
        })
        .map(|id| form(world, id, CaseLabel::AccSg))
        .collect();
    lines.push(String::new());
    if worn.is_empty() {
        lines.push(format!("{} {}!", person.key, predicate(world, target, "nūd")));
    } else {
        lines.push(format!("gerit: {}", list_to_string(&worn)));
    }

    lines.join("\n")
}

/// `spectā [<rem>]`: look at the room or at something in it.
pub(super) fn specta(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    let room = here(world, actor)?;
    if args.is_empty() {
        let text = describe_room(world, actor, room);
        world.msg(actor, text);
        return Ok(());
    }
    if !can_see(world, actor, room) {
        return refuse(world, actor, "Nihil per tenebrās vidēre potes.");
    }

    let mut candidates = world.contents(actor);
    candidates.extend(world.contents(room));
    let (target, word) = resolve(world, actor, args, &candidates)?;
    require_case(world, actor, target, &word, CaseLabel::AccSg)?;

    let entity = world.entity(target)?;
    let text = if entity.is_character() {
        describe_character(world, target)
    } else {
        match &entity.desc {
            Some(desc) => format!("{}\n{desc}", entity.key),
            None => entity.key.clone(),
        }
    };
    world.msg(actor, text);
    Ok(())
}

/// `habeō`: list what the actor holds and wears, and the load.
pub(super) fn habeo(world: &mut World, actor: EntityId, _args: &str) -> CommandResult {
    let held = world.held_by(actor);
    let worn = world.worn_by(actor);
    if held.is_empty() && worn.is_empty() {
        return refuse(world, actor, "Tū rēs neque habēs neque geris.");
    }

    let mut lines = vec!["Tenēs:".to_string()];
    if held.is_empty() {
        lines.push("Nihil.".to_string());
    }
    for (id, hand) in held {
        let Some(entity) = world.get(id) else { continue };
        let mut line = format!("{} ({hand})", entity.form(CaseLabel::AccSg));
        if entity.lit {
            line.push(' ');
            line.push_str(burning_acc(entity.gender_or_default()));
        }
        if let Some(desc) = &entity.desc {
            line.push_str(": ");
            line.push_str(desc);
        }
        lines.push(line);
    }

    lines.push("Geris:".to_string());
    if worn.is_empty() {
        lines.push("Nihil.".to_string());
    }
    for id in worn {
        lines.push(form(world, id, CaseLabel::AccSg));
    }

    let state = world.character(actor)?;
    let gender = world.entity(actor)?.gender_or_default();
    let status = match state.carry.encumbrance() {
        Encumbrance::Unburdened => String::new(),
        Encumbrance::Encumbered => {
            format!(" (impedīt{})", us_a_um(CaseLabel::NomSg, gender))
        }
        Encumbrance::HeavilyEncumbered => {
            format!(" (impedītissim{})", us_a_um(CaseLabel::NomSg, gender))
        }
    };
    lines.push(format!(
        "Onus: {:.2}/{:.1}{status}",
        state.carry.current, state.carry.max
    ));

    world.msg(actor, lines.join("\n"));
    Ok(())
}
