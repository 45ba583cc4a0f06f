//! `pōne`, `excipe` and `inspice`.

use tracing::debug;

use crate::commands::take::check_pickup;
use crate::commands::{
    CommandResult, announce, capitalize, form, here, key, predicate, refuse, require_case,
    resolve,
};
use crate::latin::{CaseLabel, fold, list_to_string};
use crate::world::{EntityId, Fit, PhysicalProfile, World};

/// Split `<rem> [linker] <rē>` into the two noun words.
fn two_nouns<'a>(args: &'a str, linkers: &[&str]) -> Option<(&'a str, &'a str)> {
    let words: Vec<&str> = args.split_whitespace().collect();
    match words.as_slice() {
        [thing, holder] => Some((*thing, *holder)),
        [thing, linker, holder] if linkers.contains(&fold(linker).as_str()) => {
            Some((*thing, *holder))
        }
        _ => None,
    }
}

/// Things the actor has and things lying in the room.
fn reachable(world: &World, actor: EntityId, room: EntityId) -> Vec<EntityId> {
    let mut candidates = world.contents(actor);
    candidates.extend(world.contents(room));
    candidates
}

/// `pōne <rem> [in] <rē>`: put a held object into a container.
pub(super) fn pone(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    let Some((thing, holder)) = two_nouns(args, &["in"]) else {
        return refuse(world, actor, "Ūsus: pōne <rem> in <rē>");
    };

    let possessions = world.contents(actor);
    let (target, target_word) = resolve(world, actor, thing, &possessions)?;
    if world.entity(target)?.held.is_none() {
        return refuse(world, actor, "Nōn in manibus habēs.");
    }
    require_case(world, actor, target, &target_word, CaseLabel::AccSg)?;

    let room = here(world, actor)?;
    let candidates = reachable(world, actor, room);
    let (container, container_word) = resolve(world, actor, holder, &candidates)?;
    require_case(world, actor, container, &container_word, CaseLabel::AblSg)?;

    let abl = form(world, container, CaseLabel::AblSg);
    let Some(capacity) = world.entity(container)?.container else {
        return refuse(world, actor, format!("Nihil in {abl} pōnere potes."));
    };
    if target == container || world.is_within(container, target) {
        return refuse(world, actor, "Rem in sē ipsam pōnere nōn potes!");
    }

    let profile = world
        .entity(target)?
        .physical
        .clone()
        .unwrap_or_else(|| PhysicalProfile::soft("", 0.0, 0.0));
    let gen_target = form(world, target, CaseLabel::GenSg);
    match capacity.check_fit(&profile) {
        Fit::Fits => {}
        Fit::TooBig => {
            return refuse(world, actor, format!("In {abl} nōn est spatium {gen_target}."));
        }
        Fit::NotTallEnough => {
            let nom = capitalize(&form(world, container, CaseLabel::NomSg));
            let text = format!("{nom} nōn satis {}.", predicate(world, container, "alt"));
            return refuse(world, actor, text);
        }
        Fit::WrongShape => {
            return refuse(world, actor, format!("Fōrma {gen_target} in {abl} nōn quadrat."));
        }
    }

    world.relocate(target, container, None)?;
    debug!(%actor, %target, %container, "put in");

    let acc = form(world, target, CaseLabel::AccSg);
    world.msg(actor, format!("{} in {abl} posuistī.", capitalize(&acc)));
    let text = format!("{} {acc} in {abl} posuit.", key(world, actor));
    announce(world, actor, &text, &[]);
    Ok(())
}

/// `excipe <rem> [ē/ex] <rē>`: take an object out of a container.
pub(super) fn excipe(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    let Some((thing, holder)) = two_nouns(args, &["e", "ex"]) else {
        return refuse(world, actor, "Ūsus: excipe <rem> ex <rē>");
    };

    let room = here(world, actor)?;
    let candidates = reachable(world, actor, room);
    let (container, container_word) = resolve(world, actor, holder, &candidates)?;
    require_case(world, actor, container, &container_word, CaseLabel::AblSg)?;
    let abl = form(world, container, CaseLabel::AblSg);
    if world.entity(container)?.container.is_none() {
        return refuse(world, actor, format!("Nihil in {abl} inesse potest."));
    }

    let inside = world.contents(container);
    let (target, target_word) = resolve(world, actor, thing, &inside)?;
    check_pickup(world, actor, target, &target_word)?;

    world.relocate(target, actor, None)?;
    debug!(%actor, %target, %container, "taken out");

    let acc = form(world, target, CaseLabel::AccSg);
    world.msg(actor, format!("{} ex {abl} excēpistī.", capitalize(&acc)));
    let text = format!("{} {acc} ex {abl} excēpit.", key(world, actor));
    announce(world, actor, &text, &[]);
    world.after_get(actor, target);
    Ok(())
}

/// `inspice <rem>`: list what a container holds.
pub(super) fn inspice(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    if args.is_empty() {
        return refuse(world, actor, "Ūsus: inspice <rem>");
    }
    let room = here(world, actor)?;
    let candidates = reachable(world, actor, room);
    let (container, word) = resolve(world, actor, args, &candidates)?;
    require_case(world, actor, container, &word, CaseLabel::AccSg)?;

    let abl = form(world, container, CaseLabel::AblSg);
    if world.entity(container)?.container.is_none() {
        return refuse(world, actor, format!("Nihil in {abl} inesse potest."));
    }
    let names: Vec<String> = world
        .contents(container)
        .into_iter()
        .map(|id| form(world, id, CaseLabel::NomSg))
        .collect();
    let text = if names.is_empty() {
        format!(
            "{} {}.",
            capitalize(&form(world, container, CaseLabel::NomSg)),
            predicate(world, container, "vacu")
        )
    } else {
        format!("In {abl} sunt: {}.", list_to_string(&names))
    };
    world.msg(actor, text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Outcome, execute};
    use crate::config::WorldConfig;
    use crate::latin::Gender;
    use crate::world::{ContainerState, Dimensions, Lemma};

    fn setup() -> (World, EntityId, EntityId) {
        let mut world = World::new(WorldConfig::default(), 5);
        let room = world.create_room("taberna", None).unwrap();
        let actor = world
            .spawn_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), room)
            .unwrap();
        (world, room, actor)
    }

    fn run(world: &mut World, actor: EntityId, line: &str) -> (Outcome, Vec<String>) {
        let outcome = execute(world, actor, line).unwrap();
        let mut messages = world.take_messages(actor);
        messages.pop();
        (outcome, messages)
    }

    fn load(world: &World, actor: EntityId) -> f64 {
        world.character(actor).unwrap().carry.current
    }

    #[test]
    fn test_put_into_held_bag_keeps_load() {
        let (mut world, _, actor) = setup();
        let bag = world.spawn_prototype("saccus", actor).unwrap();
        let wool = world.spawn_prototype("lāna", actor).unwrap();
        let before = load(&world, actor);

        let (outcome, messages) = run(&mut world, actor, "pōne lānam in saccō");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(messages, ["Lānam in saccō posuistī."]);
        assert_eq!(world.get(wool).unwrap().location, Some(bag));
        assert!((load(&world, actor) - before).abs() < 1e-9);
        assert_eq!(world.character(actor).unwrap().hands.free().len(), 1);

        let (outcome, messages) = run(&mut world, actor, "excipe lānam ē saccō");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(messages, ["Lānam ex saccō excēpistī."]);
        assert!((load(&world, actor) - before).abs() < 1e-9);
        let sack = world.get(bag).unwrap();
        assert!((sack.mass() - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_put_into_bag_on_floor_sheds_load() {
        let (mut world, room, actor) = setup();
        world.spawn_prototype("saccus", room).unwrap();
        world.spawn_prototype("lāna", actor).unwrap();
        run(&mut world, actor, "pone lanam sacco");
        assert!(load(&world, actor).abs() < 1e-9);

        run(&mut world, actor, "excipe lanam ex sacco");
        assert!((load(&world, actor) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_spear_not_tall_enough() {
        let (mut world, room, actor) = setup();
        let bucket = world
            .create_thing("situla", Some(&Lemma::new("situla", "situlae", Gender::Feminine)), room)
            .unwrap();
        world.get_mut(bucket).unwrap().container =
            Some(ContainerState::new(20.0, Some(Dimensions::new(0.3, 0.4, 0.5))));
        let spear = world
            .create_thing("hasta", Some(&Lemma::new("hasta", "hastae", Gender::Feminine)), actor)
            .unwrap();
        world.get_mut(spear).unwrap().physical =
            Some(PhysicalProfile::rigid("lignum", 0.0, 1.0, Some(Dimensions::new(0.05, 2.0, 0.05))));

        let (outcome, messages) = run(&mut world, actor, "pōne hastam in situlā");
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(messages, ["Situla nōn satis alta est."]);
        assert_eq!(world.get(spear).unwrap().location, Some(actor));
        assert!((world.get(bucket).unwrap().container.as_ref().unwrap().remaining_volume - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_big_and_self() {
        let (mut world, _, actor) = setup();
        world.spawn_prototype("saccus", actor).unwrap();
        world.spawn_prototype("lāna", actor).unwrap();
        let (_, messages) = run(&mut world, actor, "pōne saccum in saccō");
        assert_eq!(messages, ["Rem in sē ipsam pōnere nōn potes!"]);

        run(&mut world, actor, "pōne lānam in saccō");
        world.spawn_prototype("lāna", actor).unwrap();
        let (_, messages) = run(&mut world, actor, "pōne lānam in saccō");
        assert_eq!(messages, ["In saccō nōn est spatium lānae."]);
    }

    #[test]
    fn test_not_a_container() {
        let (mut world, _, actor) = setup();
        world.spawn_prototype("lāna", actor).unwrap();
        world.spawn_prototype("gladius", actor).unwrap();
        let (_, messages) = run(&mut world, actor, "pōne lānam in gladiō");
        assert_eq!(messages, ["Nihil in gladiō pōnere potes."]);
        let (_, messages) = run(&mut world, actor, "inspice gladium");
        assert_eq!(messages, ["Nihil in gladiō inesse potest."]);
    }

    #[test]
    fn test_inspice() {
        let (mut world, _, actor) = setup();
        world.spawn_prototype("saccus", actor).unwrap();
        let (_, messages) = run(&mut world, actor, "inspice saccum");
        assert_eq!(messages, ["Saccus vacuus est."]);

        world.spawn_prototype("lūmen", actor).unwrap();
        run(&mut world, actor, "pōne lūmen in saccō");
        let (_, messages) = run(&mut world, actor, "inspice saccum");
        assert_eq!(messages, ["In saccō sunt: lūmen."]);
    }

    #[test]
    fn test_usage() {
        let (mut world, _, actor) = setup();
        let (_, messages) = run(&mut world, actor, "pōne lānam");
        assert_eq!(messages, ["Ūsus: pōne <rem> in <rē>"]);
        let (_, messages) = run(&mut world, actor, "excipe lānam dē saccō");
        assert_eq!(messages, ["Ūsus: excipe <rem> ex <rē>"]);
    }
}
