//! `cape`, `relinque` and `tenē`.

use tracing::debug;

use crate::commands::clothing::announce_removal;
use crate::commands::{
    CommandError, CommandResult, announce, capitalize, form, here, key, refuse, require_case,
    resolve,
};
use crate::latin::CaseLabel;
use crate::world::{EntityId, EntityKind, Hand, World};

/// Refuse unless `actor` may pick up `target` and has room for it.
///
/// Checks, in order: the object kind and its lock, the hooks, the case of
/// the word used, the carrying capacity and a free hand.
pub(super) fn check_pickup(
    world: &mut World,
    actor: EntityId,
    target: EntityId,
    word: &str,
) -> CommandResult {
    let entity = world.entity(target)?;
    if !matches!(entity.kind, EntityKind::Thing) || !entity.locks.get {
        let text = entity.locks.get_err_msg.clone().unwrap_or_else(|| {
            format!("Tū {} capere nōn potes.", entity.form(CaseLabel::AccSg))
        });
        return refuse(world, actor, text);
    }
    if !world.before_get(actor, target) {
        return Err(CommandError::Rejected);
    }
    require_case(world, actor, target, word, CaseLabel::AccSg)?;

    let state = world.character(actor)?;
    if !state.carry.can_carry(world.added_load(actor, target)) {
        return refuse(world, actor, "Tantum ponderis ferre nōn potes!");
    }
    if state.hands.is_full() {
        return refuse(world, actor, "Manūs tuae sunt plēnae!");
    }
    Ok(())
}

/// `cape <rem>`: pick something up from the floor.
pub(super) fn cape(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    if args.is_empty() {
        return refuse(world, actor, "Quid capere velis?");
    }
    let room = here(world, actor)?;
    let candidates = world.contents(room);
    let (target, word) = resolve(world, actor, args, &candidates)?;
    if target == actor {
        return refuse(world, actor, "Tū tē capere nōn potes!");
    }
    check_pickup(world, actor, target, &word)?;

    let moved = world.relocate(target, actor, None)?;
    debug!(%actor, %target, hand = ?moved.to_hand, "picked up");

    let acc = form(world, target, CaseLabel::AccSg);
    world.msg(actor, format!("{} cēpistī.", capitalize(&acc)));
    let text = format!("{} {acc} cēpit.", key(world, actor));
    announce(world, actor, &text, &[]);
    world.after_get(actor, target);
    Ok(())
}

/// `relinque <rem>`: drop something held or worn.
pub(super) fn relinque(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    if args.is_empty() {
        return refuse(world, actor, "Quid relinquere velis?");
    }
    let candidates = world.contents(actor);
    let (target, word) = resolve(world, actor, args, &candidates)?;
    if !world.before_drop(actor, target) {
        return Err(CommandError::Rejected);
    }
    require_case(world, actor, target, &word, CaseLabel::AccSg)?;
    if let Some(cover) = world
        .entity(target)?
        .clothing
        .as_ref()
        .and_then(|c| c.covered_by)
    {
        let text = format!("prius tibi est necesse {} exuere.", form(world, cover, CaseLabel::AccSg));
        return refuse(world, actor, text);
    }

    let room = here(world, actor)?;
    let moved = world.relocate(target, room, None)?;
    debug!(%actor, %target, was_worn = moved.was_worn, "dropped");

    if moved.was_worn {
        announce_removal(world, actor, target, &moved.uncovered);
    }
    let acc = form(world, target, CaseLabel::AccSg);
    world.msg(actor, format!("{} relīquistī.", capitalize(&acc)));
    let text = format!("{} {acc} relīquit.", key(world, actor));
    announce(world, actor, &text, &[]);
    world.after_drop(actor, target);
    Ok(())
}

/// `tenē <rem> <dextrā/sinistrā>`: hold something in a given hand.
///
/// An object held in the other hand changes hands; one on the floor is
/// picked up into the named hand.
pub(super) fn tene(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    let words: Vec<&str> = args.split_whitespace().collect();
    let (thing, hand) = match words.as_slice() {
        [thing, hand] => match Hand::parse(hand) {
            Some(hand) => (*thing, hand),
            None => return refuse(world, actor, "Ūsus: tenē <rem> <dextrā/sinistrā>"),
        },
        _ => return refuse(world, actor, "Ūsus: tenē <rem> <dextrā/sinistrā>"),
    };

    let room = here(world, actor)?;
    let mut candidates = world.contents(actor);
    candidates.extend(world.contents(room));
    let (target, word) = resolve(world, actor, thing, &candidates)?;
    if target == actor {
        return refuse(world, actor, "Tū tē tenēre nōn potes!");
    }

    let entity = world.entity(target)?;
    let held = entity.held.filter(|_| entity.location == Some(actor));
    let worn = entity.is_worn();
    let acc = entity.form(CaseLabel::AccSg).to_string();

    if held == Some(hand) {
        require_case(world, actor, target, &word, CaseLabel::AccSg)?;
        return refuse(world, actor, format!("Iam {acc} {hand} tenēs!"));
    }
    if worn {
        require_case(world, actor, target, &word, CaseLabel::AccSg)?;
        return refuse(world, actor, format!("Iam {acc} geris!"));
    }

    if held.is_some() {
        require_case(world, actor, target, &word, CaseLabel::AccSg)?;
        if !world.character(actor)?.hands.is_free(hand) {
            return refuse(world, actor, format!("{} tua plēna est!", capitalize(hand.nominative())));
        }
        world.switch_hand(actor, target, hand)?;
    } else {
        check_pickup(world, actor, target, &word)?;
        if !world.character(actor)?.hands.is_free(hand) {
            return refuse(world, actor, format!("{} tua plēna est!", capitalize(hand.nominative())));
        }
        world.relocate(target, actor, Some(hand))?;
        world.after_get(actor, target);
    }
    debug!(%actor, %target, %hand, "holding");

    world.msg(actor, format!("{} {hand} tenēs.", capitalize(&acc)));
    let text = format!("{} {acc} {hand} tenet.", key(world, actor));
    announce(world, actor, &text, &[]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Outcome, execute};
    use crate::config::WorldConfig;
    use crate::latin::Gender;
    use crate::world::{Lemma, PhysicalProfile};

    struct Fixture {
        world: World,
        room: EntityId,
        actor: EntityId,
        observer: EntityId,
    }

    fn setup() -> Fixture {
        let mut world = World::new(WorldConfig::default(), 3);
        let room = world
            .create_room("forum", Some(&Lemma::new("forum", "forī", Gender::Neuter)))
            .unwrap();
        let actor = world
            .spawn_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), room)
            .unwrap();
        let observer = world
            .spawn_character(&Lemma::new("Lūcia", "Lūciae", Gender::Feminine), room)
            .unwrap();
        world.get_mut(actor).unwrap().character_mut().unwrap().handedness = Hand::Right;
        Fixture {
            world,
            room,
            actor,
            observer,
        }
    }

    fn run(fx: &mut Fixture, line: &str) -> (Outcome, Vec<String>) {
        let outcome = execute(&mut fx.world, fx.actor, line).unwrap();
        let mut messages = fx.world.take_messages(fx.actor);
        messages.pop(); // Vīta prompt
        (outcome, messages)
    }

    #[test]
    fn test_cape_and_relinque() {
        let mut fx = setup();
        let sword = fx.world.spawn_prototype("gladius", fx.room).unwrap();

        let (outcome, messages) = run(&mut fx, "cape gladium");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(messages, ["Gladium cēpistī."]);
        assert_eq!(fx.world.take_messages(fx.observer), ["Mārcus gladium cēpit."]);
        assert_eq!(fx.world.get(sword).unwrap().held, Some(Hand::Right));

        let (outcome, messages) = run(&mut fx, "relinque gladium");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(messages, ["Gladium relīquistī."]);
        assert_eq!(fx.world.get(sword).unwrap().location, Some(fx.room));
        assert!(fx.world.character(fx.actor).unwrap().carry.current.abs() < 1e-9);
    }

    #[test]
    fn test_cape_wrong_case() {
        let mut fx = setup();
        let sword = fx.world.spawn_prototype("gladius", fx.room).unwrap();
        let (outcome, messages) = run(&mut fx, "cape gladius");
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(messages, ["(Did you mean 'gladium'?)"]);
        assert_eq!(fx.world.get(sword).unwrap().location, Some(fx.room));
    }

    #[test]
    fn test_cape_refusals() {
        let mut fx = setup();
        let (_, messages) = run(&mut fx, "cape");
        assert_eq!(messages, ["Quid capere velis?"]);
        let (_, messages) = run(&mut fx, "cape Mārcum");
        assert_eq!(messages, ["Tū tē capere nōn potes!"]);
        let (_, messages) = run(&mut fx, "cape Lūciam");
        assert_eq!(messages, ["Tū Lūciam capere nōn potes."]);

        fx.world.spawn_prototype("focus", fx.room).unwrap();
        let (_, messages) = run(&mut fx, "cape focum");
        assert_eq!(messages, ["Focus nimis gravis est."]);
    }

    #[test]
    fn test_cape_too_heavy() {
        let mut fx = setup();
        let rock = fx
            .world
            .create_thing("saxum", Some(&Lemma::new("saxum", "saxī", Gender::Neuter)), fx.room)
            .unwrap();
        fx.world.get_mut(rock).unwrap().physical = Some(PhysicalProfile::rigid("saxum", 8512.0, 3000.0, None));
        let (outcome, messages) = run(&mut fx, "cape saxum");
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(messages, ["Tantum ponderis ferre nōn potes!"]);
        assert!(fx.world.character(fx.actor).unwrap().carry.current.abs() < 1e-12);
    }

    #[test]
    fn test_relinque_worn_garment_is_taken_off() {
        let mut fx = setup();
        fx.world.spawn_prototype("petasus", fx.room).unwrap();
        run(&mut fx, "cape petasum");
        run(&mut fx, "indue petasum");
        fx.world.take_messages(fx.observer);

        let (outcome, messages) = run(&mut fx, "relinque petasum");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(messages, ["Petasum exuistī.", "Petasum relīquistī."]);
        assert_eq!(
            fx.world.take_messages(fx.observer),
            ["Mārcus petasum exuit.", "Mārcus petasum relīquit."]
        );
        assert!(fx.world.worn_by(fx.actor).is_empty());
    }

    #[test]
    fn test_tene_switches_hand() {
        let mut fx = setup();
        let sword = fx.world.spawn_prototype("gladius", fx.room).unwrap();
        run(&mut fx, "cape gladium");

        let (_, messages) = run(&mut fx, "tenē gladium dextrā");
        assert_eq!(messages, ["Iam gladium dextrā tenēs!"]);

        let (outcome, messages) = run(&mut fx, "tene gladium sinistra");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(messages, ["Gladium sinistrā tenēs."]);
        assert_eq!(fx.world.get(sword).unwrap().held, Some(Hand::Left));
        assert_eq!(fx.world.character(fx.actor).unwrap().hands.occupied(), [Hand::Left]);
    }

    #[test]
    fn test_tene_picks_up_into_named_hand() {
        let mut fx = setup();
        let wool = fx.world.spawn_prototype("lāna", fx.room).unwrap();
        let (outcome, _) = run(&mut fx, "tenē lānam sinistrā");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(fx.world.get(wool).unwrap().held, Some(Hand::Left));
        assert!((fx.world.character(fx.actor).unwrap().carry.current - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_tene_busy_hand() {
        let mut fx = setup();
        fx.world.spawn_prototype("gladius", fx.room).unwrap();
        fx.world.spawn_prototype("lāna", fx.room).unwrap();
        run(&mut fx, "cape gladium");
        let (outcome, messages) = run(&mut fx, "tenē lānam dextrā");
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(messages, ["Dextra tua plēna est!"]);

        let (_, messages) = run(&mut fx, "tenē lānam");
        assert_eq!(messages, ["Ūsus: tenē <rem> <dextrā/sinistrā>"]);
    }
}
