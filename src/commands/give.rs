//! `da`.

use tracing::debug;

use crate::commands::clothing::announce_removal;
use crate::commands::{
    CommandError, CommandResult, announce, capitalize, form, here, key, refuse, require_case,
    resolve,
};
use crate::latin::{CaseLabel, us_a_um};
use crate::world::{EntityId, World};

const USAGE: &str = "Scrībe: 'da <rem> <alicuī>' vel 'da <alicuī> <rem>'.";

/// `da <rem> <alicuī>` or `da <alicuī> <rem>`: give something held or worn
/// to another character.
///
/// The thing given is whichever of the two words names something the
/// actor has; the other names the recipient.
pub(super) fn da(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    let words: Vec<&str> = args.split_whitespace().collect();
    let [first, second] = words.as_slice() else {
        return refuse(world, actor, USAGE);
    };

    let possessions = world.contents(actor);
    if possessions.is_empty() {
        return refuse(world, actor, "Nihil habēs.");
    }
    let room = here(world, actor)?;
    let present: Vec<EntityId> = world
        .contents(room)
        .into_iter()
        .filter(|&id| id != actor && world.get(id).is_some_and(|e| e.is_character()))
        .collect();
    if present.is_empty() {
        return refuse(world, actor, "Nēmō adest!");
    }

    let mut candidates = possessions.clone();
    candidates.extend(world.contents(room));
    let (one, one_word) = resolve(world, actor, first, &candidates)?;
    let (other, other_word) = resolve(world, actor, second, &candidates)?;

    let ((target, target_word), (recipient, recipient_word)) = if possessions.contains(&one) {
        ((one, one_word), (other, other_word))
    } else if possessions.contains(&other) {
        ((other, other_word), (one, one_word))
    } else {
        return refuse(world, actor, "Quid dare voluistī?");
    };
    if !world.get(recipient).is_some_and(|e| e.is_character()) {
        return refuse(world, actor, "Cui dare voluistī?");
    }

    require_case(world, actor, target, &target_word, CaseLabel::AccSg)?;
    let entity = world.entity(target)?;
    let worn = entity.is_worn();
    let cover = entity.clothing.as_ref().and_then(|c| c.covered_by);
    if entity.held.is_none() && world.character(actor)?.hands.is_full() {
        return refuse(world, actor, "Manūs tuae sunt plēnae!");
    }
    if recipient == actor {
        return refuse(world, actor, "Tū tibi aliquid dare nōn potes!");
    }
    require_case(world, actor, recipient, &recipient_word, CaseLabel::DatSg)?;

    let giver = key(world, actor);
    let acc = form(world, target, CaseLabel::AccSg);
    let recipient_state = world.character(recipient)?;
    if recipient_state.hands.is_full() {
        let text = format!("Manūs {} sunt plēnae!", form(world, recipient, CaseLabel::GenSg));
        let gender = world.entity(actor)?.gender_or_default();
        world.msg(
            recipient,
            format!(
                "{giver} tibi {acc} dare conāt{} est, sed manūs tuae plēnae sunt.",
                us_a_um(CaseLabel::NomSg, gender)
            ),
        );
        return refuse(world, actor, text);
    }
    if !recipient_state.carry.can_carry(world.gross_mass(target)) {
        let text = format!("{} tantum ponderis ferre nōn potest!", key(world, recipient));
        let gender = world.entity(actor)?.gender_or_default();
        world.msg(
            recipient,
            format!(
                "{giver} tibi {acc} dare conāt{} est, sed tū tantum ponderis ferre nōn potes!",
                us_a_um(CaseLabel::NomSg, gender)
            ),
        );
        return refuse(world, actor, text);
    }
    if !world.before_give(actor, recipient, target) {
        return Err(CommandError::Rejected);
    }
    if let Some(cover) = cover {
        let text = format!("prius tibi est necesse {} exuere.", form(world, cover, CaseLabel::AccSg));
        return refuse(world, actor, text);
    }

    let moved = world.relocate(target, recipient, None)?;
    debug!(%actor, %recipient, %target, hand = ?moved.to_hand, "given");

    if worn {
        announce_removal(world, actor, target, &moved.uncovered);
    }
    let dat = form(world, recipient, CaseLabel::DatSg);
    world.msg(recipient, format!("{giver} tibi {acc} dedit."));
    world.msg(actor, format!("{} {dat} dedistī.", capitalize(&acc)));
    announce(world, actor, &format!("{giver} {acc} {dat} dedit."), &[recipient]);
    world.after_give(actor, recipient, target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Outcome, execute};
    use crate::config::WorldConfig;
    use crate::latin::Gender;
    use crate::world::{Hand, Lemma};

    struct Fixture {
        world: World,
        a: EntityId,
        b: EntityId,
        c: EntityId,
    }

    fn setup() -> Fixture {
        let mut world = World::new(WorldConfig::default(), 21);
        let room = world.create_room("forum", None).unwrap();
        let a = world
            .spawn_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), room)
            .unwrap();
        let b = world
            .spawn_character(&Lemma::new("Lūcia", "Lūciae", Gender::Feminine), room)
            .unwrap();
        let c = world
            .spawn_character(&Lemma::new("Titus", "Titī", Gender::Masculine), room)
            .unwrap();
        Fixture { world, a, b, c }
    }

    fn run(fx: &mut Fixture, line: &str) -> (Outcome, Vec<String>) {
        let outcome = execute(&mut fx.world, fx.a, line).unwrap();
        let mut messages = fx.world.take_messages(fx.a);
        messages.pop();
        (outcome, messages)
    }

    #[test]
    fn test_give_in_either_order() {
        let mut fx = setup();
        let sword = fx.world.spawn_prototype("gladius", fx.a).unwrap();
        let (outcome, messages) = run(&mut fx, "da gladium Lūciae");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(messages, ["Gladium Lūciae dedistī."]);
        assert_eq!(fx.world.take_messages(fx.b), ["Mārcus tibi gladium dedit."]);
        assert_eq!(fx.world.take_messages(fx.c), ["Mārcus gladium Lūciae dedit."]);
        assert_eq!(fx.world.get(sword).unwrap().location, Some(fx.b));

        let wool = fx.world.spawn_prototype("lāna", fx.a).unwrap();
        let (outcome, _) = run(&mut fx, "da Titō lānam");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(fx.world.get(wool).unwrap().location, Some(fx.c));
    }

    #[test]
    fn test_give_moves_load_and_hands() {
        let mut fx = setup();
        let sword = fx.world.spawn_prototype("gladius", fx.a).unwrap();
        let before_a = fx.world.character(fx.a).unwrap().carry.current;
        run(&mut fx, "da gladium Lūciae");

        let a = fx.world.character(fx.a).unwrap();
        assert!((before_a - a.carry.current - 0.6).abs() < 1e-9);
        assert_eq!(a.hands.free().len(), 2);
        let b = fx.world.character(fx.b).unwrap();
        assert!((b.carry.current - 0.6).abs() < 1e-9);
        assert_eq!(b.hands.occupied().len(), 1);
        assert_eq!(fx.world.get(sword).unwrap().held, Some(b.handedness));
    }

    #[test]
    fn test_recipient_hands_full() {
        let mut fx = setup();
        fx.world.spawn_prototype("gladius", fx.a).unwrap();
        fx.world.spawn_prototype("lāna", fx.b).unwrap();
        fx.world.spawn_prototype("lūmen", fx.b).unwrap();

        let (outcome, messages) = run(&mut fx, "da gladium Lūciae");
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(messages, ["Manūs Lūciae sunt plēnae!"]);
        assert_eq!(
            fx.world.take_messages(fx.b),
            ["Mārcus tibi gladium dare conātus est, sed manūs tuae plēnae sunt."]
        );
    }

    #[test]
    fn test_usage_and_case_errors() {
        let mut fx = setup();
        let (_, messages) = run(&mut fx, "da gladium");
        assert_eq!(messages, [USAGE]);
        let (_, messages) = run(&mut fx, "da gladium Lūciae");
        assert_eq!(messages, ["Nihil habēs."]);

        fx.world.spawn_prototype("gladius", fx.a).unwrap();
        let (outcome, messages) = run(&mut fx, "da gladium Lūciam");
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(messages, ["(Did you mean 'Lūciae'?)"]);
        let (_, messages) = run(&mut fx, "da gladium Mārcō");
        assert_eq!(messages, ["Tū tibi aliquid dare nōn potes!"]);
    }

    #[test]
    fn test_give_worn_garment() {
        let mut fx = setup();
        let hat = fx.world.spawn_prototype("petasus", fx.a).unwrap();
        run(&mut fx, "indue petasum");
        let (outcome, messages) = run(&mut fx, "da petasum Titō");
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(messages, ["Petasum exuistī.", "Petasum Titō dedistī."]);
        let entity = fx.world.get(hat).unwrap();
        assert!(!entity.is_worn());
        assert!(matches!(entity.held, Some(Hand::Right | Hand::Left)));
        assert!(fx.world.character(fx.a).unwrap().carry.current.abs() < 1e-9);
    }
}
