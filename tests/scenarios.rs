//! End-to-end command scenarios: picking up, refusing, putting into
//! containers and giving.
//!
//! Run with: cargo test --test scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use mundus::world::{
    Abilities, CharacterState, CarryLimits, ContainerState, Dimensions, PhysicalProfile,
    assert_invariants,
};
use mundus::{EntityId, Gender, Hand, Lemma, Outcome, World, WorldConfig, execute};

/// A room with one right-handed character whose carrying maximum is `max`.
fn world_with_actor(max: f64) -> (World, EntityId, EntityId) {
    let mut world = World::new(WorldConfig::default(), 42);
    let room = world
        .create_room("forum", Some(&Lemma::new("forum", "forī", Gender::Neuter)))
        .unwrap();
    let actor = add_character(&mut world, room, "Mārcus", "Mārcī", Gender::Masculine, max);
    (world, room, actor)
}

fn add_character(
    world: &mut World,
    room: EntityId,
    nominative: &str,
    genitive: &str,
    gender: Gender,
    max: f64,
) -> EntityId {
    let mut state = CharacterState::new(
        Abilities::uniform(10),
        Hand::Right,
        &world.config().carrying.clone(),
    );
    state.carry = CarryLimits::with_max(max);
    world
        .create_character(&Lemma::new(nominative, genitive, gender), state, room)
        .unwrap()
}

/// Run a line and return the outcome with the actor's messages, minus the
/// trailing vitality prompt.
fn run(world: &mut World, actor: EntityId, line: &str) -> (Outcome, Vec<String>) {
    let outcome = execute(world, actor, line).unwrap();
    let mut messages = world.take_messages(actor);
    let prompt = messages.pop().unwrap();
    assert!(prompt.starts_with("Vīta: "), "{prompt}");
    (outcome, messages)
}

#[test]
fn test_pick_up_sword() {
    let (mut world, room, actor) = world_with_actor(40.0);
    let sword = world.spawn_prototype("gladius", room).unwrap();

    let (outcome, messages) = run(&mut world, actor, "cape gladium");
    assert_eq!(outcome, Outcome::Done);
    assert_eq!(messages, ["Gladium cēpistī."]);

    let state = world.character(actor).unwrap();
    assert!((state.carry.current - 0.6).abs() < 1e-9);
    assert_eq!(state.hands.occupied(), [Hand::Right]);
    assert_eq!(world.get(sword).unwrap().held, Some(Hand::Right));
    assert_eq!(world.get(sword).unwrap().location, Some(actor));
    assert_invariants(&world);
}

#[test]
fn test_hands_full_refuses_without_change() {
    let (mut world, room, actor) = world_with_actor(40.0);
    world.spawn_prototype("gladius", actor).unwrap();
    world.spawn_prototype("lūmen", actor).unwrap();
    let wool = world.spawn_prototype("lāna", room).unwrap();
    let before = world.character(actor).unwrap().clone();

    let (outcome, messages) = run(&mut world, actor, "cape lānam");
    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(messages, ["Manūs tuae sunt plēnae!"]);
    assert_eq!(world.character(actor).unwrap(), &before);
    assert_eq!(world.get(wool).unwrap().location, Some(room));
}

#[test]
fn test_too_heavy_refuses_without_change() {
    let (mut world, room, actor) = world_with_actor(67.5);
    let boulder = world
        .create_thing("saxum", Some(&Lemma::new("saxum", "saxī", Gender::Neuter)), room)
        .unwrap();
    world.get_mut(boulder).unwrap().physical =
        Some(PhysicalProfile::rigid("lapis", 8512.0, 3140.0, None));
    let before = world.character(actor).unwrap().clone();

    let (outcome, messages) = run(&mut world, actor, "cape saxum");
    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(messages, ["Tantum ponderis ferre nōn potes!"]);
    assert_eq!(world.character(actor).unwrap(), &before);
    assert_eq!(world.get(boulder).unwrap().location, Some(room));
}

#[test]
fn test_immovable_hearth_uses_its_own_refusal() {
    let (mut world, room, actor) = world_with_actor(67.5);
    world.spawn_prototype("focus", room).unwrap();
    let (outcome, messages) = run(&mut world, actor, "cape focum");
    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(messages, ["Focus nimis gravis est."]);
}

#[test]
fn test_long_spear_does_not_fit_bucket() {
    let (mut world, room, actor) = world_with_actor(40.0);
    let bucket = world
        .create_thing("situla", Some(&Lemma::new("situla", "situlae", Gender::Feminine)), room)
        .unwrap();
    world.get_mut(bucket).unwrap().container =
        Some(ContainerState::new(30.0, Some(Dimensions::new(0.3, 0.4, 0.5))));
    let spear = world
        .create_thing("hasta", Some(&Lemma::new("hasta", "hastae", Gender::Feminine)), room)
        .unwrap();
    world.get_mut(spear).unwrap().physical = Some(PhysicalProfile::rigid(
        "fraxinus",
        1.2,
        1.5,
        Some(Dimensions::new(0.03, 2.0, 0.03)),
    ));
    run(&mut world, actor, "cape hastam");
    let load = world.character(actor).unwrap().carry.current;

    let (outcome, messages) = run(&mut world, actor, "pōne hastam in situlā");
    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(messages, ["Situla nōn satis alta est."]);
    assert_eq!(world.get(spear).unwrap().location, Some(actor));
    assert!((world.character(actor).unwrap().carry.current - load).abs() < 1e-12);
    let capacity = world.get(bucket).unwrap().container.unwrap();
    assert!((capacity.remaining_volume - capacity.max_volume).abs() < 1e-12);
}

#[test]
fn test_give_moves_sword_between_hands() {
    let (mut world, room, giver) = world_with_actor(40.0);
    let taker = add_character(&mut world, room, "Lūcia", "Lūciae", Gender::Feminine, 40.0);
    let sword = world.spawn_prototype("gladius", room).unwrap();
    run(&mut world, giver, "cape gladium");

    let (outcome, messages) = run(&mut world, giver, "da Lūciae gladium");
    assert_eq!(outcome, Outcome::Done);
    assert_eq!(messages, ["Gladium Lūciae dedistī."]);
    assert_eq!(world.take_messages(taker), ["Mārcus tibi gladium dedit."]);

    let a = world.character(giver).unwrap();
    assert!(a.carry.current.abs() < 1e-9);
    assert_eq!(a.hands.free().len(), 2);
    let b = world.character(taker).unwrap();
    assert!((b.carry.current - 0.6).abs() < 1e-9);
    assert_eq!(b.hands.occupied(), [Hand::Right]);
    assert_eq!(world.get(sword).unwrap().location, Some(taker));
    assert_invariants(&world);
}

#[test]
fn test_pick_up_then_drop_restores_state() {
    let (mut world, room, actor) = world_with_actor(40.0);
    world.spawn_prototype("saccus", room).unwrap();
    let before = world.character(actor).unwrap().clone();

    run(&mut world, actor, "cape saccum");
    let (outcome, messages) = run(&mut world, actor, "relinque saccum");
    assert_eq!(outcome, Outcome::Done);
    assert_eq!(messages, ["Saccum relīquistī."]);
    let after = world.character(actor).unwrap();
    assert!((after.carry.current - before.carry.current).abs() < 1e-12);
    assert_eq!(after.hands.free().len(), 2);
}

#[test]
fn test_numbered_choice_among_swords() {
    let (mut world, room, actor) = world_with_actor(40.0);
    world.spawn_prototype("gladius", room).unwrap();
    let second = world.spawn_prototype("gladius", room).unwrap();

    let (outcome, _) = run(&mut world, actor, "cape 2-gladium");
    assert_eq!(outcome, Outcome::Done);
    assert_eq!(world.get(second).unwrap().location, Some(actor));
}
