//! Property-based tests for declension, the form registry and the world's
//! paired bookkeeping.
//!
//! Run with: cargo test --release --test prop_world

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use mundus::latin::{Aliases, CaseLabel, NounForms, populate_forms};
use mundus::world::{check_invariants, prototypes};
use mundus::{EntityId, Gender, Lemma, World, WorldConfig, decline, execute};

/// A stem of plain Latin letters.
fn stem() -> impl Strategy<Value = String> {
    "[bcdfglmnprstv][aeiou][bcdlmnrst]{1,2}[aeiou]?[bcdlmnrst]"
}

fn gender() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Masculine),
        Just(Gender::Feminine),
        Just(Gender::Neuter)
    ]
}

/// Nominative/genitive pairs from the five singular declensions.
fn lemma() -> impl Strategy<Value = (String, String, Gender)> {
    (stem(), gender(), 0usize..6).prop_map(|(stem, gender, family)| match family {
        0 => (format!("{stem}a"), format!("{stem}ae"), Gender::Feminine),
        1 => (format!("{stem}us"), format!("{stem}ī"), Gender::Masculine),
        2 => (format!("{stem}um"), format!("{stem}ī"), Gender::Neuter),
        3 => (format!("{stem}or"), format!("{stem}ōris"), gender),
        4 => (format!("{stem}us"), format!("{stem}ūs"), Gender::Masculine),
        _ => (format!("{stem}ēs"), format!("{stem}eī"), Gender::Feminine),
    })
}

const ITEMS: [&str; 6] = ["gladius", "lāna", "lūmen", "saccus", "petasus", "tunica"];

/// Lines a player might type in the test world.
fn command() -> impl Strategy<Value = String> {
    let verb = prop_oneof![
        Just("cape"),
        Just("relinque"),
        Just("indue"),
        Just("exue"),
        Just("tenē"),
    ];
    let item = 0..ITEMS.len();
    let accusative = |name: &str| {
        let proto = prototypes().into_iter().find(|p| p.name == name).unwrap();
        decline(proto.name, proto.genitive, proto.gender)
            .unwrap()
            .get(CaseLabel::AccSg)
            .to_string()
    };
    prop_oneof![
        4 => (verb, item).prop_map(move |(verb, i)| {
            let noun = accusative(ITEMS[i]);
            if verb == "tenē" {
                format!("{verb} {noun} sinistrā")
            } else {
                format!("{verb} {noun}")
            }
        }),
        1 => (0..ITEMS.len()).prop_map(move |i| format!("pōne {} in saccō", accusative(ITEMS[i]))),
        1 => (0..ITEMS.len()).prop_map(move |i| format!("excipe {} ex saccō", accusative(ITEMS[i]))),
        1 => Just("habeō".to_string()),
    ]
}

fn populated_world() -> (World, EntityId) {
    let mut world = World::new(WorldConfig::default(), 7);
    let room = world.create_room("ātrium", None).unwrap();
    let actor = world
        .spawn_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), room)
        .unwrap();
    for name in ITEMS {
        world.spawn_prototype(name, room).unwrap();
    }
    (world, actor)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every recognised lemma yields twelve forms and keeps its inputs.
    #[test]
    fn prop_paradigm_complete((nom, gen_sg, gender) in lemma()) {
        let paradigm = decline(&nom, &gen_sg, gender).unwrap();
        prop_assert_eq!(paradigm.iter().count(), 12);
        for (label, form) in paradigm.iter() {
            prop_assert!(!form.is_empty(), "{} empty for {} {}", label, nom, gen_sg);
        }
        prop_assert_eq!(paradigm.get(CaseLabel::NomSg), nom.as_str());
        prop_assert_eq!(paradigm.get(CaseLabel::GenSg), gen_sg.as_str());
    }

    /// Registering a lemma twice changes nothing the second time.
    #[test]
    fn prop_registry_idempotent((nom, gen_sg, gender) in lemma()) {
        let mut once = NounForms::new();
        let mut once_aliases = Aliases::new();
        populate_forms(&mut once, &mut once_aliases, &nom, &gen_sg, gender).unwrap();

        let mut twice = once.clone();
        let mut twice_aliases = once_aliases.clone();
        populate_forms(&mut twice, &mut twice_aliases, &nom, &gen_sg, gender).unwrap();

        prop_assert_eq!(once, twice);
        prop_assert_eq!(once_aliases, twice_aliases);
    }

    /// Picking something up and dropping it again restores load and hands.
    #[test]
    fn prop_pickup_drop_round_trip(index in 0..ITEMS.len()) {
        let (mut world, actor) = populated_world();
        let before = world.character(actor).unwrap().carry.current;
        let name = ITEMS[index];
        let proto = prototypes().into_iter().find(|p| p.name == name).unwrap();
        let acc = decline(proto.name, proto.genitive, proto.gender).unwrap().get(CaseLabel::AccSg).to_string();

        execute(&mut world, actor, &format!("cape {acc}")).unwrap();
        execute(&mut world, actor, &format!("relinque {acc}")).unwrap();

        let state = world.character(actor).unwrap();
        prop_assert!((state.carry.current - before).abs() < 1e-9);
        prop_assert_eq!(state.hands.free().len(), 2);
    }

    /// No sequence of commands breaks the hand, load, container or clothing
    /// bookkeeping.
    #[test]
    fn prop_commands_keep_invariants(lines in prop::collection::vec(command(), 1..40)) {
        let (mut world, actor) = populated_world();
        for line in &lines {
            execute(&mut world, actor, line).unwrap();
            let violations = check_invariants(&world);
            prop_assert!(violations.is_empty(), "after '{}': {:?}", line, violations);

            let state = world.character(actor).unwrap();
            prop_assert_eq!(state.hands.occupied().len() + state.hands.free().len(), 2);
            for entity in world.entities() {
                if let Some(capacity) = &entity.container {
                    prop_assert!(capacity.remaining_volume >= -1e-9);
                    prop_assert!(capacity.remaining_volume <= capacity.max_volume + 1e-9);
                }
            }
        }
    }
}
