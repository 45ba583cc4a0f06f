#![no_main]

//! Command sequence fuzzer.
//!
//! Feeds arbitrary lines to a character in a furnished room and checks the
//! world's bookkeeping after every one:
//! 1. Hands partition into occupied and free
//! 2. Carried load matches what is held and worn
//! 3. Container volumes stay within bounds
//! 4. Garment cover links point both ways

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mundus::world::check_invariants;
use mundus::{Gender, Lemma, World, WorldConfig, execute};

const WORDS: [&str; 24] = [
    "cape", "relinque", "da", "pōne", "excipe", "inspice", "tenē", "indue", "exue", "ligā",
    "solve", "habeō", "gladium", "lānam", "saccum", "saccō", "petasum", "tunicam", "lōrum",
    "lōrō", "Lūciae", "dextrā", "sinistrā", "2-gladium",
];

#[derive(Arbitrary, Debug)]
struct Session {
    seed: u64,
    /// Each line is a handful of word indices, or free text.
    lines: Vec<Line>,
}

#[derive(Arbitrary, Debug)]
enum Line {
    Words(Vec<u8>),
    Text(String),
}

fuzz_target!(|session: Session| {
    let mut world = World::new(WorldConfig::default(), session.seed);
    let Ok(room) = world.create_room("forum", None) else { return };
    let Ok(actor) = world.spawn_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), room) else {
        return;
    };
    let _ = world.spawn_character(&Lemma::new("Lūcia", "Lūciae", Gender::Feminine), room);
    for name in ["gladius", "gladius", "lāna", "saccus", "petasus", "tunica", "lōrum"] {
        let _ = world.spawn_prototype(name, room);
    }

    for line in session.lines.iter().take(64) {
        let text = match line {
            Line::Words(indices) => indices
                .iter()
                .take(4)
                .map(|&i| WORDS[usize::from(i) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" "),
            Line::Text(text) => text.clone(),
        };
        execute(&mut world, actor, &text).expect("commands never misuse the world");
        let violations = check_invariants(&world);
        assert!(violations.is_empty(), "after {text:?}: {violations:?}");
        world.take_all_messages();
    }
});
