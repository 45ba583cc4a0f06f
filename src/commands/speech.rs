//! `dīc`.

use crate::commands::{CommandResult, announce, key, refuse};
use crate::world::{EntityId, World};

/// `dīc <verba>`: say something to the room.
///
/// The first word is quoted before `inquis`/`inquit` and the rest after
/// it, the way Latin interrupts a quotation with the verb of saying.
pub(super) fn dic(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    let speech = args.trim();
    if speech.is_empty() {
        return refuse(world, actor, "Quid dīcere velis?");
    }
    let speaker = key(world, actor);
    let (mine, theirs) = match speech.split_once(' ') {
        Some((first, rest)) => {
            let rest = rest.trim();
            (
                format!("\"{first}\" inquis \"{rest}\""),
                format!("{speaker} \"{first}\" inquit \"{rest}\""),
            )
        }
        None => (
            format!("\"{speech}\" inquis."),
            format!("{speaker} \"{speech}\" inquit."),
        ),
    };
    world.msg(actor, mine);
    announce(world, actor, &theirs, &[]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::execute;
    use crate::config::WorldConfig;
    use crate::latin::Gender;
    use crate::world::Lemma;

    #[test]
    fn test_quotation_is_split() {
        let mut world = World::new(WorldConfig::default(), 2);
        let room = world.create_room("forum", None).unwrap();
        let actor = world
            .spawn_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), room)
            .unwrap();
        let listener = world
            .spawn_character(&Lemma::new("Lūcia", "Lūciae", Gender::Feminine), room)
            .unwrap();

        execute(&mut world, actor, "dīc Salvē, amīca mea").unwrap();
        assert_eq!(world.take_messages(actor)[0], "\"Salvē,\" inquis \"amīca mea\"");
        assert_eq!(
            world.take_messages(listener),
            ["Mārcus \"Salvē,\" inquit \"amīca mea\""]
        );

        execute(&mut world, actor, "dic valē").unwrap();
        assert_eq!(world.take_messages(actor)[0], "\"valē\" inquis.");
        assert_eq!(world.take_messages(listener), ["Mārcus \"valē\" inquit."]);

        execute(&mut world, actor, "dīc").unwrap();
        assert_eq!(world.take_messages(actor)[0], "Quid dīcere velis?");
    }
}
