//! `tempus`.

use crate::commands::CommandResult;
use crate::world::{EntityId, World};

/// What `tempus` answers at `hour` of the day. Hours are counted from
/// sunrise, so 6:00 is the first hour and 18:00 the thirteenth.
#[must_use]
pub fn time_of_day(hour: u64) -> String {
    if (6..=18).contains(&hour) {
        format!("Nunc est hōra {}.", hour - 5)
    } else {
        "Nox est.".to_string()
    }
}

/// `tempus`: tell the time.
pub(super) fn tempus(world: &mut World, actor: EntityId, _args: &str) -> CommandResult {
    let text = time_of_day(world.hour());
    world.msg(actor, text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Outcome, execute};
    use crate::config::WorldConfig;
    use crate::latin::Gender;
    use crate::world::{Lemma, SECONDS_PER_HOUR};

    #[test]
    fn test_night_and_day_boundaries() {
        assert_eq!(time_of_day(0), "Nox est.");
        assert_eq!(time_of_day(5), "Nox est.");
        assert_eq!(time_of_day(6), "Nunc est hōra 1.");
        assert_eq!(time_of_day(12), "Nunc est hōra 7.");
        assert_eq!(time_of_day(18), "Nunc est hōra 13.");
        assert_eq!(time_of_day(19), "Nox est.");
        assert_eq!(time_of_day(23), "Nox est.");
    }

    #[test]
    fn test_tempus_reads_the_clock() {
        let mut world = World::new(WorldConfig::default(), 4);
        let room = world.create_room("forum", None).unwrap();
        let actor = world
            .spawn_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), room)
            .unwrap();

        assert_eq!(execute(&mut world, actor, "tempus").unwrap(), Outcome::Done);
        assert_eq!(world.take_messages(actor)[0], "Nox est.");

        world.advance_time(9 * SECONDS_PER_HOUR);
        world.take_messages(actor);
        execute(&mut world, actor, "tempus").unwrap();
        assert_eq!(world.take_messages(actor)[0], "Nunc est hōra 4.");
    }
}
