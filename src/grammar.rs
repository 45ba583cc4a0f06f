//! Grammar checks on the words players type.

use tracing::trace;

use crate::latin::CaseLabel;
use crate::world::{EntityId, World};

/// Check that `token` is one of the target's forms for `label`.
///
/// Comparison ignores case and macrons. Entities without declined forms
/// always pass. On a mismatch the actor is told the expected form and
/// `false` is returned, so the command stops before changing anything.
pub fn check_case(
    world: &mut World,
    actor: EntityId,
    target: EntityId,
    token: &str,
    label: CaseLabel,
) -> bool {
    let Some(forms) = world.get(target).and_then(|e| e.forms()) else {
        return true;
    };
    if forms.matches(label, token.trim()) {
        return true;
    }

    let expected = forms.first(label).unwrap_or_default().to_string();
    trace!(%actor, %target, token, %label, expected, "wrong case");
    world.msg(actor, format!("(Did you mean '{expected}'?)"));
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::latin::Gender;
    use crate::world::Lemma;

    fn setup() -> (World, EntityId, EntityId, EntityId) {
        let mut world = World::new(WorldConfig::default(), 1);
        let room = world.create_room("ātrium", None).unwrap();
        let actor = world
            .spawn_character(&Lemma::new("Mārcus", "Mārcī", Gender::Masculine), room)
            .unwrap();
        let sword = world.spawn_prototype("gladius", room).unwrap();
        let stone = world.create_thing("lapis", None, room).unwrap();
        (world, actor, sword, stone)
    }

    #[test]
    fn test_right_case_passes() {
        let (mut world, actor, sword, _) = setup();
        assert!(check_case(&mut world, actor, sword, "gladium", CaseLabel::AccSg));
        assert!(check_case(&mut world, actor, sword, "GLADIO", CaseLabel::AblSg));
        assert!(world.take_messages(actor).is_empty());
    }

    #[test]
    fn test_wrong_case_suggests_form() {
        let (mut world, actor, sword, _) = setup();
        assert!(!check_case(&mut world, actor, sword, "gladius", CaseLabel::AccSg));
        assert_eq!(world.take_messages(actor), ["(Did you mean 'gladium'?)"]);
    }

    #[test]
    fn test_plain_entity_passes() {
        let (mut world, actor, _, stone) = setup();
        assert!(check_case(&mut world, actor, stone, "lapis", CaseLabel::AccSg));
    }
}
