//! Object resolution ("which one").
//!
//! Maps a word the player typed onto one of a set of candidate entities.
//! A word matches an entity when it equals the entity's key or one of its
//! aliases, ignoring case and macrons. When several entities match, the
//! player picks one with `N-word` (`2-gladium`), counting from 1 in the
//! order the candidates were given.

use tracing::trace;

use crate::world::{EntityId, World};

/// Split `N-word` into the index and the word. Anything else (no dash, a
/// non-numeric or zero prefix) is a plain word.
fn split_index(arg: &str) -> Option<(usize, &str)> {
    let (prefix, word) = arg.split_once('-')?;
    let index = prefix.trim().parse::<usize>().ok()?;
    (index > 0).then_some((index, word.trim()))
}

/// Find the entity among `candidates` that `arg` names.
///
/// Returns the entity, or `None` after telling `actor` why nothing was
/// chosen, together with the word with any index prefix removed. The word
/// is what the grammar checks compare against the entity's forms.
pub fn which_one(
    world: &mut World,
    actor: EntityId,
    arg: &str,
    candidates: &[EntityId],
) -> (Option<EntityId>, String) {
    let arg = arg.trim();
    let (index, word) = match split_index(arg) {
        Some((index, word)) => (Some(index), word),
        None => (None, arg),
    };

    let same: Vec<EntityId> = candidates
        .iter()
        .copied()
        .filter(|&id| world.get(id).is_some_and(|e| e.answers_to(word)))
        .collect();
    trace!(%actor, arg, matches = same.len(), "resolving");

    if same.is_empty() {
        world.msg(actor, "Nōn invēnistī!");
        return (None, word.to_string());
    }

    let target = match index {
        Some(index) => {
            if same.len() < index {
                world.msg(actor, format!("Nōn sunt {index}, sed {}!", same.len()));
                return (None, word.to_string());
            }
            same[index - 1]
        }
        None if same.len() > 1 => {
            world.msg(actor, format!("Sunt {}. Ecce:", same.len()));
            for (position, id) in same.iter().enumerate() {
                let key = world.get(*id).map(|e| e.key.clone()).unwrap_or_default();
                world.msg(actor, format!("{}-{key}", position + 1));
            }
            return (None, word.to_string());
        }
        None => same[0],
    };

    (Some(target), word.to_string())
}
