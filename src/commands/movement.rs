//! Walking through exits by typing their name.

use tracing::debug;

use crate::commands::look::describe_room;
use crate::commands::{CommandError, CommandResult};
use crate::world::{EntityId, World};

/// The exit of the actor's room named by `line`, if any.
pub(super) fn find_exit(world: &World, actor: EntityId, line: &str) -> Option<EntityId> {
    let room = world.get(actor)?.location?;
    world
        .exits(room)
        .into_iter()
        .find(|&exit| world.get(exit).is_some_and(|e| e.answers_to(line)))
}

/// Walk through `exit` and look around on arrival.
pub(super) fn go(world: &mut World, actor: EntityId, exit: EntityId) -> CommandResult {
    if !world.traverse(actor, exit)? {
        return Err(CommandError::Rejected);
    }
    let Some(room) = world.get(actor).and_then(|e| e.location) else {
        return Ok(());
    };
    debug!(%actor, %exit, %room, "arrived");
    let text = describe_room(world, actor, room);
    world.msg(actor, text);
    Ok(())
}
