//! `ligā` and `solve`.

use tracing::debug;

use crate::commands::{
    CommandResult, announce, capitalize, form, here, key, predicate, refuse, require_case,
    resolve,
};
use crate::latin::CaseLabel;
use crate::world::{EntityId, World};

/// `ligā <rem> <ligātūrā>`: tie something with a held leash.
pub(super) fn liga(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    let words: Vec<&str> = args.split_whitespace().collect();
    let [thing, tie] = words.as_slice() else {
        return refuse(world, actor, "Ūsus: ligā <rem> <ligātūrā>");
    };

    let room = here(world, actor)?;
    let possessions = world.contents(actor);
    let mut candidates = possessions.clone();
    candidates.extend(world.contents(room));
    let (target, target_word) = resolve(world, actor, thing, &candidates)?;
    require_case(world, actor, target, &target_word, CaseLabel::AccSg)?;
    let (leash, leash_word) = resolve(world, actor, tie, &possessions)?;
    require_case(world, actor, leash, &leash_word, CaseLabel::AblSg)?;

    let entity = world.entity(leash)?;
    let abl = entity.form(CaseLabel::AblSg).to_string();
    let Some(state) = entity.leash else {
        return refuse(world, actor, format!("Nihil {abl} ligāre potes."));
    };
    if entity.held.is_none() {
        return refuse(world, actor, "Nōn in manibus habēs.");
    }
    if target == actor {
        return refuse(world, actor, "Tū tē ligāre nōn potes!");
    }
    if target == leash {
        return refuse(world, actor, "Rem sē ipsā ligāre nōn potes!");
    }
    if state.bound_to.is_some() {
        let text = format!("Prius {} solve.", form(world, leash, CaseLabel::AccSg));
        return refuse(world, actor, text);
    }

    world.bind(leash, target)?;
    debug!(%actor, %target, %leash, "tied");

    let acc = form(world, target, CaseLabel::AccSg);
    let binder = key(world, actor);
    world.msg(actor, format!("{} {abl} ligāvistī.", capitalize(&acc)));
    world.msg(target, format!("{binder} tē {abl} ligāvit."));
    announce(world, actor, &format!("{binder} {acc} {abl} ligāvit."), &[target]);
    Ok(())
}

/// `solve <rem>`: untie something, or the leash itself.
pub(super) fn solve(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    if args.is_empty() {
        return refuse(world, actor, "Ūsus: solve <rem>");
    }
    let room = here(world, actor)?;
    let mut candidates = world.contents(actor);
    candidates.extend(world.contents(room));
    let (target, word) = resolve(world, actor, args, &candidates)?;
    require_case(world, actor, target, &word, CaseLabel::AccSg)?;

    let mut leashes = world.leashes_on(target);
    if world
        .entity(target)?
        .leash
        .is_some_and(|state| state.bound_to.is_some())
    {
        leashes.push(target);
    }
    if leashes.is_empty() {
        let text = format!(
            "{} nōn {}.",
            capitalize(&form(world, target, CaseLabel::NomSg)),
            predicate(world, target, "ligāt")
        );
        return refuse(world, actor, text);
    }

    for leash in leashes {
        world.unbind(leash);
    }
    debug!(%actor, %target, "untied");

    let acc = form(world, target, CaseLabel::AccSg);
    world.msg(actor, format!("{} solvistī.", capitalize(&acc)));
    announce(world, actor, &format!("{} {acc} solvit.", key(world, actor)), &[]);
    Ok(())
}
