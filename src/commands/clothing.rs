//! `indue` and `exue`.

use tracing::debug;

use crate::commands::{
    CommandResult, announce, capitalize, form, key, refuse, require_case, resolve,
};
use crate::latin::{CaseLabel, Gender, ablative_participle, ille, list_to_string};
use crate::world::{ClothingState, EntityId, WearRefusal, World, check_wear};

/// Ablative list of garments with the participle agreeing with them, e.g.
/// `strophiō et subligāculō tēctīs`.
fn garments_with_participle(world: &World, garments: &[EntityId], stem: &str) -> String {
    let names: Vec<String> = garments
        .iter()
        .map(|&id| form(world, id, CaseLabel::AblSg))
        .collect();
    let genders: Vec<Gender> = garments
        .iter()
        .filter_map(|&id| world.get(id).map(|e| e.gender_or_default()))
        .collect();
    format!("{} {stem}{}", list_to_string(&names), ablative_participle(&genders))
}

/// Tell the actor and the room that `garment` came off, naming what it
/// uncovered.
pub(super) fn announce_removal(
    world: &mut World,
    actor: EntityId,
    garment: EntityId,
    uncovered: &[EntityId],
) {
    let acc = form(world, garment, CaseLabel::AccSg);
    world.msg(actor, format!("{} exuistī.", capitalize(&acc)));
    let text = if uncovered.is_empty() {
        format!("{} {acc} exuit.", key(world, actor))
    } else {
        format!(
            "{} {acc} exuit, {}.",
            key(world, actor),
            garments_with_participle(world, uncovered, "apert")
        )
    };
    announce(world, actor, &text, &[]);
}

/// `indue <rem>`: put on a held garment.
pub(super) fn indue(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    if args.is_empty() {
        return refuse(world, actor, "Ūsus: indue <rem>");
    }
    let candidates = world.contents(actor);
    let (target, word) = resolve(world, actor, args, &candidates)?;

    let entity = world.entity(target)?;
    let Some(garment) = entity.clothing.clone() else {
        let text = format!("Ill{} nōn est vestīmentum!", ille(entity.gender_or_default()));
        return refuse(world, actor, text);
    };
    if !garment.worn && entity.held.is_none() {
        return refuse(world, actor, "Nōn in manibus habēs.");
    }

    let worn: Vec<ClothingState> = world
        .worn_by(actor)
        .into_iter()
        .filter_map(|id| world.get(id).and_then(|e| e.clothing.clone()))
        .collect();
    let worn: Vec<&ClothingState> = worn.iter().collect();
    let verdict = check_wear(&world.config().clothing, &garment, &worn);
    match verdict {
        Ok(()) => {}
        Err(WearRefusal::OverallLimit) => {
            return refuse(world, actor, "Plūra vestīmenta gerere nōn potes!");
        }
        Err(WearRefusal::TypeLimit) => {
            return refuse(world, actor, "Vestīmenta huius generis plūra gerere nōn potes!");
        }
        Err(WearRefusal::AlreadyWorn) => {
            let text = format!("Iam {} geris!", form(world, target, CaseLabel::AccSg));
            return refuse(world, actor, text);
        }
    }
    require_case(world, actor, target, &word, CaseLabel::AccSg)?;

    let covered = world.wear(actor, target)?;
    debug!(%actor, %target, ?covered, "put on");

    let acc = form(world, target, CaseLabel::AccSg);
    world.msg(actor, format!("{} induistī.", capitalize(&acc)));
    let text = if covered.is_empty() {
        format!("{} {acc} induit.", key(world, actor))
    } else {
        format!(
            "{} {acc} induit, {}.",
            key(world, actor),
            garments_with_participle(world, &covered, "tēct")
        )
    };
    announce(world, actor, &text, &[]);
    Ok(())
}

/// `exue <rem>`: take off a worn garment into a free hand.
pub(super) fn exue(world: &mut World, actor: EntityId, args: &str) -> CommandResult {
    if args.is_empty() {
        return refuse(world, actor, "Ūsus: exue <rem>");
    }
    let candidates = world.contents(actor);
    let (target, word) = resolve(world, actor, args, &candidates)?;

    let entity = world.entity(target)?;
    let Some(garment) = entity.clothing.as_ref().filter(|c| c.worn) else {
        return refuse(world, actor, "Nōn geritur!");
    };
    if let Some(cover) = garment.covered_by {
        let text = format!("prius tibi est necesse {} exuere.", form(world, cover, CaseLabel::AccSg));
        return refuse(world, actor, text);
    }
    require_case(world, actor, target, &word, CaseLabel::AccSg)?;
    if world.character(actor)?.hands.is_full() {
        return refuse(world, actor, "Manūs tuae sunt plēnae!");
    }

    let (hand, uncovered) = world.take_off(actor, target)?;
    debug!(%actor, %target, %hand, ?uncovered, "took off");
    announce_removal(world, actor, target, &uncovered);
    Ok(())
}
