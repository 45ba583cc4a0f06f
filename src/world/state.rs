//! The world store.
//!
//! Holds every entity, routes messages to characters and performs the
//! paired state transitions: moving an object between a hand, a container
//! and the floor always updates hand occupancy, carried mass and container
//! capacity in one step. Validation of player-facing rules (capacity, fit,
//! grammar) belongs to the command handlers, which run all checks before
//! calling in here.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::latin::{Aliases, Gender, NounForms, populate_forms, transliterate};
use crate::world::chargen::NameBook;
use crate::world::clothing::{auto_covers, display_rank};
use crate::world::entity::{CharacterState, Entity, EntityId, EntityKind, Noun};
use crate::world::hands::{Burden, Hand};
use crate::world::rng::Rng;

/// Nominative, genitive and gender of a noun to decline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lemma {
    /// Nominative singular (may hold a praenomen and a nomen).
    pub nominative: String,
    /// Genitive singular.
    pub genitive: String,
    /// Gender.
    pub gender: Gender,
}

impl Lemma {
    /// Build a lemma.
    #[must_use]
    pub fn new(nominative: &str, genitive: &str, gender: Gender) -> Self {
        Self {
            nominative: nominative.to_string(),
            genitive: genitive.to_string(),
            gender,
        }
    }
}

/// A line of text sent to a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Recipient.
    pub to: EntityId,
    /// Text.
    pub text: String,
}

/// Per-object hooks around picking up, dropping and giving.
///
/// The `before` hooks may veto the action by returning `false`; they are
/// expected to message the actor themselves. The defaults let everything
/// through.
pub trait ObjectHooks: fmt::Debug {
    /// Before `getter` picks up `target`.
    fn at_before_get(&self, _world: &mut World, _getter: EntityId, _target: EntityId) -> bool {
        true
    }

    /// After `getter` picked up `target`.
    fn at_get(&self, _world: &mut World, _getter: EntityId, _target: EntityId) {}

    /// Before `dropper` drops `target`.
    fn at_before_drop(&self, _world: &mut World, _dropper: EntityId, _target: EntityId) -> bool {
        true
    }

    /// After `dropper` dropped `target`.
    fn at_drop(&self, _world: &mut World, _dropper: EntityId, _target: EntityId) {}

    /// Before `giver` gives `target` to `recipient`.
    fn at_before_give(
        &self,
        _world: &mut World,
        _giver: EntityId,
        _recipient: EntityId,
        _target: EntityId,
    ) -> bool {
        true
    }

    /// After `giver` gave `target` to `recipient`.
    fn at_give(&self, _world: &mut World, _giver: EntityId, _recipient: EntityId, _target: EntityId) {
    }
}

/// Hooks that allow everything and do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl ObjectHooks for PassThrough {}

/// What a relocation did besides moving the object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relocation {
    /// Hand the object left.
    pub from_hand: Option<Hand>,
    /// Hand the object went into.
    pub to_hand: Option<Hand>,
    /// Whether the object was taken off the source character's body.
    pub was_worn: bool,
    /// Garments uncovered because the object was taken off.
    pub uncovered: Vec<EntityId>,
}

/// In-memory world.
#[derive(Debug)]
pub struct World {
    pub(super) entities: BTreeMap<EntityId, Entity>,
    pub(super) next_id: u64,
    pub(super) config: WorldConfig,
    pub(super) rng: Rng,
    pub(super) clock: u64,
    names: NameBook,
    outbox: Vec<Message>,
    hooks: Box<dyn ObjectHooks>,
}

impl World {
    /// An empty world.
    #[must_use]
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: 1,
            config,
            rng: Rng::new(seed),
            clock: 0,
            names: NameBook::default(),
            outbox: Vec::new(),
            hooks: Box::new(PassThrough),
        }
    }

    /// Replace the name tables used for generated characters.
    #[must_use]
    pub fn with_names(mut self, names: NameBook) -> Self {
        self.names = names;
        self
    }

    /// Install object hooks.
    pub fn set_hooks(&mut self, hooks: Box<dyn ObjectHooks>) {
        self.hooks = hooks;
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Name tables.
    #[must_use]
    pub fn names(&self) -> &NameBook {
        &self.names
    }

    /// The world's random number generator.
    pub fn rng_mut(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// Simulated seconds elapsed.
    #[must_use]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Look up an entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Look up an entity mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Look up an entity that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] if there is none.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, WorldError> {
        self.entities.get(&id).ok_or(WorldError::UnknownEntity(id))
    }

    /// Look up a character that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] or [`WorldError::NotACharacter`].
    pub fn character(&self, id: EntityId) -> Result<&CharacterState, WorldError> {
        self.entity(id)?
            .character()
            .ok_or(WorldError::NotACharacter(id))
    }

    pub(super) fn character_mut(&mut self, id: EntityId) -> Result<&mut CharacterState, WorldError> {
        self.entities
            .get_mut(&id)
            .ok_or(WorldError::UnknownEntity(id))?
            .character_mut()
            .ok_or(WorldError::NotACharacter(id))
    }

    /// All entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn inflection(lemma: Option<&Lemma>, key: &str) -> Result<(Noun, Aliases), WorldError> {
        let mut aliases = Aliases::new();
        aliases.add(key);
        aliases.add(&transliterate(key));
        let Some(lemma) = lemma else {
            return Ok((Noun::Plain, aliases));
        };
        let mut forms = NounForms::new();
        populate_forms(
            &mut forms,
            &mut aliases,
            &lemma.nominative,
            &lemma.genitive,
            lemma.gender,
        )?;
        Ok((
            Noun::Inflected {
                gender: lemma.gender,
                forms,
            },
            aliases,
        ))
    }

    fn allocate(&mut self, key: &str, kind: EntityKind, noun: Noun, aliases: Aliases) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let mut entity = Entity::new(id, key, kind);
        entity.noun = noun;
        entity.aliases = aliases;
        self.entities.insert(id, entity);
        id
    }

    /// Create a room.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Declension`] if the lemma cannot be declined.
    pub fn create_room(&mut self, key: &str, lemma: Option<&Lemma>) -> Result<EntityId, WorldError> {
        let (noun, aliases) = Self::inflection(lemma, key)?;
        let id = self.allocate(key, EntityKind::Room { dark: false }, noun, aliases);
        debug!(%id, key, "room created");
        Ok(id)
    }

    /// Create a thing at `location` (a room, a container or a character's
    /// free hand).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Declension`] if the lemma cannot be declined, or
    /// any error of [`World::relocate`]; nothing is created then.
    pub fn create_thing(
        &mut self,
        key: &str,
        lemma: Option<&Lemma>,
        location: EntityId,
    ) -> Result<EntityId, WorldError> {
        self.entity(location)?;
        let (noun, aliases) = Self::inflection(lemma, key)?;
        let id = self.allocate(key, EntityKind::Thing, noun, aliases);
        if let Err(err) = self.relocate(id, location, None) {
            self.entities.remove(&id);
            self.next_id -= 1;
            return Err(err);
        }
        debug!(%id, key, %location, "thing created");
        Ok(id)
    }

    /// Create a character in a room. The key is the full nominative.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Declension`] if the name cannot be declined.
    pub fn create_character(
        &mut self,
        lemma: &Lemma,
        state: CharacterState,
        location: EntityId,
    ) -> Result<EntityId, WorldError> {
        self.entity(location)?;
        let key = lemma.nominative.clone();
        let (noun, aliases) = Self::inflection(Some(lemma), &key)?;
        let id = self.allocate(&key, EntityKind::Character(Box::new(state)), noun, aliases);
        self.move_to(id, location)?;
        debug!(%id, key, %location, "character created");
        Ok(id)
    }

    /// Create an exit from `location` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] for a missing room, or
    /// [`WorldError::Declension`] if the lemma cannot be declined.
    pub fn create_exit(
        &mut self,
        key: &str,
        location: EntityId,
        destination: EntityId,
        lemma: Option<&Lemma>,
    ) -> Result<EntityId, WorldError> {
        self.entity(location)?;
        self.entity(destination)?;
        let (noun, aliases) = Self::inflection(lemma, key)?;
        let kind = EntityKind::Exit {
            destination,
            door: None,
        };
        let id = self.allocate(key, kind, noun, aliases);
        self.move_to(id, location)?;
        debug!(%id, key, %location, %destination, "exit created");
        Ok(id)
    }

    /// Entities directly inside `id`, in id order.
    #[must_use]
    pub fn contents(&self, id: EntityId) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.location == Some(id))
            .map(|e| e.id)
            .collect()
    }

    /// Whether `id` is somewhere inside `ancestor`.
    #[must_use]
    pub fn is_within(&self, id: EntityId, ancestor: EntityId) -> bool {
        let mut current = self.entities.get(&id).and_then(|e| e.location);
        // bounded so a corrupted location cycle cannot hang
        for _ in 0..=self.entities.len() {
            match current {
                Some(location) if location == ancestor => return true,
                Some(location) => current = self.entities.get(&location).and_then(|e| e.location),
                None => return false,
            }
        }
        false
    }

    /// The first character `id` is inside of, directly or through
    /// containers.
    #[must_use]
    pub fn possessor(&self, id: EntityId) -> Option<EntityId> {
        let mut current = self.entities.get(&id)?.location;
        for _ in 0..=self.entities.len() {
            let location = current?;
            let entity = self.entities.get(&location)?;
            if entity.is_character() {
                return Some(location);
            }
            current = entity.location;
        }
        None
    }

    /// The room `id` is in, directly or indirectly. A room is its own room.
    #[must_use]
    pub fn room_of(&self, id: EntityId) -> Option<EntityId> {
        let mut current = Some(id);
        for _ in 0..=self.entities.len() {
            let entity = self.entities.get(&current?)?;
            if entity.is_room() {
                return Some(entity.id);
            }
            current = entity.location;
        }
        None
    }

    /// Mass an entity weighs when carried: its own mass, plus the contents
    /// of a rigid container. Flexible containers already carry their
    /// contents' mass in their own.
    #[must_use]
    pub fn gross_mass(&self, id: EntityId) -> f64 {
        let Some(entity) = self.entities.get(&id) else {
            return 0.0;
        };
        if entity.container.is_some() && entity.is_rigid() {
            entity.mass()
                + self
                    .contents(id)
                    .into_iter()
                    .map(|content| self.gross_mass(content))
                    .sum::<f64>()
        } else {
            entity.mass()
        }
    }

    /// Mass that moving `target` into `actor`'s hands would add to the
    /// actor's load: nothing if the actor already carries it somewhere.
    #[must_use]
    pub fn added_load(&self, actor: EntityId, target: EntityId) -> f64 {
        if self.possessor(target) == Some(actor) {
            0.0
        } else {
            self.gross_mass(target)
        }
    }

    /// Things a character holds, with the holding hand.
    #[must_use]
    pub fn held_by(&self, actor: EntityId) -> Vec<(EntityId, Hand)> {
        self.entities
            .values()
            .filter(|e| e.location == Some(actor))
            .filter_map(|e| e.held.map(|hand| (e.id, hand)))
            .collect()
    }

    /// Garments a character wears, in display order.
    #[must_use]
    pub fn worn_by(&self, actor: EntityId) -> Vec<EntityId> {
        let rules = &self.config.clothing;
        let mut worn: Vec<&Entity> = self
            .entities
            .values()
            .filter(|e| e.location == Some(actor) && e.is_worn())
            .collect();
        worn.sort_by_key(|e| {
            let kind = e.clothing.as_ref().and_then(|c| c.clothing_type.as_deref());
            (display_rank(rules, kind), e.id)
        });
        worn.into_iter().map(|e| e.id).collect()
    }

    /// Exits in a room.
    #[must_use]
    pub fn exits(&self, room: EntityId) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.location == Some(room) && e.destination().is_some())
            .map(|e| e.id)
            .collect()
    }

    /// Send a line to a character. Other entities do not listen.
    pub fn msg(&mut self, to: EntityId, text: impl Into<String>) {
        if self.entities.get(&to).is_some_and(Entity::is_character) {
            self.outbox.push(Message {
                to,
                text: text.into(),
            });
        }
    }

    /// Send a line to every character in `location` except `exclude`.
    pub fn msg_contents(&mut self, location: EntityId, text: &str, exclude: &[EntityId]) {
        let listeners: Vec<EntityId> = self
            .contents(location)
            .into_iter()
            .filter(|id| !exclude.contains(id))
            .collect();
        for listener in listeners {
            self.msg(listener, text);
        }
    }

    /// Remove and return the lines sent to one character.
    pub fn take_messages(&mut self, to: EntityId) -> Vec<String> {
        let (mine, rest): (Vec<Message>, Vec<Message>) =
            self.outbox.drain(..).partition(|m| m.to == to);
        self.outbox = rest;
        mine.into_iter().map(|m| m.text).collect()
    }

    /// Remove and return every pending message.
    pub fn take_all_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }

    /// Pending messages.
    #[must_use]
    pub fn pending_messages(&self) -> &[Message] {
        &self.outbox
    }

    fn call_hooks<R>(&mut self, call: impl FnOnce(&dyn ObjectHooks, &mut World) -> R) -> R {
        let hooks = std::mem::replace(&mut self.hooks, Box::new(PassThrough));
        let result = call(hooks.as_ref(), self);
        self.hooks = hooks;
        result
    }

    /// Run the `at_before_get` hook.
    pub fn before_get(&mut self, getter: EntityId, target: EntityId) -> bool {
        self.call_hooks(|hooks, world| hooks.at_before_get(world, getter, target))
    }

    /// Run the `at_get` hook.
    pub fn after_get(&mut self, getter: EntityId, target: EntityId) {
        self.call_hooks(|hooks, world| hooks.at_get(world, getter, target));
    }

    /// Run the `at_before_drop` hook.
    pub fn before_drop(&mut self, dropper: EntityId, target: EntityId) -> bool {
        self.call_hooks(|hooks, world| hooks.at_before_drop(world, dropper, target))
    }

    /// Run the `at_drop` hook.
    pub fn after_drop(&mut self, dropper: EntityId, target: EntityId) {
        self.call_hooks(|hooks, world| hooks.at_drop(world, dropper, target));
    }

    /// Run the `at_before_give` hook.
    pub fn before_give(&mut self, giver: EntityId, recipient: EntityId, target: EntityId) -> bool {
        self.call_hooks(|hooks, world| hooks.at_before_give(world, giver, recipient, target))
    }

    /// Run the `at_give` hook.
    pub fn after_give(&mut self, giver: EntityId, recipient: EntityId, target: EntityId) {
        self.call_hooks(|hooks, world| hooks.at_give(world, giver, recipient, target));
    }

    /// Set an entity's location with no bookkeeping. Used for characters
    /// and exits; objects move through [`World::relocate`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] or
    /// [`WorldError::WouldContainItself`].
    pub fn move_to(&mut self, id: EntityId, destination: EntityId) -> Result<(), WorldError> {
        self.entity(destination)?;
        if id == destination || self.is_within(destination, id) {
            return Err(WorldError::WouldContainItself {
                entity: id,
                destination,
            });
        }
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(WorldError::UnknownEntity(id))?;
        entity.location = Some(destination);
        Ok(())
    }

    /// Move an object to a room, a container or a character's hand,
    /// keeping hands, loads and container capacities in step.
    ///
    /// Leaving a character frees its hand (or takes it off, uncovering what
    /// it covered) and removes its gross mass from that character's load.
    /// Leaving or entering a container changes the container's free volume
    /// and, for flexible containers, the container's own mass and volume,
    /// up through every enclosing container to the carrying character.
    /// Entering a character fills `hand`, or the preferred free hand.
    ///
    /// The destination's own capacity and fit are the caller's to check;
    /// the containers around it are checked here.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if an entity is unknown, the move
    /// would put the object inside itself, the destination is neither a
    /// room, a container nor a character, the character has no free hand,
    /// or a flexible destination would outgrow the container around it
    /// ([`WorldError::NoRoom`]).
    pub fn relocate(
        &mut self,
        target: EntityId,
        destination: EntityId,
        hand: Option<Hand>,
    ) -> Result<Relocation, WorldError> {
        let source = self.entity(target)?.location;
        let dest = self.entity(destination)?;
        if target == destination || self.is_within(destination, target) {
            return Err(WorldError::WouldContainItself {
                entity: target,
                destination,
            });
        }
        if source == Some(destination) {
            return Ok(Relocation::default());
        }

        let to_hand = if let Some(state) = dest.character() {
            match hand {
                Some(hand) if state.hands.is_free(hand) => Some(hand),
                Some(hand) => {
                    return Err(WorldError::HandOccupied {
                        holder: destination,
                        hand: hand.as_str(),
                    });
                }
                None => Some(
                    state
                        .hands
                        .preferred(state.handedness)
                        .ok_or(WorldError::NoFreeHand(destination))?,
                ),
            }
        } else if dest.is_room() || dest.container.is_some() {
            None
        } else {
            return Err(WorldError::NotAContainer(destination));
        };

        let gross = self.gross_mass(target);
        let volume = self.entity(target)?.volume();
        if to_hand.is_none() {
            if let Some(container) = self.enclosing_overflow(target, destination, volume) {
                return Err(WorldError::NoRoom { container, volume });
            }
        }

        let mut relocation = Relocation {
            to_hand,
            ..Relocation::default()
        };
        if let Some(source) = source {
            self.detach(source, target, gross, volume, &mut relocation);
        }
        self.attach(destination, target, to_hand, gross, volume);
        if let Some(entity) = self.entities.get_mut(&target) {
            entity.location = Some(destination);
        }

        debug!(%target, ?source, %destination, ?to_hand, gross, "relocated");
        Ok(relocation)
    }

    /// The first container around a flexible `destination` that has no
    /// room for it to grow by `volume`.
    ///
    /// `destination` itself is the caller's fit check. Containers that
    /// already enclose `target` are skipped, since the move frees its volume
    /// there first.
    fn enclosing_overflow(&self, target: EntityId, destination: EntityId, volume: f64) -> Option<EntityId> {
        let mut current = self.entities.get(&destination)?;
        for _ in 0..=self.entities.len() {
            if current.container.is_none() || current.is_character() || current.is_rigid() {
                return None;
            }
            let parent = self.entities.get(&current.location?)?;
            if parent.is_character() {
                return None;
            }
            if let Some(state) = parent.container.as_ref() {
                if volume > state.remaining_volume && !self.is_within(target, parent.id) {
                    return Some(parent.id);
                }
            }
            current = parent;
        }
        None
    }

    fn detach(
        &mut self,
        source: EntityId,
        target: EntityId,
        gross: f64,
        volume: f64,
        relocation: &mut Relocation,
    ) {
        let source_is_character = self.entities.get(&source).is_some_and(Entity::is_character);
        let source_is_container = self
            .entities
            .get(&source)
            .is_some_and(|e| e.container.is_some());

        if source_is_character {
            let held = self.entities.get_mut(&target).and_then(|e| e.held.take());
            if self.entities.get(&target).is_some_and(Entity::is_worn) {
                relocation.was_worn = true;
                relocation.uncovered = self.unwear(source, target);
            }
            if let Ok(state) = self.character_mut(source) {
                let mut grip = state.grip();
                match held {
                    Some(hand) => {
                        grip.release(hand, Burden::Carry(gross));
                    }
                    None => grip.adjust(Burden::Carry(gross), false),
                }
            }
            relocation.from_hand = held;
        } else if source_is_container {
            self.adjust_chain(source, gross, volume, false);
        }
    }

    fn attach(
        &mut self,
        destination: EntityId,
        target: EntityId,
        hand: Option<Hand>,
        gross: f64,
        volume: f64,
    ) {
        if let Some(entity) = self.entities.get_mut(&target) {
            if let Some(clothing) = entity.clothing.as_mut() {
                clothing.worn = false;
                clothing.covered_by = None;
            }
            entity.held = hand;
        }

        if let Some(hand) = hand {
            if let Ok(state) = self.character_mut(destination) {
                state.grip().occupy_hand(hand, Burden::Carry(gross));
            }
        } else if self
            .entities
            .get(&destination)
            .is_some_and(|e| e.container.is_some())
        {
            self.adjust_chain(destination, gross, volume, true);
        }
    }

    /// Apply a content change to a container and everything enclosing it.
    fn adjust_chain(&mut self, container: EntityId, mass: f64, volume: f64, adding: bool) {
        let sign = if adding { 1.0 } else { -1.0 };
        let mut current = container;
        // whether the contents of `current` changed volume
        let mut volume_changed = true;

        for _ in 0..=self.entities.len() {
            let Some(entity) = self.entities.get_mut(&current) else {
                break;
            };
            if entity.container.is_none() || entity.is_character() {
                break;
            }
            let rigid = entity.is_rigid();
            if let Some(state) = entity.container.as_mut() {
                if volume_changed {
                    if adding {
                        if !state.insert(volume) {
                            warn!(container = %current, volume, "container overfilled");
                        }
                    } else {
                        state.extract(volume);
                    }
                }
            }
            if !rigid {
                if let Some(physical) = entity.physical.as_mut() {
                    physical.mass = (physical.mass + sign * mass).max(0.0);
                    if volume_changed {
                        physical.volume = (physical.volume + sign * volume).max(0.0);
                    }
                }
            }
            volume_changed = volume_changed && !rigid;

            match entity.location {
                Some(next) => current = next,
                None => break,
            }
        }

        if let Some(holder) = self.possessor(container) {
            if let Ok(state) = self.character_mut(holder) {
                state.grip().adjust(Burden::Carry(mass), adding);
            }
        }
    }

    /// Move a held object to the actor's other hand.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotHeld`] if the actor does not hold it, or
    /// [`WorldError::HandOccupied`] if `hand` is full.
    pub fn switch_hand(&mut self, actor: EntityId, target: EntityId, hand: Hand) -> Result<(), WorldError> {
        let entity = self.entity(target)?;
        let current = match entity.held {
            Some(current) if entity.location == Some(actor) => current,
            _ => return Err(WorldError::NotHeld { holder: actor, target }),
        };
        if current == hand {
            return Ok(());
        }
        let state = self.character_mut(actor)?;
        if !state.hands.is_free(hand) {
            return Err(WorldError::HandOccupied {
                holder: actor,
                hand: hand.as_str(),
            });
        }
        let mut grip = state.grip();
        grip.release(current, Burden::Counted);
        grip.occupy_hand(hand, Burden::Counted);
        if let Some(entity) = self.entities.get_mut(&target) {
            entity.held = Some(hand);
        }
        debug!(%actor, %target, %hand, "switched hand");
        Ok(())
    }

    /// Put on a held garment. Already-worn garments of the types the new one
    /// auto-covers, and not yet covered, become covered by it.
    ///
    /// Returns the garments covered.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotHeld`] or [`WorldError::NotClothing`].
    pub fn wear(&mut self, actor: EntityId, garment: EntityId) -> Result<Vec<EntityId>, WorldError> {
        let entity = self.entity(garment)?;
        let hand = match entity.held {
            Some(hand) if entity.location == Some(actor) => hand,
            _ => {
                return Err(WorldError::NotHeld {
                    holder: actor,
                    target: garment,
                });
            }
        };
        let clothing = entity
            .clothing
            .as_ref()
            .ok_or(WorldError::NotClothing(garment))?;
        let kind = clothing.clothing_type.clone();
        self.character(actor)?;

        let rules = &self.config.clothing;
        let covered: Vec<EntityId> = self
            .worn_by(actor)
            .into_iter()
            .filter(|id| {
                self.entities
                    .get(id)
                    .and_then(|e| e.clothing.as_ref())
                    .is_some_and(|other| {
                        other.covered_by.is_none()
                            && auto_covers(rules, kind.as_deref(), other.clothing_type.as_deref())
                    })
            })
            .collect();

        self.character_mut(actor)?
            .grip()
            .release(hand, Burden::Counted);
        if let Some(entity) = self.entities.get_mut(&garment) {
            entity.held = None;
            if let Some(clothing) = entity.clothing.as_mut() {
                clothing.worn = true;
            }
        }
        for id in &covered {
            if let Some(clothing) = self.entities.get_mut(id).and_then(|e| e.clothing.as_mut()) {
                clothing.covered_by = Some(garment);
            }
        }
        debug!(%actor, %garment, ?covered, "worn");
        Ok(covered)
    }

    /// Take off a worn garment into a free hand, uncovering what it covered.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotWorn`], [`WorldError::Covered`] or
    /// [`WorldError::NoFreeHand`].
    pub fn take_off(
        &mut self,
        actor: EntityId,
        garment: EntityId,
    ) -> Result<(Hand, Vec<EntityId>), WorldError> {
        let entity = self.entity(garment)?;
        let clothing = match entity.clothing.as_ref() {
            Some(clothing) if clothing.worn && entity.location == Some(actor) => clothing,
            _ => {
                return Err(WorldError::NotWorn {
                    wearer: actor,
                    target: garment,
                });
            }
        };
        if let Some(by) = clothing.covered_by {
            return Err(WorldError::Covered { target: garment, by });
        }
        let state = self.character(actor)?;
        let hand = state
            .hands
            .preferred(state.handedness)
            .ok_or(WorldError::NoFreeHand(actor))?;

        let uncovered = self.unwear(actor, garment);
        self.character_mut(actor)?
            .grip()
            .occupy_hand(hand, Burden::Counted);
        if let Some(entity) = self.entities.get_mut(&garment) {
            entity.held = Some(hand);
        }
        debug!(%actor, %garment, %hand, ?uncovered, "taken off");
        Ok((hand, uncovered))
    }

    /// Mark a garment unworn and uncover what it covered. No hand changes.
    fn unwear(&mut self, wearer: EntityId, garment: EntityId) -> Vec<EntityId> {
        if let Some(clothing) = self.entities.get_mut(&garment).and_then(|e| e.clothing.as_mut()) {
            clothing.worn = false;
            clothing.covered_by = None;
        }
        let uncovered: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.location == Some(wearer))
            .filter(|e| e.clothing.as_ref().is_some_and(|c| c.covered_by == Some(garment)))
            .map(|e| e.id)
            .collect();
        for id in &uncovered {
            if let Some(clothing) = self.entities.get_mut(id).and_then(|e| e.clothing.as_mut()) {
                clothing.covered_by = None;
            }
        }
        uncovered
    }
}
