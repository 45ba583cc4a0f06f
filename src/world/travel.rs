//! Leashes, travel between rooms, and the passing of time.

use tracing::debug;

use crate::error::WorldError;
use crate::latin::{CaseLabel, us_a_um};
use crate::world::entity::EntityId;
use crate::world::state::World;

/// Simulated seconds in an hour.
pub const SECONDS_PER_HOUR: u64 = 3600;
/// Hours in a simulated day.
pub const HOURS_PER_DAY: u64 = 24;
/// Hour of sunrise. Sunset is twelve hours later.
pub const DAWN: u64 = 6;

impl World {
    /// Tie `leash` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] if either is missing.
    pub fn bind(&mut self, leash: EntityId, target: EntityId) -> Result<(), WorldError> {
        self.entity(target)?;
        let entity = self
            .entities
            .get_mut(&leash)
            .ok_or(WorldError::UnknownEntity(leash))?;
        entity.leash.get_or_insert_default().bound_to = Some(target);
        debug!(%leash, %target, "bound");
        Ok(())
    }

    /// Untie a leash.
    pub fn unbind(&mut self, leash: EntityId) {
        if let Some(state) = self.entities.get_mut(&leash).and_then(|e| e.leash.as_mut()) {
            state.bound_to = None;
            debug!(%leash, "unbound");
        }
    }

    /// Leashes tied to `target`.
    #[must_use]
    pub fn leashes_on(&self, target: EntityId) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.leash.is_some_and(|l| l.bound_to == Some(target)))
            .map(|e| e.id)
            .collect()
    }

    /// The character holding a leash tied to `target`, other than `target`.
    #[must_use]
    pub fn leash_holder(&self, target: EntityId) -> Option<EntityId> {
        self.leashes_on(target).into_iter().find_map(|leash| {
            let entity = self.entities.get(&leash)?;
            entity.held?;
            let holder = entity.location?;
            (holder != target && self.entities.get(&holder)?.is_character()).then_some(holder)
        })
    }

    /// Entities tied to leashes `actor` holds.
    #[must_use]
    pub fn followers(&self, actor: EntityId) -> Vec<EntityId> {
        self.held_by(actor)
            .into_iter()
            .filter_map(|(id, _)| self.entities.get(&id)?.leash?.bound_to)
            .filter(|&follower| follower != actor)
            .collect()
    }

    /// Walk `traveller` through `exit`, leading leashed followers.
    ///
    /// Refusals (closed door, locked exit, being led on a leash) are
    /// messaged to the traveller. Returns whether the traveller moved.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotAnExit`] or [`WorldError::UnknownEntity`].
    pub fn traverse(&mut self, traveller: EntityId, exit: EntityId) -> Result<bool, WorldError> {
        let passage = self.entity(exit)?;
        let destination = passage.destination().ok_or(WorldError::NotAnExit(exit))?;
        let exit_key = passage.key.clone();

        if let Some(door) = passage.door() {
            if door.closed {
                let text = format!(
                    "{} claus{} est",
                    passage.form(CaseLabel::NomSg),
                    us_a_um(CaseLabel::NomSg, passage.gender_or_default())
                );
                self.msg(traveller, text);
                return Ok(false);
            }
        }
        if !passage.locks.traverse {
            self.msg(traveller, "Illūc īre nōn licet.");
            return Ok(false);
        }
        if self.leash_holder(traveller).is_some() {
            let gender = self.entity(traveller)?.gender_or_default();
            let text = format!(
                "Ligāt{} es; abīre nōn potes.",
                us_a_um(CaseLabel::NomSg, gender)
            );
            self.msg(traveller, text);
            return Ok(false);
        }

        let Some(origin) = self.entity(traveller)?.location else {
            return Ok(false);
        };
        let followers: Vec<EntityId> = self
            .followers(traveller)
            .into_iter()
            .filter(|&f| self.entities.get(&f).is_some_and(|e| e.location == Some(origin)))
            .collect();

        self.step(traveller, origin, destination, &exit_key)?;
        for follower in followers {
            self.step(follower, origin, destination, &exit_key)?;
        }
        Ok(true)
    }

    fn step(
        &mut self,
        mover: EntityId,
        origin: EntityId,
        destination: EntityId,
        exit_key: &str,
    ) -> Result<(), WorldError> {
        let key = self.entity(mover)?.key.clone();
        let origin_abl = self
            .entity(origin)?
            .form(CaseLabel::AblSg)
            .to_string();

        self.msg_contents(origin, &format!("{key} {exit_key} discessit."), &[mover]);
        if self.entity(mover)?.is_character() {
            self.move_to(mover, destination)?;
        } else {
            self.relocate(mover, destination, None)?;
        }
        self.msg_contents(destination, &format!("{key} ab {origin_abl} vēnit."), &[mover]);
        debug!(%mover, %origin, %destination, "traversed");
        Ok(())
    }

    /// Hour of the simulated day, `0..24`. The clock starts at midnight.
    #[must_use]
    pub fn hour(&self) -> u64 {
        (self.clock / SECONDS_PER_HOUR) % HOURS_PER_DAY
    }

    /// Advance simulated time. Every room hears sunrise and sunset if the
    /// clock passes 6:00 or 18:00, then every wanderer whose interval has
    /// elapsed walks through a random open exit of its room.
    ///
    /// Returns the number of wander steps taken.
    pub fn advance_time(&mut self, seconds: u64) -> usize {
        let before = self.clock;
        self.clock = self.clock.saturating_add(seconds);
        self.announce_daylight(before, self.clock);

        let interval = self.config.wander_interval_secs.max(1);
        let wanderers: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.character().is_some_and(|c| c.wanderer))
            .map(|e| e.id)
            .collect();

        let mut steps = 0;
        for wanderer in wanderers {
            let due = match self.character_mut(wanderer) {
                Ok(state) => {
                    state.wander_elapsed += seconds;
                    let due = state.wander_elapsed / interval;
                    state.wander_elapsed %= interval;
                    due
                }
                Err(_) => 0,
            };
            for _ in 0..due {
                if self.wander_once(wanderer) {
                    steps += 1;
                }
            }
        }
        steps
    }

    fn wander_once(&mut self, wanderer: EntityId) -> bool {
        let Some(room) = self.get(wanderer).and_then(|e| e.location) else {
            return false;
        };
        let open: Vec<EntityId> = self
            .exits(room)
            .into_iter()
            .filter(|&id| {
                self.entities.get(&id).is_some_and(|e| {
                    e.locks.traverse && e.door().is_none_or(|door| !door.closed)
                })
            })
            .collect();
        let Some(&exit) = self.rng.pick(&open) else {
            return false;
        };
        matches!(self.traverse(wanderer, exit), Ok(true))
    }

    /// Broadcast the sunrises and sunsets in `(from, to]`. Only the last
    /// of each is announced when more than a day has passed.
    fn announce_daylight(&mut self, from: u64, to: u64) {
        let (first_hour, last_hour) = (from / SECONDS_PER_HOUR, to / SECONDS_PER_HOUR);
        let half_day = HOURS_PER_DAY / 2;
        let next = first_hour + 1;
        let mut mark = next + (DAWN + half_day - next % half_day) % half_day;
        if mark > last_hour {
            return;
        }
        let last_mark = mark + (last_hour - mark) / half_day * half_day;
        mark = mark.max(last_mark.saturating_sub(half_day));

        let rooms: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.is_room())
            .map(|e| e.id)
            .collect();
        while mark <= last_mark {
            let text = if mark % HOURS_PER_DAY == DAWN {
                "Sōl orītur."
            } else {
                "Sōl occidit."
            };
            debug!(hour = mark % HOURS_PER_DAY, "daylight changes");
            for &room in &rooms {
                self.msg_contents(room, text, &[]);
            }
            mark += half_day;
        }
    }

}
