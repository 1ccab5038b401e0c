//! Carrot pool
//!
//! Carrots live in fixed slots allocated up front. A slot is handed out when a
//! platform recycles and returned when the carrot is eaten or falls out of
//! view. Handles carry the slot's generation so a reference kept from an
//! earlier use of the slot can never reach the new carrot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Body;
use super::error::SimError;
use super::platforms::Platform;
use super::state::GameEvent;

/// Generational handle to a carrot slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectibleId {
    pub slot: u32,
    pub generation: u32,
}

/// A carrot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    /// Display size
    pub size: Vec2,
    /// Collision extent, kept equal to `size` while active
    pub body_size: Vec2,
    pub active: bool,
    /// Platform slot this carrot was placed above. Read only, for placement.
    pub platform: Option<usize>,
    generation: u32,
}

impl Body for Collectible {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> Vec2 {
        self.body_size
    }
}

/// Spawns carrots above recycled platforms, reusing slots
#[derive(Debug, Clone)]
pub struct CollectibleSpawner {
    slots: Vec<Collectible>,
}

impl CollectibleSpawner {
    pub fn new(capacity: usize, size: Vec2) -> Self {
        let slots = (0..capacity)
            .map(|_| Collectible {
                pos: Vec2::ZERO,
                size,
                body_size: Vec2::ZERO,
                active: false,
                platform: None,
                generation: 0,
            })
            .collect();
        Self { slots }
    }

    /// Place a carrot directly above `platform`'s top edge and enable its body
    pub fn on_platform_recycled(
        &mut self,
        platform: &Platform,
        events: &mut Vec<GameEvent>,
    ) -> Result<CollectibleId, SimError> {
        let capacity = self.slots.len();
        let (slot, carrot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, c)| !c.active)
            .ok_or(SimError::CarrotPoolExhausted { capacity })?;

        carrot.pos = Vec2::new(platform.pos.x, platform.pos.y - platform.size.y);
        carrot.body_size = carrot.size;
        carrot.active = true;
        carrot.platform = Some(platform.id);

        let id = CollectibleId {
            slot: slot as u32,
            generation: carrot.generation,
        };
        log::debug!(
            "Carrot {:?} spawned above platform {} at ({}, {})",
            id,
            platform.id,
            carrot.pos.x,
            carrot.pos.y
        );
        events.push(GameEvent::BodyEnabled(id));
        Ok(id)
    }

    /// Deactivate a carrot and disable its body. Returns false if the handle
    /// is stale or the carrot was already inactive.
    pub fn release(&mut self, id: CollectibleId, events: &mut Vec<GameEvent>) -> bool {
        let Some(carrot) = self.slots.get_mut(id.slot as usize) else {
            return false;
        };
        if !carrot.active || carrot.generation != id.generation {
            return false;
        }
        carrot.active = false;
        carrot.body_size = Vec2::ZERO;
        carrot.platform = None;
        carrot.generation = carrot.generation.wrapping_add(1);
        events.push(GameEvent::BodyDisabled(id));
        true
    }

    /// Release every active carrot at or below `threshold_y`
    pub fn cull_below(&mut self, threshold_y: f32, events: &mut Vec<GameEvent>) -> usize {
        let stale: Vec<CollectibleId> = self
            .active()
            .filter(|(_, c)| c.pos.y >= threshold_y)
            .map(|(id, _)| id)
            .collect();
        for id in &stale {
            self.release(*id, events);
        }
        if !stale.is_empty() {
            log::debug!("Culled {} carrots below {}", stale.len(), threshold_y);
        }
        stale.len()
    }

    /// Look up a live carrot; `None` for stale handles
    pub fn get(&self, id: CollectibleId) -> Option<&Collectible> {
        self.slots
            .get(id.slot as usize)
            .filter(|c| c.generation == id.generation)
    }

    pub fn is_active(&self, id: CollectibleId) -> bool {
        self.get(id).is_some_and(|c| c.active)
    }

    /// Active carrots in slot order
    pub fn active(&self) -> impl Iterator<Item = (CollectibleId, &Collectible)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, c)| c.active)
            .map(|(slot, c)| {
                (
                    CollectibleId {
                        slot: slot as u32,
                        generation: c.generation,
                    },
                    c,
                )
            })
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|c| c.active).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
