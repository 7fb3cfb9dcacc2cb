use eframe::egui::{Pos2, pos2};

use crate::atlas::{Atlas, SystemRecord};

use super::camera::Camera;

pub(in crate::app) const BASE_RADIUS: f32 = 8.0;

pub(in crate::app) fn world_position(system: &SystemRecord) -> Pos2 {
    pos2(system.position[0], system.position[1])
}

/// Screen-space positions for every system, aligned with atlas slots.
///
/// Atlas slots never move (overlays only replace in place or append), so a
/// slot keeps naming the same system between rebuilds.
#[derive(Debug, Default)]
pub(in crate::app) struct SceneIndex {
    screen_positions: Vec<Pos2>,
    radius: f32,
    scale: f32,
    built: bool,
}

impl SceneIndex {
    pub(in crate::app) fn rebuild(&mut self, atlas: &Atlas, camera: &Camera) {
        self.screen_positions.clear();
        self.screen_positions.reserve(atlas.len());
        for system in atlas.systems() {
            self.screen_positions
                .push(camera.to_screen(world_position(system)));
        }
        self.scale = camera.scale();
        self.radius = BASE_RADIUS * camera.scale();
        self.built = true;
    }

    pub(in crate::app) fn is_built(&self) -> bool {
        self.built
    }

    #[cfg(test)]
    pub(in crate::app) fn len(&self) -> usize {
        self.screen_positions.len()
    }

    pub(in crate::app) fn radius(&self) -> f32 {
        self.radius
    }

    pub(in crate::app) fn scale(&self) -> f32 {
        self.scale
    }

    pub(in crate::app) fn screen_position(&self, slot: usize) -> Option<Pos2> {
        self.screen_positions.get(slot).copied()
    }

    pub(in crate::app) fn position_of(&self, atlas: &Atlas, id: &str) -> Option<Pos2> {
        atlas
            .index_of(id)
            .and_then(|slot| self.screen_position(slot))
    }

    /// First system in document order whose disc contains `point`.
    ///
    /// Overlapping discs resolve to the system loaded first, not the nearest
    /// one; that ordering is part of the map's observable behavior.
    pub(in crate::app) fn hit_test(&self, point: Pos2) -> Option<usize> {
        if !self.built {
            return None;
        }

        self.screen_positions
            .iter()
            .position(|position| position.distance(point) <= self.radius)
    }
}
