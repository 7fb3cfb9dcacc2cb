//! World/screen transform for the map surface.
//!
//! Screen coordinates are relative to the surface's top-left corner. World
//! positions are shifted by the surface center before scaling, so
//! `screen = (world - surface_center) * scale + pan`.

use eframe::egui::{Pos2, Vec2};

pub(in crate::app) const DEFAULT_SCALE: f32 = 1.6;
pub(in crate::app) const MIN_SCALE: f32 = 0.1;
pub(in crate::app) const MAX_SCALE: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Camera {
    scale: f32,
    pan: Vec2,
    surface: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            pan: Vec2::ZERO,
            surface: Vec2::ZERO,
        }
    }
}

impl Camera {
    pub(in crate::app) fn scale(&self) -> f32 {
        self.scale
    }

    pub(in crate::app) fn pan(&self) -> Vec2 {
        self.pan
    }

    pub(in crate::app) fn surface(&self) -> Vec2 {
        self.surface
    }

    pub(in crate::app) fn surface_center(&self) -> Vec2 {
        self.surface * 0.5
    }

    #[cfg(test)]
    pub(in crate::app) fn set_surface(&mut self, size: Vec2) {
        self.surface = size;
    }

    pub(in crate::app) fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    pub(in crate::app) fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub(in crate::app) fn to_screen(&self, world: Pos2) -> Pos2 {
        Pos2::ZERO + (world.to_vec2() - self.surface_center()) * self.scale + self.pan
    }

    pub(in crate::app) fn to_world(&self, screen: Pos2) -> Pos2 {
        Pos2::ZERO + (screen.to_vec2() - self.pan) / self.scale + self.surface_center()
    }

    /// NaN is ignored; everything else lands inside the scale bounds.
    pub(in crate::app) fn set_scale(&mut self, scale: f32) {
        if scale.is_nan() {
            return;
        }
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Changes the scale by `delta` while keeping the world point under
    /// `anchor` in place.
    pub(in crate::app) fn zoom_at(&mut self, anchor: Pos2, delta: f32) {
        let anchored = (anchor.to_vec2() - self.pan) / self.scale;
        self.set_scale(self.scale + delta);
        self.pan = anchor.to_vec2() - anchored * self.scale;
    }

    pub(in crate::app) fn center_on(&mut self, world: Pos2, surface: Vec2) {
        self.surface = surface;
        let center = surface * 0.5;
        self.pan = center - (world.to_vec2() - center) * self.scale;
    }

    /// Adopts a new surface size, keeping the world point under the old
    /// surface center under the new one.
    pub(in crate::app) fn resize_surface(&mut self, size: Vec2) {
        let centered = self.to_world(Pos2::ZERO + self.surface_center());
        self.center_on(centered, size);
    }

    /// Fallback start position when there is no home system.
    pub(in crate::app) fn center_surface(&mut self, surface: Vec2) {
        self.surface = surface;
        self.pan = surface * 0.5;
    }
}
