use eframe::egui::Vec2;
use tracing::{debug, warn};

use crate::atlas::{Atlas, Marks};

use super::camera::Camera;
use super::graph::render::{DisplayList, MapFrame, draw_map};
use super::palette::FilterMode;
use super::redraw::{FrameRequester, RedrawScheduler};
use super::scene::{SceneIndex, world_position};

/// Camera, selection and the derived per-frame state of the map surface.
#[derive(Debug)]
pub(in crate::app) struct Viewport {
    pub(in crate::app) camera: Camera,
    pub(in crate::app) scene: SceneIndex,
    pub(in crate::app) selection: Option<String>,
    pub(in crate::app) redraw: RedrawScheduler,
    pub(in crate::app) display: DisplayList,
    placed: bool,
}

impl Viewport {
    pub(in crate::app) fn new() -> Self {
        Self {
            camera: Camera::default(),
            scene: SceneIndex::default(),
            selection: None,
            redraw: RedrawScheduler::armed(),
            display: DisplayList::default(),
            placed: false,
        }
    }

    /// Tracks the surface size. The first usable size places the camera on
    /// the home system, or on the surface center when there is none. Later
    /// sizes keep whatever was centered in view.
    pub(in crate::app) fn fit_surface(
        &mut self,
        surface: Vec2,
        atlas: &Atlas,
        home_id: &str,
        requester: &impl FrameRequester,
    ) {
        if surface.x <= 0.0 || surface.y <= 0.0 || surface == self.camera.surface() {
            return;
        }

        if self.placed {
            self.camera.resize_surface(surface);
        } else {
            self.placed = true;
            match atlas.get(home_id) {
                Some(home) => {
                    self.camera.center_on(world_position(home), surface);
                    debug!(home = home_id, "camera placed on home system");
                }
                None => {
                    self.camera.center_surface(surface);
                    warn!(home = home_id, "home system not found, centering on the surface");
                }
            }
        }

        self.redraw.request_redraw(requester);
    }

    pub(in crate::app) fn request_redraw(&mut self, requester: &impl FrameRequester) {
        self.redraw.request_redraw(requester);
    }

    pub(in crate::app) fn clear_selection(&mut self, requester: &impl FrameRequester) {
        if self.selection.take().is_some() {
            self.redraw.request_redraw(requester);
        }
    }

    /// Rebuilds the scene and re-records the display list if a frame is due.
    pub(in crate::app) fn render_frame(
        &mut self,
        atlas: &Atlas,
        marks: &Marks,
        filter: FilterMode,
        home_id: &str,
    ) -> bool {
        let Self {
            camera,
            scene,
            selection,
            redraw,
            display,
            ..
        } = self;

        redraw.fire(|| {
            scene.rebuild(atlas, camera);
            display.clear();
            draw_map(
                display,
                &MapFrame {
                    atlas,
                    marks,
                    scene,
                    selected: selection.as_deref(),
                    filter,
                    home_id,
                },
            );
        })
    }
}
