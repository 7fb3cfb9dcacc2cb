use eframe::egui::{Pos2, Vec2};
use tracing::{debug, warn};

use crate::atlas::Atlas;

use super::super::redraw::FrameRequester;
use super::super::scene::world_position;
use super::super::search::{SearchMiss, resolve_system, search_miss};
use super::super::viewport::Viewport;

pub(in crate::app) const ZOOM_STEP: f32 = 0.1;

/// Pointer input in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) enum InputEvent {
    Press(Pos2),
    Move(Pos2),
    Release,
    Leave,
    Click(Pos2),
    /// Positive `delta_y` scrolls away from the user.
    Wheel { at: Pos2, delta_y: f32 },
    /// `zoom` is the frame's multiplicative pinch factor.
    Pinch { at: Pos2, zoom: f32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) enum InputOutcome {
    Ignored,
    CameraMoved,
    Selected(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum DragGesture {
    #[default]
    Idle,
    Dragging {
        anchor: Vec2,
    },
}

#[derive(Debug, Default)]
pub(in crate::app) struct InputController {
    gesture: DragGesture,
}

impl InputController {
    pub(in crate::app) fn is_dragging(&self) -> bool {
        matches!(self.gesture, DragGesture::Dragging { .. })
    }

    pub(in crate::app) fn handle(
        &mut self,
        event: InputEvent,
        atlas: &Atlas,
        viewport: &mut Viewport,
        requester: &impl FrameRequester,
    ) -> InputOutcome {
        match event {
            InputEvent::Press(pointer) => {
                self.gesture = DragGesture::Dragging {
                    anchor: pointer.to_vec2() - viewport.camera.pan(),
                };
                InputOutcome::Ignored
            }
            InputEvent::Move(pointer) => {
                let DragGesture::Dragging { anchor } = self.gesture else {
                    return InputOutcome::Ignored;
                };
                viewport.camera.set_pan(pointer.to_vec2() - anchor);
                viewport.request_redraw(requester);
                InputOutcome::CameraMoved
            }
            InputEvent::Release | InputEvent::Leave => {
                self.gesture = DragGesture::Idle;
                InputOutcome::Ignored
            }
            InputEvent::Click(pointer) => Self::select_at(pointer, atlas, viewport, requester),
            InputEvent::Wheel { at, delta_y } => Self::zoom(at, delta_y, viewport, requester),
            InputEvent::Pinch { at, zoom } => Self::zoom(at, zoom - 1.0, viewport, requester),
        }
    }

    fn zoom(
        at: Pos2,
        direction: f32,
        viewport: &mut Viewport,
        requester: &impl FrameRequester,
    ) -> InputOutcome {
        if direction == 0.0 || direction.is_nan() {
            return InputOutcome::Ignored;
        }
        viewport
            .camera
            .zoom_at(at, direction.signum() * ZOOM_STEP);
        viewport.request_redraw(requester);
        InputOutcome::CameraMoved
    }

    /// Hit-tests against the last built scene and pulls the hit to the
    /// surface center without changing the scale.
    fn select_at(
        pointer: Pos2,
        atlas: &Atlas,
        viewport: &mut Viewport,
        requester: &impl FrameRequester,
    ) -> InputOutcome {
        let Some(slot) = viewport.scene.hit_test(pointer) else {
            return InputOutcome::Ignored;
        };
        let (Some(system), Some(screen)) =
            (atlas.systems().get(slot), viewport.scene.screen_position(slot))
        else {
            return InputOutcome::Ignored;
        };

        let center = viewport.camera.surface_center();
        viewport.camera.pan_by(center - screen.to_vec2());
        viewport.selection = Some(system.id.clone());
        viewport.request_redraw(requester);
        debug!(system = %system.id, "selected by click");

        InputOutcome::Selected(system.id.clone())
    }

    /// Selects the system at `slot` and centers the camera on it.
    pub(in crate::app) fn focus_system(
        &self,
        slot: usize,
        atlas: &Atlas,
        viewport: &mut Viewport,
        requester: &impl FrameRequester,
    ) -> Option<String> {
        let system = atlas.systems().get(slot)?;
        let surface = viewport.camera.surface();
        viewport.camera.center_on(world_position(system), surface);
        viewport.selection = Some(system.id.clone());
        viewport.request_redraw(requester);
        debug!(system = %system.id, "camera centered on system");

        Some(system.id.clone())
    }

    /// `None` for blank input. A miss leaves camera and selection untouched.
    pub(in crate::app) fn submit_search(
        &self,
        query: &str,
        atlas: &Atlas,
        viewport: &mut Viewport,
        requester: &impl FrameRequester,
    ) -> Option<Result<String, SearchMiss>> {
        if query.trim().is_empty() {
            return None;
        }

        let outcome = match resolve_system(atlas, query) {
            Some(slot) => self
                .focus_system(slot, atlas, viewport, requester)
                .ok_or_else(|| search_miss(atlas, query)),
            None => Err(search_miss(atlas, query)),
        };
        if let Err(miss) = &outcome {
            warn!(query = %miss.query, "system not found");
        }

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use crate::atlas::{Marks, SystemRecord};

    use super::super::super::palette::FilterMode;
    use super::super::super::redraw::testing::CountingRequester;
    use super::*;

    const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

    fn atlas() -> Atlas {
        Atlas::from_records([
            SystemRecord::new("home", "Home", [400.0, 300.0]),
            SystemRecord::new("far", "Far Reach", [450.0, 300.0]),
            SystemRecord::new("twin", "Home", [600.0, 300.0]),
        ])
    }

    fn ready_viewport(atlas: &Atlas, requester: &CountingRequester) -> Viewport {
        let mut viewport = Viewport::new();
        viewport.fit_surface(SURFACE, atlas, "home", requester);
        viewport.camera.set_scale(1.0);
        viewport.camera.center_on(pos2(400.0, 300.0), SURFACE);
        viewport.render_frame(atlas, &Marks::default(), FilterMode::None, "home");
        viewport
    }

    #[test]
    fn drag_moves_the_pan_with_the_pointer() {
        let atlas = atlas();
        let requester = CountingRequester::default();
        let mut viewport = ready_viewport(&atlas, &requester);
        let mut controller = InputController::default();
        let start = viewport.camera.pan();

        controller.handle(InputEvent::Press(pos2(100.0, 100.0)), &atlas, &mut viewport, &requester);
        assert!(controller.is_dragging());
        let moved = controller.handle(
            InputEvent::Move(pos2(130.0, 90.0)),
            &atlas,
            &mut viewport,
            &requester,
        );
        controller.handle(InputEvent::Move(pos2(150.0, 80.0)), &atlas, &mut viewport, &requester);

        assert_eq!(moved, InputOutcome::CameraMoved);
        assert_eq!(viewport.camera.pan(), start + vec2(50.0, -20.0));
        assert_eq!(requester.requests.get(), 1);
    }

    #[test]
    fn moves_after_release_or_leave_do_nothing() {
        let atlas = atlas();
        let requester = CountingRequester::default();
        let mut viewport = ready_viewport(&atlas, &requester);
        let mut controller = InputController::default();

        for end in [InputEvent::Release, InputEvent::Leave] {
            controller.handle(InputEvent::Press(pos2(0.0, 0.0)), &atlas, &mut viewport, &requester);
            controller.handle(end, &atlas, &mut viewport, &requester);
            let pan = viewport.camera.pan();

            let outcome =
                controller.handle(InputEvent::Move(pos2(40.0, 40.0)), &atlas, &mut viewport, &requester);

            assert_eq!(outcome, InputOutcome::Ignored);
            assert_eq!(viewport.camera.pan(), pan);
        }
    }

    #[test]
    fn click_selects_and_recenters_without_zooming() {
        let atlas = atlas();
        let requester = CountingRequester::default();
        let mut viewport = ready_viewport(&atlas, &requester);
        let mut controller = InputController::default();
        let far = viewport.scene.screen_position(1).unwrap_or(Pos2::ZERO);

        let outcome = controller.handle(InputEvent::Click(far), &atlas, &mut viewport, &requester);

        assert_eq!(outcome, InputOutcome::Selected("far".to_owned()));
        assert_eq!(viewport.selection.as_deref(), Some("far"));
        assert_eq!(viewport.camera.scale(), 1.0);
        let centered = viewport.camera.to_screen(pos2(450.0, 300.0));
        assert!((centered.to_vec2() - SURFACE * 0.5).length() < 1e-3);
        assert!(viewport.redraw.is_pending());
    }

    #[test]
    fn click_on_empty_space_is_a_silent_no_op() {
        let atlas = atlas();
        let requester = CountingRequester::default();
        let mut viewport = ready_viewport(&atlas, &requester);
        let mut controller = InputController::default();
        let pan = viewport.camera.pan();

        let outcome =
            controller.handle(InputEvent::Click(pos2(5.0, 5.0)), &atlas, &mut viewport, &requester);

        assert_eq!(outcome, InputOutcome::Ignored);
        assert_eq!(viewport.selection, None);
        assert_eq!(viewport.camera.pan(), pan);
        assert_eq!(requester.requests.get(), 0);
    }

    #[test]
    fn wheel_steps_the_scale_by_direction() {
        let atlas = atlas();
        let requester = CountingRequester::default();
        let mut viewport = ready_viewport(&atlas, &requester);
        let mut controller = InputController::default();
        let at = pos2(200.0, 150.0);

        controller.handle(InputEvent::Wheel { at, delta_y: 37.0 }, &atlas, &mut viewport, &requester);
        assert!((viewport.camera.scale() - 1.1).abs() < 1e-5);

        viewport.render_frame(&atlas, &Marks::default(), FilterMode::None, "home");
        controller.handle(InputEvent::Wheel { at, delta_y: -2.0 }, &atlas, &mut viewport, &requester);
        controller.handle(InputEvent::Pinch { at, zoom: 0.9 }, &atlas, &mut viewport, &requester);
        assert!((viewport.camera.scale() - 0.9).abs() < 1e-5);

        let ignored =
            controller.handle(InputEvent::Wheel { at, delta_y: 0.0 }, &atlas, &mut viewport, &requester);
        assert_eq!(ignored, InputOutcome::Ignored);
        assert_eq!(requester.requests.get(), 2);
    }

    #[test]
    fn search_hit_selects_and_centers() {
        let atlas = atlas();
        let requester = CountingRequester::default();
        let mut viewport = ready_viewport(&atlas, &requester);
        let controller = InputController::default();

        let found = controller.submit_search("Far Reach", &atlas, &mut viewport, &requester);

        assert_eq!(found, Some(Ok("far".to_owned())));
        let centered = viewport.camera.to_screen(pos2(450.0, 300.0));
        assert!((centered.to_vec2() - SURFACE * 0.5).length() < 1e-3);
    }

    #[test]
    fn duplicate_names_resolve_to_the_first_system() {
        let atlas = atlas();
        let requester = CountingRequester::default();
        let mut viewport = ready_viewport(&atlas, &requester);
        let controller = InputController::default();

        let found = controller.submit_search("Home", &atlas, &mut viewport, &requester);

        assert_eq!(found, Some(Ok("home".to_owned())));
    }

    #[test]
    fn search_miss_and_blank_input_leave_state_alone() {
        let atlas = atlas();
        let requester = CountingRequester::default();
        let mut viewport = ready_viewport(&atlas, &requester);
        let controller = InputController::default();
        let pan = viewport.camera.pan();

        assert_eq!(controller.submit_search("   ", &atlas, &mut viewport, &requester), None);
        let missed = controller.submit_search("far reach", &atlas, &mut viewport, &requester);

        assert!(matches!(missed, Some(Err(SearchMiss { ref query, .. })) if query == "far reach"));
        assert_eq!(viewport.selection, None);
        assert_eq!(viewport.camera.pan(), pan);
        assert_eq!(requester.requests.get(), 0);
    }
}
