use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, PointerButton, Pos2, Rect, Sense, Ui,
};

use super::super::ViewModel;
use super::super::render_utils::draw_background;
use super::interaction::{InputEvent, InputOutcome};

/// egui reports a positive `scroll_y` when the wheel turns away from the
/// user, which zooms in. A pass with any scroll ignores `zoom_delta` so
/// ctrl+wheel, which egui reports as both, zooms once.
fn zoom_event(at: Pos2, scroll_y: f32, zoom_delta: f32) -> Option<InputEvent> {
    if scroll_y.abs() > f32::EPSILON {
        Some(InputEvent::Wheel {
            at,
            delta_y: scroll_y,
        })
    } else if (zoom_delta - 1.0).abs() > f32::EPSILON {
        Some(InputEvent::Pinch {
            at,
            zoom: zoom_delta,
        })
    } else {
        None
    }
}

/// Translates this pass's egui input on the map surface into controller
/// events, in surface-local coordinates.
fn surface_events(
    ui: &Ui,
    rect: Rect,
    response: &egui::Response,
    dragging: bool,
) -> Vec<InputEvent> {
    let local = |pos: Pos2| pos - rect.min.to_vec2();
    let mut events = Vec::new();

    if response.drag_started_by(PointerButton::Primary)
        && let Some(origin) = ui.input(|input| input.pointer.press_origin())
    {
        events.push(InputEvent::Press(local(origin)));
    }
    if response.dragged_by(PointerButton::Primary)
        && let Some(pointer) = response.interact_pointer_pos()
    {
        events.push(InputEvent::Move(local(pointer)));
    }
    if response.drag_stopped() {
        events.push(InputEvent::Release);
    }

    let hover = ui.input(|input| input.pointer.hover_pos());
    if dragging && !hover.is_some_and(|pointer| rect.contains(pointer)) {
        events.push(InputEvent::Leave);
    }

    if response.clicked()
        && let Some(pointer) = response.interact_pointer_pos()
    {
        events.push(InputEvent::Click(local(pointer)));
    }

    if response.hovered() {
        let at = local(hover.unwrap_or_else(|| rect.center()));
        let (scroll, zoom) = ui.input(|input| (input.raw_scroll_delta.y, input.zoom_delta()));
        events.extend(zoom_event(at, scroll, zoom));
    }

    events
}

impl ViewModel {
    /// Fires a pending frame, replays the display list, then feeds input.
    /// Input only arms the next frame; it never repaints this pass.
    pub(in crate::app) fn draw_map_surface(&mut self, ui: &mut Ui) {
        let ctx = ui.ctx().clone();
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        self.viewport
            .fit_surface(rect.size(), &self.atlas, &self.home_id, &ctx);
        self.viewport
            .render_frame(&self.atlas, &self.marks, self.filter, &self.home_id);

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);
        self.viewport.display.paint(&painter, rect.min.to_vec2());
        if self.atlas.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No systems loaded",
                FontId::proportional(16.0),
                Color32::GRAY,
            );
        }

        self.pointer_world = response
            .hover_pos()
            .map(|pointer| self.viewport.camera.to_world(pointer - rect.min.to_vec2()));

        for event in surface_events(ui, rect, &response, self.controller.is_dragging()) {
            let outcome = self
                .controller
                .handle(event, &self.atlas, &mut self.viewport, &ctx);
            if let InputOutcome::Selected(_) = outcome {
                self.search_miss = None;
            }
        }

        if self.controller.is_dragging() {
            ctx.set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() {
            ctx.set_cursor_icon(CursorIcon::Grab);
        }
    }
}
