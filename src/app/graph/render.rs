use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, Vec2, vec2};

use crate::atlas::{Atlas, Marks};

use super::super::highlight::build_highlight_state;
use super::super::palette::{FilterMode, HOME_COLOR};
use super::super::render_utils::{LINK_STROKE_HEX, hex_color};
use super::super::scene::SceneIndex;

const LABEL_MIN_SCALE: f32 = 0.7;

/// Drawing surface the map renderer targets.
pub(in crate::app) trait Canvas {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    fn disc(&mut self, center: Pos2, radius: f32, fill: Color32);
    fn ring(&mut self, center: Pos2, radius: f32, stroke: Stroke);
    fn label(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32);
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) enum DrawCommand {
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Disc {
        center: Pos2,
        radius: f32,
        fill: Color32,
    },
    Ring {
        center: Pos2,
        radius: f32,
        stroke: Stroke,
    },
    Label {
        anchor: Pos2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// Recorded output of one frame, replayed onto the egui painter every pass
/// until the next frame replaces it.
#[derive(Debug, Default)]
pub(in crate::app) struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub(in crate::app) fn clear(&mut self) {
        self.commands.clear();
    }

    #[cfg(test)]
    pub(in crate::app) fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub(in crate::app) fn paint(&self, painter: &Painter, origin: Vec2) {
        for command in &self.commands {
            match command {
                DrawCommand::Line { from, to, stroke } => {
                    painter.line_segment([*from + origin, *to + origin], *stroke);
                }
                DrawCommand::Disc {
                    center,
                    radius,
                    fill,
                } => {
                    painter.circle_filled(*center + origin, *radius, *fill);
                }
                DrawCommand::Ring {
                    center,
                    radius,
                    stroke,
                } => {
                    painter.circle_stroke(*center + origin, *radius, *stroke);
                }
                DrawCommand::Label {
                    anchor,
                    text,
                    size,
                    color,
                } => {
                    painter.text(
                        *anchor + origin,
                        Align2::CENTER_TOP,
                        text,
                        FontId::proportional(*size),
                        *color,
                    );
                }
            }
        }
    }
}

impl Canvas for DisplayList {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn disc(&mut self, center: Pos2, radius: f32, fill: Color32) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            fill,
        });
    }

    fn ring(&mut self, center: Pos2, radius: f32, stroke: Stroke) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            stroke,
        });
    }

    fn label(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32) {
        self.commands.push(DrawCommand::Label {
            anchor,
            text: text.to_owned(),
            size,
            color,
        });
    }
}

pub(in crate::app) struct MapFrame<'a> {
    pub(in crate::app) atlas: &'a Atlas,
    pub(in crate::app) marks: &'a Marks,
    pub(in crate::app) scene: &'a SceneIndex,
    pub(in crate::app) selected: Option<&'a str>,
    pub(in crate::app) filter: FilterMode,
    pub(in crate::app) home_id: &'a str,
}

/// Paints links, group highlights, systems, then labels, in that order.
pub(in crate::app) fn draw_map(canvas: &mut impl Canvas, frame: &MapFrame<'_>) {
    let MapFrame {
        atlas,
        marks,
        scene,
        selected,
        filter,
        home_id,
    } = *frame;
    if !scene.is_built() {
        return;
    }

    let scale = scene.scale();
    let radius = scene.radius();

    let link_stroke = Stroke::new(1.0, hex_color(LINK_STROKE_HEX));
    for (slot, system) in atlas.systems().iter().enumerate() {
        let Some(start) = scene.screen_position(slot) else {
            continue;
        };
        for target in &system.links {
            if let Some(end) = scene.position_of(atlas, target) {
                canvas.line(start, end, link_stroke);
            }
        }
    }

    if let Some(selected_id) = selected
        && let Some(highlight) = build_highlight_state(atlas, marks, selected_id)
    {
        let group_stroke = Stroke::new(1.0, Color32::WHITE);
        for &(a, b) in &highlight.group_edges {
            if let (Some(start), Some(end)) = (scene.screen_position(a), scene.screen_position(b)) {
                canvas.line(start, end, group_stroke);
            }
        }
    }

    let show_labels = scale > LABEL_MIN_SCALE;
    for (slot, system) in atlas.systems().iter().enumerate() {
        let Some(position) = scene.screen_position(slot) else {
            continue;
        };

        let fill = if system.id == home_id {
            HOME_COLOR
        } else {
            filter.system_color(system)
        };
        canvas.disc(position, radius, hex_color(fill));

        if selected == Some(system.id.as_str()) {
            canvas.ring(
                position,
                radius + 4.0 * scale,
                Stroke::new(2.0, Color32::WHITE),
            );
        }

        if show_labels {
            canvas.label(
                position + vec2(0.0, 10.0 * scale),
                &system.name,
                10.0 * scale,
                Color32::WHITE,
            );
        }
    }
}
