use eframe::egui::{self, Align, Context, Layout};

use crate::atlas::LoadedAtlas;
use crate::config::MapConfig;

use super::super::graph::interaction::InputController;
use super::super::palette::FilterMode;
use super::super::search::Autocomplete;
use super::super::viewport::Viewport;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(loaded: LoadedAtlas, config: &MapConfig) -> Self {
        let LoadedAtlas { atlas, marks } = loaded;

        Self {
            atlas,
            marks,
            home_id: config.home.clone(),
            export_path: config.export_path.clone(),
            viewport: Viewport::new(),
            controller: InputController::default(),
            filter: FilterMode::default(),
            search: String::new(),
            autocomplete: Autocomplete::default(),
            search_miss: None,
            pointer_world: None,
            overlay_path: String::new(),
            overlay_rx: None,
            status: None,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Sector Atlas");
                    ui.separator();
                    ui.label(format!("systems: {}", self.atlas.len()));
                    ui.label(format!("links: {}", self.atlas.link_count()));
                    if !self.marks.is_empty() {
                        ui.label(format!("marks: {}", self.marks.len()));
                    }
                    if self.overlay_rx.is_some() {
                        ui.spinner();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("frames: {}", self.viewport.redraw.frames_drawn()));
                        ui.label(format!("scale: {:.2}", self.viewport.camera.scale()));
                        if let Some(world) = self.pointer_world {
                            ui.label(format!("cursor: {:.0}, {:.0}", world.x, world.y));
                        }
                        if let Some(selected) = &self.viewport.selection {
                            ui.label(format!("selected: {selected}"));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        if self.viewport.selection.is_some() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_map_surface(ui));
    }
}
