use eframe::egui::{self, Align, Layout, RichText, Ui};

use super::super::ViewModel;

const MISSING: &str = "N/A";

fn attribute_row(ui: &mut Ui, label: &str, value: Option<&str>) {
    ui.label(RichText::new(label).weak());
    ui.label(value.unwrap_or(MISSING));
    ui.end_row();
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let ctx = ui.ctx().clone();
        let Some(selected_id) = self.viewport.selection.clone() else {
            return;
        };

        let mut close = false;
        ui.horizontal(|ui| {
            ui.heading("System Info");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                close = ui.button("Close").clicked();
            });
        });
        ui.separator();

        let Some(system) = self.atlas.get(&selected_id) else {
            ui.label("The selected system is no longer in the atlas.");
            if close {
                self.viewport.clear_selection(&ctx);
            }
            return;
        };

        let mut focus = None;
        let entry_id = system.entry_id();
        ui.label(RichText::new(system.name.as_str()).strong());
        ui.add_space(6.0);

        egui::Grid::new("system_attributes")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                attribute_row(ui, "Key", Some(system.id.as_str()));
                attribute_row(ui, "Id", entry_id.as_deref());
                ui.label(RichText::new("Position").weak());
                ui.label(format!("{:.1}, {:.1}", system.position[0], system.position[1]));
                ui.end_row();
                attribute_row(ui, "Security", system.security.as_deref());
                attribute_row(ui, "Spice", system.spice.as_deref());
                attribute_row(ui, "Spectral class", system.spectral_class.as_deref());
                attribute_row(ui, "Region", system.region.as_deref());
                attribute_row(ui, "Sector", system.sector.as_deref());
                attribute_row(ui, "Faction", system.faction.as_deref());
            });

        ui.separator();
        ui.label(RichText::new(format!("Links ({})", system.links.len())).strong());
        if system.links.is_empty() {
            ui.label("No outgoing links.");
        }
        for target in &system.links {
            match self.atlas.index_of(target) {
                Some(slot) => {
                    let name = self.atlas.systems()[slot].name.as_str();
                    if ui.link(name).on_hover_text(target.as_str()).clicked() {
                        focus = Some(slot);
                    }
                }
                None => {
                    ui.label(RichText::new(format!("{target} (unknown)")).weak());
                }
            }
        }

        let groups = self.marks.containing(&selected_id).collect::<Vec<_>>();
        if !groups.is_empty() {
            ui.separator();
            ui.label(RichText::new("Marks").strong());
            for mark in groups {
                ui.label(format!("{} ({} systems)", mark.id, mark.systems.len()));
            }
        }

        if let Some(slot) = focus {
            self.controller
                .focus_system(slot, &self.atlas, &mut self.viewport, &ctx);
        } else if close {
            self.viewport.clear_selection(&ctx);
        }
    }
}
