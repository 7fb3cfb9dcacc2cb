use std::path::PathBuf;

use eframe::egui::{self, Context, Key, Modifiers, RichText, Ui};
use tracing::error;

use crate::atlas::export_atlas;

use super::super::palette::FilterMode;
use super::super::{OverlaySource, StatusLine, ViewModel};

const SUGGESTION_ROW_HEIGHT: f32 = 20.0;

enum SearchAction {
    Submit,
    Pick(usize),
    Retry(String),
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let ctx = ui.ctx().clone();

        ui.heading("Map Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label(RichText::new("Color systems by").strong());
        let mut filter_changed = false;
        for mode in FilterMode::ALL {
            filter_changed |= ui
                .radio_value(&mut self.filter, mode, mode.label())
                .changed();
        }
        if filter_changed {
            self.viewport.request_redraw(&ctx);
        }

        ui.separator();
        self.draw_search(ui, &ctx);

        ui.separator();
        self.draw_overlay_controls(ui, &ctx);

        if let Some(status) = &self.status {
            ui.add_space(6.0);
            let color = if status.is_error {
                ui.visuals().error_fg_color
            } else {
                ui.visuals().weak_text_color()
            };
            ui.colored_label(color, status.text.as_str());
        }
    }

    fn draw_search(&mut self, ui: &mut Ui, ctx: &Context) {
        ui.label(RichText::new("Find system").strong())
            .on_hover_text("Exact name or id. Suggestions match the start of a name.");

        self.autocomplete.refresh(&self.atlas, &self.search);

        let search_id = ui.make_persistent_id("system_search");
        if ui.memory(|memory| memory.has_focus(search_id)) && !self.autocomplete.matches().is_empty() {
            let (down, up) = ui.input_mut(|input| {
                (
                    input.consume_key(Modifiers::NONE, Key::ArrowDown),
                    input.consume_key(Modifiers::NONE, Key::ArrowUp),
                )
            });
            if down {
                self.autocomplete.focus_next();
            }
            if up {
                self.autocomplete.focus_previous();
            }
        }

        let mut action = None;
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .id(search_id)
                    .hint_text("System name or id")
                    .desired_width(190.0),
            );
            if response.changed() {
                self.search_miss = None;
            }
            if response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                action = Some(match self.autocomplete.focused_slot() {
                    Some(slot) => SearchAction::Pick(slot),
                    None => SearchAction::Submit,
                });
            }
            if ui.button("Go").clicked() {
                action = Some(SearchAction::Submit);
            }
        });

        if !self.autocomplete.matches().is_empty() {
            let focus = self.autocomplete.focus();
            egui::ScrollArea::vertical()
                .id_salt("system_suggestions")
                .max_height(SUGGESTION_ROW_HEIGHT * 8.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for (row, &slot) in self.autocomplete.matches().iter().enumerate() {
                        let Some(system) = self.atlas.systems().get(slot) else {
                            continue;
                        };
                        let is_focused = focus == Some(row);
                        let response = ui.selectable_label(is_focused, system.name.as_str());
                        if is_focused {
                            response.scroll_to_me(None);
                        }
                        if response.clicked() {
                            action = Some(SearchAction::Pick(slot));
                        }
                    }
                });
        }

        if let Some(miss) = &self.search_miss {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!("No system named \"{}\"", miss.query),
            );
            if !miss.suggestions.is_empty() {
                ui.label("Did you mean:");
                ui.horizontal_wrapped(|ui| {
                    for suggestion in &miss.suggestions {
                        if ui.small_button(suggestion.as_str()).clicked() {
                            action = Some(SearchAction::Retry(suggestion.clone()));
                        }
                    }
                });
            }
        }

        match action {
            Some(SearchAction::Pick(slot)) => {
                if let Some(system) = self.atlas.systems().get(slot) {
                    self.search = system.name.clone();
                }
                self.autocomplete.close(&self.search);
                self.search_miss = None;
                self.controller
                    .focus_system(slot, &self.atlas, &mut self.viewport, ctx);
            }
            Some(SearchAction::Retry(name)) => {
                self.search = name;
                self.submit_search(ctx);
            }
            Some(SearchAction::Submit) => self.submit_search(ctx),
            None => {}
        }
    }

    fn submit_search(&mut self, ctx: &Context) {
        match self
            .controller
            .submit_search(&self.search, &self.atlas, &mut self.viewport, ctx)
        {
            Some(Ok(_)) => {
                self.search_miss = None;
                self.autocomplete.close(&self.search);
            }
            Some(Err(miss)) => self.search_miss = Some(miss),
            None => {}
        }
    }

    fn draw_overlay_controls(&mut self, ui: &mut Ui, ctx: &Context) {
        ui.label(RichText::new("Overlay").strong())
            .on_hover_text("Merge another system document by id. Existing entries are replaced.");

        let importing = self.overlay_rx.is_some();
        let mut import_requested = false;
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.overlay_path)
                    .hint_text("overlay.json")
                    .desired_width(190.0),
            );
            let can_import = !importing && !self.overlay_path.trim().is_empty();
            import_requested = ui
                .add_enabled(can_import, egui::Button::new("Import"))
                .clicked();
        });
        ui.small("Or drop a .json file onto the window.");

        if import_requested {
            let path = PathBuf::from(self.overlay_path.trim());
            self.start_overlay_import(ctx, OverlaySource::Path(path));
        }

        ui.add_space(6.0);
        let export_label = format!("Export to {}", self.export_path.display());
        if ui.button(export_label).clicked() {
            self.status = Some(match export_atlas(&self.atlas, &self.export_path) {
                Ok(()) => StatusLine::ok(format!(
                    "Exported {} systems to {}",
                    self.atlas.len(),
                    self.export_path.display()
                )),
                Err(export_error) => {
                    error!("export failed: {export_error:#}");
                    StatusLine::error(format!("Export failed: {export_error:#}"))
                }
            });
        }
    }
}
