use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2};
use tracing::{error, info, warn};

use crate::atlas::{Atlas, LoadedAtlas, Marks, load_atlas, parse_overlay_bytes, read_overlay};
use crate::config::MapConfig;

mod camera;
mod graph;
mod highlight;
mod palette;
mod redraw;
mod render_utils;
mod scene;
mod search;
mod ui;
mod viewport;

use self::graph::interaction::InputController;
use self::palette::FilterMode;
use self::search::{Autocomplete, SearchMiss};
use self::viewport::Viewport;

pub struct SectorAtlasApp {
    config: MapConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<LoadedAtlas, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    atlas: Atlas,
    marks: Marks,
    home_id: String,
    export_path: PathBuf,
    viewport: Viewport,
    controller: InputController,
    filter: FilterMode,
    search: String,
    autocomplete: Autocomplete,
    search_miss: Option<SearchMiss>,
    pointer_world: Option<Pos2>,
    overlay_path: String,
    overlay_rx: Option<Receiver<Result<Atlas, String>>>,
    status: Option<StatusLine>,
}

/// Outcome of the last import or export, shown in the control panel.
struct StatusLine {
    text: String,
    is_error: bool,
}

impl StatusLine {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Where an overlay document comes from.
enum OverlaySource {
    Path(PathBuf),
    Dropped {
        name: String,
        mime: Option<String>,
        bytes: Arc<[u8]>,
    },
}

impl OverlaySource {
    fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Dropped { name, .. } => name.clone(),
        }
    }

    fn from_dropped(file: &egui::DroppedFile) -> Option<Self> {
        if let Some(bytes) = &file.bytes {
            let name = match &file.path {
                Some(path) => path.display().to_string(),
                None => file.name.clone(),
            };
            return Some(Self::Dropped {
                name,
                mime: Some(file.mime.clone()).filter(|mime| !mime.is_empty()),
                bytes: Arc::clone(bytes),
            });
        }
        file.path.clone().map(Self::Path)
    }

    fn parse(self) -> Result<Atlas, String> {
        let parsed = match &self {
            Self::Path(path) => read_overlay(path),
            Self::Dropped { name, mime, bytes } => parse_overlay_bytes(name, mime.as_deref(), bytes),
        };
        parsed.map_err(|error| {
            let message = format_error_chain(&error);
            warn!(source = %self.describe(), "overlay rejected: {message}");
            message
        })
    }
}

fn format_error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl SectorAtlasApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: MapConfig) -> Self {
        let state = Self::start_load(&cc.egui_ctx, &config);
        Self { config, state }
    }

    fn spawn_load(ctx: &Context, config: &MapConfig) -> Receiver<Result<LoadedAtlas, String>> {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        let data_path = config.data.clone();
        let marks_path = config.marks.clone();

        thread::spawn(move || {
            let result = load_atlas(&data_path, marks_path.as_deref()).map_err(|error| {
                error!("atlas load failed: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        rx
    }

    fn start_load(ctx: &Context, config: &MapConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(ctx, config),
        }
    }

    fn open_view(ctx: &Context, loaded: LoadedAtlas, config: &MapConfig) -> AppState {
        let mut model = ViewModel::new(loaded, config);
        if let Some(path) = &config.overlay {
            model.start_overlay_import(ctx, OverlaySource::Path(path.clone()));
        }
        AppState::Ready(Box::new(model))
    }
}

impl eframe::App for SectorAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(loaded) => Self::open_view(ctx, loaded, &self.config),
                            Err(error) => AppState::Error(error),
                        });
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading system data...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load system data");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(ctx, &self.config));
                    }
                });
            }
            AppState::Ready(model) => {
                model.poll_overlay(ctx);
                model.accept_dropped_files(ctx);
                model.show(ctx);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}

impl ViewModel {
    /// Content-type check and parse run on a worker; the merge happens here
    /// in one step once the worker reports back.
    fn start_overlay_import(&mut self, ctx: &Context, source: OverlaySource) {
        if self.overlay_rx.is_some() {
            self.status = Some(StatusLine::error("An overlay import is already running"));
            return;
        }

        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        info!(source = %source.describe(), "importing overlay");
        self.status = Some(StatusLine::ok(format!("Importing {}...", source.describe())));

        thread::spawn(move || {
            let _ = tx.send(source.parse());
            ctx.request_repaint();
        });

        self.overlay_rx = Some(rx);
    }

    fn poll_overlay(&mut self, ctx: &Context) {
        let Some(rx) = self.overlay_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(overlay)) => self.apply_overlay(ctx, overlay),
            Ok(Err(error)) => {
                self.status = Some(StatusLine::error(format!("Import failed: {error}")));
            }
            Err(TryRecvError::Empty) => self.overlay_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.status = Some(StatusLine::error("Overlay worker disconnected"));
            }
        }
    }

    fn apply_overlay(&mut self, ctx: &Context, overlay: Atlas) {
        let summary = self.atlas.merge(overlay);
        info!(
            replaced = summary.replaced,
            added = summary.added,
            systems = self.atlas.len(),
            "merged overlay"
        );

        if let Some(selected) = &self.viewport.selection
            && !self.atlas.contains(selected)
        {
            self.viewport.selection = None;
        }
        self.autocomplete.invalidate();
        self.viewport.request_redraw(ctx);
        self.status = Some(StatusLine::ok(format!(
            "Merged overlay: {} replaced, {} added",
            summary.replaced, summary.added
        )));
    }

    fn accept_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        let Some(file) = dropped.first() else {
            return;
        };
        if dropped.len() > 1 {
            warn!(count = dropped.len(), "several files dropped, importing the first");
        }

        match OverlaySource::from_dropped(file) {
            Some(source) => self.start_overlay_import(ctx, source),
            None => {
                self.status = Some(StatusLine::error(format!(
                    "Dropped file {} has no readable contents",
                    file.name
                )));
            }
        }
    }
}
