//! Application state: page navigation, registry persistence and the
//! per-board canvas sessions.

use std::collections::HashMap;

use braindump_core::board::{BoardId, BoardRegistry};
use braindump_core::storage::{FileStorage, Storage};
use braindump_core::{GestureController, Whiteboard};
use eframe::egui;

/// Key the registry snapshot is stored under.
const STORAGE_KEY: &str = "registry";

/// The three pages of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Select,
    Whiteboard,
}

/// One board's live canvas state.
#[derive(Default)]
pub struct BoardSession {
    pub whiteboard: Whiteboard,
    pub gesture: GestureController,
}

pub struct BrainDumpApp {
    pub page: Page,
    pub registry: BoardRegistry,
    storage: Option<FileStorage>,
    /// Live whiteboards, one per opened board. Elements stay in memory
    /// for the session; the registry is what persists.
    pub sessions: HashMap<BoardId, BoardSession>,
    pub current_board: Option<BoardId>,
    /// User-visible notice (e.g. dictation unavailable).
    pub notice: Option<String>,

    // Select-page state.
    pub new_board_name: Option<String>,
    pub edit_mode: bool,
    pub delete_confirm: Option<BoardId>,

    // Whiteboard-page state.
    pub textures: HashMap<u64, egui::TextureHandle>,
    pub touches: Vec<(u64, egui::Pos2)>,
    pub idea_draft: String,
}

impl BrainDumpApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let storage = match FileStorage::default_location() {
            Ok(storage) => Some(storage),
            Err(e) => {
                log::warn!("file storage unavailable: {e}");
                None
            }
        };

        let registry = storage
            .as_ref()
            .and_then(|s| match pollster::block_on(s.load(STORAGE_KEY)) {
                Ok(registry) => Some(registry),
                Err(e) => {
                    log::info!("no saved boards ({e}); seeding defaults");
                    None
                }
            })
            .unwrap_or_else(BoardRegistry::with_defaults);

        Self {
            page: Page::Home,
            registry,
            storage,
            sessions: HashMap::new(),
            current_board: None,
            notice: None,
            new_board_name: None,
            edit_mode: false,
            delete_confirm: None,
            textures: HashMap::new(),
            touches: Vec::new(),
            idea_draft: String::new(),
        }
    }

    /// Write the registry snapshot through the storage backend.
    pub fn persist_registry(&self) {
        if let Some(storage) = &self.storage {
            if let Err(e) = pollster::block_on(storage.save(STORAGE_KEY, &self.registry)) {
                log::warn!("saving boards failed: {e}");
            }
        }
    }

    /// Navigate to a page, optionally switching the current board.
    pub fn navigate(&mut self, page: Page, board: Option<BoardId>) {
        self.page = page;
        if board.is_some() {
            self.current_board = board;
        }
    }

    fn home_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.heading(egui::RichText::new("BrainDump").size(48.0).strong());
                ui.label("Catch your ideas before they drift away");
                ui.add_space(24.0);
                if ui
                    .add(egui::Button::new(egui::RichText::new("Start").size(20.0)))
                    .clicked()
                {
                    self.navigate(Page::Select, None);
                }
            });
        });
    }

    fn notice_toast(&mut self, ctx: &egui::Context) {
        let Some(message) = self.notice.clone() else {
            return;
        };
        egui::Window::new("notice")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(&message);
                    if ui.small_button("Dismiss").clicked() {
                        self.notice = None;
                    }
                });
            });
    }
}

impl eframe::App for BrainDumpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.page {
            Page::Home => self.home_view(ctx),
            Page::Select => select_view(self, ctx),
            Page::Whiteboard => whiteboard_view(self, ctx),
        }
        self.notice_toast(ctx);
    }
}

fn select_view(app: &mut BrainDumpApp, ctx: &egui::Context) {
    crate::select_view::show(app, ctx);
}

fn whiteboard_view(app: &mut BrainDumpApp, ctx: &egui::Context) {
    crate::whiteboard_view::show(app, ctx);
}
