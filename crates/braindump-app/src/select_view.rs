//! Board selection page: the category grid with create/delete flows.

use crate::app::{BrainDumpApp, Page};
use braindump_core::board::DEFAULT_BOARD_COLOR;
use eframe::egui;

fn board_color32(color: braindump_core::Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn show(app: &mut BrainDumpApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("select_header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("← Home").clicked() {
                app.navigate(Page::Home, None);
            }
            ui.heading("Pick your board");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("＋ New").clicked() {
                    app.new_board_name = Some(String::new());
                }
                let edit_label = if app.edit_mode { "Done" } else { "Edit" };
                if ui.button(edit_label).clicked() {
                    app.edit_mode = !app.edit_mode;
                }
            });
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        if app.registry.boards().is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label("No boards yet");
                ui.label("Use ＋ New to create your first board");
            });
            return;
        }

        let boards: Vec<_> = app
            .registry
            .boards()
            .iter()
            .map(|b| (b.id, b.name.clone(), b.color))
            .collect();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (id, name, color) in boards {
                    ui.vertical(|ui| {
                        let button = egui::Button::new(
                            egui::RichText::new(&name).color(egui::Color32::WHITE),
                        )
                        .fill(board_color32(color))
                        .min_size(egui::vec2(150.0, 110.0));
                        if ui.add(button).clicked() && !app.edit_mode {
                            app.navigate(Page::Whiteboard, Some(id));
                        }
                        if app.edit_mode && ui.small_button("Delete").clicked() {
                            app.delete_confirm = Some(id);
                        }
                    });
                }
            });
        });
    });

    new_board_modal(app, ctx);
    delete_confirm_modal(app, ctx);
}

fn new_board_modal(app: &mut BrainDumpApp, ctx: &egui::Context) {
    let Some(mut name) = app.new_board_name.clone() else {
        return;
    };
    let mut open = true;
    let mut create = false;

    egui::Window::new("New Board")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let response = ui.text_edit_singleline(&mut name);
            response.request_focus();
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                create = true;
            }
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    open = false;
                }
                let trimmed_empty = name.trim().is_empty();
                if ui
                    .add_enabled(!trimmed_empty, egui::Button::new("Create"))
                    .clicked()
                {
                    create = true;
                }
            });
        });

    if create && !name.trim().is_empty() {
        app.registry.add_board(name.trim(), DEFAULT_BOARD_COLOR);
        app.persist_registry();
        app.new_board_name = None;
    } else if !open {
        app.new_board_name = None;
    } else {
        app.new_board_name = Some(name);
    }
}

fn delete_confirm_modal(app: &mut BrainDumpApp, ctx: &egui::Context) {
    let Some(board_id) = app.delete_confirm else {
        return;
    };
    let name = app
        .registry
        .board(board_id)
        .map(|b| b.name.clone())
        .unwrap_or_default();

    egui::Window::new("Delete board?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{name}\" and all of its ideas?"));
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    app.delete_confirm = None;
                }
                if ui.button("Yes, delete").clicked() {
                    app.registry.remove_board(board_id);
                    app.sessions.remove(&board_id);
                    if app.current_board == Some(board_id) {
                        app.current_board = None;
                    }
                    app.persist_registry();
                    app.delete_confirm = None;
                }
            });
        });
}
