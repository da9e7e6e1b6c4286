//! Whiteboard page: canvas painting from the engine's drawables and
//! wiring of pointer/keyboard input into the gesture controller and
//! shortcut router.

use std::collections::HashMap;

use crate::app::{BrainDumpApp, Page};
use crate::shortcuts::ShortcutRegistry;
use braindump_core::board::{BoardId, InputMethod};
use braindump_core::camera::{Camera, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use braindump_core::elements::{ElementKind, FONT_SIZE_PALETTE};
use braindump_core::import::decode_image;
use braindump_core::projection::{DrawGeometry, Drawable};
use braindump_core::{
    FormatPatch, GestureController, KeyPress, Modifiers, ShapeFigure, ShortcutRouter, ToolKind,
    TouchPoint, Whiteboard,
};
use eframe::egui;

/// Selection accent used for outlines and handles.
const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x63, 0x66, 0xF1);
const CANVAS_BG: egui::Color32 = egui::Color32::from_rgb(24, 26, 36);

pub fn show(app: &mut BrainDumpApp, ctx: &egui::Context) {
    let Some(board_id) = app.current_board else {
        app.page = Page::Select;
        return;
    };
    let board_name = app
        .registry
        .board(board_id)
        .map(|b| b.name.clone())
        .unwrap_or_else(|| "Untitled Board".to_string());

    let mut go_back = false;
    let mut registry_dirty = false;
    let mut new_notice: Option<String> = None;

    {
        let BrainDumpApp {
            sessions,
            registry,
            textures,
            touches,
            idea_draft,
            ..
        } = app;
        let session = sessions.entry(board_id).or_default();
        let wb = &mut session.whiteboard;
        let gesture = &mut session.gesture;
        let router = ShortcutRouter::new();

        let events = ctx.input(|i| i.events.clone());
        let in_field = ctx.wants_keyboard_input();
        route_keyboard(&router, wb, &events, in_field);

        egui::TopBottomPanel::top("wb_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back").clicked() {
                    go_back = true;
                }
                ui.heading(&board_name);
            });
        });

        egui::TopBottomPanel::bottom("wb_toolbar").show(ctx, |ui| {
            toolbar(ui, ctx, wb, &mut new_notice);
        });

        element_editor_panel(ctx, wb);

        egui::SidePanel::left("wb_ideas")
            .resizable(true)
            .default_width(230.0)
            .show(ctx, |ui| {
                ideas_panel(ui, board_id, registry, wb, idea_draft, &mut registry_dirty);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                canvas(ui, ctx, wb, gesture, textures, touches, &events);
            });

        text_format_popup(ctx, wb);
        shape_popup(ctx, wb);
        shortcuts_help_overlay(ctx, wb);
        zoom_controls(ctx, wb);
    }

    if registry_dirty {
        app.persist_registry();
    }
    if let Some(message) = new_notice {
        app.notice = Some(message);
    }
    if go_back {
        app.page = Page::Select;
    }
}

/// Map an egui key onto the router's key names. Letters arrive here;
/// `?` is routed from the text event instead so it fires exactly once.
fn key_str(key: egui::Key) -> Option<&'static str> {
    Some(match key {
        egui::Key::Escape => "Escape",
        egui::Key::Delete => "Delete",
        egui::Key::Backspace => "Backspace",
        egui::Key::Slash => "/",
        egui::Key::B => "b",
        egui::Key::I => "i",
        egui::Key::U => "u",
        egui::Key::V => "v",
        egui::Key::T => "t",
        egui::Key::S => "s",
        egui::Key::H => "h",
        _ => return None,
    })
}

fn core_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        meta: modifiers.mac_cmd,
    }
}

fn route_keyboard(
    router: &ShortcutRouter,
    wb: &mut Whiteboard,
    events: &[egui::Event],
    in_field: bool,
) {
    for event in events {
        match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                if let Some(name) = key_str(*key) {
                    router.handle(
                        wb,
                        &KeyPress {
                            key: name,
                            modifiers: core_modifiers(*modifiers),
                            in_text_field: in_field,
                        },
                    );
                }
            }
            egui::Event::Text(text) if text == "?" && !in_field => {
                router.handle(
                    wb,
                    &KeyPress {
                        key: "?",
                        modifiers: Modifiers::default(),
                        in_text_field: false,
                    },
                );
            }
            _ => {}
        }
    }
}

fn toolbar(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    wb: &mut Whiteboard,
    new_notice: &mut Option<String>,
) {
    ui.horizontal(|ui| {
        let navigate_active = wb.tools.current_tool == ToolKind::Navigate;
        if ui.selectable_label(navigate_active, "Navigate").clicked() {
            wb.set_tool(ToolKind::Navigate);
            wb.tools.close_popups();
        }

        if ui.button("Image").clicked() {
            pick_image(ctx, wb, new_notice);
        }

        let text_active = wb.tools.current_tool == ToolKind::Text;
        if ui.selectable_label(text_active, "Text").clicked() {
            let was_open = wb.tools.text_popup_open;
            wb.tools.select_text_tool();
            if was_open {
                wb.tools.text_popup_open = false;
            }
        }

        if ui
            .selectable_label(wb.tools.shape_popup_open, "Shape")
            .clicked()
        {
            if wb.tools.shape_popup_open {
                wb.tools.close_popups();
            } else {
                wb.tools.open_shape_popup();
            }
        }

        if ui.button("Delete").clicked() {
            wb.delete_selected();
        }

        if ui.button("Dictate").clicked() {
            // No speech backend on this build; the engine is untouched.
            *new_notice = Some("Dictation is not available on this device".to_string());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Shortcuts (?)").clicked() {
                wb.tools.toggle_shortcuts_help();
            }
        });
    });
}

fn pick_image(ctx: &egui::Context, wb: &mut Whiteboard, new_notice: &mut Option<String>) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
        .pick_file()
    else {
        return;
    };
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            *new_notice = Some(format!("Could not read {}: {e}", path.display()));
            return;
        }
    };
    // The decode is a single async task; the element is created only
    // after it resolves.
    match pollster::block_on(braindump_core::import::decode_image_task(bytes)) {
        Ok(decoded) => {
            let size = ctx.screen_rect().size();
            wb.insert_image(decoded, kurbo::Size::new(size.x as f64, size.y as f64));
        }
        Err(e) => *new_notice = Some(format!("Could not load image: {e}")),
    }
}

fn element_editor_panel(ctx: &egui::Context, wb: &mut Whiteboard) {
    let Some(selected) = wb.selection() else {
        return;
    };
    let Some((text, format)) = wb.store.get(selected).and_then(|el| {
        let format = match &el.kind {
            ElementKind::Text(t) => Some(t.format),
            _ => None,
        };
        el.text().map(|t| (t.to_string(), format))
    }) else {
        return;
    };

    egui::TopBottomPanel::bottom("wb_element_editor").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Edit:");
            let mut buffer = text;
            if ui
                .add(egui::TextEdit::singleline(&mut buffer).desired_width(340.0))
                .changed()
            {
                wb.update_element_text(selected, &buffer);
            }

            if let Some(format) = format {
                let mut bold = format.bold;
                if ui.checkbox(&mut bold, "Bold").changed() {
                    wb.update_element_format(
                        selected,
                        FormatPatch {
                            bold: Some(bold),
                            ..Default::default()
                        },
                    );
                }
                let mut italic = format.italic;
                if ui.checkbox(&mut italic, "Italic").changed() {
                    wb.update_element_format(
                        selected,
                        FormatPatch {
                            italic: Some(italic),
                            ..Default::default()
                        },
                    );
                }
                let mut underline = format.underline;
                if ui.checkbox(&mut underline, "Underline").changed() {
                    wb.update_element_format(
                        selected,
                        FormatPatch {
                            underline: Some(underline),
                            ..Default::default()
                        },
                    );
                }
                egui::ComboBox::from_id_salt("element_font_size")
                    .selected_text(format!("{}px", format.font_size))
                    .show_ui(ui, |ui| {
                        for size in FONT_SIZE_PALETTE {
                            if ui
                                .selectable_label(size == format.font_size, format!("{size}px"))
                                .clicked()
                            {
                                wb.update_element_format(
                                    selected,
                                    FormatPatch {
                                        font_size: Some(size),
                                        ..Default::default()
                                    },
                                );
                            }
                        }
                    });
            }
        });
    });
}

fn ideas_panel(
    ui: &mut egui::Ui,
    board_id: BoardId,
    registry: &mut braindump_core::BoardRegistry,
    wb: &mut Whiteboard,
    idea_draft: &mut String,
    registry_dirty: &mut bool,
) {
    ui.heading("Ideas");
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(idea_draft)
                .hint_text("New idea...")
                .desired_width(140.0),
        );
        if ui.button("Add").clicked() && !idea_draft.trim().is_empty() {
            registry.add_idea(board_id, idea_draft.trim(), InputMethod::Typed);
            idea_draft.clear();
            *registry_dirty = true;
        }
    });
    ui.separator();

    let ideas: Vec<(BoardId, String)> = registry
        .ideas_for(board_id)
        .iter()
        .map(|idea| (idea.id, idea.content.clone()))
        .collect();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (idea_id, content) in ideas {
            ui.horizontal_wrapped(|ui| {
                ui.label(&content);
                if ui.small_button("To canvas").clicked() {
                    wb.append_dictated_text(&content);
                }
                if ui.small_button("✕").clicked() {
                    registry.remove_idea(idea_id);
                    *registry_dirty = true;
                }
            });
            ui.separator();
        }
    });
}

fn canvas(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    wb: &mut Whiteboard,
    gesture: &mut GestureController,
    textures: &mut HashMap<u64, egui::TextureHandle>,
    touches: &mut Vec<(u64, egui::Pos2)>,
    events: &[egui::Event],
) {
    let (response, painter) =
        ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let rect = response.rect;
    let modifiers = core_modifiers(ctx.input(|i| i.modifiers));

    let local = |pos: egui::Pos2| -> kurbo::Point {
        kurbo::Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
    };

    for event in events {
        match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } if *button == egui::PointerButton::Primary => {
                if *pressed {
                    if rect.contains(*pos) {
                        gesture.pointer_down(wb, local(*pos), modifiers);
                    }
                } else {
                    gesture.pointer_up(wb, local(*pos));
                }
            }
            egui::Event::PointerMoved(pos) => {
                if rect.contains(*pos) {
                    gesture.pointer_move(wb, local(*pos));
                } else if gesture.is_active() {
                    gesture.pointer_leave(wb);
                }
            }
            egui::Event::PointerGone => gesture.pointer_leave(wb),
            egui::Event::MouseWheel { delta, .. } => {
                if response.hovered() {
                    // egui scroll-up is positive; the engine follows the
                    // browser convention (positive = zoom out).
                    gesture.wheel(wb, -delta.y as f64);
                }
            }
            egui::Event::Zoom(factor) => {
                if response.hovered() {
                    wb.camera.zoom_by(*factor as f64);
                }
            }
            egui::Event::Touch { id, phase, pos, .. } => {
                handle_touch(wb, gesture, touches, rect, id.0, *phase, *pos);
            }
            _ => {}
        }
    }

    let cursor = match (gesture.is_active(), wb.tools.current_tool) {
        (true, _) => egui::CursorIcon::Grabbing,
        (_, ToolKind::Arrow) => egui::CursorIcon::Crosshair,
        (_, ToolKind::Text) => egui::CursorIcon::Text,
        _ => egui::CursorIcon::Grab,
    };
    let _ = response.on_hover_cursor(cursor);

    painter.rect_filled(rect, egui::CornerRadius::ZERO, CANVAS_BG);

    let drawables = wb.drawables();
    for drawable in &drawables {
        paint_drawable(&painter, ctx, wb, textures, rect, drawable);
    }

    if let Some((start, end)) = gesture.arrow_preview() {
        let stroke = egui::Stroke::new(3.0, ACCENT.gamma_multiply(0.7));
        painter.line_segment(
            [
                world_to_canvas(&wb.camera, rect, start),
                world_to_canvas(&wb.camera, rect, end),
            ],
            stroke,
        );
    }
}

fn handle_touch(
    wb: &mut Whiteboard,
    gesture: &mut GestureController,
    touches: &mut Vec<(u64, egui::Pos2)>,
    rect: egui::Rect,
    touch_id: u64,
    phase: egui::TouchPhase,
    pos: egui::Pos2,
) {
    match phase {
        egui::TouchPhase::Start => {
            touches.retain(|(id, _)| *id != touch_id);
            touches.push((touch_id, pos));
            if touches.len() == 2 {
                gesture.touch_start(wb, &touch_points(touches, rect));
            }
        }
        egui::TouchPhase::Move => {
            if let Some(entry) = touches.iter_mut().find(|(id, _)| *id == touch_id) {
                entry.1 = pos;
            }
            if touches.len() == 2 {
                gesture.touch_move(wb, &touch_points(touches, rect));
            }
        }
        egui::TouchPhase::End | egui::TouchPhase::Cancel => {
            touches.retain(|(id, _)| *id != touch_id);
            gesture.touch_end();
        }
    }
}

fn touch_points(touches: &[(u64, egui::Pos2)], rect: egui::Rect) -> Vec<TouchPoint> {
    touches
        .iter()
        .map(|(_, pos)| {
            TouchPoint::new(kurbo::Point::new(
                (pos.x - rect.min.x) as f64,
                (pos.y - rect.min.y) as f64,
            ))
        })
        .collect()
}

fn world_to_canvas(camera: &Camera, canvas: egui::Rect, point: kurbo::Point) -> egui::Pos2 {
    let screen = camera.world_to_screen(point);
    egui::pos2(
        canvas.min.x + screen.x as f32,
        canvas.min.y + screen.y as f32,
    )
}

fn world_rect(camera: &Camera, canvas: egui::Rect, rect: kurbo::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        world_to_canvas(camera, canvas, kurbo::Point::new(rect.x0, rect.y0)),
        world_to_canvas(camera, canvas, kurbo::Point::new(rect.x1, rect.y1)),
    )
}

fn color32(color: peniko::Color) -> egui::Color32 {
    let rgba = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn paint_drawable(
    painter: &egui::Painter,
    ctx: &egui::Context,
    wb: &Whiteboard,
    textures: &mut HashMap<u64, egui::TextureHandle>,
    canvas: egui::Rect,
    drawable: &Drawable,
) {
    let camera = &wb.camera;
    let zoom = camera.zoom as f32;
    let fill = color32(drawable.fill);

    match &drawable.geometry {
        DrawGeometry::Rect(rect) => {
            painter.rect_filled(
                world_rect(camera, canvas, *rect),
                egui::CornerRadius::same(4),
                fill,
            );
        }
        DrawGeometry::Ellipse(rect) => {
            let r = world_rect(camera, canvas, *rect);
            painter.add(egui::Shape::Ellipse(egui::epaint::EllipseShape {
                center: r.center(),
                radius: egui::vec2(r.width() / 2.0, r.height() / 2.0),
                fill,
                stroke: egui::Stroke::NONE,
            }));
        }
        DrawGeometry::Polygon(points) => {
            let points: Vec<egui::Pos2> = points
                .iter()
                .map(|p| world_to_canvas(camera, canvas, *p))
                .collect();
            painter.add(egui::Shape::Path(egui::epaint::PathShape {
                points,
                closed: true,
                fill,
                stroke: egui::epaint::PathStroke::new(0.0, egui::Color32::TRANSPARENT),
            }));
        }
        DrawGeometry::Arrow { start, end, head } => {
            let stroke = egui::Stroke::new((4.0 * zoom).max(1.0), fill);
            let tip = world_to_canvas(camera, canvas, *end);
            painter.line_segment([world_to_canvas(camera, canvas, *start), tip], stroke);
            painter.line_segment([tip, world_to_canvas(camera, canvas, head[0])], stroke);
            painter.line_segment([tip, world_to_canvas(camera, canvas, head[1])], stroke);
        }
        DrawGeometry::Image(rect) => {
            let r = world_rect(camera, canvas, *rect);
            match image_texture(ctx, wb, textures, drawable.id) {
                Some(texture) => {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture.id(), r, uv, egui::Color32::WHITE);
                }
                None => {
                    painter.rect_filled(r, egui::CornerRadius::same(4), egui::Color32::DARK_GRAY);
                }
            }
        }
    }

    if let Some(block) = &drawable.text {
        let text_painter = painter.with_clip_rect(world_rect(camera, canvas, block.rect));
        let pos = world_to_canvas(
            camera,
            canvas,
            kurbo::Point::new(block.rect.x0 + 8.0, block.rect.y0 + 8.0),
        );
        let font = egui::FontId::proportional((block.font_size as f32 * zoom).max(4.0));
        let color = egui::Color32::from_rgba_unmultiplied(
            block.color.r,
            block.color.g,
            block.color.b,
            block.color.a,
        );
        let text_rect = text_painter.text(pos, egui::Align2::LEFT_TOP, &block.content, font.clone(), color);
        if block.bold {
            // Faux bold: double strike with a sub-pixel offset.
            text_painter.text(
                pos + egui::vec2(0.6, 0.0),
                egui::Align2::LEFT_TOP,
                &block.content,
                font,
                color,
            );
        }
        if block.underline {
            text_painter.line_segment(
                [text_rect.left_bottom(), text_rect.right_bottom()],
                egui::Stroke::new((1.0 * zoom).max(1.0), color),
            );
        }
    }

    if drawable.selected && drawable.handles.len() == 8 {
        // Handle order is fixed: [0] is north-west, [3] is south-east.
        let outline = egui::Rect::from_min_max(
            world_to_canvas(camera, canvas, drawable.handles[0].center),
            world_to_canvas(camera, canvas, drawable.handles[3].center),
        );
        painter.rect_stroke(
            outline,
            egui::CornerRadius::same(4),
            egui::Stroke::new(2.0, ACCENT),
            egui::StrokeKind::Outside,
        );
        for marker in &drawable.handles {
            let center = world_to_canvas(camera, canvas, marker.center);
            painter.circle_filled(center, 5.0, egui::Color32::WHITE);
            painter.circle_stroke(center, 5.0, egui::Stroke::new(1.5, ACCENT));
        }
    }
}

/// Lazily build and cache a texture for an image element.
fn image_texture(
    ctx: &egui::Context,
    wb: &Whiteboard,
    textures: &mut HashMap<u64, egui::TextureHandle>,
    id: u64,
) -> Option<egui::TextureHandle> {
    if let Some(texture) = textures.get(&id) {
        return Some(texture.clone());
    }
    let element = wb.store.get(id)?;
    let ElementKind::Image(content) = &element.kind else {
        return None;
    };
    let bytes = content.data()?;
    let decoded = match decode_image(bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("texture decode failed for element #{id}: {e}");
            return None;
        }
    };
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [decoded.width as usize, decoded.height as usize],
        &decoded.rgba,
    );
    let texture = ctx.load_texture(
        format!("element-{id}"),
        image,
        egui::TextureOptions::LINEAR,
    );
    textures.insert(id, texture.clone());
    Some(texture)
}

fn text_format_popup(ctx: &egui::Context, wb: &mut Whiteboard) {
    if !wb.tools.text_popup_open {
        return;
    }
    egui::Window::new("Text format")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_BOTTOM, [16.0, -56.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let format = &mut wb.tools.text_format;
                if ui.selectable_label(format.bold, "Bold").clicked() {
                    format.bold = !format.bold;
                }
                if ui.selectable_label(format.italic, "Italic").clicked() {
                    format.italic = !format.italic;
                }
                if ui.selectable_label(format.underline, "Underline").clicked() {
                    format.underline = !format.underline;
                }
                egui::ComboBox::from_id_salt("ambient_font_size")
                    .selected_text(format!("{}px", format.font_size))
                    .show_ui(ui, |ui| {
                        for size in FONT_SIZE_PALETTE {
                            ui.selectable_value(&mut format.font_size, size, format!("{size}px"));
                        }
                    });
            });
        });
}

fn shape_popup(ctx: &egui::Context, wb: &mut Whiteboard) {
    if !wb.tools.shape_popup_open {
        return;
    }
    egui::Window::new("Shapes")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -56.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for figure in ShapeFigure::ALL {
                    if ui.button(figure.label()).clicked() {
                        wb.choose_shape(figure);
                    }
                }
            });
        });
}

fn shortcuts_help_overlay(ctx: &egui::Context, wb: &mut Whiteboard) {
    if !wb.tools.shortcuts_help_open {
        return;
    }
    egui::Window::new("Keyboard Shortcuts")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("shortcuts_grid").striped(true).show(ui, |ui| {
                for shortcut in ShortcutRegistry::all() {
                    ui.monospace(shortcut.format());
                    ui.label(shortcut.description);
                    ui.end_row();
                }
            });
            ui.add_space(8.0);
            ui.label("Press Esc or ? to close this help");
            if ui.button("Close").clicked() {
                wb.tools.toggle_shortcuts_help();
            }
        });
}

fn zoom_controls(ctx: &egui::Context, wb: &mut Whiteboard) {
    egui::Window::new("wb_zoom")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -56.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(wb.camera.zoom > MIN_ZOOM, egui::Button::new("−"))
                    .clicked()
                {
                    wb.camera.zoom_by(WHEEL_ZOOM_OUT);
                }
                ui.label(format!("{:.0}%", wb.camera.zoom * 100.0));
                if ui
                    .add_enabled(wb.camera.zoom < MAX_ZOOM, egui::Button::new("＋"))
                    .clicked()
                {
                    wb.camera.zoom_by(WHEEL_ZOOM_IN);
                }
            });
        });
}
