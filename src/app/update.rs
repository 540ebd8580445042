use eframe::egui;
use vectorpad::state::Key;

use super::render::{CANVAS_BG, PainterRenderer, to_drawing};
use super::{EditorApp, Tool};

const KEY_MAP: [(egui::Key, Key); 9] = [
    (egui::Key::ArrowUp, Key::ArrowUp),
    (egui::Key::ArrowDown, Key::ArrowDown),
    (egui::Key::ArrowLeft, Key::ArrowLeft),
    (egui::Key::ArrowRight, Key::ArrowRight),
    (egui::Key::Plus, Key::Plus),
    (egui::Key::Equals, Key::Equals),
    (egui::Key::Minus, Key::Minus),
    (egui::Key::G, Key::G),
    (egui::Key::U, Key::U),
];

impl EditorApp {
    fn tool_button(&mut self, ui: &mut egui::Ui, label: &str, tool: Tool) {
        if ui.selectable_label(self.tool == Some(tool), label).clicked() {
            self.set_tool(tool);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let mut pressed = Vec::new();
        let mut save = false;
        let mut open = false;
        ctx.input_mut(|i| {
            save = i.consume_key(egui::Modifiers::COMMAND, egui::Key::S);
            open = i.consume_key(egui::Modifiers::COMMAND, egui::Key::O);
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                pressed.push(Key::Escape);
            }
            for (egui_key, key) in KEY_MAP {
                if i.consume_key(egui::Modifiers::NONE, egui_key) {
                    pressed.push(key);
                }
            }
        });

        for key in pressed {
            if key == Key::Escape {
                self.tool = None;
            }
            self.editor.key_pressed(key);
        }
        if save {
            self.save_to_path();
        }
        if open {
            self.open_dialog();
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, origin: egui::Pos2) {
        let (pressed, released, down, pos, modifiers) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.interact_pos(),
                i.modifiers,
            )
        });
        let Some(pos) = pos else {
            return;
        };
        let point = to_drawing(origin, pos);

        if pressed && response.hovered() {
            self.held_at = Some(point);
            self.editor.mouse_down(point, modifiers.shift, modifiers.command);
        } else if let Some(last) = self.held_at {
            if down && point != last {
                self.held_at = Some(point);
                self.editor.mouse_dragged(point);
            }
        }
        if released && self.held_at.take().is_some() {
            self.editor.mouse_up(point, modifiers.shift, modifiers.command);
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                self.tool_button(ui, "Select", Tool::Select);
                self.tool_button(ui, "Eraser", Tool::Eraser);
                ui.separator();
                for i in 0..self.prototypes.len() {
                    let label = self.prototypes[i].shape_name();
                    self.tool_button(ui, &label, Tool::Place(i));
                }
                ui.separator();
                if ui.button("Open...").clicked() {
                    self.open_dialog();
                }
                if ui.button("Save...").clicked() {
                    self.save_dialog();
                }
                if ui.button("Export SVG...").clicked() {
                    self.export_svg_dialog();
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let doc = self.editor.document();
                    ui.label(format!("Selected: {}", doc.selected_objects().len()));
                    ui.separator();
                    ui.label(format!("Objects: {}", doc.len()));
                    ui.separator();
                    ui.label(self.editor.state().name());
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                self.handle_pointer(ctx, &response, rect.min);

                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, CANVAS_BG);
                let mut renderer = PainterRenderer::new(&painter, rect.min, self.settings.stroke_width);
                self.editor.render(&mut renderer);
            });
    }
}
