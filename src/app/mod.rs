use eframe::egui;
use vectorpad::codec;
use vectorpad::document::DocumentModelListener;
use vectorpad::editor::Editor;
use vectorpad::model::Point;
use vectorpad::shapes::GraphicalObject;

use std::rc::Rc;

mod actions;
mod render;
mod settings;
mod update;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tool {
    Select,
    Eraser,
    /// Index into the prototype list.
    Place(usize),
}

/// Asks egui for a new frame whenever the drawing changes.
struct RepaintOnChange {
    ctx: egui::Context,
}

impl DocumentModelListener for RepaintOnChange {
    fn document_change(&self) {
        self.ctx.request_repaint();
    }
}

pub struct EditorApp {
    editor: Editor,
    prototypes: Vec<GraphicalObject>,
    tool: Option<Tool>,
    /// Drawing-space position of the primary button while it is held on the canvas.
    held_at: Option<Point>,
    settings: settings::EditorSettings,
    settings_path: String,
    status: Option<String>,
}

impl EditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = settings::config_path().display().to_string();
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();
        log::info!("settings from {settings_path}: {settings:?}");

        let editor = Editor::new();
        editor.document().add_listener(Rc::new(RepaintOnChange {
            ctx: cc.egui_ctx.clone(),
        }));

        Self {
            editor,
            // the empty composite only serves the loader
            prototypes: codec::prototypes()
                .into_iter()
                .filter(|p| !p.is_composite())
                .collect(),
            tool: None,
            held_at: None,
            settings,
            settings_path,
            status: None,
        }
    }

    fn set_tool(&mut self, tool: Tool) {
        match tool {
            Tool::Select => self.editor.select(),
            Tool::Eraser => self.editor.eraser(),
            Tool::Place(i) => {
                let Some(prototype) = self.prototypes.get(i) else {
                    return;
                };
                self.editor.add_shape(prototype);
            }
        }
        self.tool = Some(tool);
    }
}
