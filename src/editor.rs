//! Hosting controller: owns the document and the single active interaction state.

use std::path::Path;

use crate::codec;
use crate::document::DocumentModel;
use crate::error::CodecResult;
use crate::model::Point;
use crate::render::Renderer;
use crate::shapes::GraphicalObject;
use crate::state::{InteractionState, Key};
use crate::svg::SvgRenderer;

#[derive(Default)]
pub struct Editor {
    document: DocumentModel,
    state: InteractionState,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &DocumentModel {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut DocumentModel {
        &mut self.document
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Lets the outgoing state clean up, then installs `state` and requests a redraw.
    pub fn set_state(&mut self, state: InteractionState) {
        self.state.on_leaving(&mut self.document);
        log::debug!("state {} -> {}", self.state.name(), state.name());
        self.state = state;
        self.document.notify_listeners();
    }

    pub fn idle(&mut self) {
        self.set_state(InteractionState::Idle);
    }

    pub fn select(&mut self) {
        self.set_state(InteractionState::select());
    }

    pub fn eraser(&mut self) {
        self.set_state(InteractionState::eraser());
    }

    pub fn add_shape(&mut self, prototype: &GraphicalObject) {
        self.set_state(InteractionState::add_shape(prototype.duplicate()));
    }

    pub fn mouse_down(&mut self, point: Point, shift: bool, ctrl: bool) {
        self.state.mouse_down(&mut self.document, point, shift, ctrl);
    }

    pub fn mouse_up(&mut self, point: Point, shift: bool, ctrl: bool) {
        self.state.mouse_up(&mut self.document, point, shift, ctrl);
    }

    pub fn mouse_dragged(&mut self, point: Point) {
        self.state.mouse_dragged(&mut self.document, point);
    }

    /// Escape always returns to idle; other keys go to the active state.
    pub fn key_pressed(&mut self, key: Key) {
        if key == Key::Escape {
            self.idle();
        } else {
            self.state.key_pressed(&mut self.document, key);
        }
    }

    /// Objects back to front, each followed by its overlay, then the frame overlay.
    pub fn render(&self, r: &mut dyn Renderer) {
        for object in self.document.list() {
            object.render(r);
            self.state.overlay_per_object(&self.document, r, object);
        }
        self.state.overlay_post_frame(r);
    }

    /// The drawing without any interaction overlay.
    pub fn export_svg(&self, width: u32, height: u32) -> String {
        let mut svg = SvgRenderer::new(width, height);
        for object in self.document.list() {
            object.render(&mut svg);
        }
        svg.finish()
    }

    pub fn export_svg_to(&self, path: &Path, width: u32, height: u32) -> CodecResult<()> {
        codec::write_atomic(path, &self.export_svg(width, height))?;
        log::info!("exported SVG to {}", path.display());
        Ok(())
    }

    pub fn save_rows(&self) -> Vec<String> {
        codec::serialize(self.document.list())
    }

    /// Replaces the drawing only if every row parses.
    pub fn load_rows<S: AsRef<str>>(&mut self, rows: &[S]) -> CodecResult<()> {
        let objects = codec::deserialize(rows)?;
        self.reset_state();
        self.document.replace_all(objects);
        Ok(())
    }

    pub fn save(&self, path: &Path) -> CodecResult<()> {
        codec::save_document(&self.document, path)
    }

    pub fn load(&mut self, path: &Path) -> CodecResult<()> {
        let rows = codec::read_rows(path)?;
        self.load_rows(&rows)?;
        log::info!("loaded {} object(s) from {}", self.document.len(), path.display());
        Ok(())
    }

    /// Drops the active state's transient data before the document is swapped out.
    fn reset_state(&mut self) {
        let fresh = match &self.state {
            InteractionState::Idle => InteractionState::Idle,
            InteractionState::AddShape(s) => InteractionState::add_shape(s.prototype().duplicate()),
            InteractionState::Eraser(_) => InteractionState::eraser(),
            InteractionState::Select(_) => InteractionState::select(),
        };
        self.set_state(fresh);
    }
}
