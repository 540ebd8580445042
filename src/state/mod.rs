//! Interaction modes. Exactly one is active at a time; the hosting [`Editor`]
//! switches between them.
//!
//! [`Editor`]: crate::editor::Editor

use crate::document::DocumentModel;
use crate::model::Point;
use crate::render::Renderer;
use crate::shapes::GraphicalObject;

mod add_shape;
mod eraser;
mod select;

pub use add_shape::AddShapeState;
pub use eraser::EraserState;
pub use select::SelectState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Plus,
    /// Shares a key with `+` on most layouts, handled the same way.
    Equals,
    Minus,
    G,
    U,
    Escape,
    Other,
}

#[derive(Debug, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    AddShape(AddShapeState),
    Eraser(EraserState),
    Select(SelectState),
}

impl InteractionState {
    pub fn add_shape(prototype: GraphicalObject) -> Self {
        Self::AddShape(AddShapeState::new(prototype))
    }

    pub fn eraser() -> Self {
        Self::Eraser(EraserState::default())
    }

    pub fn select() -> Self {
        Self::Select(SelectState::default())
    }

    pub fn name(&self) -> String {
        match self {
            Self::Idle => "Idle".to_string(),
            Self::AddShape(s) => format!("Add {}", s.prototype().shape_name()),
            Self::Eraser(_) => "Eraser".to_string(),
            Self::Select(_) => "Select".to_string(),
        }
    }

    pub fn mouse_down(&mut self, doc: &mut DocumentModel, point: Point, shift: bool, ctrl: bool) {
        match self {
            Self::Idle => {}
            Self::AddShape(s) => s.mouse_down(doc, point),
            Self::Eraser(s) => s.mouse_down(point),
            Self::Select(s) => s.mouse_down(doc, point, shift, ctrl),
        }
    }

    pub fn mouse_up(&mut self, doc: &mut DocumentModel, _point: Point, _shift: bool, ctrl: bool) {
        match self {
            Self::Idle | Self::AddShape(_) => {}
            Self::Eraser(s) => s.mouse_up(doc),
            Self::Select(s) => s.mouse_up(doc, ctrl),
        }
    }

    pub fn mouse_dragged(&mut self, doc: &mut DocumentModel, point: Point) {
        match self {
            Self::Idle | Self::AddShape(_) => {}
            Self::Eraser(s) => s.mouse_dragged(doc, point),
            Self::Select(s) => s.mouse_dragged(doc, point),
        }
    }

    pub fn key_pressed(&mut self, doc: &mut DocumentModel, key: Key) {
        if let Self::Select(s) = self {
            s.key_pressed(doc, key);
        }
    }

    /// Drawn right after `object` itself.
    pub fn overlay_per_object(&self, doc: &DocumentModel, r: &mut dyn Renderer, object: &GraphicalObject) {
        if let Self::Select(s) = self {
            s.overlay_per_object(doc, r, object);
        }
    }

    /// Drawn once after every object.
    pub fn overlay_post_frame(&self, r: &mut dyn Renderer) {
        match self {
            Self::Idle | Self::AddShape(_) => {}
            Self::Eraser(s) => s.overlay_post_frame(r),
            Self::Select(s) => s.overlay_post_frame(r),
        }
    }

    pub fn on_leaving(&mut self, doc: &mut DocumentModel) {
        match self {
            Self::Idle | Self::AddShape(_) => {}
            Self::Eraser(s) => s.on_leaving(),
            Self::Select(s) => s.on_leaving(doc),
        }
    }
}
