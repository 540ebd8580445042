//! Core of a small vector-drawing editor: shapes with hot points, a z-ordered
//! document with a derived selection, interaction states, a postfix text format
//! and renderer backends.

pub mod codec;
pub mod document;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod model;
pub mod render;
pub mod shapes;
pub mod state;
pub mod svg;
