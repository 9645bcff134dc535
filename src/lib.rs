#![warn(missing_docs)]

//! Typed model of Starbound object orientation definitions.
//!
//! Loads the loosely-typed JSON documents shipped with the game into a
//! strongly-typed [`ObjectOrientation`], tracks field presence so that
//! saving reproduces the original key set, resolves documented defaults
//! for rendering, and computes canvas geometry (width, height, origin)
//! for a chosen grid factor.

mod error;
mod field;
mod frames;
mod geom;
mod geometry;
mod orientation;
mod schema;

pub use error::AssetError;
pub use field::Field;
pub use frames::{FrameGrid, FrameSet};
pub use geom::{JsonNumber, Vec2F, Vec2I};
pub use geometry::{scale_factor, DEFAULT_GRID_FACTOR};
pub use orientation::{
    Anchor, Collision, Direction, DualImage, ImageForm, ImageLayer, ObjectOrientation,
};
pub use schema::{keys, kind_of, spec_for, DefaultValue, FieldKind, FieldSpec, Presence, FIELDS};
