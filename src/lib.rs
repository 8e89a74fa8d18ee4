//! A three dimensional Sierpinski gasket and the camera to look at it with.
//!
//! [`geometry`] turns four corners and a depth into flat coloured triangles, [`presentation`]
//! builds the model-view-projection and hands both to whatever implements
//! [`presentation::Renderable`].

pub mod error;
pub mod geometry;
pub mod linalg;
pub mod presentation;

pub use error::{GasketError, Result};
pub use geometry::gasket::{subdivide, subdivide_into, Depth, Gasket, Mesh, MAX_DEPTH};
pub use geometry::{Colour, Face, Geometry, Palette, Tetrahedron, Triangle, Vertex};
pub use presentation::{Camera, Perspective, Renderable, Rot, SceneConfig, Show, View};
