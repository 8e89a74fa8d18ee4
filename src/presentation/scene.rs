//! The fixed constants of the gasket scene.
use cgmath::{Deg, Matrix4, Point3, Rad, Vector3};

use crate::error::Result;
use crate::geometry::gasket::Gasket;
use crate::geometry::{Palette, Tetrahedron};
use super::camera::{Camera, Perspective, View};
use super::Rot;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub corners: Tetrahedron,
    pub depth: i64,
    pub palette: Palette,

    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub rot: Rot,

    pub fovy: Deg<f32>,
    pub near: f32,
    pub far: f32,

    /// Viewport in pixels, only the ratio matters.
    pub width: u32,
    pub height: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            corners: Tetrahedron::regular(),
            depth: 4,
            palette: Palette::default(),
            eye: Point3::new(0.0, 0.0, 2.4),
            target: Point3::new(0.0, 0.0, 1.0),
            up: Vector3::unit_y(),
            rot: Rot::new(Rad::from(Deg(-18.0)), Rad(0.0), Rad::from(Deg(20.0))),
            fovy: Deg(40.0),
            near: 0.1,
            far: 10.0,
            width: 512,
            height: 512,
        }
    }
}

impl SceneConfig {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn gasket(&self) -> Result<Gasket> {
        Ok(Gasket::new(self.corners, self.depth)?.with_palette(self.palette.clone()))
    }

    pub fn camera(&self) -> Result<Camera> {
        let perspective = Perspective::new(self.fovy, self.aspect(), self.near, self.far)?;
        let view = View::new(self.eye, self.target, self.up)?;
        Ok(Camera::new(perspective, view))
    }

    pub fn model(&self) -> Matrix4<f32> {
        self.rot.matrix()
    }

    /// Model-view-projection for the current viewport. Rejects a degenerate camera or
    /// projection before any matrix is built.
    pub fn compute_mvp(&self) -> Result<Matrix4<f32>> {
        Ok(self.camera()?.mvp(&self.model()))
    }
}
