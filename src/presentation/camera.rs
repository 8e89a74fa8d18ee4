//! Where the scene is looked at from and how it is projected.
use cgmath::{Deg, Matrix4, Point3, Vector3};
use log::debug;

use crate::error::Result;
use crate::linalg;

/// Symmetric perspective frustum. Always valid once constructed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Perspective {
    fovy: Deg<f32>,
    aspect: f32,
    near: f32,
    far: f32,
    matrix: Matrix4<f32>,
}

impl Perspective {
    pub fn new(fovy: Deg<f32>, aspect: f32, near: f32, far: f32) -> Result<Self> {
        let matrix = linalg::perspective(fovy, aspect, near, far)?;
        Ok(Perspective { fovy, aspect, near, far, matrix })
    }

    /// Only the horizontal scale term depends on the aspect ratio. Left untouched on error.
    pub fn set_aspect(&mut self, aspect: f32) -> Result<()> {
        self.matrix = linalg::perspective(self.fovy, aspect, self.near, self.far)?;
        self.aspect = aspect;
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    matrix: Matrix4<f32>,
}

impl View {
    pub fn new(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Result<Self> {
        let matrix = linalg::look_at(eye, target, up)?;
        Ok(View { matrix })
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    perspective: Perspective,
    view: View,
}

impl Camera {
    pub fn new(perspective: Perspective, view: View) -> Self {
        Camera { perspective, view }
    }

    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// `projection * (view * model)`
    pub fn mvp(&self, model: &Matrix4<f32>) -> Matrix4<f32> {
        let mv = linalg::mult(self.view.matrix(), model);
        linalg::mult(self.perspective.matrix(), &mv)
    }

    /// Must be called whenever the viewport changes size. A zero sized viewport is rejected
    /// and the previous aspect is kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let aspect = width as f32 / height as f32;
        self.perspective.set_aspect(aspect)?;
        debug!("Viewport resized to {}x{}, aspect {}.", width, height, aspect);
        Ok(())
    }
}
