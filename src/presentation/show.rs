//! Keeps a renderer fed: geometry on (re)build, the MVP on every frame.
use cgmath::Matrix4;
use log::{debug, trace};

use crate::error::Result;
use crate::geometry::gasket::Gasket;
use crate::linalg;
use super::camera::Camera;
use super::{Renderable, SceneConfig};

pub struct Show<R> {
    renderer: R,
    gasket: Gasket,
    camera: Camera,
    model: Matrix4<f32>,
    vertex_count: usize,
}

impl<R: Renderable> Show<R> {
    /// Validates the whole configuration before anything reaches the renderer.
    pub fn new(config: &SceneConfig, renderer: R) -> Result<Self> {
        let gasket = config.gasket()?;
        let camera = config.camera()?;

        let mut show = Show {
            renderer,
            gasket,
            camera,
            model: config.model(),
            vertex_count: 0,
        };
        show.upload();

        Ok(show)
    }

    /// Regenerate at a new depth. Nothing is uploaded if the depth is rejected.
    pub fn rebuild(&mut self, depth: i64) -> Result<()> {
        self.gasket.set_depth(depth)?;
        self.upload();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.camera.resize(width, height)
    }

    pub fn mvp(&self) -> Matrix4<f32> {
        self.camera.mvp(&self.model)
    }

    pub fn present_frame(&mut self) {
        let mvp = self.mvp();
        trace!("MVP {:?}", mvp);
        self.renderer.set_mvp(&linalg::flatten(&mvp));
        self.renderer.draw(self.vertex_count);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn upload(&mut self) {
        let mesh = self.gasket.mesh();
        self.vertex_count = mesh.len();
        debug!("Uploading {} vertices.", self.vertex_count);
        self.renderer.upload(&mesh.flat_positions(), &mesh.flat_colours());
    }
}
