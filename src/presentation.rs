//! Present the whole thing

use cgmath::{Matrix4, Rad};
use log::info;

use crate::error::Result;

mod camera;
mod scene;
mod show;

pub use camera::{Camera, Perspective, View};
pub use scene::SceneConfig;
pub use show::Show;

/// Model rotation. Applied about Z first, then Y, then X.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rot {
    x: Rad<f32>,
    y: Rad<f32>,
    z: Rad<f32>,
}

impl Rot {
    pub fn new(x: Rad<f32>, y: Rad<f32>, z: Rad<f32>) -> Self {
        Rot { x, y, z }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(self.x) * Matrix4::from_angle_y(self.y) * Matrix4::from_angle_z(self.z)
    }
}

impl Default for Rot {
    fn default() -> Self {
        Rot::new(Rad(0.0), Rad(0.0), Rad(0.0))
    }
}

/// The rendering back end. Whatever implements this owns the device, the shader program and
/// the depth test (`<=`, cleared to far); it is only ever fed flat float buffers.
pub trait Renderable {
    /// Replace the vertex buffers. Both slices hold three floats per vertex and are the same
    /// length. Geometry is immutable until the next upload.
    fn upload(&mut self, positions: &[f32], colours: &[f32]);

    /// Column major model-view-projection uniform.
    fn set_mvp(&mut self, mvp: &[f32; 16]);

    /// One triangle list draw over the first `vertex_count` uploaded vertices.
    fn draw(&mut self, vertex_count: usize);
}

/// Generate the scene once and present a single frame with it.
pub fn present<R>(config: &SceneConfig, renderer: R) -> Result<R>
where
    R: Renderable,
{
    info!("Initializing the scene.");
    let mut show = Show::new(config, renderer)?;

    info!("Presenting frame.");
    show.present_frame();

    Ok(show.into_renderer())
}
