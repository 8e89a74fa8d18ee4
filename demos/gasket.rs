//! Generate the gasket and push it through a renderer that only reports what it was handed.
//!
//! `GASKET_DEPTH`, `GASKET_WIDTH` and `GASKET_HEIGHT` override the scene, from the environment
//! or a `.env` file. `RUST_LOG=debug` shows the whole pipeline.
use std::env;
use std::error::Error;
use std::str::FromStr;

use cgmath::{Matrix4, Vector4};
use log::{info, warn};

use gasket::{presentation, Renderable, SceneConfig, Vertex};

/// Stands in for a GPU. Projects a handful of uploaded vertices so the numbers can be eyeballed.
#[derive(Debug, Default)]
struct Report {
    positions: Vec<f32>,
    colours: Vec<f32>,
    mvp: Option<Matrix4<f32>>,
}

impl Renderable for Report {
    fn upload(&mut self, positions: &[f32], colours: &[f32]) {
        info!(
            "Uploaded {} position floats and {} colour floats ({} bytes interleaved).",
            positions.len(),
            colours.len(),
            positions.len() / 3 * Vertex::sizeof()
        );
        self.positions = positions.to_vec();
        self.colours = colours.to_vec();
    }

    fn set_mvp(&mut self, mvp: &[f32; 16]) {
        #[rustfmt::skip]
        let m = Matrix4::new(
            mvp[0], mvp[1], mvp[2], mvp[3],
            mvp[4], mvp[5], mvp[6], mvp[7],
            mvp[8], mvp[9], mvp[10], mvp[11],
            mvp[12], mvp[13], mvp[14], mvp[15],
        );
        self.mvp = Some(m);
    }

    fn draw(&mut self, vertex_count: usize) {
        info!("Drawing {} vertices as {} triangles.", vertex_count, vertex_count / 3);

        let mvp = match self.mvp {
            Some(mvp) => mvp,
            None => {
                warn!("Draw without an MVP.");
                return;
            }
        };

        for (p, c) in self.positions.chunks(3).zip(self.colours.chunks(3)).take(4) {
            let clip = mvp * Vector4::new(p[0], p[1], p[2], 1.0);
            let ndc = clip.truncate() / clip.w;
            println!(
                "({:>9.5}, {:>9.5}, {:>9.5}) -> ndc ({:>8.4}, {:>8.4}, {:>8.4}) rgb {:?}",
                p[0], p[1], p[2], ndc.x, ndc.y, ndc.z, c
            );
        }
    }
}

fn var<T>(key: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error + 'static,
{
    match env::var(key) {
        Ok(value) => Ok(Some(value.trim().parse::<T>()?)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let mut config = SceneConfig::default();
    if let Some(depth) = var("GASKET_DEPTH")? {
        config.depth = depth;
    }
    if let Some(width) = var("GASKET_WIDTH")? {
        config.width = width;
    }
    if let Some(height) = var("GASKET_HEIGHT")? {
        config.height = height;
    }

    let report = presentation::present(&config, Report::default())?;
    println!(
        "{} vertices at depth {}, viewport {}x{}.",
        report.positions.len() / 3,
        config.depth,
        config.width,
        config.height
    );

    Ok(())
}
