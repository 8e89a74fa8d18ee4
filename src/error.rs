//! Everything that can go wrong before a single vertex or matrix is handed out.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GasketError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GasketError {
    #[error("subdivision depth must not be negative, got {0}")]
    InvalidDepth(i64),

    #[error("subdivision depth {depth} exceeds the maximum of {max}")]
    DepthTooDeep { depth: u32, max: u32 },

    #[error(
        "degenerate projection ({reason}): fovy={fovy}deg aspect={aspect} near={near} far={far}"
    )]
    DegenerateProjection {
        reason: &'static str,
        fovy: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },

    #[error("degenerate camera: {0}")]
    DegenerateCamera(&'static str),
}
