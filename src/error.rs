use thiserror::Error;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid scene descriptor `{key}`: {reason}")]
    InvalidDescriptor { key: String, reason: String },

    #[error("scene `{0}` is registered more than once")]
    DuplicateScene(String),

    #[error("unknown scene `{0}`")]
    UnknownScene(String),

    #[error("scene `{key}` references unknown visualization `{visual}`")]
    UnknownVisual { key: String, visual: String },
}
