use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures at the edges of the engine: configuration input and the
/// graphics backend. Generation and per-frame updates cannot fail.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("YAML parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("graphics backend error: {0}")]
    Graphics(String),
}

impl SceneError {
    pub fn graphics(msg: impl Into<String>) -> Self {
        SceneError::Graphics(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        SceneError::InvalidConfig(msg.into())
    }
}

impl From<SceneError> for JsValue {
    fn from(err: SceneError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
