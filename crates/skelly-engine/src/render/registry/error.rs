use std::path::PathBuf;

use thiserror::Error;

use super::ShaderKind;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("shader `{0}` is not registered")]
    ShaderNotFound(String),

    #[error("shader `{name}` is a {found:?} shader, expected {expected:?}")]
    ShaderKindMismatch {
        name: String,
        expected: ShaderKind,
        found: ShaderKind,
    },

    #[error("failed to read shader source {}", path.display())]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("texture `{0}` is not loaded")]
    TextureNotFound(String),

    #[error("failed to load texture {path}")]
    TextureLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },
}
