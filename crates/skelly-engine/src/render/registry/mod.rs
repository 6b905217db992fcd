//! Name-keyed GPU resource tables.
//!
//! Both registries are owned by the `Renderer` and live as long as the render
//! session. A failed lookup is a `RegistryError`, never a panic.

mod error;
mod shader;
mod texture;

pub use error::RegistryError;
pub use shader::{ShaderKind, ShaderRegistry};
pub use texture::{GpuTexture, TextureRegistry};
