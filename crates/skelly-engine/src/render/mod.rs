//! wgpu render backend.
//!
//! The scene layer produces CPU-side meshes; this module owns everything that
//! touches the GPU: per-entity buffers, the shader and texture registries and
//! the `Renderer` that encodes draws.
//!
//! Convention:
//! - geometry is in world units; the camera's view-projection and the
//!   entity's model matrix are combined into one MVP uniform per entity
//! - every draw opens its own render pass with `LoadOp::Load`, so draw order
//!   is call order

mod common;
mod ctx;
pub mod line;
pub mod registry;
mod renderer;
pub mod sprite;

pub(crate) use common::target_clear;
pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::Renderer;
