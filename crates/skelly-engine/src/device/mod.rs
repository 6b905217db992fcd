//! wgpu device and swapchain.
//!
//! - `Gpu`: instance/adapter/device/queue and the configured surface
//! - `GpuInit`: startup options
//! - `GpuFrame`: one acquired swapchain texture with its encoder

mod config;
mod frame;
mod gpu;
mod surface;

pub use config::GpuInit;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use surface::SurfaceErrorAction;
