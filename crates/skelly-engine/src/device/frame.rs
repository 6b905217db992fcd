/// One acquired swapchain texture plus the encoder recording into it.
///
/// Submit promptly: holding the surface texture blocks the next acquire.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
