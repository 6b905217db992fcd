//! Tentacle showcase.
//!
//! Space pauses, R restarts, Escape quits. Set `RUST_LOG=debug` to follow
//! buffer allocation and lifecycle transitions.

mod scene;

use skelly_engine::core::{App, AppControl, FrameCtx};
use skelly_engine::device::GpuInit;
use skelly_engine::logging::{init_logging, LoggingConfig};
use skelly_engine::render::Renderer;
use skelly_engine::window::{Runtime, RuntimeConfig};

use scene::{DemoScene, CLEAR_COLOR};

struct Demo {
    scene: DemoScene,
    /// Created on the first frame, once a device exists.
    renderer: Option<Renderer>,
}

impl App for Demo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Err(err) = self.scene.update(ctx.time.dt, ctx.input_frame) {
            log::error!("scene update failed: {err}");
            return AppControl::Exit;
        }

        let (scene, renderer) = (&mut self.scene, &mut self.renderer);
        ctx.render(CLEAR_COLOR, |rctx, target| {
            let renderer = renderer.get_or_insert_with(|| {
                let mut r = Renderer::new(rctx.device);
                scene.attach_sprite(&mut r, rctx);
                r
            });
            scene.draw(renderer, rctx, target);
        })
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::default();
    let viewport = skelly_engine::coords::Viewport::new(
        config.initial_size.width as f32,
        config.initial_size.height as f32,
    );
    let scene = DemoScene::new(viewport)?;
    log::info!("scene ready: {} tentacles", scene.tentacles().len());

    Runtime::run(config, GpuInit::default(), Demo { scene, renderer: None })
}
