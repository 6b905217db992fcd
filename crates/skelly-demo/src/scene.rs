//! The showcase scene: static ribbons, animated tentacles and one sprite.

use skelly_engine::coords::{ColorRgba, Vec2, Viewport};
use skelly_engine::input::{InputFrame, Key};
use skelly_engine::render::{RenderCtx, RenderTarget, Renderer};
use skelly_engine::scene::{
    Camera, Drawable, LineEntity, LineError, Sprite, Sway, SwayTarget, Tentacle, TentacleConfig,
    SPRITE_SHADER_NAME,
};

pub const SPRITE_TEXTURE: &str = "data/textures/chara_b.png";

pub const CLEAR_COLOR: ColorRgba = ColorRgba::new(0.5, 0.5, 0.5, 1.0);

pub struct DemoScene {
    camera: Camera,
    statics: Vec<Drawable>,
    tentacles: Vec<Tentacle>,
    paused: bool,
}

impl DemoScene {
    pub fn new(viewport: Viewport) -> Result<Self, LineError> {
        let mut tentacles = tentacles();
        for t in &mut tentacles {
            t.init()?;
        }

        Ok(Self {
            camera: Camera::ortho_centered(viewport),
            statics: static_lines()?,
            tentacles,
            paused: false,
        })
    }

    /// Space pauses the animation; R restarts it.
    pub fn update(&mut self, dt: f32, input: &InputFrame) -> Result<(), LineError> {
        if input.pressed(Key::Space) {
            self.paused = !self.paused;
            log::info!("animation {}", if self.paused { "paused" } else { "resumed" });
        }
        if input.pressed(Key::Letter('R')) {
            for t in &mut self.tentacles {
                t.init()?;
            }
            log::info!("animation restarted");
        }
        if self.paused {
            return Ok(());
        }

        for t in &mut self.tentacles {
            t.update(dt)?;
        }
        Ok(())
    }

    /// Loads the sprite texture and adds the sprite. A missing file only
    /// costs the sprite.
    pub fn attach_sprite(&mut self, renderer: &mut Renderer, ctx: &RenderCtx<'_>) {
        match renderer.load_texture(ctx, SPRITE_TEXTURE) {
            Ok(size) => {
                let mut sprite = Sprite::new("chara");
                sprite.init(SPRITE_TEXTURE, SPRITE_SHADER_NAME, size, None);
                sprite.transform.position = Vec2::new(-300.0, 120.0);
                sprite.transform.scale = Vec2::new(2.0, 2.0);
                sprite.alpha_blend = true;
                self.statics.push(sprite.into());
            }
            Err(err) => log::warn!("sprite disabled: {err}"),
        }
    }

    pub fn draw(&mut self, renderer: &mut Renderer, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.camera.fit_viewport(ctx.viewport);

        for item in &mut self.statics {
            renderer.draw(ctx, target, &self.camera, item);
        }
        for t in &mut self.tentacles {
            renderer.draw_line(ctx, target, &self.camera, t.line_mut());
        }
    }

    pub fn tentacles(&self) -> &[Tentacle] {
        &self.tentacles
    }

    pub fn statics(&self) -> &[Drawable] {
        &self.statics
    }
}

impl Drop for DemoScene {
    fn drop(&mut self) {
        for item in &mut self.statics {
            item.dispose();
        }
        for t in &mut self.tentacles {
            t.dispose();
        }
    }
}

fn static_lines() -> Result<Vec<Drawable>, LineError> {
    let mut segment = LineEntity::new("segment").with_width(15.0).with_color(ColorRgba::red());
    segment.create_segment(Vec2::new(-400.0, 0.0), Vec2::new(400.0, 0.0))?;

    let mut zigzag = LineEntity::new("zigzag")
        .with_width(6.0)
        .with_color(ColorRgba::new(1.0, 0.85, 0.2, 1.0));
    zigzag.create_polyline(&[
        Vec2::new(-440.0, -200.0),
        Vec2::new(-380.0, -140.0),
        Vec2::new(-320.0, -200.0),
        Vec2::new(-260.0, -140.0),
        Vec2::new(-200.0, -200.0),
    ])?;

    let mut arch = LineEntity::new("arch").with_width(4.0).with_color(ColorRgba::white());
    arch.create_quadratic_bezier(Vec2::new(-150.0, 150.0), Vec2::new(150.0, 150.0), Vec2::new(0.0, 260.0), 24)?;

    let mut wave = LineEntity::new("wave");
    wave.set_point_colors(
        (0..=32)
            .map(|i| ColorRgba::new(0.1, 0.3, 1.0, 1.0).lerp(ColorRgba::new(0.1, 1.0, 0.4, 0.2), i as f32 / 32.0))
            .collect(),
    );
    wave.set_width(8.0);
    wave.alpha_blend = true;
    wave.create_cubic_bezier(
        Vec2::new(150.0, -230.0),
        Vec2::new(450.0, -230.0),
        Vec2::new(250.0, -80.0),
        Vec2::new(350.0, -380.0),
        32,
    )?;

    Ok(vec![segment.into(), zigzag.into(), arch.into(), wave.into()])
}

fn tentacles() -> Vec<Tentacle> {
    let whip = Tentacle::new("whip", TentacleConfig::default());

    let tapered = Tentacle::new(
        "tapered",
        TentacleConfig {
            anchor_a: Vec2::new(-450.0, 250.0),
            anchor_b: Vec2::new(-100.0, 50.0),
            amplitude: 120.0,
            angular_speed: 3.0,
            width: 18.0,
            tip_width: Some(2.0),
            color: ColorRgba::new(0.6, 0.1, 0.6, 1.0),
            tip_color: Some(ColorRgba::new(1.0, 0.6, 0.9, 0.6)),
            ..TentacleConfig::default()
        },
    );

    let swaying = Tentacle::new(
        "swaying",
        TentacleConfig {
            anchor_a: Vec2::new(200.0, 250.0),
            anchor_b: Vec2::new(450.0, 100.0),
            amplitude: 80.0,
            width: 10.0,
            tip_width: Some(3.0),
            color: ColorRgba::new(0.1, 0.6, 0.5, 1.0),
            sway: Some(Sway {
                target: SwayTarget::B,
                amplitude: 60.0,
                angular_speed: 1.3,
            }),
            ..TentacleConfig::default()
        },
    );

    vec![whip, tapered, swaying]
}
