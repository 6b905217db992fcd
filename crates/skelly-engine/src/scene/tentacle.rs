//! Tentacle animator.
//!
//! A tentacle is a cubic Bezier between two anchors `a` and `b`. Its two
//! control points hang off reference points at ratios `t1`/`t2` along the
//! `a → b` axis and are pushed along the axis normal by
//! `amplitude · cos(angular_speed · time)`, in opposite directions, which
//! gives the S-shaped whip. Anchors may additionally sway along the normal
//! of their rest axis.

use crate::coords::{ColorRgba, Vec2};

use super::{LineEntity, LineError};

/// Time offset applied on `init` so the first frame is already bent.
pub const INITIAL_TIME_BIAS: f32 = 0.15;

/// Which anchor(s) a sway applies to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwayTarget {
    A,
    B,
    Both,
}

/// Secondary anchor motion: `amplitude · sin(angular_speed · time)` along the
/// rest axis normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sway {
    pub target: SwayTarget,
    pub amplitude: f32,
    pub angular_speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TentacleConfig {
    pub anchor_a: Vec2,
    pub anchor_b: Vec2,
    /// Ratio along `a → b` of the first control point's reference.
    pub t1: f32,
    /// Ratio along `a → b` of the second control point's reference.
    pub t2: f32,
    pub amplitude: f32,
    /// Radians per second.
    pub angular_speed: f32,
    /// Curve subdivisions; the ribbon has `steps + 1` points.
    pub steps: u32,
    /// Offset from the centerline at the base.
    pub width: f32,
    /// Offset at the tip; `None` keeps the width uniform.
    pub tip_width: Option<f32>,
    pub color: ColorRgba,
    /// Color at the tip; `None` keeps the color uniform.
    pub tip_color: Option<ColorRgba>,
    pub sway: Option<Sway>,
}

impl Default for TentacleConfig {
    fn default() -> Self {
        Self {
            anchor_a: Vec2::new(0.0, -300.0),
            anchor_b: Vec2::new(400.0, 0.0),
            t1: 0.25,
            t2: 0.75,
            amplitude: 200.0,
            angular_speed: 2.0,
            steps: 32,
            width: 15.0,
            tip_width: None,
            color: ColorRgba::red(),
            tip_color: None,
            sway: None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TentacleState {
    Constructed,
    Initialized,
}

pub struct Tentacle {
    config: TentacleConfig,
    state: TentacleState,
    elapsed: f32,

    a: Vec2,
    b: Vec2,
    ref1: Vec2,
    ref2: Vec2,
    control1: Vec2,
    control2: Vec2,

    line: LineEntity,
}

impl Tentacle {
    pub fn new(name: impl Into<String>, config: TentacleConfig) -> Self {
        let a = config.anchor_a;
        let b = config.anchor_b;
        Self {
            config,
            state: TentacleState::Constructed,
            elapsed: 0.0,
            a,
            b,
            ref1: a,
            ref2: b,
            control1: a,
            control2: b,
            line: LineEntity::new(name),
        }
    }

    /// Applies the style, seeds the time bias and builds the first curve.
    ///
    /// GPU upload happens on the first draw.
    pub fn init(&mut self) -> Result<(), LineError> {
        let count = self.config.steps.max(1) as usize + 1;
        let cfg = &self.config;

        match cfg.tip_width {
            Some(tip) => self.line.set_point_widths(ramp(count, |t| cfg.width + (tip - cfg.width) * t)),
            None => self.line.set_width(cfg.width),
        }
        match cfg.tip_color {
            Some(tip) => self.line.set_point_colors(ramp(count, |t| cfg.color.lerp(tip, t))),
            None => self.line.set_color(cfg.color),
        }
        self.line.alpha_blend = cfg.color.a < 1.0 || cfg.tip_color.is_some_and(|c| c.a < 1.0);

        self.elapsed = INITIAL_TIME_BIAS;
        self.state = TentacleState::Initialized;
        log::debug!("tentacle `{}` initialized ({} points)", self.line.name, count);
        self.recompute()
    }

    /// Advances time by `dt` seconds and rebuilds the curve.
    ///
    /// Initializes first when called on a freshly constructed tentacle.
    pub fn update(&mut self, dt: f32) -> Result<(), LineError> {
        if self.state == TentacleState::Constructed {
            self.init()?;
        }
        self.elapsed += dt;
        self.recompute()
    }

    fn recompute(&mut self) -> Result<(), LineError> {
        let cfg = &self.config;
        let rest_normal = axis_normal(cfg.anchor_a, cfg.anchor_b);

        self.a = cfg.anchor_a;
        self.b = cfg.anchor_b;
        if let Some(sway) = cfg.sway {
            let shift = rest_normal * (sway.amplitude * (sway.angular_speed * self.elapsed).sin());
            match sway.target {
                SwayTarget::A => self.a = self.a + shift,
                SwayTarget::B => self.b = self.b + shift,
                SwayTarget::Both => {
                    self.a = self.a + shift;
                    self.b = self.b + shift;
                }
            }
        }

        self.ref1 = self.a.lerp(self.b, cfg.t1);
        self.ref2 = self.a.lerp(self.b, cfg.t2);

        let normal = axis_normal(self.a, self.b);
        let offset = normal * (cfg.amplitude * (cfg.angular_speed * self.elapsed).cos());
        self.control1 = self.ref1 + offset;
        self.control2 = self.ref2 - offset;

        let steps = cfg.steps;
        self.line
            .create_cubic_bezier(self.a, self.b, self.control1, self.control2, steps)
    }

    /// Releases the owned line's GPU resources.
    pub fn dispose(&mut self) {
        self.line.dispose();
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> TentacleState {
        self.state
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn anchors(&self) -> (Vec2, Vec2) {
        (self.a, self.b)
    }

    #[inline]
    pub fn reference_points(&self) -> (Vec2, Vec2) {
        (self.ref1, self.ref2)
    }

    #[inline]
    pub fn control_points(&self) -> (Vec2, Vec2) {
        (self.control1, self.control2)
    }

    #[inline]
    pub fn config(&self) -> &TentacleConfig {
        &self.config
    }

    #[inline]
    pub fn line(&self) -> &LineEntity {
        &self.line
    }

    #[inline]
    pub fn line_mut(&mut self) -> &mut LineEntity {
        &mut self.line
    }
}

/// Unit normal of `a → b`; `+Y` when the anchors coincide.
fn axis_normal(a: Vec2, b: Vec2) -> Vec2 {
    (b - a).try_normalize().unwrap_or(Vec2::new(1.0, 0.0)).perp()
}

fn ramp<T>(count: usize, f: impl Fn(f32) -> T) -> Vec<T> {
    let last = (count.max(2) - 1) as f32;
    (0..count).map(|i| f(i as f32 / last)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LineState;

    fn close(a: Vec2, b: Vec2, eps: f32) -> bool {
        (a - b).length() < eps
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn constructed_tentacle_has_no_geometry() {
        let t = Tentacle::new("t", TentacleConfig::default());
        assert_eq!(t.state(), TentacleState::Constructed);
        assert_eq!(t.line().state(), LineState::Uninitialized);
        assert!(t.line().mesh().is_empty());
    }

    #[test]
    fn init_builds_geometry_and_seeds_bias() {
        let mut t = Tentacle::new("t", TentacleConfig { steps: 20, ..TentacleConfig::default() });
        t.init().unwrap();
        assert_eq!(t.state(), TentacleState::Initialized);
        assert_eq!(t.elapsed(), INITIAL_TIME_BIAS);
        assert_eq!(t.line().state(), LineState::GeometryBuilt);
        assert_eq!(t.line().points().len(), 21);
        assert_eq!(t.line().mesh().index_count(), 6 * 20);
    }

    #[test]
    fn update_before_init_initializes() {
        let mut t = Tentacle::new("t", TentacleConfig::default());
        t.update(0.5).unwrap();
        assert_eq!(t.state(), TentacleState::Initialized);
        assert!((t.elapsed() - (INITIAL_TIME_BIAS + 0.5)).abs() < 1e-6);
    }

    // ── motion ────────────────────────────────────────────────────────────

    #[test]
    fn reference_points_sit_on_axis() {
        let mut t = Tentacle::new("t", TentacleConfig::default());
        t.init().unwrap();
        let (r1, r2) = t.reference_points();
        assert!(close(r1, Vec2::new(100.0, -225.0), 1e-4));
        assert!(close(r2, Vec2::new(300.0, -75.0), 1e-4));
    }

    #[test]
    fn control_points_match_recorded_baseline() {
        let mut t = Tentacle::new("t", TentacleConfig::default());
        t.init().unwrap();
        t.update(0.0).unwrap();

        // anchors (0,-300) -> (400,0), t1 0.25, t2 0.75, amplitude 200,
        // angular speed 2 rad/s, time 0.15 s
        let (c1, c2) = t.control_points();
        assert!(close(c1, Vec2::new(-14.640379, -72.146162), 1e-3), "c1 = {c1:?}");
        assert!(close(c2, Vec2::new(414.640379, -227.853838), 1e-3), "c2 = {c2:?}");
    }

    #[test]
    fn update_is_reproducible() {
        let run = || {
            let mut t = Tentacle::new("t", TentacleConfig::default());
            t.init().unwrap();
            for _ in 0..10 {
                t.update(1.0 / 60.0).unwrap();
            }
            (t.control_points(), t.line().mesh().vertices.clone())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn control_points_mirror_each_other() {
        let mut t = Tentacle::new("t", TentacleConfig::default());
        t.init().unwrap();
        t.update(0.7).unwrap();
        let (r1, r2) = t.reference_points();
        let (c1, c2) = t.control_points();
        assert!(close(c1 - r1, -(c2 - r2), 1e-4));
    }

    #[test]
    fn curve_endpoints_follow_anchors() {
        let mut t = Tentacle::new("t", TentacleConfig::default());
        t.update(0.3).unwrap();
        let pts = t.line().points();
        assert_eq!(pts[0], Vec2::new(0.0, -300.0));
        assert_eq!(*pts.last().unwrap(), Vec2::new(400.0, 0.0));
    }

    #[test]
    fn sway_moves_only_the_selected_anchor() {
        let cfg = TentacleConfig {
            anchor_a: Vec2::new(0.0, 0.0),
            anchor_b: Vec2::new(100.0, 0.0),
            sway: Some(Sway { target: SwayTarget::B, amplitude: 10.0, angular_speed: 1.0 }),
            ..TentacleConfig::default()
        };
        let mut t = Tentacle::new("t", cfg);
        t.init().unwrap();
        t.update(std::f32::consts::FRAC_PI_2 - INITIAL_TIME_BIAS).unwrap();

        let (a, b) = t.anchors();
        assert_eq!(a, Vec2::new(0.0, 0.0));
        assert!(close(b, Vec2::new(100.0, 10.0), 1e-3));
    }

    #[test]
    fn coincident_anchors_stay_finite() {
        let cfg = TentacleConfig {
            anchor_a: Vec2::new(5.0, 5.0),
            anchor_b: Vec2::new(5.0, 5.0),
            ..TentacleConfig::default()
        };
        let mut t = Tentacle::new("t", cfg);
        t.update(0.1).unwrap();
        assert!(t.line().mesh().vertices.iter().all(|v| v.is_finite()));
    }

    // ── style ─────────────────────────────────────────────────────────────

    #[test]
    fn tapered_style_ramps_width_and_color() {
        let cfg = TentacleConfig {
            steps: 4,
            width: 10.0,
            tip_width: Some(2.0),
            color: ColorRgba::red(),
            tip_color: Some(ColorRgba::red().with_alpha(0.0)),
            ..TentacleConfig::default()
        };
        let mut t = Tentacle::new("t", cfg);
        t.init().unwrap();
        assert_eq!(t.line().point_widths(), &[10.0, 8.0, 6.0, 4.0, 2.0]);
        assert_eq!(t.line().point_colors()[4].a, 0.0);
        assert!(t.line().alpha_blend);
    }
}
