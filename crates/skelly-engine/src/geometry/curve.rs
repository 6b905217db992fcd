//! Bezier curve sampling.
//!
//! Both samplers evaluate the curve with de Casteljau interpolation at
//! `t = i / steps` for `i = 0..=steps`. The endpoints are pushed verbatim so
//! that the first and last samples are bit-exact copies of the inputs.

use crate::coords::Vec2;

/// Point on the quadratic curve `a → control → b` at parameter `t`.
#[inline]
pub fn quadratic_point(a: Vec2, b: Vec2, control: Vec2, t: f32) -> Vec2 {
    let p0 = a.lerp(control, t);
    let p1 = control.lerp(b, t);
    p0.lerp(p1, t)
}

/// Point on the cubic curve `a → c1 → c2 → b` at parameter `t`.
#[inline]
pub fn cubic_point(a: Vec2, b: Vec2, c1: Vec2, c2: Vec2, t: f32) -> Vec2 {
    let p0 = a.lerp(c1, t);
    let p1 = c1.lerp(c2, t);
    let p2 = c2.lerp(b, t);

    let q0 = p0.lerp(p1, t);
    let q1 = p1.lerp(p2, t);
    q0.lerp(q1, t)
}

/// Samples a quadratic Bezier into `out` (cleared first).
///
/// Produces `steps + 1` points. `steps == 0` is treated as `1`.
pub fn sample_quadratic(a: Vec2, b: Vec2, control: Vec2, steps: u32, out: &mut Vec<Vec2>) {
    sample_with(a, b, steps, out, |t| quadratic_point(a, b, control, t));
}

/// Samples a cubic Bezier into `out` (cleared first).
///
/// Produces `steps + 1` points. `steps == 0` is treated as `1`.
pub fn sample_cubic(a: Vec2, b: Vec2, c1: Vec2, c2: Vec2, steps: u32, out: &mut Vec<Vec2>) {
    sample_with(a, b, steps, out, |t| cubic_point(a, b, c1, c2, t));
}

/// Allocating form of [`sample_quadratic`].
pub fn quadratic_bezier(a: Vec2, b: Vec2, control: Vec2, steps: u32) -> Vec<Vec2> {
    let mut points = Vec::new();
    sample_quadratic(a, b, control, steps, &mut points);
    points
}

/// Allocating form of [`sample_cubic`].
pub fn cubic_bezier(a: Vec2, b: Vec2, c1: Vec2, c2: Vec2, steps: u32) -> Vec<Vec2> {
    let mut points = Vec::new();
    sample_cubic(a, b, c1, c2, steps, &mut points);
    points
}

fn sample_with<F>(a: Vec2, b: Vec2, steps: u32, out: &mut Vec<Vec2>, eval: F)
where
    F: Fn(f32) -> Vec2,
{
    let steps = steps.max(1);
    let delta = 1.0 / steps as f32;

    out.clear();
    out.reserve(steps as usize + 1);
    out.push(a);
    for i in 1..steps {
        out.push(eval(i as f32 * delta));
    }
    out.push(b);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    // ── sample counts / endpoints ─────────────────────────────────────────

    #[test]
    fn quadratic_has_steps_plus_one_points() {
        for steps in [1, 2, 7, 32] {
            let pts = quadratic_bezier(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 8.0), steps);
            assert_eq!(pts.len(), steps as usize + 1);
        }
    }

    #[test]
    fn cubic_endpoints_are_exact() {
        let a = Vec2::new(0.1, -300.3);
        let b = Vec2::new(400.7, 0.9);
        let pts = cubic_bezier(a, b, Vec2::new(-10.0, 50.0), Vec2::new(300.0, -20.0), 13);
        assert_eq!(pts.len(), 14);
        assert_eq!(pts[0], a);
        assert_eq!(pts[13], b);
    }

    #[test]
    fn zero_steps_behaves_like_one() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        let pts = quadratic_bezier(a, b, Vec2::zero(), 0);
        assert_eq!(pts, vec![a, b]);
    }

    #[test]
    fn sampling_reuses_output_buffer() {
        let mut out = vec![Vec2::new(99.0, 99.0); 40];
        sample_cubic(Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::zero(), Vec2::new(1.0, 0.0), 4, &mut out);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], Vec2::zero());
    }

    // ── curve values ──────────────────────────────────────────────────────

    #[test]
    fn quadratic_midpoint_matches_closed_form() {
        // B(0.5) = 0.25 a + 0.5 c + 0.25 b
        let a = Vec2::new(0.0, 0.0);
        let c = Vec2::new(5.0, 10.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(close(quadratic_point(a, b, c, 0.5), Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn cubic_matches_bernstein_form() {
        let a = Vec2::new(0.0, 0.0);
        let c1 = Vec2::new(0.0, 10.0);
        let c2 = Vec2::new(10.0, 10.0);
        let b = Vec2::new(10.0, 0.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let u = 1.0 - t;
            let expected = a * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + b * (t * t * t);
            assert!(close(cubic_point(a, b, c1, c2, t), expected), "t = {t}");
        }
    }

    #[test]
    fn colinear_controls_stay_on_line() {
        let pts = cubic_bezier(Vec2::zero(), Vec2::new(9.0, 0.0), Vec2::new(3.0, 0.0), Vec2::new(6.0, 0.0), 9);
        for (i, p) in pts.iter().enumerate() {
            assert!(p.y.abs() < 1e-6);
            assert!((p.x - i as f32).abs() < 1e-4);
        }
    }
}
