//! Ribbon (thick polyline) triangulation.
//!
//! For `N` centerline points the builder emits `2N` vertices, one offset pair
//! per point, and `N - 1` quads of two triangles each. Interior points use a
//! miter join so that both ribbon edges stay parallel to their segments.
//!
//! Buffer layout (flat, ready for upload):
//! - `vertices`: `[x, y]` per vertex
//! - `colors`:   `[r, g, b, a]` per vertex
//! - `uvs`:      `[u, v]` per vertex (`u` runs 0..1 along the point index, `v` is 0/1 across)
//! - `indices`:  `u32`, 6 per quad

use thiserror::Error;

use crate::coords::{ColorRgba, Vec2};

pub const FLOATS_PER_VERTEX: usize = 2;
pub const FLOATS_PER_COLOR: usize = 4;
pub const FLOATS_PER_UV: usize = 2;
pub const INDICES_PER_QUAD: usize = 6;

/// Upper bound on miter length as a multiple of the point width.
///
/// Joins sharper than this drop the miter and use the outgoing segment's
/// normal at plain width.
pub const MITER_LIMIT: f32 = 4.0;

/// Squared length of `d_in + d_out` below which a join counts as a full reversal.
const REVERSAL_EPSILON: f32 = 1e-6;

/// Malformed ribbon input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RibbonError {
    #[error("ribbon has {points} points but {widths} widths")]
    WidthCountMismatch { points: usize, widths: usize },

    #[error("ribbon has {points} points but {colors} colors")]
    ColorCountMismatch { points: usize, colors: usize },
}

/// Element counts of a built mesh; equal sizes mean GPU buffers can be
/// overwritten in place.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MeshSizes {
    pub vertices: usize,
    pub indices: usize,
}

/// CPU-side ribbon buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonMesh {
    pub vertices: Vec<f32>,
    pub colors: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

impl RibbonMesh {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all buffers, keeping their capacity.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.colors.clear();
        self.uvs.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn sizes(&self) -> MeshSizes {
        MeshSizes {
            vertices: self.vertex_count(),
            indices: self.index_count(),
        }
    }

    /// Position of vertex `i`, if present.
    pub fn vertex(&self, i: usize) -> Option<Vec2> {
        let base = i * FLOATS_PER_VERTEX;
        match self.vertices.get(base..base + FLOATS_PER_VERTEX) {
            Some(&[x, y]) => Some(Vec2::new(x, y)),
            _ => None,
        }
    }
}

/// Rebuilds `out` from a centerline.
///
/// `widths[i]` is the offset from the centerline on each side of point `i`
/// (half the visual thickness). `colors[i]` is copied to both vertices of
/// point `i`.
///
/// Fewer than two points produce empty buffers. Width and color slices must
/// match the point count.
pub fn build_ribbon(
    points: &[Vec2],
    widths: &[f32],
    colors: &[ColorRgba],
    out: &mut RibbonMesh,
) -> Result<(), RibbonError> {
    out.clear();

    let n = points.len();
    if n < 2 {
        return Ok(());
    }
    if widths.len() != n {
        return Err(RibbonError::WidthCountMismatch { points: n, widths: widths.len() });
    }
    if colors.len() != n {
        return Err(RibbonError::ColorCountMismatch { points: n, colors: colors.len() });
    }

    let dirs = segment_directions(points);

    out.vertices.reserve(2 * n * FLOATS_PER_VERTEX);
    out.colors.reserve(2 * n * FLOATS_PER_COLOR);
    out.uvs.reserve(2 * n * FLOATS_PER_UV);
    out.indices.reserve((n - 1) * INDICES_PER_QUAD);

    let last = n - 1;
    for (i, (&p, (&w, &c))) in points.iter().zip(widths.iter().zip(colors)).enumerate() {
        let offset = if i == 0 {
            dirs[0].perp() * w
        } else if i == last {
            dirs[last - 1].perp() * w
        } else {
            miter_offset(dirs[i - 1], dirs[i], w)
        };

        let left = p + offset;
        let right = p - offset;
        out.vertices.extend_from_slice(&[left.x, left.y, right.x, right.y]);

        let rgba = c.to_array();
        out.colors.extend_from_slice(&rgba);
        out.colors.extend_from_slice(&rgba);

        let u = i as f32 / last as f32;
        out.uvs.extend_from_slice(&[u, 0.0, u, 1.0]);
    }

    for quad in 0..last as u32 {
        let base = quad * 2;
        out.indices.extend_from_slice(&[
            base + 1,
            base + 2,
            base,
            base + 1,
            base + 3,
            base + 2,
        ]);
    }

    Ok(())
}

/// Offset for an interior point joining incoming `d_in` and outgoing `d_out`
/// (both unit length).
///
/// The miter direction is the perpendicular of the averaged tangent; its
/// length is `width / cos(half turn angle)`. Past [`MITER_LIMIT`] the bisector
/// runs almost along the segments and would pinch the ribbon, so such joins
/// (and full reversals) fall back to the outgoing segment's normal.
fn miter_offset(d_in: Vec2, d_out: Vec2, width: f32) -> Vec2 {
    let out_normal = d_out.perp();
    let tangent_sum = d_in + d_out;
    if tangent_sum.length_squared() < REVERSAL_EPSILON {
        return out_normal * width;
    }
    let Some(tangent) = tangent_sum.try_normalize() else {
        return out_normal * width;
    };

    let miter = tangent.perp();
    let cos_half = miter.dot(out_normal);
    if cos_half < 1.0 / MITER_LIMIT {
        return out_normal * width;
    }
    miter * (width / cos_half)
}

/// Unit direction of every segment. Zero-length segments borrow the
/// direction of the previous valid segment (or the next one when no previous
/// exists); a polyline with no valid segment at all runs along +X.
fn segment_directions(points: &[Vec2]) -> Vec<Vec2> {
    let raw: Vec<Option<Vec2>> = points
        .windows(2)
        .map(|w| (w[1] - w[0]).try_normalize())
        .collect();

    let mut prev = raw
        .iter()
        .flatten()
        .next()
        .copied()
        .unwrap_or(Vec2::new(1.0, 0.0));

    raw.into_iter()
        .map(|d| {
            let d = d.unwrap_or(prev);
            prev = d;
            d
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(points: &[Vec2], width: f32) -> RibbonMesh {
        let widths = vec![width; points.len()];
        let colors = vec![ColorRgba::red(); points.len()];
        let mut mesh = RibbonMesh::new();
        build_ribbon(points, &widths, &colors, &mut mesh).unwrap();
        mesh
    }

    fn all_finite(mesh: &RibbonMesh) -> bool {
        mesh.vertices.iter().all(|v| v.is_finite())
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn buffer_sizes_follow_point_count() {
        for k in 2..12usize {
            let pts: Vec<Vec2> = (0..k).map(|i| Vec2::new(i as f32 * 3.0, (i * i) as f32)).collect();
            let mesh = uniform(&pts, 2.0);
            assert_eq!(mesh.vertex_count(), 2 * k);
            assert_eq!(mesh.colors.len(), 2 * k * FLOATS_PER_COLOR);
            assert_eq!(mesh.uvs.len(), 2 * k * FLOATS_PER_UV);
            assert_eq!(mesh.index_count(), 6 * (k - 1));
            assert!(mesh.indices.iter().all(|&i| (i as usize) < 2 * k));
        }
    }

    #[test]
    fn fewer_than_two_points_is_empty() {
        let mut mesh = uniform(&[Vec2::zero(), Vec2::new(1.0, 0.0)], 1.0);
        assert!(!mesh.is_empty());

        build_ribbon(&[Vec2::zero()], &[1.0], &[ColorRgba::white()], &mut mesh).unwrap();
        assert!(mesh.is_empty());
        assert!(mesh.vertices.is_empty());

        build_ribbon(&[], &[], &[], &mut mesh).unwrap();
        assert_eq!(mesh, RibbonMesh::default());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let pts = [Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        let mut mesh = RibbonMesh::new();

        let err = build_ribbon(&pts, &[1.0, 1.0], &[ColorRgba::white(); 3], &mut mesh).unwrap_err();
        assert_eq!(err, RibbonError::WidthCountMismatch { points: 3, widths: 2 });

        let err = build_ribbon(&pts, &[1.0; 3], &[ColorRgba::white(); 4], &mut mesh).unwrap_err();
        assert_eq!(err, RibbonError::ColorCountMismatch { points: 3, colors: 4 });
        assert!(mesh.is_empty());
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn single_segment_scenario() {
        let mesh = uniform(&[Vec2::new(-400.0, 0.0), Vec2::new(400.0, 0.0)], 15.0);
        assert_eq!(
            mesh.vertices,
            vec![-400.0, 15.0, -400.0, -15.0, 400.0, 15.0, 400.0, -15.0]
        );
        assert_eq!(mesh.indices, vec![1, 2, 0, 1, 3, 2]);
        assert_eq!(&mesh.colors[..4], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(&mesh.colors[12..], &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn straight_polyline_offsets_equal_width() {
        let pts: Vec<Vec2> = (0..6).map(|i| Vec2::new(i as f32 * 2.0, i as f32)).collect();
        let w = 3.5;
        let mesh = uniform(&pts, w);
        for (i, p) in pts.iter().enumerate() {
            let left = mesh.vertex(2 * i).unwrap();
            let right = mesh.vertex(2 * i + 1).unwrap();
            assert!(approx((left - *p).length(), w), "left offset at {i}");
            assert!(approx((right - *p).length(), w), "right offset at {i}");
        }
    }

    #[test]
    fn right_angle_miter_is_sqrt2() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let mesh = uniform(&pts, 1.0);
        let left = mesh.vertex(2).unwrap();
        let right = mesh.vertex(3).unwrap();
        assert!(approx((left - pts[1]).length(), 2f32.sqrt()));
        assert!(approx(left.x, 9.0) && approx(left.y, 1.0));
        assert!(approx(right.x, 11.0) && approx(right.y, -1.0));
    }

    #[test]
    fn miter_length_matches_half_angle_identity() {
        // 60° turn: miter = w / cos(30°)
        let turn = 60f32.to_radians();
        let pts = [
            Vec2::new(-10.0, 0.0),
            Vec2::zero(),
            Vec2::new(10.0 * turn.cos(), 10.0 * turn.sin()),
        ];
        let mesh = uniform(&pts, 2.0);
        let len = (mesh.vertex(2).unwrap() - pts[1]).length();
        assert!(approx(len, 2.0 / (turn * 0.5).cos()));
    }

    #[test]
    fn sharp_turn_is_clamped_by_miter_limit() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.5)];
        let mesh = uniform(&pts, 1.0);
        assert!(all_finite(&mesh));
        let len = (mesh.vertex(2).unwrap() - pts[1]).length();
        assert!(len <= MITER_LIMIT + 1e-4);
    }

    #[test]
    fn hairpin_keeps_full_thickness() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.05)];
        let mesh = uniform(&pts, 1.0);
        assert!(all_finite(&mesh));
        let left = mesh.vertex(2).unwrap();
        let right = mesh.vertex(3).unwrap();
        assert!(approx((left - right).length(), 2.0));
        assert!(approx((left - pts[1]).length(), 1.0));
    }

    #[test]
    fn join_at_the_limit_still_mitres() {
        // cos(half turn) = 0.3 stays above 1 / MITER_LIMIT.
        let turn = 2.0 * 0.3f32.acos();
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0 + 10.0 * turn.cos(), 10.0 * turn.sin())];
        let mesh = uniform(&pts, 1.0);
        let len = (mesh.vertex(2).unwrap() - pts[1]).length();
        assert!((len - 1.0 / 0.3).abs() < 1e-3);
    }

    #[test]
    fn reversal_falls_back_to_segment_normal() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.0)];
        let mesh = uniform(&pts, 1.0);
        assert!(all_finite(&mesh));
        assert!(approx((mesh.vertex(2).unwrap() - pts[1]).length(), 1.0));
    }

    #[test]
    fn zero_length_segments_do_not_produce_nan() {
        let p = Vec2::new(5.0, 5.0);
        let mesh = uniform(&[p, p, Vec2::new(5.0, 9.0), Vec2::new(5.0, 9.0)], 1.0);
        assert!(all_finite(&mesh));
        // The duplicate start borrows the vertical direction of the next segment.
        assert_eq!(mesh.vertex(0), Some(Vec2::new(4.0, 5.0)));

        let mesh = uniform(&[p, p, p], 2.0);
        assert!(all_finite(&mesh));
        assert_eq!(mesh.vertex(0), Some(Vec2::new(5.0, 7.0)));
    }

    // ── colors / uvs ──────────────────────────────────────────────────────

    #[test]
    fn per_point_colors_are_duplicated_per_pair() {
        let pts = [Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        let colors = [
            ColorRgba::new(1.0, 0.0, 0.0, 1.0),
            ColorRgba::new(0.0, 1.0, 0.0, 1.0),
            ColorRgba::new(0.0, 0.0, 1.0, 0.5),
        ];
        let mut mesh = RibbonMesh::new();
        build_ribbon(&pts, &[1.0; 3], &colors, &mut mesh).unwrap();
        for (i, c) in colors.iter().enumerate() {
            let base = i * 2 * FLOATS_PER_COLOR;
            assert_eq!(&mesh.colors[base..base + 4], &c.to_array());
            assert_eq!(&mesh.colors[base + 4..base + 8], &c.to_array());
        }
    }

    #[test]
    fn uvs_span_the_ribbon() {
        let mesh = uniform(&[Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)], 1.0);
        assert_eq!(mesh.uvs, vec![0.0, 0.0, 0.0, 1.0, 0.5, 0.0, 0.5, 1.0, 1.0, 0.0, 1.0, 1.0]);
    }

    // ── determinism ───────────────────────────────────────────────────────

    #[test]
    fn rebuilding_is_bit_identical() {
        let pts: Vec<Vec2> = (0..20)
            .map(|i| {
                let t = i as f32 * 0.37;
                Vec2::new(t.cos() * 50.0 + i as f32, t.sin() * 30.0)
            })
            .collect();
        let widths: Vec<f32> = (0..20).map(|i| 1.0 + i as f32 * 0.25).collect();
        let colors = vec![ColorRgba::white(); 20];

        let mut first = RibbonMesh::new();
        let mut second = RibbonMesh::new();
        build_ribbon(&pts, &widths, &colors, &mut first).unwrap();
        build_ribbon(&pts, &widths, &colors, &mut second).unwrap();

        let bits = |m: &RibbonMesh| m.vertices.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first.indices, second.indices);
        assert_eq!(first.colors, second.colors);
    }
}
