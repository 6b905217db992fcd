//! Line entity: one ribbon's centerline, style, transform and GPU lifecycle.
//!
//! Lifecycle:
//! `Uninitialized → GeometryBuilt → Uploaded → (GeometryBuilt → Uploaded)* → Disposed`
//!
//! Every geometry change rebuilds the CPU mesh and returns the entity to
//! `GeometryBuilt`. The next upload either overwrites the existing GPU
//! buffers (same element counts) or reallocates them (point count changed).

use thiserror::Error;

use crate::coords::{ColorRgba, Vec2};
use crate::geometry::curve::{sample_cubic, sample_quadratic};
use crate::geometry::ribbon::{build_ribbon, MeshSizes, RibbonError, RibbonMesh};
use crate::render::line::RibbonGpu;
use crate::render::RenderCtx;

use super::Transform2D;

/// Registry name of the built-in ribbon shader.
pub const LINE_SHADER_NAME: &str = "lines_default";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LineState {
    Uninitialized,
    GeometryBuilt,
    Uploaded,
    Disposed,
}

/// What the next upload has to do to bring GPU buffers in line with the mesh.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UploadPlan {
    /// GPU copy is current, or there is nothing drawable to upload.
    Nothing,
    /// First upload: create buffers.
    Allocate,
    /// Same element counts: overwrite buffer contents.
    WriteInPlace,
    /// Element counts changed: drop old buffers and create new ones.
    Reallocate,
}

impl UploadPlan {
    /// Adjusts the plan to the buffers actually held: writing in place needs
    /// existing buffers, so without them it becomes an allocation.
    pub fn given_buffers(self, has_buffers: bool) -> Self {
        match self {
            UploadPlan::WriteInPlace if !has_buffers => UploadPlan::Allocate,
            plan => plan,
        }
    }
}

#[derive(Debug, Error)]
pub enum LineError {
    #[error("line `{0}` has been disposed")]
    Disposed(String),

    #[error(transparent)]
    Ribbon(#[from] RibbonError),
}

/// Per-point attribute source.
///
/// `Uniform` is re-broadcast to the current point count on every rebuild.
/// `PerPoint` must already match the point count; resizing it is the
/// caller's job.
#[derive(Debug, Clone, PartialEq)]
pub enum PointValues<T> {
    Uniform(T),
    PerPoint(Vec<T>),
}

impl<T: Copy> PointValues<T> {
    fn expand_into(&self, count: usize, out: &mut Vec<T>) {
        out.clear();
        match self {
            PointValues::Uniform(v) => out.resize(count, *v),
            PointValues::PerPoint(values) => out.extend_from_slice(values),
        }
    }
}

pub struct LineEntity {
    pub name: String,
    pub shader_name: String,
    pub transform: Transform2D,
    pub alpha_blend: bool,

    widths: PointValues<f32>,
    colors: PointValues<ColorRgba>,

    points: Vec<Vec2>,
    point_widths: Vec<f32>,
    point_colors: Vec<ColorRgba>,
    mesh: RibbonMesh,

    state: LineState,
    allocated: Option<MeshSizes>,
    gpu: Option<RibbonGpu>,
}

impl LineEntity {
    /// Creates an empty line: width 1, opaque white, default shader.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shader_name: LINE_SHADER_NAME.to_string(),
            transform: Transform2D::default(),
            alpha_blend: false,
            widths: PointValues::Uniform(1.0),
            colors: PointValues::Uniform(ColorRgba::white()),
            points: Vec::new(),
            point_widths: Vec::new(),
            point_colors: Vec::new(),
            mesh: RibbonMesh::new(),
            state: LineState::Uninitialized,
            allocated: None,
            gpu: None,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.set_width(width);
        self
    }

    pub fn with_color(mut self, color: ColorRgba) -> Self {
        self.set_color(color);
        self
    }

    // ── style ─────────────────────────────────────────────────────────────
    //
    // Style setters only record the policy; call `rebuild` (or any geometry
    // constructor) to apply it.

    pub fn set_width(&mut self, width: f32) {
        self.widths = PointValues::Uniform(width);
    }

    pub fn set_point_widths(&mut self, widths: Vec<f32>) {
        self.widths = PointValues::PerPoint(widths);
    }

    pub fn set_color(&mut self, color: ColorRgba) {
        self.colors = PointValues::Uniform(color);
    }

    pub fn set_point_colors(&mut self, colors: Vec<ColorRgba>) {
        self.colors = PointValues::PerPoint(colors);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Single straight segment `a → b`.
    pub fn create_segment(&mut self, a: Vec2, b: Vec2) -> Result<(), LineError> {
        self.ensure_live()?;
        self.points.clear();
        self.points.extend_from_slice(&[a, b]);
        self.rebuild()
    }

    pub fn create_polyline(&mut self, points: &[Vec2]) -> Result<(), LineError> {
        self.ensure_live()?;
        self.points.clear();
        self.points.extend_from_slice(points);
        self.rebuild()
    }

    pub fn create_quadratic_bezier(
        &mut self,
        a: Vec2,
        b: Vec2,
        control: Vec2,
        steps: u32,
    ) -> Result<(), LineError> {
        self.ensure_live()?;
        sample_quadratic(a, b, control, steps, &mut self.points);
        self.rebuild()
    }

    pub fn create_cubic_bezier(
        &mut self,
        a: Vec2,
        b: Vec2,
        control1: Vec2,
        control2: Vec2,
        steps: u32,
    ) -> Result<(), LineError> {
        self.ensure_live()?;
        sample_cubic(a, b, control1, control2, steps, &mut self.points);
        self.rebuild()
    }

    /// Appends points to the centerline and rebuilds.
    pub fn add_points(&mut self, points: &[Vec2]) -> Result<(), LineError> {
        self.ensure_live()?;
        self.points.extend_from_slice(points);
        self.rebuild()
    }

    /// Rebuilds the mesh from the current points and style.
    ///
    /// On error the mesh is left empty and the entity still counts as
    /// rebuilt, so a stale GPU copy is never drawn as if it were current.
    pub fn rebuild(&mut self) -> Result<(), LineError> {
        self.ensure_live()?;

        let n = self.points.len();
        self.widths.expand_into(n, &mut self.point_widths);
        self.colors.expand_into(n, &mut self.point_colors);

        self.state = LineState::GeometryBuilt;
        build_ribbon(&self.points, &self.point_widths, &self.point_colors, &mut self.mesh)?;

        log::trace!(
            "line `{}` rebuilt: {} points, {} indices",
            self.name,
            n,
            self.mesh.index_count()
        );
        Ok(())
    }

    // ── GPU lifecycle ─────────────────────────────────────────────────────

    /// Decides how the next upload must treat the GPU buffers.
    pub fn upload_plan(&self) -> UploadPlan {
        if self.state != LineState::GeometryBuilt || self.mesh.is_empty() {
            return UploadPlan::Nothing;
        }
        match self.allocated {
            None => UploadPlan::Allocate,
            Some(sizes) if sizes == self.mesh.sizes() => UploadPlan::WriteInPlace,
            Some(_) => UploadPlan::Reallocate,
        }
    }

    /// Brings the GPU copy up to date with the CPU mesh.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, layout: &wgpu::BindGroupLayout) -> Result<(), LineError> {
        self.ensure_live()?;

        let planned = self.upload_plan();
        let plan = planned.given_buffers(self.gpu.is_some());
        match plan {
            UploadPlan::Nothing => return Ok(()),
            UploadPlan::Allocate => {
                if planned == UploadPlan::WriteInPlace {
                    log::debug!("line `{}`: GPU buffers missing, allocating", self.name);
                } else {
                    log::debug!("line `{}`: allocating GPU buffers", self.name);
                }
                self.gpu = Some(RibbonGpu::allocate(ctx, layout, &self.mesh, &self.name));
            }
            UploadPlan::WriteInPlace => {
                if let Some(gpu) = self.gpu.as_ref() {
                    gpu.write(ctx, &self.mesh);
                }
            }
            UploadPlan::Reallocate => {
                log::debug!(
                    "line `{}`: point count changed, reallocating GPU buffers ({:?} -> {:?})",
                    self.name,
                    self.allocated,
                    self.mesh.sizes()
                );
                if let Some(old) = self.gpu.take() {
                    old.destroy();
                }
                self.gpu = Some(RibbonGpu::allocate(ctx, layout, &self.mesh, &self.name));
            }
        }

        self.mark_uploaded();
        Ok(())
    }

    fn mark_uploaded(&mut self) {
        self.allocated = Some(self.mesh.sizes());
        self.state = LineState::Uploaded;
    }

    /// Releases GPU resources and CPU buffers. Terminal.
    pub fn dispose(&mut self) {
        if self.state == LineState::Disposed {
            return;
        }
        if let Some(gpu) = self.gpu.take() {
            gpu.destroy();
        }
        self.points.clear();
        self.point_widths.clear();
        self.point_colors.clear();
        self.mesh.clear();
        self.allocated = None;
        self.state = LineState::Disposed;
        log::debug!("line `{}` disposed", self.name);
    }

    fn ensure_live(&self) -> Result<(), LineError> {
        if self.state == LineState::Disposed {
            Err(LineError::Disposed(self.name.clone()))
        } else {
            Ok(())
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> LineState {
        self.state
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn point_widths(&self) -> &[f32] {
        &self.point_widths
    }

    #[inline]
    pub fn point_colors(&self) -> &[ColorRgba] {
        &self.point_colors
    }

    #[inline]
    pub fn mesh(&self) -> &RibbonMesh {
        &self.mesh
    }

    #[inline]
    pub fn model_matrix(&self) -> glam::Mat4 {
        self.transform.model_matrix()
    }

    /// GPU buffers, present once uploaded and until disposed.
    #[inline]
    pub(crate) fn gpu(&self) -> Option<&RibbonGpu> {
        self.gpu.as_ref()
    }

    #[cfg(test)]
    fn fake_upload(&mut self) {
        if self.upload_plan() != UploadPlan::Nothing {
            self.mark_uploaded();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_line() -> LineEntity {
        LineEntity::new("test").with_width(15.0).with_color(ColorRgba::red())
    }

    // ── constructors ──────────────────────────────────────────────────────

    #[test]
    fn new_line_is_uninitialized_and_empty() {
        let line = LineEntity::new("empty");
        assert_eq!(line.state(), LineState::Uninitialized);
        assert!(line.mesh().is_empty());
        assert_eq!(line.shader_name, LINE_SHADER_NAME);
        assert_eq!(line.upload_plan(), UploadPlan::Nothing);
    }

    #[test]
    fn segment_builds_one_quad() {
        let mut line = red_line();
        line.create_segment(Vec2::new(-400.0, 0.0), Vec2::new(400.0, 0.0)).unwrap();

        assert_eq!(line.state(), LineState::GeometryBuilt);
        assert_eq!(line.mesh().vertices, vec![-400.0, 15.0, -400.0, -15.0, 400.0, 15.0, 400.0, -15.0]);
        assert_eq!(line.mesh().indices, vec![1, 2, 0, 1, 3, 2]);
        assert_eq!(line.point_colors(), &[ColorRgba::red(); 2]);
    }

    #[test]
    fn buffer_invariants_hold_for_curves() {
        let mut line = red_line();
        line.create_quadratic_bezier(Vec2::zero(), Vec2::new(100.0, 0.0), Vec2::new(50.0, 80.0), 16)
            .unwrap();
        let n = line.points().len();
        assert_eq!(n, 17);
        assert_eq!(line.mesh().vertices.len(), 2 * n * 2);
        assert_eq!(line.mesh().colors.len(), 2 * n * 4);
        assert_eq!(line.mesh().indices.len(), 6 * (n - 1));

        line.create_cubic_bezier(Vec2::zero(), Vec2::new(100.0, 0.0), Vec2::new(30.0, 60.0), Vec2::new(70.0, -60.0), 24)
            .unwrap();
        assert_eq!(line.points().len(), 25);
        assert_eq!(line.mesh().vertex_count(), 50);
    }

    #[test]
    fn add_points_extends_centerline() {
        let mut line = red_line();
        line.create_polyline(&[Vec2::zero(), Vec2::new(10.0, 0.0)]).unwrap();
        line.add_points(&[Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)]).unwrap();
        assert_eq!(line.points().len(), 4);
        assert_eq!(line.mesh().index_count(), 18);
    }

    // ── style policies ────────────────────────────────────────────────────

    #[test]
    fn uniform_style_follows_point_count() {
        let mut line = red_line();
        line.create_polyline(&[Vec2::zero(), Vec2::new(1.0, 0.0)]).unwrap();
        assert_eq!(line.point_widths(), &[15.0, 15.0]);

        line.create_polyline(&[Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]).unwrap();
        assert_eq!(line.point_widths(), &[15.0, 15.0, 15.0]);
    }

    #[test]
    fn per_point_style_must_be_resized_by_caller() {
        let mut line = red_line();
        line.set_point_widths(vec![1.0, 2.0]);
        line.create_segment(Vec2::zero(), Vec2::new(5.0, 0.0)).unwrap();

        let err = line.add_points(&[Vec2::new(9.0, 0.0)]).unwrap_err();
        assert!(matches!(err, LineError::Ribbon(RibbonError::WidthCountMismatch { points: 3, widths: 2 })));
        assert!(line.mesh().is_empty());
        assert_eq!(line.upload_plan(), UploadPlan::Nothing);

        line.set_point_widths(vec![1.0, 2.0, 3.0]);
        line.rebuild().unwrap();
        assert_eq!(line.mesh().vertex(5), Some(Vec2::new(9.0, -3.0)));
    }

    #[test]
    fn per_point_colors_are_applied() {
        let mut line = red_line();
        let ramp = vec![ColorRgba::red(), ColorRgba::white()];
        line.set_point_colors(ramp.clone());
        line.create_segment(Vec2::zero(), Vec2::new(1.0, 0.0)).unwrap();
        assert_eq!(line.point_colors(), ramp.as_slice());
        assert_eq!(&line.mesh().colors[8..12], &ColorRgba::white().to_array());
    }

    // ── upload planning ───────────────────────────────────────────────────

    #[test]
    fn upload_plan_tracks_size_changes() {
        let mut line = red_line();
        line.create_polyline(&[Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0)]).unwrap();
        assert_eq!(line.upload_plan(), UploadPlan::Allocate);

        line.fake_upload();
        assert_eq!(line.state(), LineState::Uploaded);
        assert_eq!(line.upload_plan(), UploadPlan::Nothing);

        // Same point count: overwrite in place.
        line.create_polyline(&[Vec2::zero(), Vec2::new(3.0, 0.0), Vec2::new(4.0, 2.0)]).unwrap();
        assert_eq!(line.state(), LineState::GeometryBuilt);
        assert_eq!(line.upload_plan(), UploadPlan::WriteInPlace);
        line.fake_upload();

        // Point count changed: reallocate.
        line.add_points(&[Vec2::new(5.0, 5.0)]).unwrap();
        assert_eq!(line.upload_plan(), UploadPlan::Reallocate);
        line.fake_upload();
        assert_eq!(line.upload_plan(), UploadPlan::Nothing);
    }

    #[test]
    fn write_in_place_without_buffers_allocates() {
        let mut line = red_line();
        line.create_segment(Vec2::zero(), Vec2::new(1.0, 0.0)).unwrap();
        line.fake_upload();
        line.create_segment(Vec2::zero(), Vec2::new(2.0, 0.0)).unwrap();

        let plan = line.upload_plan();
        assert_eq!(plan, UploadPlan::WriteInPlace);
        assert_eq!(plan.given_buffers(false), UploadPlan::Allocate);
        assert_eq!(plan.given_buffers(true), UploadPlan::WriteInPlace);
        assert_eq!(UploadPlan::Reallocate.given_buffers(false), UploadPlan::Reallocate);
        assert_eq!(UploadPlan::Nothing.given_buffers(false), UploadPlan::Nothing);
    }

    #[test]
    fn degenerate_line_has_nothing_to_upload() {
        let mut line = red_line();
        line.create_polyline(&[Vec2::zero()]).unwrap();
        assert_eq!(line.state(), LineState::GeometryBuilt);
        assert_eq!(line.upload_plan(), UploadPlan::Nothing);
    }

    // ── dispose ───────────────────────────────────────────────────────────

    #[test]
    fn disposed_line_rejects_further_use() {
        let mut line = red_line();
        line.create_segment(Vec2::zero(), Vec2::new(1.0, 0.0)).unwrap();
        line.fake_upload();
        line.dispose();

        assert_eq!(line.state(), LineState::Disposed);
        assert!(line.mesh().is_empty());
        assert_eq!(line.upload_plan(), UploadPlan::Nothing);
        assert!(matches!(
            line.create_segment(Vec2::zero(), Vec2::new(2.0, 0.0)),
            Err(LineError::Disposed(name)) if name == "test"
        ));

        // Idempotent.
        line.dispose();
        assert_eq!(line.state(), LineState::Disposed);
    }
}
