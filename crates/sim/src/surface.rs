//! Persistent damage-mark surface.
//!
//! Tools leave marks (scorch gradients, cracks, bullet holes) on a raster
//! layer owned by the renderer. The simulation only describes the strokes.

use glam::Vec2;

/// RGBA colour with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Compositing mode for a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    /// Source-over.
    #[default]
    Normal,
    /// Colours add up ("lighter").
    Additive,
}

/// A 2D raster layer that keeps tool marks between frames.
pub trait DamageSurface {
    /// Fill a disc of `outer_radius` with a radial gradient running from
    /// `inner` at `inner_radius` to `outer` at `outer_radius`.
    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Rgba,
        outer: Rgba,
        blend: Blend,
    );

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);

    /// Punch a transparent hole.
    fn erase_circle(&mut self, center: Vec2, radius: f32);
}

/// One recorded surface operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    Gradient {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Rgba,
        outer: Rgba,
        blend: Blend,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
    Erase {
        center: Vec2,
        radius: f32,
    },
}

/// Surface that keeps a list of every mark drawn on it.
///
/// Used by headless runs and tests in place of a real raster.
#[derive(Debug, Default, Clone)]
pub struct MarkLog {
    pub marks: Vec<Mark>,
}

impl MarkLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

impl DamageSurface for MarkLog {
    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Rgba,
        outer: Rgba,
        blend: Blend,
    ) {
        self.marks.push(Mark::Gradient {
            center,
            inner_radius,
            outer_radius,
            inner,
            outer,
            blend,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.marks.push(Mark::Line { from, to, color, width });
    }

    fn erase_circle(&mut self, center: Vec2, radius: f32) {
        self.marks.push(Mark::Erase { center, radius });
    }
}
