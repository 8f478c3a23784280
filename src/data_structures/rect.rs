//! Pixel rectangles used by clears, draws and stripe layouts.
//!
//! A [`Rect`] spans `[min, max)` in framebuffer pixels with the origin in the
//! top-left corner. The empty rectangle is special: canvases treat it as
//! "the whole area", the same way the render loop clears the full frame.

/// Half-open pixel rectangle `[min, max)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: [u32; 2],
    pub max: [u32; 2],
}

impl Rect {
    /// The empty rectangle, meaning "the whole area" wherever it is applied.
    pub const EMPTY: Rect = Rect {
        min: [0, 0],
        max: [0, 0],
    };

    /// Create a rectangle from two corners. Corners are normalised so that
    /// `min <= max` on both axes.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            min: [x0.min(x1), y0.min(y1)],
            max: [x0.max(x1), y0.max(y1)],
        }
    }

    /// A rectangle covering `[0, width) x [0, height)`.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> u32 {
        self.max[1] - self.min[1]
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Resolve `self` against the bounds of a canvas.
    ///
    /// Empty means the whole canvas. Anything else is clipped to `bounds`;
    /// `None` is returned when nothing of the rectangle is left.
    pub fn resolve(&self, bounds: Rect) -> Option<Rect> {
        if bounds.is_empty() {
            return None;
        }
        if self.is_empty() {
            return Some(bounds);
        }
        let min = [
            self.min[0].max(bounds.min[0]),
            self.min[1].max(bounds.min[1]),
        ];
        let max = [
            self.max[0].min(bounds.max[0]),
            self.max[1].min(bounds.max[1]),
        ];
        if min[0] >= max[0] || min[1] >= max[1] {
            return None;
        }
        Some(Rect { min, max })
    }

    /// True when `self` resolves to the complete `bounds`.
    pub fn covers(&self, bounds: Rect) -> bool {
        self.resolve(bounds) == Some(bounds)
    }
}

/// Lay out vertical stripes of `width` pixels across `bounds`.
///
/// Stripes start at the left edge and alternate between the two colours,
/// beginning with `colours[0]`. The last stripe is clipped to the bounds.
pub fn stripes<C: Copy>(bounds: Rect, width: u32, colours: [C; 2]) -> Vec<(Rect, C)> {
    if width == 0 || bounds.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut flip = false;
    let mut i = 0u32;
    while i.saturating_mul(width) < bounds.width() {
        flip = !flip;
        let x = bounds.min[0] + i * width;
        let stripe = Rect::new(x, bounds.min[1], x.saturating_add(width), bounds.max[1]);
        if let Some(stripe) = stripe.resolve(bounds) {
            out.push((stripe, if flip { colours[0] } else { colours[1] }));
        }
        i += 1;
    }
    out
}
