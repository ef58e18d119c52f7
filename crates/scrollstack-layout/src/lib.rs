// Stack layout engine
// Stacks pane rects vertically and classifies each one against the parent viewport.

mod visibility;

use scrollstack_core::Rect;

pub use visibility::{place, required_frame, required_inner_offset, visibility_state, PanePlacement};

// ──────────────────────────────────────────────
// StackLayout
// ──────────────────────────────────────────────

/// Committed result of the last relayout: one rect per pane in stack order,
/// plus the total content height of the parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackLayout {
    rects: Vec<Rect>,
    width: f32,
    total_height: f32,
}

impl StackLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute rects for the given pane heights at `width` and commit them.
    ///
    /// Rects start at y = 0 and follow one another with no gaps, so each
    /// rect's `y` is the sum of the heights before it. Heights that are
    /// negative or not finite collapse to an empty band.
    pub fn relayout<I>(&mut self, heights: I, width: f32)
    where
        I: IntoIterator<Item = f32>,
    {
        let (rects, total_height) = stack_rects(heights, width);
        self.rects = rects;
        self.width = width;
        self.total_height = total_height;
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn rect(&self, index: usize) -> Rect {
        self.rects[index]
    }

    pub fn get(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Walk the heights in order with a running y offset starting at 0.
/// Returns the rects and the final offset (the total content height).
pub fn stack_rects<I>(heights: I, width: f32) -> (Vec<Rect>, f32)
where
    I: IntoIterator<Item = f32>,
{
    let heights = heights.into_iter();
    let mut rects = Vec::with_capacity(heights.size_hint().0);
    let mut offset = 0.0;

    for (index, height) in heights.enumerate() {
        let height = sanitize_height(index, height);
        rects.push(Rect::new(0.0, offset, width, height));
        offset += height;
    }

    (rects, offset)
}

fn sanitize_height(index: usize, height: f32) -> f32 {
    if height.is_finite() && height >= 0.0 {
        return height;
    }
    log::warn!(
        "pane {} reported content height {}, collapsing to 0",
        index,
        height
    );
    0.0
}
