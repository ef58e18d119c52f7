// Simulated host surface and panes for driving a stack without a window system.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use scrollstack_core::{
    scrolling_content_height, InnerScroll, Insets, PaneId, Rect, ScrollHost, Size, StackPane, Vec2,
};

// ──────────────────────────────────────────────
// SimulatedSurface
// ──────────────────────────────────────────────

/// A scroll view with no animation: scroll requests land immediately and are
/// clamped to the content size.
#[derive(Debug)]
pub struct SimulatedSurface {
    viewport: Rect,
    content_size: Size,
    attached: Vec<PaneId>,
}

impl SimulatedSurface {
    pub fn new(visible: Size) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, visible.width, visible.height),
            content_size: Size::default(),
            attached: Vec::new(),
        }
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Attached panes, in attach order.
    pub fn attached(&self) -> &[PaneId] {
        &self.attached
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> f32 {
        (self.content_size.height - self.viewport.height).max(0.0)
    }

    /// Returns the offset actually applied.
    pub fn set_offset(&mut self, y: f32) -> f32 {
        self.viewport.y = y.clamp(0.0, self.max_offset());
        self.viewport.y
    }
}

impl ScrollHost for SimulatedSurface {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
        if self.viewport.y > self.max_offset() {
            self.viewport.y = self.max_offset();
        }
    }

    fn scroll_to_rect(&mut self, rect: Rect, animated: bool) {
        log::debug!("surface scroll to {:?} (animated: {})", rect, animated);
        self.set_offset(rect.y);
    }

    fn attach_pane(&mut self, pane: PaneId) {
        if !self.attached.contains(&pane) {
            self.attached.push(pane);
        }
    }

    fn detach_pane(&mut self, pane: PaneId) {
        self.attached.retain(|p| *p != pane);
    }
}

// ──────────────────────────────────────────────
// BlockPane
// ──────────────────────────────────────────────

/// Fixed-height content with no inner scrolling.
pub struct BlockPane {
    height: f32,
}

impl BlockPane {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl StackPane for BlockPane {
    fn content_height(&mut self, _width: f32) -> f32 {
        self.height
    }

    fn set_frame(&mut self, _frame: Rect) {}
}

// ──────────────────────────────────────────────
// ListPane
// ──────────────────────────────────────────────

/// What a list's cell reuse pool would hold right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListStats {
    pub frame: Option<Rect>,
    pub live_rows: Range<usize>,
    pub attached: bool,
}

impl ListStats {
    pub fn live_cells(&self) -> usize {
        self.live_rows.len()
    }
}

/// Uniform rows between a header and a footer. Only the rows that fit the
/// current frame at the current offset are kept live.
pub struct ListPane {
    rows: usize,
    row_height: f32,
    insets: Insets,
    offset: f32,
    stats: Rc<RefCell<ListStats>>,
}

impl ListPane {
    pub fn new(rows: usize, row_height: f32, insets: Insets) -> Self {
        Self {
            rows,
            row_height,
            insets,
            offset: 0.0,
            stats: Rc::new(RefCell::new(ListStats::default())),
        }
    }

    pub fn stats(&self) -> Rc<RefCell<ListStats>> {
        self.stats.clone()
    }

    fn refresh_live_rows(&self) {
        let mut stats = self.stats.borrow_mut();
        let Some(frame) = stats.frame else {
            stats.live_rows = 0..0;
            return;
        };
        if !stats.attached || self.row_height <= 0.0 {
            stats.live_rows = 0..0;
            return;
        }
        // Rows sit below the header. The footer takes the bottom of the frame
        // once the rows have scrolled under the header, or when the whole pane
        // fits; otherwise the frame ends at the viewport's bottom edge.
        let content = self.rows as f32 * self.row_height;
        let footer = if self.offset > 0.0 || frame.height >= self.insets.height() + content {
            self.insets.bottom
        } else {
            0.0
        };
        let visible = (frame.height - self.insets.top - footer).max(0.0);
        let first = (self.offset.max(0.0) / self.row_height).floor() as usize;
        let last = ((self.offset.max(0.0) + visible) / self.row_height).ceil() as usize;
        let first = first.min(self.rows);
        stats.live_rows = first..last.clamp(first, self.rows);
    }
}

impl StackPane for ListPane {
    fn content_height(&mut self, _width: f32) -> f32 {
        scrolling_content_height(&*self)
    }

    fn insets(&self) -> Insets {
        self.insets
    }

    fn set_frame(&mut self, frame: Rect) {
        self.stats.borrow_mut().frame = Some(frame);
        self.refresh_live_rows();
    }

    fn did_attach(&mut self) {
        self.stats.borrow_mut().attached = true;
        self.refresh_live_rows();
    }

    fn did_detach(&mut self) {
        self.stats.borrow_mut().attached = false;
        self.refresh_live_rows();
    }
}

impl InnerScroll for ListPane {
    fn inner_content_size(&self) -> Size {
        Size::new(0.0, self.rows as f32 * self.row_height)
    }

    fn inner_offset(&self) -> Vec2 {
        Vec2::new(0.0, self.offset)
    }

    fn set_inner_offset(&mut self, offset: Vec2) {
        self.offset = offset.y;
        self.refresh_live_rows();
    }
}
