use std::fmt;
use std::ops::{Add, AddAssign};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f32 {
        self.y
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// A rect with no area. Empty rects never intersect anything.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.max_x()
            && point.y >= self.y
            && point.y <= self.max_y()
    }

    /// True when `other` lies entirely inside this rect (edges may touch).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.max_x() <= self.max_x()
            && other.y >= self.y
            && other.max_y() <= self.max_y()
    }

    /// Strict overlap test: both rects must have area and share a region of
    /// positive area. Rects that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        Some(Rect::new(x, y, max_x - x, max_y - y))
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Space a pane reserves around its inner scroll region (header above,
/// footer below).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self { top, left, bottom, right }
    }

    /// Header and footer only.
    pub const fn vertical(top: f32, bottom: f32) -> Self {
        Self::new(top, 0.0, bottom, 0.0)
    }

    /// Combined header + footer reservation.
    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn width(&self) -> f32 {
        self.left + self.right
    }
}

impl Add for Insets {
    type Output = Insets;

    fn add(self, rhs: Insets) -> Insets {
        Insets::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.bottom + rhs.bottom,
            self.right + rhs.right,
        )
    }
}

impl AddAssign for Insets {
    fn add_assign(&mut self, rhs: Insets) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Insets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(t: {}, l: {}, b: {}, r: {})",
            self.top, self.left, self.bottom, self.right
        )
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

/// Handle returned when a pane is registered with a stack controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(pub u64);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

// ──────────────────────────────────────────────
// Stack types
// ──────────────────────────────────────────────

/// Which structural regions of a pane (header band, inner scroll band,
/// footer band) currently intersect the parent viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityState {
    Top,
    TopAndInner,
    Inner,
    BottomAndInner,
    Bottom,
    All,
    None,
}

impl VisibilityState {
    pub const ALL_STATES: [VisibilityState; 7] = [
        VisibilityState::Top,
        VisibilityState::TopAndInner,
        VisibilityState::Inner,
        VisibilityState::BottomAndInner,
        VisibilityState::Bottom,
        VisibilityState::All,
        VisibilityState::None,
    ];

    pub fn is_visible(self) -> bool {
        self != VisibilityState::None
    }

    pub fn name(self) -> &'static str {
        match self {
            VisibilityState::Top => "top",
            VisibilityState::TopAndInner => "topAndInner",
            VisibilityState::Inner => "inner",
            VisibilityState::BottomAndInner => "bottomAndInner",
            VisibilityState::Bottom => "bottom",
            VisibilityState::All => "all",
            VisibilityState::None => "none",
        }
    }
}

impl fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Edge of a pane to align the viewport with when scrolling to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPosition {
    Top,
    Bottom,
}

// ──────────────────────────────────────────────
// Trait: StackPane
// ──────────────────────────────────────────────

/// A component that can be placed in a scroll stack.
pub trait StackPane {
    /// Height the pane wants when laid out at `width`. Panes may measure or
    /// load themselves here.
    fn content_height(&mut self, width: f32) -> f32;

    /// Space reserved around the pane's inner scroll region.
    fn insets(&self) -> Insets {
        Insets::ZERO
    }

    /// The on-screen frame computed for the pane, in the parent's content
    /// coordinates.
    fn set_frame(&mut self, frame: Rect);

    fn did_attach(&mut self) {}

    fn did_detach(&mut self) {}
}

// ──────────────────────────────────────────────
// Trait: InnerScroll
// ──────────────────────────────────────────────

/// A pane that owns its own vertically scrolling region (a list, a grid).
/// The stack drives its offset so the region only scrolls while pinned.
pub trait InnerScroll: StackPane {
    fn inner_content_size(&self) -> Size;
    fn inner_offset(&self) -> Vec2;
    fn set_inner_offset(&mut self, offset: Vec2);
}

/// Conventional height of a scrolling pane: its inner content plus the
/// header and footer reservation.
pub fn scrolling_content_height(pane: &dyn InnerScroll) -> f32 {
    pane.inner_content_size().height + pane.insets().height()
}

/// The closed set of pane capabilities, resolved once at registration.
pub enum PaneContent {
    Static(Box<dyn StackPane>),
    Scrolling(Box<dyn InnerScroll>),
}

impl PaneContent {
    pub fn fixed(pane: impl StackPane + 'static) -> Self {
        PaneContent::Static(Box::new(pane))
    }

    pub fn scrolling(pane: impl InnerScroll + 'static) -> Self {
        PaneContent::Scrolling(Box::new(pane))
    }

    pub fn has_inner_scroll(&self) -> bool {
        matches!(self, PaneContent::Scrolling(_))
    }

    pub fn inner_scroll(&self) -> Option<&dyn InnerScroll> {
        match self {
            PaneContent::Static(_) => None,
            PaneContent::Scrolling(p) => Some(p.as_ref()),
        }
    }

    pub fn inner_scroll_mut(&mut self) -> Option<&mut dyn InnerScroll> {
        match self {
            PaneContent::Static(_) => None,
            PaneContent::Scrolling(p) => Some(p.as_mut()),
        }
    }

    pub fn insets(&self) -> Insets {
        match self {
            PaneContent::Static(p) => p.insets(),
            PaneContent::Scrolling(p) => p.insets(),
        }
    }

    pub fn content_height(&mut self, width: f32) -> f32 {
        match self {
            PaneContent::Static(p) => p.content_height(width),
            PaneContent::Scrolling(p) => p.content_height(width),
        }
    }

    pub fn set_frame(&mut self, frame: Rect) {
        match self {
            PaneContent::Static(p) => p.set_frame(frame),
            PaneContent::Scrolling(p) => p.set_frame(frame),
        }
    }

    pub fn did_attach(&mut self) {
        match self {
            PaneContent::Static(p) => p.did_attach(),
            PaneContent::Scrolling(p) => p.did_attach(),
        }
    }

    pub fn did_detach(&mut self) {
        match self {
            PaneContent::Static(p) => p.did_detach(),
            PaneContent::Scrolling(p) => p.did_detach(),
        }
    }

    /// Height of the inner region's content, or `None` for static panes.
    pub fn inner_content_height(&self) -> Option<f32> {
        self.inner_scroll().map(|s| s.inner_content_size().height)
    }
}

impl fmt::Debug for PaneContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaneContent::Static(_) => f.write_str("PaneContent::Static"),
            PaneContent::Scrolling(_) => f.write_str("PaneContent::Scrolling"),
        }
    }
}

// ──────────────────────────────────────────────
// Trait: ScrollHost
// ──────────────────────────────────────────────

/// The parent scrollable surface the stack lives in.
pub trait ScrollHost {
    /// Visible rectangle in content coordinates: origin is the current
    /// content offset, size is the visible size.
    fn viewport(&self) -> Rect;
    fn set_content_size(&mut self, size: Size);
    fn scroll_to_rect(&mut self, rect: Rect, animated: bool);
    /// Put the pane's render subtree into the active tree.
    fn attach_pane(&mut self, pane: PaneId);
    /// Take the pane's render subtree out of the active tree.
    fn detach_pane(&mut self, pane: PaneId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(0.0, 50.0, 100.0, 50.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let band = Rect::new(0.0, 10.0, 100.0, 0.0);
        assert!(!a.intersects(&band));
        assert!(!band.intersects(&a));
    }

    #[test]
    fn test_intersection_clips_both_axes() {
        let a = Rect::new(0.0, 100.0, 320.0, 300.0);
        let viewport = Rect::new(0.0, 120.0, 320.0, 50.0);
        assert_eq!(
            a.intersection(&viewport),
            Some(Rect::new(0.0, 120.0, 320.0, 50.0))
        );
        let below = Rect::new(0.0, 390.0, 320.0, 20.0);
        assert_eq!(
            a.intersection(&below),
            Some(Rect::new(0.0, 390.0, 320.0, 10.0))
        );
    }

    #[test]
    fn test_insets_sum_and_display() {
        let mut insets = Insets::vertical(50.0, 20.0);
        assert_eq!(insets.height(), 70.0);
        insets += Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets, Insets::new(51.0, 2.0, 23.0, 4.0));
        assert_eq!(insets.width(), 6.0);
        assert_eq!(insets.to_string(), "(t: 51, l: 2, b: 23, r: 4)");
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 320.0, 1000.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 100.0, 320.0, 300.0)));
        assert!(!outer.contains_rect(&Rect::new(0.0, 900.0, 320.0, 300.0)));
    }
}
