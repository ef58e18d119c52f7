use scrollstack_core::{Insets, Rect, VisibilityState};

// ──────────────────────────────────────────────
// Bands
// ──────────────────────────────────────────────

/// Header band: `insets.top` tall, at the top of the pane.
fn top_band(rect: Rect, insets: Insets) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, insets.top)
}

/// Footer band: `insets.bottom` tall, ending at the bottom of the pane.
fn bottom_band(rect: Rect, insets: Insets) -> Rect {
    Rect::new(
        rect.x,
        rect.max_y() - insets.bottom,
        rect.width,
        insets.bottom,
    )
}

/// Open-interval overlap that still counts a zero-height band lying inside
/// the viewport. A pane without a header has a zero-height top band at
/// `rect.y`, which is on screen as soon as the viewport starts above it.
fn band_on_screen(viewport: Rect, band: Rect) -> bool {
    viewport.min_x() < band.max_x()
        && band.min_x() < viewport.max_x()
        && viewport.min_y() < band.max_y()
        && band.min_y() < viewport.max_y()
}

// ──────────────────────────────────────────────
// Visibility
// ──────────────────────────────────────────────

/// Classify which regions of a pane the viewport currently shows.
///
/// Top is checked before bottom, and bottom before plain inner. A pane
/// without a footer (`insets.bottom == 0`) never reports a bottom state. A
/// pane without a header still reports its top edge while that edge is
/// inside the viewport.
pub fn visibility_state(rect: Rect, insets: Insets, viewport: Rect) -> VisibilityState {
    let visible_height = viewport
        .intersection(&rect)
        .map(|r| r.height)
        .unwrap_or(0.0);
    if visible_height == 0.0 {
        return VisibilityState::None;
    }

    let top = top_band(rect, insets);
    let bottom = bottom_band(rect, insets);

    let shows_top = band_on_screen(viewport, top);
    let shows_bottom = insets.bottom != 0.0 && viewport.intersects(&bottom);
    let shows_inner = viewport.max_y() > top.max_y() && viewport.min_y() < bottom.min_y();

    if shows_top {
        if shows_bottom {
            VisibilityState::All
        } else if shows_inner {
            VisibilityState::TopAndInner
        } else {
            VisibilityState::Top
        }
    } else if shows_bottom {
        if shows_inner {
            VisibilityState::BottomAndInner
        } else {
            VisibilityState::Bottom
        }
    } else {
        VisibilityState::Inner
    }
}

// ──────────────────────────────────────────────
// Inner offset
// ──────────────────────────────────────────────

/// Offset the pane's inner scroll region must be set to, or `None` when the
/// region stays frozen where it is.
///
/// While the inner region is pinned it tracks the parent offset 1:1, so its
/// own cell reuse sees exactly the rows a standalone full-screen list would.
pub fn required_inner_offset(
    rect: Rect,
    insets: Insets,
    state: VisibilityState,
    viewport_y: f32,
) -> Option<f32> {
    match state {
        VisibilityState::All | VisibilityState::Top | VisibilityState::TopAndInner => Some(0.0),
        VisibilityState::Inner | VisibilityState::BottomAndInner => {
            Some(viewport_y - rect.y - insets.top)
        }
        VisibilityState::Bottom | VisibilityState::None => None,
    }
}

// ──────────────────────────────────────────────
// Frame
// ──────────────────────────────────────────────

/// Frame the pane's view should occupy, in parent content coordinates.
///
/// `inner_content_height` is `None` for panes without an inner scroll region;
/// those always get their full `rect`. For scrolling panes the frame never
/// grows past what the viewport can show, whatever the inner content size.
/// The parent's current offset is `viewport.y`.
pub fn required_frame(
    rect: Rect,
    insets: Insets,
    state: VisibilityState,
    viewport: Rect,
    inner_content_height: Option<f32>,
) -> Rect {
    let Some(inner_height) = inner_content_height else {
        return rect;
    };

    match state {
        VisibilityState::All => rect,
        VisibilityState::Top => Rect::new(rect.x, rect.y, rect.width, insets.top),
        VisibilityState::TopAndInner => {
            let inner_shown = viewport.max_y() - (rect.y + insets.top);
            Rect::new(rect.x, rect.y, rect.width, insets.top + inner_shown)
        }
        VisibilityState::Inner => Rect::new(
            rect.x,
            viewport.y - insets.top,
            viewport.width,
            viewport.height + insets.height(),
        ),
        VisibilityState::BottomAndInner => {
            // Runs to the pane's end: the inner region stops where the footer starts.
            let remaining = rect.max_y() - viewport.y;
            Rect::new(
                rect.x,
                viewport.y - insets.top,
                viewport.width,
                insets.top + remaining,
            )
        }
        VisibilityState::Bottom => Rect::new(
            rect.x,
            rect.y + insets.top + inner_height,
            rect.width,
            insets.bottom,
        ),
        // Never applied; the pane is detached.
        VisibilityState::None => Rect::new(rect.x, rect.y, rect.width, insets.top),
    }
}

// ──────────────────────────────────────────────
// Placement
// ──────────────────────────────────────────────

/// Everything the stack needs to apply to one pane for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanePlacement {
    pub state: VisibilityState,
    pub frame: Rect,
    /// Only set for panes with an inner scroll region, and only when the
    /// region is not frozen.
    pub inner_offset: Option<f32>,
}

pub fn place(
    rect: Rect,
    insets: Insets,
    viewport: Rect,
    inner_content_height: Option<f32>,
) -> PanePlacement {
    let state = visibility_state(rect, insets, viewport);
    let frame = required_frame(rect, insets, state, viewport, inner_content_height);
    let inner_offset = inner_content_height
        .and_then(|_| required_inner_offset(rect, insets, state, viewport.y));
    PanePlacement {
        state,
        frame,
        inner_offset,
    }
}
