// Stack controller
// Owns the ordered pane stack, drives relayout and per-scroll placement, and
// attaches/detaches pane render subtrees as they enter and leave the viewport.

mod error;
mod invalidator;

use std::collections::{HashMap, HashSet};

use scrollstack_layout::{place, visibility_state, PanePlacement, StackLayout};

pub use error::{Result, StackError};
pub use invalidator::LayoutInvalidator;
pub use scrollstack_core::{
    scrolling_content_height, InnerScroll, Insets, PaneContent, PaneId, Rect, ScrollHost,
    ScrollPosition, Size, StackPane, Vec2, VisibilityState,
};

// ──────────────────────────────────────────────
// Records
// ──────────────────────────────────────────────

/// Runtime entry for one pane in the stack. Recreated whenever the pane list
/// is replaced; its rect lives in the committed [`StackLayout`] at the same index.
#[derive(Debug, Clone)]
struct PaneRecord {
    id: PaneId,
    placement: Option<PanePlacement>,
}

impl PaneRecord {
    fn new(id: PaneId) -> Self {
        Self { id, placement: None }
    }
}

/// Read-only snapshot of one pane, for tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneDiagnostics {
    pub index: usize,
    pub id: PaneId,
    pub rect: Rect,
    pub content_height: f32,
    pub insets: Insets,
    pub has_inner_scroll: bool,
    pub state: VisibilityState,
    /// Last frame applied to the pane, if it has been placed while visible.
    pub frame: Option<Rect>,
    pub inner_offset: Option<f32>,
    pub attached: bool,
}

// ──────────────────────────────────────────────
// StackController
// ──────────────────────────────────────────────

pub struct StackController<H: ScrollHost> {
    host: H,
    registry: HashMap<PaneId, PaneContent>,
    next_id: u64,
    records: Vec<PaneRecord>,
    layout: StackLayout,
    attached: HashSet<PaneId>,
    invalidator: LayoutInvalidator,
    last_scroll_target: Option<Rect>,
}

impl<H: ScrollHost> StackController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            registry: HashMap::new(),
            next_id: 1,
            records: Vec::new(),
            layout: StackLayout::new(),
            attached: HashSet::new(),
            invalidator: LayoutInvalidator::new(),
            last_scroll_target: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Handle panes can keep to signal a content height change.
    pub fn invalidator(&self) -> LayoutInvalidator {
        self.invalidator.clone()
    }

    // ── Registry ──

    /// Hand a pane to the stack. The returned id is how the pane is placed
    /// into, and identified within, the stack.
    pub fn register(&mut self, content: PaneContent) -> PaneId {
        let id = PaneId(self.next_id);
        self.next_id += 1;
        log::debug!("register {} ({:?})", id, content);
        self.registry.insert(id, content);
        id
    }

    /// Take a pane back. It is removed from the stack (and detached) first.
    pub fn unregister(&mut self, id: PaneId) -> Option<PaneContent> {
        if !self.registry.contains_key(&id) {
            return None;
        }
        if self.records.iter().any(|r| r.id == id) {
            let remaining: Vec<PaneId> = self.panes().into_iter().filter(|p| *p != id).collect();
            self.apply_pane_list(&remaining);
        }
        self.registry.remove(&id)
    }

    pub fn pane(&self, id: PaneId) -> Option<&PaneContent> {
        self.registry.get(&id)
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Option<&mut PaneContent> {
        self.registry.get_mut(&id)
    }

    // ── Pane list ──

    /// Ids in stack order, top to bottom.
    pub fn panes(&self) -> Vec<PaneId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the stack. Panics on unknown or duplicate ids.
    pub fn set_panes(&mut self, ids: &[PaneId]) {
        fail_fast(self.try_set_panes(ids))
    }

    /// Replace the stack with `ids`, in order.
    ///
    /// Panes that leave the stack are detached; every record is recreated and
    /// a relayout follows. On error nothing has changed.
    pub fn try_set_panes(&mut self, ids: &[PaneId]) -> Result<()> {
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            if !self.registry.contains_key(&id) {
                return Err(StackError::UnknownPane(id));
            }
            if !seen.insert(id) {
                return Err(StackError::DuplicatePane(id));
            }
        }
        self.apply_pane_list(ids);
        Ok(())
    }

    pub fn push_pane(&mut self, id: PaneId) {
        let len = self.len();
        fail_fast(self.try_insert_pane(len, id))
    }

    pub fn insert_pane(&mut self, index: usize, id: PaneId) {
        fail_fast(self.try_insert_pane(index, id))
    }

    pub fn try_insert_pane(&mut self, index: usize, id: PaneId) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(StackError::IndexOutOfBounds { index, len });
        }
        let mut ids = self.panes();
        ids.insert(index, id);
        self.try_set_panes(&ids)
    }

    pub fn remove_pane(&mut self, index: usize) -> PaneId {
        fail_fast(self.try_remove_pane(index))
    }

    pub fn try_remove_pane(&mut self, index: usize) -> Result<PaneId> {
        let len = self.len();
        if index >= len {
            return Err(StackError::IndexOutOfBounds { index, len });
        }
        let mut ids = self.panes();
        let removed = ids.remove(index);
        self.apply_pane_list(&ids);
        Ok(removed)
    }

    /// `ids` must already be validated.
    fn apply_pane_list(&mut self, ids: &[PaneId]) {
        let keep: HashSet<PaneId> = ids.iter().copied().collect();
        let old = std::mem::take(&mut self.records);
        for record in old {
            if !keep.contains(&record.id) {
                self.detach(record.id);
            }
        }
        self.records = ids.iter().map(|&id| PaneRecord::new(id)).collect();
        log::debug!("pane list replaced: {} panes", self.records.len());
        self.relayout();
    }

    // ── Host hooks ──

    /// Recompute every rect, update the host's content size, then place panes.
    pub fn relayout(&mut self) {
        self.invalidator.take();
        self.relayout_pass();
        self.follow_up();
    }

    /// Scroll-position-changed hook. Must be called on every offset change.
    pub fn did_scroll(&mut self) {
        if self.invalidator.take() {
            self.relayout_pass();
        } else {
            self.placement_pass();
        }
        self.follow_up();
    }

    /// Layout-invalidated hook for size or rotation changes.
    pub fn invalidate_layout(&mut self) {
        self.relayout();
    }

    /// A pane's content height changed. Panics on an unregistered id.
    pub fn pane_content_changed(&mut self, id: PaneId) {
        fail_fast(self.try_pane_content_changed(id))
    }

    pub fn try_pane_content_changed(&mut self, id: PaneId) -> Result<()> {
        if !self.registry.contains_key(&id) {
            return Err(StackError::UnknownPane(id));
        }
        if self.records.iter().any(|r| r.id == id) {
            log::debug!("{} content changed", id);
            self.relayout();
        }
        Ok(())
    }

    /// Run a relayout if an invalidation is pending.
    pub fn flush(&mut self) -> bool {
        if !self.invalidator.take() {
            return false;
        }
        self.relayout_pass();
        self.follow_up();
        true
    }

    /// Invalidations raised during a pass get exactly one follow-up relayout.
    /// Anything raised during the follow-up stays pending.
    fn follow_up(&mut self) {
        if self.invalidator.take() {
            log::debug!("layout invalidated during pass, running follow-up relayout");
            self.relayout_pass();
        }
    }

    fn relayout_pass(&mut self) {
        let width = self.host.viewport().width;
        let registry = &mut self.registry;
        let heights: Vec<f32> = self
            .records
            .iter()
            .map(|record| {
                registry
                    .get_mut(&record.id)
                    .map(|pane| pane.content_height(width))
                    .unwrap_or(0.0)
            })
            .collect();

        self.layout.relayout(heights, width);
        let total = self.layout.total_height();
        log::debug!(
            "relayout: {} panes, width {}, content height {}",
            self.records.len(),
            width,
            total
        );
        self.host.set_content_size(Size::new(width, total));
        self.placement_pass();
    }

    fn placement_pass(&mut self) {
        let viewport = self.host.viewport();

        for (index, record) in self.records.iter_mut().enumerate() {
            let Some(rect) = self.layout.get(index) else {
                continue;
            };
            let Some(pane) = self.registry.get_mut(&record.id) else {
                continue;
            };
            let placement = place(rect, pane.insets(), viewport, pane.inner_content_height());
            log::trace!(
                "{} {}: state={} frame={:?} offset={:?}",
                index,
                record.id,
                placement.state,
                placement.frame,
                placement.inner_offset
            );

            if let (Some(offset), Some(scroll)) = (placement.inner_offset, pane.inner_scroll_mut()) {
                scroll.set_inner_offset(Vec2::new(0.0, offset));
            }

            if placement.state == VisibilityState::None {
                if self.attached.remove(&record.id) {
                    log::debug!("detach {}", record.id);
                    self.host.detach_pane(record.id);
                    pane.did_detach();
                }
            } else {
                if self.attached.insert(record.id) {
                    log::debug!("attach {} ({})", record.id, placement.state);
                    self.host.attach_pane(record.id);
                    pane.did_attach();
                }
                pane.set_frame(placement.frame);
            }

            record.placement = Some(placement);
        }
    }

    fn detach(&mut self, id: PaneId) {
        if !self.attached.remove(&id) {
            return;
        }
        log::debug!("detach {} (left the stack)", id);
        self.host.detach_pane(id);
        if let Some(pane) = self.registry.get_mut(&id) {
            pane.did_detach();
        }
    }

    // ── Scrolling ──

    /// Ask the host to bring the pane at `index` into view, aligned to its
    /// top or bottom edge. Panics when `index` is out of range.
    pub fn scroll_to_item(&mut self, index: usize, position: ScrollPosition, animated: bool) {
        fail_fast(self.try_scroll_to_item(index, position, animated).map(|_| ()))
    }

    /// Returns the requested target rect. A later request supersedes this one.
    pub fn try_scroll_to_item(
        &mut self,
        index: usize,
        position: ScrollPosition,
        animated: bool,
    ) -> Result<Rect> {
        let rect = self.checked_rect(index)?;
        let viewport = self.host.viewport();
        let y = match position {
            ScrollPosition::Top => rect.y,
            ScrollPosition::Bottom => rect.max_y() - viewport.height,
        };
        let target = Rect::new(rect.x, y, viewport.width, viewport.height);

        log::debug!("scroll to item {} ({:?}): {:?}", index, position, target);
        self.last_scroll_target = Some(target);
        self.host.scroll_to_rect(target, animated);
        if !animated {
            // Non-animated scrolls land immediately.
            self.did_scroll();
        }
        Ok(target)
    }

    pub fn last_scroll_target(&self) -> Option<Rect> {
        self.last_scroll_target
    }

    // ── Introspection ──

    fn checked_rect(&self, index: usize) -> Result<Rect> {
        self.layout.get(index).ok_or(StackError::IndexOutOfBounds {
            index,
            len: self.layout.len(),
        })
    }

    /// Current state of the pane at `index` for the host's viewport right now.
    /// Panics when `index` is out of range.
    pub fn visibility_state(&self, index: usize) -> VisibilityState {
        fail_fast(self.try_visibility_state(index))
    }

    pub fn try_visibility_state(&self, index: usize) -> Result<VisibilityState> {
        let rect = self.checked_rect(index)?;
        let insets = self
            .registry
            .get(&self.records[index].id)
            .map(|p| p.insets())
            .unwrap_or_default();
        Ok(visibility_state(rect, insets, self.host.viewport()))
    }

    pub fn rect(&self, index: usize) -> Rect {
        fail_fast(self.checked_rect(index))
    }

    pub fn rects(&self) -> &[Rect] {
        self.layout.rects()
    }

    pub fn content_height(&self, index: usize) -> f32 {
        self.rect(index).height
    }

    pub fn total_content_height(&self) -> f32 {
        self.layout.total_height()
    }

    pub fn is_attached(&self, id: PaneId) -> bool {
        self.attached.contains(&id)
    }

    pub fn diagnostics(&self) -> Vec<PaneDiagnostics> {
        let viewport = self.host.viewport();
        self.records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let rect = self.layout.get(index)?;
                let pane = self.registry.get(&record.id)?;
                let insets = pane.insets();
                let placement = record.placement;
                Some(PaneDiagnostics {
                    index,
                    id: record.id,
                    rect,
                    content_height: rect.height,
                    insets,
                    has_inner_scroll: pane.has_inner_scroll(),
                    state: visibility_state(rect, insets, viewport),
                    frame: placement
                        .filter(|p| p.state.is_visible())
                        .map(|p| p.frame),
                    inner_offset: pane.inner_scroll().map(|s| s.inner_offset().y),
                    attached: self.attached.contains(&record.id),
                })
            })
            .collect()
    }
}

fn fail_fast<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("scroll stack misuse: {}", err),
    }
}
