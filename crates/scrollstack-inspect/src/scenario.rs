// Scenario files: a viewport size and the panes to stack, as JSON.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use scrollstack_controller::{
    Insets, PaneContent, PaneId, ScrollHost, ScrollPosition, Size, StackController,
};

use crate::surface::{BlockPane, ListPane, ListStats, SimulatedSurface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub viewport: ViewportSpec,
    pub panes: Vec<PaneSpec>,
    /// Scroll-to requests replayed by the `replay` command.
    #[serde(default)]
    pub scroll_to: Vec<ScrollStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSpec {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaneSpec {
    Static {
        height: f32,
    },
    List {
        rows: usize,
        row_height: f32,
        #[serde(default)]
        header: f32,
        #[serde(default)]
        footer: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
}

impl From<Edge> for ScrollPosition {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => ScrollPosition::Top,
            Edge::Bottom => ScrollPosition::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollStep {
    pub index: usize,
    pub position: Edge,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reject input the stack would treat as programmer misuse.
    pub fn validate(&self) -> Result<()> {
        if !(self.viewport.width >= 0.0 && self.viewport.height >= 0.0) {
            bail!(
                "viewport size must be non-negative, got {}x{}",
                self.viewport.width,
                self.viewport.height
            );
        }
        for (i, step) in self.scroll_to.iter().enumerate() {
            if step.index >= self.panes.len() {
                bail!(
                    "scroll_to[{}] targets pane {} but the scenario has {} panes",
                    i,
                    step.index,
                    self.panes.len()
                );
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Session {
        let surface = SimulatedSurface::new(Size::new(self.viewport.width, self.viewport.height));
        let mut stack = StackController::new(surface);
        let mut lists = HashMap::new();
        let mut ids = Vec::with_capacity(self.panes.len());

        for spec in &self.panes {
            let id = match *spec {
                PaneSpec::Static { height } => stack.register(PaneContent::fixed(BlockPane::new(height))),
                PaneSpec::List {
                    rows,
                    row_height,
                    header,
                    footer,
                } => {
                    let pane = ListPane::new(rows, row_height, Insets::vertical(header, footer));
                    let stats = pane.stats();
                    let id = stack.register(PaneContent::scrolling(pane));
                    lists.insert(id, stats);
                    id
                }
            };
            ids.push(id);
        }

        stack.set_panes(&ids);
        Session { stack, lists }
    }
}

// ──────────────────────────────────────────────
// Session
// ──────────────────────────────────────────────

/// A built scenario: the stack over a simulated surface, plus live stats
/// for every list pane.
pub struct Session {
    pub stack: StackController<SimulatedSurface>,
    lists: HashMap<PaneId, Rc<RefCell<ListStats>>>,
}

impl Session {
    /// Move the surface and notify the stack. Returns the clamped offset.
    pub fn scroll_to_offset(&mut self, y: f32) -> f32 {
        let applied = self.stack.host_mut().set_offset(y);
        self.stack.did_scroll();
        applied
    }

    pub fn scroll_to_item(&mut self, step: ScrollStep, animated: bool) -> Result<f32> {
        self.stack
            .try_scroll_to_item(step.index, step.position.into(), animated)?;
        if animated {
            // The simulated surface has already landed; report the change.
            self.stack.did_scroll();
        }
        Ok(self.offset())
    }

    pub fn offset(&self) -> f32 {
        self.stack.host().viewport().y
    }

    pub fn max_offset(&self) -> f32 {
        self.stack.host().max_offset()
    }

    pub fn list_stats(&self, id: PaneId) -> Option<ListStats> {
        self.lists.get(&id).map(|stats| stats.borrow().clone())
    }
}
