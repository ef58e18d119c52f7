// Snapshot reports: one row per pane per viewport position.

use std::fmt::Write as _;

use serde::Serialize;

use scrollstack_controller::{PaneDiagnostics, Rect};

use crate::scenario::Session;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectReport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Rect> for RectReport {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaneReport {
    pub index: usize,
    pub id: u64,
    pub state: String,
    pub rect: RectReport,
    pub frame: Option<RectReport>,
    pub inner_offset: Option<f32>,
    pub attached: bool,
    /// Rows a list pane keeps live; absent for static panes.
    pub live_cells: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub offset: f32,
    pub content_height: f32,
    pub panes: Vec<PaneReport>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let panes = session
            .stack
            .diagnostics()
            .into_iter()
            .map(|d| pane_report(session, d))
            .collect();
        Self {
            offset: session.offset(),
            content_height: session.stack.total_content_height(),
            panes,
        }
    }

    pub fn attached_count(&self) -> usize {
        self.panes.iter().filter(|p| p.attached).count()
    }
}

fn pane_report(session: &Session, d: PaneDiagnostics) -> PaneReport {
    let live_cells = session.list_stats(d.id).map(|s| s.live_cells());
    PaneReport {
        index: d.index,
        id: d.id.0,
        state: d.state.to_string(),
        rect: d.rect.into(),
        frame: d.frame.map(RectReport::from),
        inner_offset: d.inner_offset,
        attached: d.attached,
        live_cells,
    }
}

// ──────────────────────────────────────────────
// Rendering
// ──────────────────────────────────────────────

pub fn render_table(snapshots: &[Snapshot]) -> String {
    let mut out = String::new();
    for snap in snapshots {
        let _ = writeln!(
            out,
            "offset {:>8.1}  content {:>8.1}  attached {}",
            snap.offset,
            snap.content_height,
            snap.attached_count()
        );
        for pane in &snap.panes {
            let frame = pane
                .frame
                .as_ref()
                .map(|f| format!("y={:.1} h={:.1}", f.y, f.height))
                .unwrap_or_else(|| "-".to_string());
            let offset = pane
                .inner_offset
                .map(|o| format!("{:.1}", o))
                .unwrap_or_else(|| "-".to_string());
            let cells = pane
                .live_cells
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "  #{:<3} {:<15} rect y={:.1} h={:.1}  frame {:<20} inner {:<8} cells {}",
                pane.index, pane.state, pane.rect.y, pane.rect.height, frame, offset, cells
            );
        }
    }
    out
}

pub fn render_json(snapshots: &[Snapshot]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(snapshots)?)
}
