//! Benchmark: one full placement pass over a stack of panes.
//!
//! A scroll notification recomputes every pane's state and frame, so the cost
//! of a pass is what bounds scroll smoothness. Measured at 10, 50 and 200 panes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scrollstack_core::{Insets, Rect};
use scrollstack_layout::{place, StackLayout};

const WIDTH: f32 = 390.0;
const VIEWPORT_HEIGHT: f32 = 844.0;

/// Alternating static blocks and long scrolling lists.
fn build_stack(n: usize) -> (StackLayout, Vec<(Insets, Option<f32>)>) {
    let mut heights = Vec::with_capacity(n);
    let mut panes = Vec::with_capacity(n);
    for i in 0..n {
        if i % 2 == 0 {
            heights.push(180.0);
            panes.push((Insets::ZERO, None));
        } else {
            let insets = Insets::vertical(56.0, 32.0);
            let inner = 44.0 * (20 + i % 7 * 40) as f32;
            heights.push(inner + insets.height());
            panes.push((insets, Some(inner)));
        }
    }
    let mut layout = StackLayout::new();
    layout.relayout(heights, WIDTH);
    (layout, panes)
}

fn bench_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_pass");

    for &n in &[10usize, 50, 200] {
        let (layout, panes) = build_stack(n);
        let offsets: Vec<f32> = (0..64)
            .map(|i| layout.total_height() * i as f32 / 64.0)
            .collect();

        group.bench_with_input(BenchmarkId::new("panes", n), &n, |b, _| {
            b.iter(|| {
                let mut visible = 0usize;
                for &y in &offsets {
                    let viewport = Rect::new(0.0, y, WIDTH, VIEWPORT_HEIGHT);
                    for (rect, (insets, inner)) in layout.rects().iter().zip(&panes) {
                        let placement = place(*rect, *insets, viewport, *inner);
                        if placement.state.is_visible() {
                            visible += 1;
                        }
                    }
                }
                black_box(visible)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pass);
criterion_main!(benches);
