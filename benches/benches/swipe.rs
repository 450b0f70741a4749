// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_swipe::{
    Axis, DirectionMask, PointerEvent, ScrollCapability, ScrollDirection, ScrollTree,
    SwipeController, resolve_scroll_target,
};

/// A complete tree of `fanout`-ary nodes stored in breadth-first order; only
/// the last node scrolls, so resolution visits every other node first.
struct Wide {
    fanout: usize,
    len: usize,
}

impl ScrollTree for Wide {
    type Id = usize;

    fn child_count(&self, node: usize) -> usize {
        let first = node * self.fanout + 1;
        self.len.saturating_sub(first).min(self.fanout)
    }

    fn child(&self, node: usize, index: usize) -> Option<usize> {
        let id = node * self.fanout + 1 + index;
        (index < self.fanout && id < self.len).then_some(id)
    }

    fn scroll_capability(&self, node: usize) -> Option<ScrollCapability> {
        (node + 1 == self.len).then_some(ScrollCapability::Scrollable)
    }

    fn can_scroll(&self, _node: usize, _axis: Axis, _direction: ScrollDirection) -> bool {
        false
    }
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("swipe/resolve_scroll_target");

    for len in [64_usize, 1_024, 16_384] {
        let tree = Wide { fanout: 4, len };
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &tree, |b, tree| {
            b.iter(|| black_box(resolve_scroll_target(tree, black_box(0))));
        });
    }

    group.finish();
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("swipe/gesture");
    let tree = Wide {
        fanout: 4,
        len: 1_024,
    };

    // Down, capture, 60 drag frames, release, then settle to completion.
    group.bench_function("drag_and_dismiss", |b| {
        b.iter(|| {
            let mut swipe = SwipeController::new(0, DirectionMask::LEFT);
            swipe.on_resize(Size::new(1_080.0, 1_920.0));
            swipe.handle_event(&tree, PointerEvent::down(Point::new(0.0, 900.0), 0));
            let mut now = 0;
            for step in 1..=60_u32 {
                now += 8;
                let x = f64::from(step) * 12.0;
                swipe.handle_event(&tree, PointerEvent::moved(Point::new(x, 900.0), now));
            }
            swipe.handle_event(&tree, PointerEvent::up(Point::new(720.0, 900.0), now));
            while swipe.on_frame(now) {
                now += 16;
            }
            black_box(swipe.offset())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_gesture);
criterion_main!(benches);
