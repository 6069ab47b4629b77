// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_gesture::events::{EventKind, GestureEvent};
use trellis_gesture::hub::{Hub, Reply};

fn bench_dispatch_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("hub/dispatch");

    // Hypothesis: dispatch cost is linear in the number of declining
    // subscribers ahead of the claimant; a week view registers on the order
    // of tens of subscribers per kind.
    for subscribers in [4usize, 16, 64] {
        group.throughput(Throughput::Elements(subscribers as u64));

        group.bench_with_input(
            BenchmarkId::new("all_decline", subscribers),
            &subscribers,
            |b, &n| {
                let mut hub: Hub<u64, ()> = Hub::new();
                for _ in 0..n {
                    hub.on(EventKind::Reset, |count, _| {
                        *count += 1;
                        Reply::Declined
                    });
                }
                let mut count = 0_u64;
                b.iter(|| {
                    black_box(hub.dispatch(&mut count, &GestureEvent::Reset));
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("first_claims", subscribers),
            &subscribers,
            |b, &n| {
                let mut hub: Hub<u64, ()> = Hub::new();
                hub.on(EventKind::Reset, |_, _| Reply::Claimed(()));
                for _ in 1..n {
                    hub.on(EventKind::Reset, |count, _| {
                        *count += 1;
                        Reply::Declined
                    });
                }
                let mut count = 0_u64;
                b.iter(|| {
                    black_box(hub.dispatch(&mut count, &GestureEvent::Reset));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch_fanout);
criterion_main!(benches);
