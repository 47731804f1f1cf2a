// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lifeline::query::{find_source_node, reconstruct_path};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `query.find_source_node`, `query.reconstruct_path`
// - Case IDs (the string after the `/`) must remain stable across refactors so results stay
//   comparable over time (e.g. `short`, `medium`, `long`).
fn benches_path(c: &mut Criterion) {
    let cases = [
        ("short", fixtures::chain(4)),
        ("medium", fixtures::chain(32)),
        ("long", fixtures::chain(256)),
    ];

    {
        let mut group = c.benchmark_group("query.find_source_node");
        for (case_id, graph) in &cases {
            group.throughput(Throughput::Elements(graph.edges().len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| find_source_node(black_box(graph.edges())));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("query.reconstruct_path");
        for (case_id, graph) in &cases {
            group.throughput(Throughput::Elements(graph.edges().len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| reconstruct_path(black_box(graph)));
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_path
}
criterion_main!(benches);
