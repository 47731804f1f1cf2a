// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::collections::BTreeMap;

use lifeline::model::{ErrorGraph, LocalInfo, Region, SourceLine};

/// A fully populated chain of `len` regions, shaped like a real analyzer dump.
pub fn chain(len: u32) -> ErrorGraph {
    assert!(len >= 2, "a chain needs at least two regions");

    let edges: Vec<_> = (0..len - 1)
        .map(|i| (Region::new(i), Region::new(i + 1)))
        .collect();

    let mut locals_info = BTreeMap::new();
    let mut region_lines = BTreeMap::new();
    let mut constraint_origins = BTreeMap::new();

    for i in 0..len {
        let line_nr = (i + 2) as usize;
        let name = format!("v{i}");
        let snippet = format!("let v{i} = &v{};", i.saturating_sub(1));

        locals_info.insert(
            Region::new(i),
            LocalInfo { line_nr: line_nr as i64, name, snippet: snippet.clone() },
        );
        region_lines.insert(
            Region::new(i),
            vec![SourceLine { line_nr, text: format!("    {snippet}") }],
        );

        if i + 1 < len {
            constraint_origins.insert(
                Region::new(i),
                SourceLine {
                    line_nr: line_nr + 1,
                    text: format!("    let v{} = &v{i};", i + 1),
                },
            );
        }
    }

    ErrorGraph::new("bench", edges, locals_info, region_lines, constraint_origins)
}

/// Same chain with the locals map degraded to "unknown line" entries, forcing the fallback
/// resolver onto the regex path.
pub fn chain_without_locals(len: u32) -> ErrorGraph {
    let populated = chain(len);

    let locals_info = (0..len)
        .map(|i| {
            (
                Region::new(i),
                LocalInfo { line_nr: 0, name: String::new(), snippet: String::new() },
            )
        })
        .collect();

    let region_lines = (0..len)
        .map(|i| {
            let line_nr = (i + 2) as usize;
            (
                Region::new(i),
                vec![SourceLine { line_nr, text: format!("    let mut v{i} = 0;") }],
            )
        })
        .collect();

    let constraint_origins = (0..len.saturating_sub(1))
        .map(|i| {
            (
                Region::new(i),
                SourceLine { line_nr: (i + 3) as usize, text: format!("    use(&v{i});") },
            )
        })
        .collect();

    ErrorGraph::new(
        populated.function_name(),
        populated.edges().to_vec(),
        locals_info,
        region_lines,
        constraint_origins,
    )
}
