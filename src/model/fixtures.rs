// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::error_graph::{ErrorGraph, LocalInfo, Region, SourceLine};

fn r(index: u32) -> Region {
    Region::new(index)
}

/// The canonical three-region chain `R0 -> R1 -> R2` with fully populated maps.
pub(crate) fn chain_of_three() -> ErrorGraph {
    let edges = vec![(r(0), r(1)), (r(1), r(2))];

    let mut locals_info = BTreeMap::new();
    locals_info.insert(
        r(0),
        LocalInfo { line_nr: 2, name: "x".to_owned(), snippet: "let x = 5;".to_owned() },
    );
    locals_info.insert(
        r(1),
        LocalInfo { line_nr: 3, name: "y".to_owned(), snippet: "let y = &x;".to_owned() },
    );
    locals_info.insert(
        r(2),
        LocalInfo { line_nr: 4, name: "z".to_owned(), snippet: "let z = &*y;".to_owned() },
    );

    let mut region_lines = BTreeMap::new();
    region_lines.insert(
        r(0),
        vec![SourceLine { line_nr: 2, text: "    let x = 5;".to_owned() }],
    );
    region_lines.insert(
        r(1),
        vec![SourceLine { line_nr: 3, text: "    let y = &x;".to_owned() }],
    );
    region_lines.insert(
        r(2),
        vec![
            SourceLine { line_nr: 4, text: "    let z = &*y;".to_owned() },
            SourceLine { line_nr: 6, text: "    println!(\"{}\", z);".to_owned() },
        ],
    );

    let mut constraint_origins = BTreeMap::new();
    constraint_origins.insert(r(0), SourceLine { line_nr: 3, text: "    let y = &x;".to_owned() });
    constraint_origins.insert(r(1), SourceLine { line_nr: 4, text: "    let z = &*y;".to_owned() });

    ErrorGraph::new("main", edges, locals_info, region_lines, constraint_origins)
}

/// A two-region cycle, the simplest violation of the single-path invariant.
pub(crate) fn two_cycle() -> ErrorGraph {
    ErrorGraph::new(
        "looped",
        vec![(r(0), r(1)), (r(1), r(0))],
        BTreeMap::new(),
        BTreeMap::new(),
        BTreeMap::new(),
    )
}
