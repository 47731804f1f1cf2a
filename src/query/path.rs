// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ErrorGraph, Region};

/// Finds the head of the chain: a region that appears as a "from" endpoint in some edge but is
/// never the "to" endpoint of any edge.
///
/// Returns `None` when no such region exists, which indicates a malformed edge set (e.g. a
/// cycle). The scan is O(E²); E is bounded by the complexity of one function and this is not a
/// hot path.
pub fn find_source_node(edges: &[(Region, Region)]) -> Option<Region> {
    for (candidate, _) in edges {
        if !edges.iter().any(|(_, to)| to == candidate) {
            return Some(*candidate);
        }
    }
    None
}

/// Finds the direct successor of `node`: the "to" endpoint of the first edge leaving it.
///
/// Well-formed input has at most one outgoing edge per region, so "first match" is "the match".
/// If the chain invariant is violated and several edges leave `node`, the first in iteration
/// order wins; that tie-break is silent and intentional.
pub fn find_successor(edges: &[(Region, Region)], node: Region) -> Option<Region> {
    edges.iter().find(|(from, _)| *from == node).map(|(_, to)| *to)
}

/// Reconstructs the linear region ordering encoded by the edge set.
///
/// Follows successors from the source node until none is left, or until the sequence would
/// outgrow the number of regions (the guard that keeps malformed cyclic input finite). Returns
/// an empty sequence when no source node exists; callers treat that as "reconstruction failed"
/// and degrade instead of aborting.
pub fn reconstruct_path(graph: &ErrorGraph) -> Vec<Region> {
    let edges = graph.edges();
    let Some(head) = find_source_node(edges) else {
        tracing::debug!(
            function = graph.function_name(),
            "edge set has no source region; cannot reconstruct a borrow chain"
        );
        return Vec::new();
    };

    let region_cap = graph.region_count();
    let mut path = vec![head];
    let mut current = head;

    while let Some(next) = find_successor(edges, current) {
        if path.len() >= region_cap {
            tracing::debug!(
                function = graph.function_name(),
                visited = path.len(),
                "borrow chain exceeds the region count; truncating a cyclic edge set"
            );
            break;
        }
        path.push(next);
        current = next;
    }

    path
}
