// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

/// A lifetime/borrow region reported by the external analyzer, identified by a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Region(u32);

impl Region {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// The local binding that introduced a region, as reported by the analyzer.
///
/// `line_nr < 1` means the analyzer did not find the defining line; consumers fall back to
/// [`crate::query::locals::resolve_local`] in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInfo {
    pub line_nr: i64,
    pub name: String,
    pub snippet: String,
}

/// One source line, numbered from 1 like in an editor gutter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub line_nr: usize,
    pub text: String,
}

/// Raised when a renderer needs an artifact entry that the dump did not include.
///
/// Validation is lazy on purpose: the upstream analyzer's output is permissive, and entries are
/// only an error at the point a consumer actually dereferences them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedArtifactError {
    ConstraintOriginMissing { region: Region },
}

impl fmt::Display for MalformedArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstraintOriginMissing { region } => {
                write!(f, "artifact has no constraint origin line for region {region}")
            }
        }
    }
}

impl std::error::Error for MalformedArtifactError {}

/// Serialized shape of the analyzer dump. Map keys arrive as strings because serde_json encodes
/// integer-keyed maps that way.
#[derive(Debug, Deserialize)]
struct ErrorGraphDump {
    function_name: String,
    edges: Vec<(Region, Region)>,
    #[serde(default)]
    locals_info_for_regions: BTreeMap<u32, (i64, String, String)>,
    #[serde(default)]
    lines_for_regions: BTreeMap<u32, Vec<(usize, String)>>,
    #[serde(default)]
    lines_for_edges_start: BTreeMap<u32, (usize, String)>,
}

/// The error graph produced by one analyzer run. Immutable once loaded.
///
/// Edges are directed from the pointing region to the pointed-to region ("to may point into
/// from"). The edge set is nominally a general graph but the producing analysis guarantees one
/// simple directed path; consumers must tolerate that guarantee being broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorGraph {
    function_name: String,
    edges: Vec<(Region, Region)>,
    locals_info: BTreeMap<Region, LocalInfo>,
    region_lines: BTreeMap<Region, Vec<SourceLine>>,
    constraint_origins: BTreeMap<Region, SourceLine>,
}

impl ErrorGraph {
    pub fn new(
        function_name: impl Into<String>,
        edges: Vec<(Region, Region)>,
        locals_info: BTreeMap<Region, LocalInfo>,
        region_lines: BTreeMap<Region, Vec<SourceLine>>,
        constraint_origins: BTreeMap<Region, SourceLine>,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            edges,
            locals_info,
            region_lines,
            constraint_origins,
        }
    }

    /// Decodes the analyzer's JSON dump.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let dump: ErrorGraphDump = serde_json::from_str(raw)?;

        let locals_info = dump
            .locals_info_for_regions
            .into_iter()
            .map(|(region, (line_nr, name, snippet))| {
                (Region::new(region), LocalInfo { line_nr, name, snippet })
            })
            .collect();

        let region_lines = dump
            .lines_for_regions
            .into_iter()
            .map(|(region, lines)| {
                let lines = lines
                    .into_iter()
                    .map(|(line_nr, text)| SourceLine { line_nr, text })
                    .collect();
                (Region::new(region), lines)
            })
            .collect();

        let constraint_origins = dump
            .lines_for_edges_start
            .into_iter()
            .map(|(region, (line_nr, text))| (Region::new(region), SourceLine { line_nr, text }))
            .collect();

        Ok(Self {
            function_name: dump.function_name,
            edges: dump.edges,
            locals_info,
            region_lines,
            constraint_origins,
        })
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn edges(&self) -> &[(Region, Region)] {
        &self.edges
    }

    /// Number of distinct regions mentioned by the edge set. Used as the traversal bound when
    /// the single-path invariant is violated.
    pub fn region_count(&self) -> usize {
        let mut regions = BTreeSet::new();
        for (from, to) in &self.edges {
            regions.insert(*from);
            regions.insert(*to);
        }
        regions.len()
    }

    /// The structured locals entry for a region, if the dump carried one.
    pub fn locals_info(&self, region: Region) -> Option<&LocalInfo> {
        self.locals_info.get(&region)
    }

    /// Source lines attributed to a region's extent. Missing entries read as empty.
    pub fn region_lines(&self, region: Region) -> &[SourceLine] {
        self.region_lines.get(&region).map(Vec::as_slice).unwrap_or_default()
    }

    /// The line where the may-point-to constraint starting at `region` textually originates.
    ///
    /// Required whenever a renderer describes the outgoing edge of `region`; absence is a
    /// malformed artifact at that point of use.
    pub fn constraint_origin(&self, region: Region) -> Result<&SourceLine, MalformedArtifactError> {
        self.constraint_origins
            .get(&region)
            .ok_or(MalformedArtifactError::ConstraintOriginMissing { region })
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorGraph, MalformedArtifactError, Region};

    #[test]
    fn decodes_the_analyzer_dump_shape() {
        let raw = r#"{
            "function_name": "main",
            "edges": [[0, 1], [1, 2]],
            "locals_info_for_regions": {
                "0": [3, "x", "let x = 5;"],
                "1": [4, "y", "let y = &x;"],
                "2": [0, "", ""]
            },
            "lines_for_regions": {
                "0": [[3, "    let x = 5;"]],
                "2": [[6, "    let z = &y;"], [7, "    use_it(z);"]]
            },
            "lines_for_edges_start": {
                "0": [4, "    let y = &x;"],
                "1": [6, "    let z = &y;"]
            }
        }"#;

        let graph = ErrorGraph::from_json_str(raw).expect("decode");

        assert_eq!(graph.function_name(), "main");
        assert_eq!(
            graph.edges(),
            &[
                (Region::new(0), Region::new(1)),
                (Region::new(1), Region::new(2)),
            ]
        );
        assert_eq!(graph.region_count(), 3);

        let info = graph.locals_info(Region::new(0)).expect("locals entry");
        assert_eq!(info.line_nr, 3);
        assert_eq!(info.name, "x");
        assert_eq!(info.snippet, "let x = 5;");

        assert_eq!(graph.region_lines(Region::new(2)).len(), 2);
        assert!(graph.region_lines(Region::new(1)).is_empty());

        let origin = graph.constraint_origin(Region::new(1)).expect("origin");
        assert_eq!(origin.line_nr, 6);
    }

    #[test]
    fn decodes_a_dump_with_missing_maps() {
        let raw = r#"{"function_name": "f", "edges": []}"#;
        let graph = ErrorGraph::from_json_str(raw).expect("decode");

        assert_eq!(graph.region_count(), 0);
        assert_eq!(graph.locals_info(Region::new(0)), None);
        assert!(graph.region_lines(Region::new(0)).is_empty());
    }

    #[test]
    fn constraint_origin_is_validated_at_point_of_use() {
        let raw = r#"{"function_name": "f", "edges": [[0, 1]]}"#;
        let graph = ErrorGraph::from_json_str(raw).expect("decode");

        let err = graph.constraint_origin(Region::new(0)).unwrap_err();
        assert_eq!(
            err,
            MalformedArtifactError::ConstraintOriginMissing { region: Region::new(0) }
        );
    }

    #[test]
    fn rejects_a_non_graph_document() {
        ErrorGraph::from_json_str(r#"{"edges": "nope"}"#).unwrap_err();
    }

    #[test]
    fn region_displays_with_its_upstream_prefix() {
        assert_eq!(Region::new(7).to_string(), "R7");
    }
}
