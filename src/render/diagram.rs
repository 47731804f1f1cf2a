// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{ErrorGraph, MalformedArtifactError, Region};
use crate::query::resolve_local;

use super::{document_shell, html_escape};

const DIAGRAM_STYLE: &str = "table {\n\
    border-collapse: collapse;\n\
    margin: 0 auto 0 auto;\n\
}\n\
th, td {\n\
    border: 1px solid;\n\
    padding: 2px 8px;\n\
    text-align: center;\n\
}\n\
.arrow {\n\
    margin: 0;\n\
    padding: 0;\n\
    text-align: center;\n\
    font-size: 40px;\n\
    font-weight: bold;\n\
}\n\
.notice {\n\
    text-align: center;\n\
    font-style: italic;\n\
}\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramRenderError {
    MalformedArtifact(MalformedArtifactError),
}

impl fmt::Display for DiagramRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedArtifact(err) => write!(f, "malformed artifact: {err}"),
        }
    }
}

impl std::error::Error for DiagramRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedArtifact(err) => Some(err),
        }
    }
}

impl From<MalformedArtifactError> for DiagramRenderError {
    fn from(value: MalformedArtifactError) -> Self {
        Self::MalformedArtifact(value)
    }
}

/// Renders the borrow chain as a vertical diagram: one labeled block per region, one connector
/// block per constraint between consecutive regions.
///
/// Every block carries the source line it maps to (`data-line`) and activating it requests a
/// highlight for that line. A region whose line cannot be determined gets a local
/// mapping-failure notice wired instead; an invalid line number is never sent downstream.
pub fn render_diagram_html(
    graph: &ErrorGraph,
    path: &[Region],
) -> Result<String, DiagramRenderError> {
    let mut body = String::new();

    if path.is_empty() {
        body.push_str(
            "<p class=\"notice\">No borrow chain could be reconstructed from the analysis \
             output.</p>\n",
        );
    }

    for (position, &region) in path.iter().enumerate() {
        push_region_block(&mut body, graph, region);

        if let Some(&next) = path.get(position + 1) {
            push_constraint_block(&mut body, graph, region, next)?;
        }
    }

    let title = format!("Error visualization for fn {}", graph.function_name());
    Ok(document_shell(&title, DIAGRAM_STYLE, &body))
}

fn push_region_block(body: &mut String, graph: &ErrorGraph, region: Region) {
    let resolved = resolve_local(graph, region);

    if resolved.is_resolved_line() {
        let line_nr = resolved.line_nr;
        body.push_str(&format!(
            "<table class=\"region\" data-line=\"{line_nr}\" \
             onclick=\"requestLineHighlight({line_nr})\">\n"
        ));
    } else {
        tracing::debug!(%region, "mapping to a line failed for region");
        body.push_str("<table class=\"region\" onclick=\"reportMappingFailure()\">\n");
    }

    body.push_str(&format!("<tr><th>Lifetime {region}</th></tr>\n"));
    body.push_str(&format!(
        "<tr><td>{}: &amp;&#39;{region}</td></tr>\n",
        html_escape(&resolved.name)
    ));

    if let Some(info) = graph.locals_info(region) {
        if !info.snippet.is_empty() {
            body.push_str(&format!(
                "<tr><td>{}: {}</td></tr>\n",
                info.line_nr,
                html_escape(info.snippet.trim())
            ));
        }
    }

    for line in graph.region_lines(region) {
        body.push_str(&format!(
            "<tr><td>{}: {}</td></tr>\n",
            line.line_nr,
            html_escape(line.text.trim())
        ));
    }

    body.push_str("</table>\n");
}

fn push_constraint_block(
    body: &mut String,
    graph: &ErrorGraph,
    region: Region,
    next: Region,
) -> Result<(), DiagramRenderError> {
    let origin = graph.constraint_origin(region)?;
    let line_nr = origin.line_nr;

    body.push_str("<p class=\"arrow\">\u{2193}</p>\n");
    body.push_str(&format!(
        "<table class=\"constraint\" data-line=\"{line_nr}\" \
         onclick=\"requestLineHighlight({line_nr})\">\n"
    ));
    body.push_str("<tr><th>Constraint</th></tr>\n");
    body.push_str(&format!("<tr><td>{next} may point to {region}</td></tr>\n"));
    body.push_str(&format!("<tr><td>generated at line {line_nr}:</td></tr>\n"));
    body.push_str(&format!("<tr><td>{}</td></tr>\n", html_escape(origin.text.trim())));
    body.push_str("</table>\n");
    body.push_str("<p class=\"arrow\">\u{2193}</p>\n");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{render_diagram_html, DiagramRenderError};
    use crate::model::fixtures::{chain_of_three, two_cycle};
    use crate::model::{ErrorGraph, LocalInfo, MalformedArtifactError, Region, SourceLine};
    use crate::query::reconstruct_path;

    fn r(index: u32) -> Region {
        Region::new(index)
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn renders_one_block_per_region_and_one_connector_per_edge() {
        let graph = chain_of_three();
        let path = reconstruct_path(&graph);
        let doc = render_diagram_html(&graph, &path).expect("render");

        assert_eq!(count(&doc, "<table class=\"region\""), 3);
        assert_eq!(count(&doc, "<table class=\"constraint\""), 2);
    }

    #[test]
    fn region_blocks_target_their_stored_defining_lines() {
        let graph = chain_of_three();
        let path = reconstruct_path(&graph);
        let doc = render_diagram_html(&graph, &path).expect("render");

        for (region, line_nr) in [(0u32, 2usize), (1, 3), (2, 4)] {
            let block = format!(
                "<table class=\"region\" data-line=\"{line_nr}\" \
                 onclick=\"requestLineHighlight({line_nr})\">\n<tr><th>Lifetime R{region}</th>"
            );
            assert!(doc.contains(&block), "missing block for R{region}:\n{doc}");
        }
    }

    #[test]
    fn constraint_blocks_describe_the_may_point_to_direction() {
        let graph = chain_of_three();
        let path = reconstruct_path(&graph);
        let doc = render_diagram_html(&graph, &path).expect("render");

        assert!(doc.contains("R1 may point to R0"));
        assert!(doc.contains("R2 may point to R1"));
        assert!(doc.contains("generated at line 3:"));
    }

    #[test]
    fn unmappable_region_gets_a_mapping_failure_notice_not_a_request() {
        let mut locals_info = BTreeMap::new();
        locals_info.insert(
            r(0),
            LocalInfo { line_nr: 0, name: String::new(), snippet: String::new() },
        );
        let mut origins = BTreeMap::new();
        origins.insert(r(0), SourceLine { line_nr: 2, text: "let b = &a;".to_owned() });
        let graph =
            ErrorGraph::new("f", vec![(r(0), r(1))], locals_info, BTreeMap::new(), origins);

        let doc = render_diagram_html(&graph, &[r(0), r(1)]).expect("render");

        assert!(doc.contains("<table class=\"region\" onclick=\"reportMappingFailure()\">"));
        assert!(!doc.contains("requestLineHighlight(0)"));
    }

    #[test]
    fn empty_path_degrades_to_a_notice_document() {
        let graph = two_cycle();
        let doc = render_diagram_html(&graph, &[]).expect("render");

        assert_eq!(count(&doc, "<table"), 0);
        assert!(doc.contains("class=\"notice\""));
    }

    #[test]
    fn missing_constraint_origin_is_a_malformed_artifact() {
        let graph = ErrorGraph::new(
            "f",
            vec![(r(0), r(1))],
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
        );

        let err = render_diagram_html(&graph, &[r(0), r(1)]).unwrap_err();
        assert_eq!(
            err,
            DiagramRenderError::MalformedArtifact(
                MalformedArtifactError::ConstraintOriginMissing { region: r(0) }
            )
        );
    }

    #[test]
    fn source_text_is_escaped() {
        let mut locals_info = BTreeMap::new();
        locals_info.insert(
            r(0),
            LocalInfo {
                line_nr: 1,
                name: "v".to_owned(),
                snippet: "let v: Vec<&str> = vec![];".to_owned(),
            },
        );
        let graph =
            ErrorGraph::new("f", Vec::new(), locals_info, BTreeMap::new(), BTreeMap::new());

        let doc = render_diagram_html(&graph, &[r(0)]).expect("render");
        assert!(doc.contains("Vec&lt;&amp;str&gt;"));
        assert!(!doc.contains("Vec<&str>"));
    }
}
