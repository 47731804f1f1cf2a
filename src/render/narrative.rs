// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{ErrorGraph, MalformedArtifactError, Region, RunOutput, SourceLine};
use crate::query::{resolve_local, ResolvedLocal};

use super::{document_shell, html_escape};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeRenderError {
    MalformedArtifact(MalformedArtifactError),
}

impl fmt::Display for NarrativeRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedArtifact(err) => write!(f, "malformed artifact: {err}"),
        }
    }
}

impl std::error::Error for NarrativeRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedArtifact(err) => Some(err),
        }
    }
}

impl From<MalformedArtifactError> for NarrativeRenderError {
    fn from(value: MalformedArtifactError) -> Self {
        Self::MalformedArtifact(value)
    }
}

/// Renders the borrow chain as prose: the analyzer's captured error text followed by one
/// "may borrow ... due to line ..." sentence per constraint, closing with the terminal region's
/// later use. Every name and line stays activatable for highlighting when its line is known.
///
/// Requires the captured run output; without it there is nothing worth narrating and the
/// renderer yields an empty document (a non-fatal precondition violation).
pub fn render_narrative_html(
    graph: &ErrorGraph,
    path: &[Region],
    run_output: Option<&RunOutput>,
) -> Result<String, NarrativeRenderError> {
    let Some(run_output) = run_output else {
        return Ok(String::new());
    };

    let mut body = String::new();

    body.push_str("<h3>Rust compiler error (basically stderr of rustc):</h3>\n");
    let stderr_html = html_escape(run_output.stderr()).replace('\n', "<br>\n");
    body.push_str(&format!("<p>{stderr_html}</p>\n"));

    body.push_str(
        "<h3>Possible explanation for \"Why is this variable still borrowed?\"</h3>\n",
    );

    if path.is_empty() {
        body.push_str(
            "<p class=\"notice\">No borrow chain could be reconstructed from the analysis \
             output.</p>\n",
        );
    } else {
        push_chain_list(&mut body, graph, path)?;
    }

    let title = format!("Error explanation for fn {}", graph.function_name());
    Ok(document_shell(&title, "", &body))
}

fn push_chain_list(
    body: &mut String,
    graph: &ErrorGraph,
    path: &[Region],
) -> Result<(), NarrativeRenderError> {
    body.push_str("<ol>\n");

    let head = path[0];
    let head_local = resolve_local(graph, head);
    let head_origin = graph.constraint_origin(head)?;
    body.push_str(&format!(
        "<li>{} may borrow the affected variable, due to line {}</li>\n",
        name_link(&head_local),
        origin_link(head_origin)
    ));

    for pair in path.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let current_local = resolve_local(graph, current);
        let next_local = resolve_local(graph, next);
        let origin = graph.constraint_origin(current)?;

        body.push_str(&format!(
            "<li>{} may borrow {}, due to line {}</li>\n",
            name_link(&next_local),
            name_link(&current_local),
            origin_link(origin)
        ));
    }

    let last = *path.last().expect("non-empty path");
    let last_local = resolve_local(graph, last);
    body.push_str(&format!("<li>{} is later used</li>\n", name_link(&last_local)));

    body.push_str("</ol>\n");
    Ok(())
}

/// `"name"`, activatable when the defining line is known. Unresolved locals keep the quoted
/// (possibly empty) label but get no activation target.
fn name_link(local: &ResolvedLocal) -> String {
    let name = html_escape(&local.name);
    if local.is_resolved_line() {
        format!(
            "<a onclick=\"requestLineHighlight({})\">\"{name}\"</a>",
            local.line_nr
        )
    } else {
        format!("\"{name}\"")
    }
}

fn origin_link(origin: &SourceLine) -> String {
    let line_nr = origin.line_nr;
    let text = html_escape(origin.text.trim());
    if line_nr >= 1 {
        format!("<a onclick=\"requestLineHighlight({line_nr})\">{line_nr}: '{text}'</a>")
    } else {
        format!("{line_nr}: '{text}'")
    }
}
