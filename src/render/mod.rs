// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering for borrow-chain explanations.
//!
//! Renderers produce one self-contained HTML document per run: markup plus the embedded script
//! that routes block activations back to the host as highlight requests. No external resources
//! are referenced, so the documents are safe to hand verbatim to a sandboxed surface with
//! script execution enabled. Output is deterministic for identical input.

use std::fmt;

use crate::model::{ErrorGraph, Region, RunOutput};

pub mod diagram;
pub mod narrative;

pub use diagram::{render_diagram_html, DiagramRenderError};
pub use narrative::{render_narrative_html, NarrativeRenderError};

/// The closed set of rendering strategies. No third variant is anticipated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Diagram,
    Narrative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRenderError {
    Diagram(DiagramRenderError),
    Narrative(NarrativeRenderError),
}

impl fmt::Display for DocumentRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diagram(err) => write!(f, "diagram render error: {err}"),
            Self::Narrative(err) => write!(f, "narrative render error: {err}"),
        }
    }
}

impl std::error::Error for DocumentRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Diagram(err) => Some(err),
            Self::Narrative(err) => Some(err),
        }
    }
}

impl From<DiagramRenderError> for DocumentRenderError {
    fn from(value: DiagramRenderError) -> Self {
        Self::Diagram(value)
    }
}

impl From<NarrativeRenderError> for DocumentRenderError {
    fn from(value: NarrativeRenderError) -> Self {
        Self::Narrative(value)
    }
}

/// Renders `graph` along the reconstructed `path` with the requested strategy.
pub fn render_document(
    mode: RenderMode,
    graph: &ErrorGraph,
    path: &[Region],
    run_output: Option<&RunOutput>,
) -> Result<String, DocumentRenderError> {
    match mode {
        RenderMode::Diagram => Ok(render_diagram_html(graph, path)?),
        RenderMode::Narrative => Ok(render_narrative_html(graph, path, run_output)?),
    }
}

/// Script embedded into every document. `acquireHostApi` is injected by the hosting surface;
/// without it the requests go nowhere, which keeps the documents harmless stand-alone.
const HIGHLIGHT_SCRIPT: &str = r#"const host = typeof acquireHostApi === "function"
    ? acquireHostApi()
    : { postMessage: function () {} };

function requestLineHighlight(lineNr) {
    console.log("Requested a highlight of line " + lineNr);
    host.postMessage({
        command: "highlight_line",
        lineNr: String(lineNr),
    });
}

function reportMappingFailure() {
    console.error("Mapping to a line number failed for this region, highlighting not possible!");
}
"#;

pub(crate) fn document_shell(title: &str, style: &str, body: &str) -> String {
    let title = html_escape(title);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <style>\n{style}</style>\n\
         <script>\n{HIGHLIGHT_SCRIPT}</script>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n"
    )
}

/// Escapes artifact text for interpolation into markup. Everything that came out of the
/// analyzed source or the analyzer's stderr goes through here.
pub(crate) fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
