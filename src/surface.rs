// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The visualization flow: analyzer run, artifact load, path reconstruction, rendering.
//!
//! One call produces one surface. The analyzer invocation is the only suspension point and is
//! awaited before any rendering starts; every tool-side failure aborts the flow with the single
//! user-visible notice instead of rendering partial state. Hosts attach live highlighting to
//! the produced document via [`crate::highlight::link_surface`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::model::{ErrorGraph, Region, RunOutput};
use crate::query::reconstruct_path;
use crate::render::{render_document, DocumentRenderError, RenderMode};
use crate::runner::{run_analyzer, AnalyzerConfig, RunnerError};
use crate::store::{load_error_graph, StoreError};

/// One rendered explanation, ready to hand to a display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visualization {
    title: String,
    html: String,
}

impl Visualization {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

#[derive(Debug)]
pub enum VisualizeError {
    /// The document is not a Rust program; the analyzer was not run. A skip, not a failure.
    NotApplicable { path: PathBuf },
    Runner(RunnerError),
    Store(StoreError),
    Render(DocumentRenderError),
}

impl VisualizeError {
    /// True for inputs that are silently skipped (log line only, no user-visible notice).
    pub fn is_silent_skip(&self) -> bool {
        matches!(self, Self::NotApplicable { .. })
    }
}

impl fmt::Display for VisualizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable { path } => {
                write!(f, "not a Rust source file: {path:?}")
            }
            Self::Runner(err) => {
                write!(f, "Rust Life did not run successfully, no output available: {err}")
            }
            Self::Store(err) => {
                write!(f, "Rust Life did not run successfully, no output available: {err}")
            }
            Self::Render(err) => {
                write!(f, "Rust Life did not run successfully, no output available: {err}")
            }
        }
    }
}

impl std::error::Error for VisualizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotApplicable { .. } => None,
            Self::Runner(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Render(err) => Some(err),
        }
    }
}

impl From<RunnerError> for VisualizeError {
    fn from(value: RunnerError) -> Self {
        Self::Runner(value)
    }
}

impl From<StoreError> for VisualizeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DocumentRenderError> for VisualizeError {
    fn from(value: DocumentRenderError) -> Self {
        Self::Render(value)
    }
}

/// Runs the full flow for one source file and one render mode.
pub async fn visualize(
    config: &AnalyzerConfig,
    source_file: &Path,
    mode: RenderMode,
) -> Result<Visualization, VisualizeError> {
    if source_file.extension().and_then(|ext| ext.to_str()) != Some("rs") {
        tracing::info!(
            source = ?source_file,
            "the document is not a Rust program, thus the borrow analyzer will not run on it"
        );
        return Err(VisualizeError::NotApplicable { path: source_file.to_path_buf() });
    }

    let run_output = run_analyzer(config, source_file).await?;
    let graph = load_error_graph(&config.artifact_path())?;

    Ok(visualize_graph(&graph, mode, Some(&run_output))?)
}

/// Renders an already-loaded graph. Split out so artifact-driven callers (and tests) can skip
/// the analyzer invocation.
pub fn visualize_graph(
    graph: &ErrorGraph,
    mode: RenderMode,
    run_output: Option<&RunOutput>,
) -> Result<Visualization, DocumentRenderError> {
    let path: Vec<Region> = reconstruct_path(graph);
    if path.is_empty() {
        tracing::debug!(
            function = graph.function_name(),
            edges = graph.edges().len(),
            "no borrow chain reconstructed; rendering a degraded document"
        );
    }

    let html = render_document(mode, graph, &path, run_output)?;
    Ok(Visualization {
        title: format!("Error explanation for fn {}", graph.function_name()),
        html,
    })
}
