// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Lifeline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lifeline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Highlight synchronization between a rendered surface and a live editor view.
//!
//! Each open surface owns exactly one [`HighlightCoordinator`] bound to exactly one editor view
//! at a time. The surface talks to the coordinator over a bounded message channel; editor
//! view-change notifications arrive over a second bounded channel. Both are drained by
//! [`pump`] on the single-threaded event loop in FIFO arrival order, and both subscriptions are
//! released the moment the surface side closes its channel.

use std::fmt;
use std::future::Future;

use serde::Deserialize;
use tokio::sync::mpsc;

/// Capacity of the per-surface channels. Handlers are fast and non-blocking, so a small buffer
/// only has to absorb bursts of clicks.
pub const SURFACE_CHANNEL_CAPACITY: usize = 32;

/// Stable identity of a source file, as opposed to the transient editor views that show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(String);

impl FileId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The host-side seam to one live editor view.
///
/// Views are transient: the host hands a fresh binding to
/// [`HighlightCoordinator::on_active_view_changed`] whenever the visible editor swaps. Line
/// numbers are 1-based, like an editor gutter.
pub trait EditorView {
    fn file(&self) -> &FileId;
    fn line_count(&self) -> usize;
    fn set_line_marker(&mut self, line_nr: usize);
    fn clear_line_marker(&mut self);
}

/// A message posted by the rendered surface. Anything but `highlight_line` is unrecognized and
/// gets logged, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command")]
pub enum SurfaceMessage {
    #[serde(rename = "highlight_line")]
    HighlightLine {
        #[serde(rename = "lineNr")]
        line_nr: String,
    },
    #[serde(other)]
    Unrecognized,
}

/// Owns the live link between one rendered surface and one editor view.
///
/// States: no highlight yet (`current_line == None`) or an active full-line marker. Invalid
/// requests never change state and never propagate an error to the caller.
#[derive(Debug)]
pub struct HighlightCoordinator<V: EditorView> {
    view: V,
    tracked_file: FileId,
    current_line: Option<usize>,
}

impl<V: EditorView> HighlightCoordinator<V> {
    /// Binds the coordinator to the view it was opened against. The file identity is captured
    /// here and never changes for the lifetime of the surface.
    pub fn new(view: V) -> Self {
        let tracked_file = view.file().clone();
        Self {
            view,
            tracked_file,
            current_line: None,
        }
    }

    pub fn tracked_file(&self) -> &FileId {
        &self.tracked_file
    }

    pub fn current_line(&self) -> Option<usize> {
        self.current_line
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Applies a full-line marker at `line_nr`, replacing any previous marker.
    ///
    /// `line_nr` must satisfy `1 <= line_nr <= line_count` of the bound view; anything else is
    /// logged and ignored without touching the current state.
    pub fn request_highlight(&mut self, line_nr: usize) {
        if line_nr < 1 || line_nr > self.view.line_count() {
            tracing::debug!(
                line_nr,
                line_count = self.view.line_count(),
                "cannot highlight line: not a valid line number in the current source"
            );
            return;
        }

        self.view.clear_line_marker();
        self.view.set_line_marker(line_nr);
        self.current_line = Some(line_nr);
    }

    /// Called when the host's active editor view changes.
    ///
    /// `None` (no editor focused) is a no-op. A view onto a different file is a no-op too; that
    /// file's highlight, if any, belongs to its own coordinator. A view back onto the tracked
    /// file rebinds the coordinator and re-applies the active marker, so a highlight survives
    /// the view swap.
    pub fn on_active_view_changed(&mut self, new_view: Option<V>) {
        let Some(new_view) = new_view else {
            return;
        };
        if new_view.file() != &self.tracked_file {
            return;
        }
        let Some(line_nr) = self.current_line else {
            return;
        };

        self.view = new_view;
        self.request_highlight(line_nr);
    }

    /// Dispatches one message from the rendered surface.
    pub fn handle_surface_message(&mut self, message: SurfaceMessage) {
        match message {
            SurfaceMessage::HighlightLine { line_nr } => match line_nr.parse::<usize>() {
                Ok(line_nr) => self.request_highlight(line_nr),
                Err(_) => {
                    tracing::debug!(
                        line_nr = %line_nr,
                        "ignoring highlight request with a non-numeric line number"
                    );
                }
            },
            SurfaceMessage::Unrecognized => {
                tracing::warn!("received an unknown command from the rendered surface");
            }
        }
    }
}

/// Sender halves handed to the hosting surface: one for surface messages, one for editor
/// view-change notifications. Dropping the link closes both channels, which ends the pump.
#[derive(Debug, Clone)]
pub struct HighlightLink<V: EditorView> {
    surface_tx: mpsc::Sender<SurfaceMessage>,
    views_tx: mpsc::Sender<Option<V>>,
}

impl<V: EditorView> HighlightLink<V> {
    pub fn surface_tx(&self) -> &mpsc::Sender<SurfaceMessage> {
        &self.surface_tx
    }

    pub fn views_tx(&self) -> &mpsc::Sender<Option<V>> {
        &self.views_tx
    }
}

/// Wires a coordinator for `view` and returns the host-facing link plus the pump future to
/// spawn on the event loop.
pub fn link_surface<V: EditorView>(
    view: V,
) -> (HighlightLink<V>, impl Future<Output = HighlightCoordinator<V>>) {
    let (surface_tx, surface_rx) = mpsc::channel(SURFACE_CHANNEL_CAPACITY);
    let (views_tx, views_rx) = mpsc::channel(SURFACE_CHANNEL_CAPACITY);
    let coordinator = HighlightCoordinator::new(view);

    (
        HighlightLink { surface_tx, views_tx },
        pump(coordinator, surface_rx, views_rx),
    )
}

/// Drains surface messages and view-change notifications in FIFO arrival order.
///
/// Returns the coordinator once the surface channel closes; the receiver halves are dropped on
/// return, so closing a surface releases its subscriptions deterministically.
pub async fn pump<V: EditorView>(
    mut coordinator: HighlightCoordinator<V>,
    mut surface_rx: mpsc::Receiver<SurfaceMessage>,
    mut views_rx: mpsc::Receiver<Option<V>>,
) -> HighlightCoordinator<V> {
    let mut views_open = true;

    loop {
        tokio::select! {
            message = surface_rx.recv() => match message {
                Some(message) => coordinator.handle_surface_message(message),
                None => break,
            },
            view = views_rx.recv(), if views_open => match view {
                Some(view) => coordinator.on_active_view_changed(view),
                None => views_open = false,
            },
        }
    }

    coordinator
}
