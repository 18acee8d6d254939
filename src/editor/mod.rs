// src/editor/mod.rs

//! Interactive editing controller.
//!
//! The [`Editor`] owns the graph model, the node table, the connection
//! store and the selection controller, and is the only thing that mutates
//! them. Input arrives as discrete [`EditorEvent`]s; each call to
//! [`Editor::step`] applies one event synchronously and returns the
//! [`EditorCommand`]s a renderer needs to catch up. There is no queued or
//! asynchronous mutation path, so every event observes the state left by
//! the previous one.

use crate::layout::geometry::{Point, Rect};
use crate::routing::anchor::AnchorRef;
use crate::routing::path::ConnectorPath;
use crate::routing::store::ConnectionId;
use crate::types::JobId;

/// Input events, as delivered by a rendering front end.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Primary button pressed. `modifier` is the multi-select key (ctrl).
    PointerPressed { at: Point, modifier: bool },
    /// Pointer moved (with or without a button held).
    PointerMoved { at: Point },
    /// Primary button released.
    PointerReleased { at: Point },
    /// The multi-select key was released.
    ModifierReleased,
    /// Delete every selected node.
    DeleteSelected,
}

/// Instructions for the renderer, produced by the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Selection membership changed; carries the full new selection.
    SelectionChanged(Vec<JobId>),
    /// Draw (or clear) the rubber-band rectangle.
    SelectionRect(Option<Rect>),
    /// These nodes have new boxes in the node table.
    NodesMoved(Vec<JobId>),
    /// Every connection path was re-derived.
    ConnectionsRerouted,
    /// Draw (or clear) the in-progress connection.
    ConnectionPreview(Option<ConnectorPath>),
    /// Highlight the current snap target (or clear the highlight).
    HighlightAnchor(Option<AnchorRef>),
    ConnectionAdded(ConnectionId),
    ConnectionRemoved(ConnectionId),
    NodesRemoved(Vec<JobId>),
}

/// Result of handling a single [`EditorEvent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorStep {
    pub commands: Vec<EditorCommand>,
}

impl EditorStep {
    pub fn push(&mut self, command: EditorCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

pub mod core;
pub mod event_handlers;
pub mod selection;

pub use self::core::Editor;
pub use selection::{SelectionController, SelectionState};
