// src/editor/event_handlers.rs

//! Per-event logic behind [`Editor::step`].

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::editor::core::{Editor, Gesture};
use crate::editor::selection::SelectionState;
use crate::editor::{EditorCommand, EditorStep};
use crate::layout::geometry::Point;
use crate::routing::anchor::{AnchorRef, anchor_coordinate, find_nearest_anchor};
use crate::routing::path::ConnectorPath;
use crate::routing::store::ConnectionId;

/// Pointer distance within which a press grabs an anchor to start drawing.
pub const ANCHOR_HIT_RADIUS: f64 = 6.0;

/// Handle a primary-button press.
///
/// Priority: an anchor under the pointer starts a connection drag (plain
/// presses only), then a node hit selects (and, without the modifier,
/// starts dragging) that node, and anything else is a canvas press handed
/// to the selection controller.
pub fn handle_pointer_pressed(editor: &mut Editor, at: Point, modifier: bool) -> EditorStep {
    let mut step = EditorStep::default();

    if !modifier
        && let Some(source) = find_nearest_anchor(&editor.nodes, None, at, ANCHOR_HIT_RADIUS)
    {
        debug!(node = %source.node, anchor = %source.anchor, "connection drag started");
        step.push(EditorCommand::ConnectionPreview(preview_path(editor, &source, at)));
        editor.gesture = Gesture::DrawingConnection {
            source,
            pointer: at,
            snap: None,
        };
        return step;
    }

    if let Some(id) = editor.nodes.node_at(at).map(str::to_string) {
        editor.selection.click_node(&id, modifier);
        step.push(selection_changed(editor));
        if !modifier {
            editor.gesture = Gesture::DraggingNode { node: id, last: at };
        }
        return step;
    }

    let had_selection = !editor.selection.selected().is_empty();
    editor.selection.press_canvas(at, modifier);
    if modifier {
        step.push(EditorCommand::SelectionRect(editor.selection.selection_rect()));
    } else if had_selection {
        step.push(selection_changed(editor));
    }
    step
}

/// Handle pointer motion for whichever gesture is active.
pub fn handle_pointer_moved(editor: &mut Editor, at: Point) -> EditorStep {
    let mut step = EditorStep::default();

    match editor.gesture.clone() {
        Gesture::DraggingNode { node, last } => {
            let Some(center) = editor.nodes.get(&node).map(|b| b.center) else {
                editor.gesture = Gesture::Idle;
                return step;
            };
            let target = center.offset(at.x - last.x, at.y - last.y);
            match editor.move_node(&node, target) {
                Ok(placed) => {
                    trace!(node = %node, x = placed.x, y = placed.y, "node dragged");
                    step.push(EditorCommand::NodesMoved(vec![node.clone()]));
                    step.push(EditorCommand::ConnectionsRerouted);
                }
                Err(err) => warn!(node = %node, error = %err, "cannot move node"),
            }
            editor.gesture = Gesture::DraggingNode { node, last: at };
        }
        Gesture::DrawingConnection { source, snap, .. } => {
            let found = find_nearest_anchor(
                &editor.nodes,
                Some(source.node.as_str()),
                at,
                editor.canvas.snap_radius,
            );
            step.push(EditorCommand::ConnectionPreview(preview_path(editor, &source, at)));
            if found != snap {
                step.push(EditorCommand::HighlightAnchor(found.clone()));
            }
            editor.gesture = Gesture::DrawingConnection {
                source,
                pointer: at,
                snap: found,
            };
        }
        Gesture::Idle => {
            if editor.selection.state() == SelectionState::BoxSelecting {
                editor.selection.drag_to(at);
                step.push(EditorCommand::SelectionRect(editor.selection.selection_rect()));
            }
        }
    }

    step
}

/// Handle a primary-button release: finish the active gesture.
pub fn handle_pointer_released(editor: &mut Editor, at: Point) -> EditorStep {
    let mut step = EditorStep::default();
    let gesture = std::mem::replace(&mut editor.gesture, Gesture::Idle);

    match gesture {
        Gesture::DraggingNode { node, .. } => {
            debug!(node = %node, "node drag finished");
        }
        Gesture::DrawingConnection { source, .. } => {
            step.push(EditorCommand::ConnectionPreview(None));
            step.push(EditorCommand::HighlightAnchor(None));

            let snapped = find_nearest_anchor(
                &editor.nodes,
                Some(source.node.as_str()),
                at,
                editor.canvas.snap_radius,
            );
            let Some(target) = snapped else {
                debug!(node = %source.node, "connection drag released off-anchor; discarded");
                return step;
            };

            match editor.connect(source, target) {
                Ok(Some(id)) => step.push(EditorCommand::ConnectionAdded(id)),
                Ok(None) => debug!("connection already present"),
                Err(err) => warn!(error = %err, "cannot create connection"),
            }
        }
        Gesture::Idle => {
            if editor.selection.state() == SelectionState::BoxSelecting {
                let added = editor.selection.release(at, &editor.nodes);
                step.push(EditorCommand::SelectionRect(None));
                if !added.is_empty() {
                    step.push(selection_changed(editor));
                }
            }
        }
    }

    step
}

/// Modifier released: an in-progress box is abandoned.
pub fn handle_modifier_released(editor: &mut Editor) -> EditorStep {
    let mut step = EditorStep::default();
    if editor.selection.state() == SelectionState::BoxSelecting {
        editor.selection.modifier_released();
        step.push(EditorCommand::SelectionRect(None));
    }
    step
}

/// Delete every selected node together with its connections.
pub fn handle_delete_selected(editor: &mut Editor) -> EditorStep {
    let mut step = EditorStep::default();

    let before: BTreeSet<ConnectionId> = editor.connections.iter().map(|c| c.id).collect();
    let removed = editor.delete_selected();
    if removed.is_empty() {
        return step;
    }

    for id in before {
        if editor.connections.get(id).is_none() {
            step.push(EditorCommand::ConnectionRemoved(id));
        }
    }
    step.push(EditorCommand::NodesRemoved(removed));
    step.push(EditorCommand::SelectionChanged(Vec::new()));
    step
}

fn selection_changed(editor: &Editor) -> EditorCommand {
    EditorCommand::SelectionChanged(editor.selection.selected().iter().cloned().collect())
}

fn preview_path(editor: &Editor, source: &AnchorRef, pointer: Point) -> Option<ConnectorPath> {
    let node = editor.nodes.get(&source.node)?;
    Some(ConnectorPath::route(
        anchor_coordinate(node, source.anchor),
        pointer,
        source.anchor,
        editor.connections.style(),
    ))
}
