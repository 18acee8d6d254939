// src/editor/selection.rs

//! Click / box selection state machine.

use std::collections::BTreeSet;

use tracing::debug;

use crate::layout::geometry::{Point, Rect};
use crate::layout::nodes::NodeTable;
use crate::types::JobId;

/// Interaction phase of the selection controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No gesture in progress.
    Idle,
    /// A modifier-held drag on empty canvas is sweeping a rectangle.
    BoxSelecting,
    /// One or more nodes are selected.
    NodeSelected,
}

/// Selection membership plus the gesture that is editing it.
///
/// Transitions:
/// - plain click on a node: selection becomes just that node
/// - modifier click on a node: the node toggles membership
/// - modifier press on empty canvas: start a box at the press point
/// - release while boxing: add every node whose center is inside the box
/// - modifier released while boxing: drop the box, keep membership, go idle
/// - plain press on empty canvas: clear everything
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    selected: BTreeSet<JobId>,
    box_origin: Option<Point>,
    box_corner: Option<Point>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            selected: BTreeSet::new(),
            box_origin: None,
            box_corner: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> &BTreeSet<JobId> {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// The rectangle being swept, while box selecting.
    pub fn selection_rect(&self) -> Option<Rect> {
        match (self.state, self.box_origin, self.box_corner) {
            (SelectionState::BoxSelecting, Some(a), Some(b)) => Some(Rect::from_corners(a, b)),
            _ => None,
        }
    }

    /// Click on a node.
    pub fn click_node(&mut self, id: &str, modifier: bool) {
        if modifier {
            if !self.selected.remove(id) {
                self.selected.insert(id.to_string());
            }
        } else {
            self.selected.clear();
            self.selected.insert(id.to_string());
        }
        self.box_origin = None;
        self.box_corner = None;
        self.state = self.resting_state();
        debug!(node = %id, modifier, selected = self.selected.len(), "node clicked");
    }

    /// Press on empty canvas.
    pub fn press_canvas(&mut self, at: Point, modifier: bool) {
        if modifier {
            self.box_origin = Some(at);
            self.box_corner = Some(at);
            self.state = SelectionState::BoxSelecting;
            debug!(x = at.x, y = at.y, "box selection started");
        } else {
            self.clear();
        }
    }

    /// Pointer moved. Only meaningful while box selecting.
    pub fn drag_to(&mut self, at: Point) {
        if self.state == SelectionState::BoxSelecting {
            self.box_corner = Some(at);
        }
    }

    /// Pointer released: completes a box selection.
    ///
    /// Returns the ids newly added to the selection.
    pub fn release(&mut self, at: Point, nodes: &NodeTable) -> Vec<JobId> {
        if self.state != SelectionState::BoxSelecting {
            return Vec::new();
        }
        self.box_corner = Some(at);

        let mut added = Vec::new();
        if let Some(rect) = self.selection_rect() {
            for id in nodes.centers_within(&rect) {
                if self.selected.insert(id.clone()) {
                    added.push(id);
                }
            }
        }

        self.box_origin = None;
        self.box_corner = None;
        self.state = self.resting_state();
        debug!(added = added.len(), selected = self.selected.len(), "box selection finished");
        added
    }

    /// Modifier key released: abandon an in-progress box.
    pub fn modifier_released(&mut self) {
        if self.state == SelectionState::BoxSelecting {
            self.box_origin = None;
            self.box_corner = None;
            self.state = SelectionState::Idle;
            debug!(selected = self.selected.len(), "box selection abandoned");
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.box_origin = None;
        self.box_corner = None;
        self.state = SelectionState::Idle;
    }

    /// Drop a node that no longer exists.
    pub fn forget(&mut self, id: &str) {
        self.selected.remove(id);
        if self.state == SelectionState::NodeSelected && self.selected.is_empty() {
            self.state = SelectionState::Idle;
        }
    }

    /// Hand the current membership to a bulk operation and return to `Idle`.
    pub fn take_selected(&mut self) -> Vec<JobId> {
        let taken = std::mem::take(&mut self.selected).into_iter().collect();
        self.clear();
        taken
    }

    fn resting_state(&self) -> SelectionState {
        if self.selected.is_empty() {
            SelectionState::Idle
        } else {
            SelectionState::NodeSelected
        }
    }
}
