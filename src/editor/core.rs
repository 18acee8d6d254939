// src/editor/core.rs

//! The editor: one owner for every piece of mutable canvas state.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::model::{CanvasSection, JobDocument};
use crate::config::validate::validate_document;
use crate::dag::graph::GraphModel;
use crate::dag::job::Job;
use crate::dag::plan::{AnalysisSummary, PlanEntry, analyze, execution_plan};
use crate::dag::validator::{ValidationReport, validate};
use crate::editor::event_handlers::{
    handle_delete_selected, handle_modifier_released, handle_pointer_moved,
    handle_pointer_pressed, handle_pointer_released,
};
use crate::editor::selection::SelectionController;
use crate::editor::{EditorEvent, EditorStep};
use crate::errors::{JobGraphError, Result};
use crate::layout::geometry::{NodeBox, Point, Size};
use crate::layout::layered::LayeredLayout;
use crate::layout::nodes::NodeTable;
use crate::routing::anchor::{Anchor, AnchorRef};
use crate::routing::store::{Connection, ConnectionId, ConnectionStore};
use crate::types::{JobId, RoutingStyle};

/// The pointer gesture currently in progress.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Gesture {
    Idle,
    /// A node is being dragged; `last` is the previous pointer position.
    DraggingNode { node: JobId, last: Point },
    /// A connection is being drawn from `source`.
    DrawingConnection {
        source: AnchorRef,
        pointer: Point,
        snap: Option<AnchorRef>,
    },
}

/// Owns the graph, the node table, the connection store and the selection.
///
/// Every mutation goes through [`Editor::step`] or one of the direct
/// operations below; node positions live only in the node table.
#[derive(Debug, Clone)]
pub struct Editor {
    pub(crate) canvas: CanvasSection,
    pub(crate) graph: GraphModel,
    pub(crate) nodes: NodeTable,
    pub(crate) connections: ConnectionStore,
    pub(crate) selection: SelectionController,
    pub(crate) gesture: Gesture,
    report: ValidationReport,
}

impl Editor {
    /// An empty canvas.
    pub fn new(canvas: CanvasSection) -> Self {
        Self {
            canvas,
            graph: GraphModel::new(),
            nodes: NodeTable::new(),
            connections: ConnectionStore::new(canvas.routing),
            selection: SelectionController::new(),
            gesture: Gesture::Idle,
            report: ValidationReport::default(),
        }
    }

    pub fn from_document(doc: &JobDocument) -> Result<Self> {
        let mut editor = Self::new(doc.canvas);
        editor.load(doc)?;
        Ok(editor)
    }

    /// Replace the whole canvas with `doc`.
    ///
    /// Builds the graph, validates it, lays it out and creates one
    /// `Right -> Left` connection per resolved edge. On error the current
    /// state is left untouched.
    pub fn load(&mut self, doc: &JobDocument) -> Result<&ValidationReport> {
        validate_document(doc)?;
        let graph = GraphModel::from_document(doc)?;
        let report = validate(&graph);

        let canvas = doc.canvas;
        let positions = LayeredLayout::from_canvas(&canvas).positions(&graph);
        let nodes = NodeTable::from_positions(&positions, node_size(&canvas));

        let mut connections = ConnectionStore::new(canvas.routing);
        for (from, to) in graph.edges() {
            connections.connect(
                AnchorRef::new(from, Anchor::Right),
                AnchorRef::new(to, Anchor::Left),
                &nodes,
            )?;
        }

        info!(
            jobs = graph.len(),
            connections = connections.len(),
            dangling = report.dangling.len(),
            cycles = report.cycles.len(),
            "loaded job graph into editor"
        );

        self.canvas = canvas;
        self.graph = graph;
        self.nodes = nodes;
        self.connections = connections;
        self.selection = SelectionController::new();
        self.gesture = Gesture::Idle;
        self.report = report;
        Ok(&self.report)
    }

    /// Apply one input event and return what the renderer must update.
    pub fn step(&mut self, event: EditorEvent) -> EditorStep {
        match event {
            EditorEvent::PointerPressed { at, modifier } => {
                handle_pointer_pressed(self, at, modifier)
            }
            EditorEvent::PointerMoved { at } => handle_pointer_moved(self, at),
            EditorEvent::PointerReleased { at } => handle_pointer_released(self, at),
            EditorEvent::ModifierReleased => handle_modifier_released(self),
            EditorEvent::DeleteSelected => handle_delete_selected(self),
        }
    }

    pub fn canvas(&self) -> &CanvasSection {
        &self.canvas
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn connections(&self) -> &ConnectionStore {
        &self.connections
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Validation of the current graph.
    ///
    /// Refreshed on load and whenever a job or dependency is added or
    /// removed.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Whether a connection is currently being drawn.
    pub fn is_drawing_connection(&self) -> bool {
        matches!(self.gesture, Gesture::DrawingConnection { .. })
    }

    /// The connection being drawn: its source, the last pointer position
    /// and the anchor it currently snaps to.
    pub fn pending_connection(&self) -> Option<(&AnchorRef, Point, Option<&AnchorRef>)> {
        match &self.gesture {
            Gesture::DrawingConnection {
                source,
                pointer,
                snap,
            } => Some((source, *pointer, snap.as_ref())),
            _ => None,
        }
    }

    /// Whether a node is currently being dragged.
    pub fn is_dragging_node(&self) -> bool {
        matches!(self.gesture, Gesture::DraggingNode { .. })
    }

    /// Re-run structural validation on the current graph.
    pub fn validate(&mut self) -> &ValidationReport {
        self.report = validate(&self.graph);
        &self.report
    }

    pub fn levels(&self) -> BTreeMap<JobId, usize> {
        LayeredLayout::from_canvas(&self.canvas).levels(&self.graph)
    }

    pub fn execution_plan(&self) -> Result<Vec<PlanEntry>> {
        execution_plan(&self.graph)
    }

    pub fn analysis(&self) -> AnalysisSummary {
        analyze(&self.graph)
    }

    /// Add a job, placing its node at `at` (canvas center by default).
    ///
    /// Resolved edges touching the new job that have no connection yet get
    /// a `Right -> Left` connection, including edges from jobs that
    /// previously referred to it as a dangling dependency.
    pub fn add_job(&mut self, job: Job, at: Option<Point>) -> Result<()> {
        let id = job.id.clone();
        self.graph.add_job(job)?;

        let center = self.clamp(at.unwrap_or_else(|| self.canvas_center()));
        self.nodes
            .insert(id.clone(), NodeBox::new(center, node_size(&self.canvas)));

        let pending: Vec<(JobId, JobId)> = self
            .graph
            .edges()
            .filter(|(from, to)| *from == id || *to == id)
            .filter(|(from, to)| self.connections.connections_between(from, to) == 0)
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();

        for (from, to) in pending {
            self.connections.connect(
                AnchorRef::new(from, Anchor::Right),
                AnchorRef::new(to, Anchor::Left),
                &self.nodes,
            )?;
        }

        self.report = validate(&self.graph);
        debug!(job = %id, x = center.x, y = center.y, "job added to canvas");
        Ok(())
    }

    /// Remove a job with its node, its incident connections and its
    /// selection membership.
    pub fn remove_job(&mut self, id: &str) -> Option<Job> {
        let removed = self.graph.remove_job(id)?;
        self.nodes.remove(id);
        let dropped = self.connections.remove_incident_to(id);
        self.selection.forget(id);

        if let Gesture::DraggingNode { node, .. } = &self.gesture
            && node == id
        {
            self.gesture = Gesture::Idle;
        }

        self.report = validate(&self.graph);
        debug!(job = %id, connections = dropped.len(), "job removed from canvas");
        Some(removed)
    }

    /// Move a node's center, clamped into the canvas.
    pub fn move_node(&mut self, id: &str, to: Point) -> Result<Point> {
        let clamped = self.clamp(to);
        if !self.nodes.move_to(id, clamped) {
            return Err(JobGraphError::JobNotFound(id.to_string()));
        }
        self.on_node_moved(id);
        Ok(clamped)
    }

    pub fn resize_node(&mut self, id: &str, size: Size) -> Result<()> {
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(JobGraphError::ConfigError(format!(
                "node size must be positive, got {}x{}",
                size.width, size.height
            )));
        }
        if !self.nodes.resize(id, size) {
            return Err(JobGraphError::JobNotFound(id.to_string()));
        }
        self.on_node_moved(id);
        Ok(())
    }

    /// Geometry of `id` changed: re-derive every connection path.
    pub fn on_node_moved(&mut self, id: &str) {
        self.connections.recompute_all(&self.nodes);
        debug!(node = %id, connections = self.connections.len(), "rerouted connections");
    }

    /// Switch routing policy; every path is re-derived.
    pub fn set_routing(&mut self, style: RoutingStyle) {
        self.canvas.routing = style;
        self.connections.set_style(style, &self.nodes);
    }

    /// Connect two anchors and record the dependency `target depends on
    /// source`.
    ///
    /// `Ok(None)` for an existing tuple or a self connection; neither
    /// touches the graph.
    pub fn connect(&mut self, source: AnchorRef, target: AnchorRef) -> Result<Option<ConnectionId>> {
        if !self.graph.contains(&source.node) {
            return Err(JobGraphError::JobNotFound(source.node));
        }
        if !self.graph.contains(&target.node) {
            return Err(JobGraphError::JobNotFound(target.node));
        }

        let (from, to) = (source.node.clone(), target.node.clone());
        let Some(id) = self.connections.connect(source, target, &self.nodes)? else {
            return Ok(None);
        };
        if self.graph.add_dependency(&from, &to)? {
            self.report = validate(&self.graph);
        }
        Ok(Some(id))
    }

    /// Remove a connection. The dependency is dropped from the graph once
    /// no other connection links the same pair of jobs.
    pub fn disconnect(&mut self, id: ConnectionId) -> Option<Connection> {
        let removed = self.connections.disconnect(id)?;
        let (from, to) = (&removed.source.node, &removed.target.node);
        if self.connections.connections_between(from, to) == 0
            && self.graph.remove_dependency(from, to)
        {
            self.report = validate(&self.graph);
        }
        Some(removed)
    }

    /// Remove every selected job and return to idle selection.
    pub fn delete_selected(&mut self) -> Vec<JobId> {
        let ids = self.selection.take_selected();
        let removed: Vec<JobId> = ids
            .into_iter()
            .filter(|id| self.remove_job(id).is_some())
            .collect();
        if !removed.is_empty() {
            info!(count = removed.len(), "deleted selected jobs");
        } else {
            debug!("delete requested with nothing selected");
        }
        removed
    }

    pub(crate) fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, self.canvas.width),
            p.y.clamp(0.0, self.canvas.height),
        )
    }

    fn canvas_center(&self) -> Point {
        Point::new(self.canvas.width / 2.0, self.canvas.height / 2.0)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(CanvasSection::default())
    }
}

fn node_size(canvas: &CanvasSection) -> Size {
    Size::new(canvas.node_width, canvas.node_height)
}
