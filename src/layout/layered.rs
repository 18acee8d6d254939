// src/layout/layered.rs

//! Longest-path layering and initial node placement.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::config::model::CanvasSection;
use crate::dag::graph::GraphModel;
use crate::layout::geometry::Point;
use crate::types::JobId;

/// Places nodes in left-to-right columns by dependency depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayeredLayout {
    pub width: f64,
    pub height: f64,
}

impl LayeredLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_canvas(canvas: &CanvasSection) -> Self {
        Self::new(canvas.width, canvas.height)
    }

    /// Level of every job; see [`assign_levels`].
    pub fn levels(&self, graph: &GraphModel) -> BTreeMap<JobId, usize> {
        assign_levels(graph)
    }

    /// Canvas position of every job.
    ///
    /// Column `level` sits at `x = (level + 1) * width / (max_level + 2)`.
    /// Inside a column, nodes keep ascending id order and are spread evenly
    /// over the height; a lone node is vertically centred.
    pub fn positions(&self, graph: &GraphModel) -> BTreeMap<JobId, Point> {
        let levels = assign_levels(graph);
        let Some(max_level) = levels.values().copied().max() else {
            return BTreeMap::new();
        };

        let mut columns: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for (id, level) in &levels {
            columns.entry(*level).or_default().push(id.as_str());
        }

        let column_step = self.width / (max_level as f64 + 2.0);
        let mut positions = BTreeMap::new();

        for (level, members) in &columns {
            let x = (*level as f64 + 1.0) * column_step;
            let n = members.len();
            for (index, id) in members.iter().enumerate() {
                let y = if n == 1 {
                    self.height / 2.0
                } else {
                    (index as f64 + 1.0) * self.height / (n as f64 + 1.0)
                };
                positions.insert(id.to_string(), Point::new(x, y));
            }
        }

        debug!(
            nodes = positions.len(),
            columns = columns.len(),
            "computed layered positions"
        );
        positions
    }
}

/// Level of every job: 0 for jobs without resolved prerequisites, otherwise
/// one more than the deepest prerequisite.
///
/// Levels are memoized within the pass. On cyclic input a job reached again
/// while its own level is still being computed counts as level 0, which
/// stops the walk and yields an approximate but finite layering; cycles
/// themselves are reported by the validator.
pub fn assign_levels(graph: &GraphModel) -> BTreeMap<JobId, usize> {
    let mut pass = LevelPass {
        graph,
        memo: BTreeMap::new(),
        in_progress: HashSet::new(),
    };
    for id in graph.ids() {
        pass.level_of(id);
    }
    pass.memo
        .into_iter()
        .map(|(id, level)| (id.to_string(), level))
        .collect()
}

struct LevelPass<'g> {
    graph: &'g GraphModel,
    memo: BTreeMap<&'g str, usize>,
    in_progress: HashSet<&'g str>,
}

/// A job whose prerequisites are still being walked.
struct Frame<'g> {
    id: &'g str,
    deps: std::vec::IntoIter<&'g str>,
    level: usize,
}

impl<'g> Frame<'g> {
    fn new(graph: &'g GraphModel, id: &'g str) -> Self {
        Self {
            id,
            deps: graph.dependencies_of(id).into_iter(),
            level: 0,
        }
    }
}

impl<'g> LevelPass<'g> {
    /// Depth-first over prerequisites with an explicit stack, so long
    /// chains do not exhaust the call stack.
    fn level_of(&mut self, start: &'g str) -> usize {
        if let Some(level) = self.memo.get(start) {
            return *level;
        }

        let graph: &'g GraphModel = self.graph;
        self.in_progress.insert(start);
        let mut stack = vec![Frame::new(graph, start)];

        while let Some(frame) = stack.last_mut() {
            match frame.deps.next() {
                Some(dep) => {
                    if let Some(level) = self.memo.get(dep) {
                        frame.level = frame.level.max(level + 1);
                    } else if !self.in_progress.insert(dep) {
                        debug!(job = %dep, "cycle while layering; treating revisit as level 0");
                        frame.level = frame.level.max(1);
                    } else {
                        stack.push(Frame::new(graph, dep));
                    }
                }
                None => {
                    let (id, level) = (frame.id, frame.level);
                    stack.pop();
                    self.in_progress.remove(id);
                    self.memo.insert(id, level);
                    if let Some(parent) = stack.last_mut() {
                        parent.level = parent.level.max(level + 1);
                    }
                }
            }
        }

        self.memo.get(start).copied().unwrap_or_default()
    }
}
