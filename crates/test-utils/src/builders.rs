#![allow(dead_code)]

use anyhow::Result;
use serde_json::{Map, Value, json};

use jobgraph::config::{CanvasSection, JobDocument, RawDocument};
use jobgraph::dag::GraphModel;
use jobgraph::editor::Editor;
use jobgraph::types::RoutingStyle;

/// Builder for `JobDocument` to simplify test setup.
///
/// Records are kept as raw values so tests can also push malformed entries
/// and go through the same validation path as a loaded file.
pub struct DocumentBuilder {
    canvas: CanvasSection,
    jobs: Vec<Value>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            canvas: CanvasSection::default(),
            jobs: Vec::new(),
        }
    }

    pub fn with_canvas(mut self, canvas: CanvasSection) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_routing(mut self, routing: RoutingStyle) -> Self {
        self.canvas.routing = routing;
        self
    }

    pub fn with_job(mut self, job: JobSpecBuilder) -> Self {
        self.jobs.push(job.into_value());
        self
    }

    /// Push an arbitrary `jobs` entry (e.g. a bare string).
    pub fn with_raw_entry(mut self, entry: Value) -> Self {
        self.jobs.push(entry);
        self
    }

    pub fn raw(self) -> RawDocument {
        RawDocument {
            canvas: self.canvas,
            jobs: Some(Value::Array(self.jobs)),
        }
    }

    pub fn try_build(self) -> Result<JobDocument> {
        Ok(JobDocument::try_from(self.raw())?)
    }

    pub fn build(self) -> JobDocument {
        self.try_build()
            .expect("Failed to build valid document from builder")
    }

    pub fn editor(self) -> Editor {
        Editor::from_document(&self.build()).expect("Failed to load document into editor")
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one `jobs` record.
pub struct JobSpecBuilder {
    record: Map<String, Value>,
    depend: Vec<Value>,
    scalar_depend: Option<Value>,
}

impl JobSpecBuilder {
    pub fn new(name: &str) -> Self {
        let mut record = Map::new();
        record.insert("name".to_string(), json!(name));
        Self {
            record,
            depend: Vec::new(),
            scalar_depend: None,
        }
    }

    /// A record identified only by its `job` field.
    pub fn task_only(task: &str) -> Self {
        let mut record = Map::new();
        record.insert("job".to_string(), json!(task));
        Self {
            record,
            depend: Vec::new(),
            scalar_depend: None,
        }
    }

    pub fn task(mut self, task: &str) -> Self {
        self.record.insert("job".to_string(), json!(task));
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.record.insert("value".to_string(), value.into());
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.depend.push(json!(dep));
        self
    }

    /// Write `depend` as a single scalar instead of a list.
    pub fn depend_scalar(mut self, depend: impl Into<Value>) -> Self {
        self.scalar_depend = Some(depend.into());
        self
    }

    pub fn into_value(mut self) -> Value {
        if let Some(scalar) = self.scalar_depend {
            self.record.insert("depend".to_string(), scalar);
        } else if !self.depend.is_empty() {
            self.record
                .insert("depend".to_string(), Value::Array(self.depend));
        }
        Value::Object(self.record)
    }
}

/// Build a graph from `(prerequisite, dependent)` pairs.
pub fn graph_from_pairs(pairs: &[(&str, &str)]) -> GraphModel {
    GraphModel::from_pairs(pairs.iter().copied()).expect("Failed to build graph from pairs")
}

/// Document for the diamond `A -> B -> C`, `A -> D -> C`.
pub fn diamond_document() -> JobDocument {
    DocumentBuilder::new()
        .with_job(JobSpecBuilder::new("A"))
        .with_job(JobSpecBuilder::new("B").after("A"))
        .with_job(JobSpecBuilder::new("C").after("B").after("D"))
        .with_job(JobSpecBuilder::new("D").after("A"))
        .build()
}

/// A chain of `len` jobs `j00000 -> j00001 -> ...`. With `closed` the last
/// job also feeds the first, forming one ring.
pub fn chain_graph(len: usize, closed: bool) -> GraphModel {
    let names: Vec<String> = (0..len).map(|i| format!("j{i:05}")).collect();
    let mut pairs: Vec<(&str, &str)> = names
        .windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .collect();
    if closed && len > 1 {
        pairs.push((names[len - 1].as_str(), names[0].as_str()));
    }
    graph_from_pairs(&pairs)
}
