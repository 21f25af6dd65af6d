//! Subprocess and process-graph containers.
//!
//! Both containers store nodes and flows in insertion order, which is what
//! makes repeated builds structurally identical. `Clone` performs a deep copy
//! because every field is owned; clones share nothing with the original, so a
//! defensive copy before graph surgery is just `graph.clone()`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::element::{BoundaryEvent, FlowNode, UserTask};
use super::flow::SequenceFlow;
use crate::error::FlowError;

/// A subprocess: a named node owning a private set of nodes and flows.
///
/// The dynamic task chain lives in a subprocess with the reserved id
/// [`DYNAMIC_SUBPROCESS_ID`](crate::contract::DYNAMIC_SUBPROCESS_ID), which is
/// how the splicer finds it inside an arbitrary process graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubProcess {
    pub id: String,
    pub name: Option<String>,
    /// Private nodes, in insertion order.
    pub nodes: Vec<FlowNode>,
    /// Private flows, in insertion order.
    pub flows: Vec<SequenceFlow>,
}

impl SubProcess {
    /// Create an empty subprocess.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            nodes: Vec::new(),
            flows: Vec::new(),
        }
    }

    /// Append a node.
    pub fn add_node(&mut self, node: FlowNode) {
        self.nodes.push(node);
    }

    /// Append a flow.
    pub fn add_flow(&mut self, flow: SequenceFlow) {
        self.flows.push(flow);
    }

    /// Look up a node by id.
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Iterate over the user tasks, in storage order.
    pub fn user_tasks(&self) -> impl Iterator<Item = &UserTask> {
        self.nodes.iter().filter_map(FlowNode::as_user_task)
    }

    /// Number of flows whose target is still unresolved.
    #[must_use]
    pub fn open_flow_count(&self) -> usize {
        self.flows.iter().filter(|f| f.is_open()).count()
    }

    /// Check structural invariants: unique node ids and no open flows.
    pub fn validate(&self) -> Result<(), FlowError> {
        check_unique_ids(&self.nodes, &self.id)?;
        let open = self.open_flow_count();
        if open > 0 {
            return Err(FlowError::OpenFlows { count: open });
        }
        Ok(())
    }
}

/// A complete process graph: the skeleton plus the dynamic subprocess.
///
/// This is the value handed to the external deployment collaborator. It is
/// structurally equivalent to a BPMN-like process model and serializes via
/// serde for the external XML serializer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessGraph {
    /// Deterministic key derived from doc type and group.
    pub id: String,
    pub name: Option<String>,
    /// Target namespace / category of the definition.
    pub namespace: String,
    /// Top-level nodes, in insertion order.
    pub nodes: Vec<FlowNode>,
    /// Top-level flows, in insertion order.
    pub flows: Vec<SequenceFlow>,
}

impl ProcessGraph {
    /// Create an empty process graph.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            namespace: namespace.into(),
            nodes: Vec::new(),
            flows: Vec::new(),
        }
    }

    /// Append a top-level node.
    pub fn add_node(&mut self, node: FlowNode) {
        self.nodes.push(node);
    }

    /// Append a top-level flow.
    pub fn add_flow(&mut self, flow: SequenceFlow) {
        self.flows.push(flow);
    }

    /// Look up a top-level node by id.
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Look up a top-level subprocess by id.
    #[must_use]
    pub fn subprocess(&self, id: &str) -> Option<&SubProcess> {
        self.find_node(id).and_then(FlowNode::as_subprocess)
    }

    /// The boundary event attached to `node_id`, if any.
    #[must_use]
    pub fn boundary_event_for(&self, node_id: &str) -> Option<&BoundaryEvent> {
        self.nodes
            .iter()
            .filter_map(FlowNode::as_boundary_event)
            .find(|b| b.attached_to == node_id)
    }

    /// Check structural invariants: unique top-level node ids and no open
    /// flows, here and inside every subprocess.
    pub fn validate(&self) -> Result<(), FlowError> {
        check_unique_ids(&self.nodes, &self.id)?;
        let open = self.flows.iter().filter(|f| f.is_open()).count();
        if open > 0 {
            return Err(FlowError::OpenFlows { count: open });
        }
        for sub in self.nodes.iter().filter_map(FlowNode::as_subprocess) {
            sub.validate()?;
        }
        Ok(())
    }
}

fn check_unique_ids(nodes: &[FlowNode], scope: &str) -> Result<(), FlowError> {
    let mut seen = FxHashSet::default();
    for node in nodes {
        if !seen.insert(node.id()) {
            return Err(FlowError::DuplicateNodeId {
                id: node.id().to_string(),
                scope: scope.to_string(),
            });
        }
    }
    Ok(())
}
