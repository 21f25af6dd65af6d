//! Flow nodes and listeners: the vocabulary of a process graph.
//!
//! [`FlowNode`] is a tagged union over every node kind this crate produces.
//! Nodes are plain owned values with no interior mutability; cloning a node
//! clones everything it owns.

use serde::{Deserialize, Serialize};

use super::process::SubProcess;

/// A lifecycle or execution listener: an event name paired with the
/// expression invoked when the event fires.
///
/// Listener lists are assembled once at node (or flow) creation time and
/// never mutated afterwards, so no listener value is ever shared between
/// unrelated elements.
///
/// # Examples
///
/// ```
/// use flowsmith::model::Listener;
///
/// let on_create = Listener::on_create("${taskChainListener.onApprovalCreate(execution, task)}");
/// assert_eq!(on_create.event, "create");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    /// Event that triggers the listener (`create`, `complete`, `take`, ...).
    pub event: String,
    /// Expression evaluated when the event fires.
    pub action: String,
}

impl Listener {
    /// Create a listener for an arbitrary event.
    pub fn new(event: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            action: action.into(),
        }
    }

    /// Listener fired when a task is created.
    pub fn on_create(action: impl Into<String>) -> Self {
        Self::new("create", action)
    }

    /// Listener fired when a task is completed.
    pub fn on_complete(action: impl Into<String>) -> Self {
        Self::new("complete", action)
    }

    /// Listener fired when a sequence flow is taken.
    pub fn on_take(action: impl Into<String>) -> Self {
        Self::new("take", action)
    }
}

/// A human task node.
///
/// Candidate lists keep first-occurrence order and contain no duplicates;
/// [`UserTask::new`] dedups whatever the caller supplies so that building the
/// same chain twice yields identical nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTask {
    pub id: String,
    pub name: Option<String>,
    pub candidate_users: Vec<String>,
    pub candidate_groups: Vec<String>,
    /// Lifecycle listeners, in firing-registration order.
    pub task_listeners: Vec<Listener>,
}

impl UserTask {
    /// Create a user task with deduplicated candidate lists.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        candidate_users: &[String],
        candidate_groups: &[String],
        task_listeners: Vec<Listener>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            candidate_users: dedup_preserving_order(candidate_users),
            candidate_groups: dedup_preserving_order(candidate_groups),
            task_listeners,
        }
    }

    /// `true` if the task names at least one candidate user or group.
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        !self.candidate_users.is_empty() || !self.candidate_groups.is_empty()
    }
}

/// A boundary event attached to another node, carrying an error definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryEvent {
    pub id: String,
    pub name: Option<String>,
    /// Id of the node this event is attached to.
    pub attached_to: String,
    /// Error code of the event definition this boundary event catches.
    pub error_code: String,
}

/// A node in a process graph or subprocess.
///
/// The variant set mirrors the BPMN-like elements the dynamic task chain
/// needs: events, human tasks, exclusive gateways, and the subprocess
/// container itself. Every node carries a string id unique within its
/// container.
///
/// # Examples
///
/// ```
/// use flowsmith::model::FlowNode;
///
/// let start = FlowNode::start("start", "Start");
/// assert_eq!(start.id(), "start");
/// assert!(start.is_event());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowNode {
    /// Entry point of a process or subprocess.
    StartEvent { id: String, name: Option<String> },

    /// Normal completion of a process or subprocess.
    EndEvent { id: String, name: Option<String> },

    /// Terminal event raising an error toward the enclosing boundary event.
    ErrorEndEvent {
        id: String,
        name: Option<String>,
        error_code: String,
    },

    /// A human task.
    UserTask(UserTask),

    /// Exclusive (XOR) gateway routing exactly one outgoing flow.
    ExclusiveGateway { id: String, name: Option<String> },

    /// Embedded subprocess owning private nodes and flows.
    SubProcess(SubProcess),

    /// Boundary event attached to another node.
    BoundaryEvent(BoundaryEvent),
}

impl FlowNode {
    /// Convenience constructor for a named start event.
    pub fn start(id: impl Into<String>, name: impl Into<String>) -> Self {
        FlowNode::StartEvent {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// Convenience constructor for a named end event.
    pub fn end(id: impl Into<String>, name: impl Into<String>) -> Self {
        FlowNode::EndEvent {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// Convenience constructor for an error end event bound to `error_code`.
    pub fn error_end(
        id: impl Into<String>,
        name: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        FlowNode::ErrorEndEvent {
            id: id.into(),
            name: Some(name.into()),
            error_code: error_code.into(),
        }
    }

    /// The node's unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            FlowNode::StartEvent { id, .. }
            | FlowNode::EndEvent { id, .. }
            | FlowNode::ErrorEndEvent { id, .. }
            | FlowNode::ExclusiveGateway { id, .. } => id,
            FlowNode::UserTask(task) => &task.id,
            FlowNode::SubProcess(sub) => &sub.id,
            FlowNode::BoundaryEvent(event) => &event.id,
        }
    }

    /// The node's display name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            FlowNode::StartEvent { name, .. }
            | FlowNode::EndEvent { name, .. }
            | FlowNode::ErrorEndEvent { name, .. }
            | FlowNode::ExclusiveGateway { name, .. } => name.as_deref(),
            FlowNode::UserTask(task) => task.name.as_deref(),
            FlowNode::SubProcess(sub) => sub.name.as_deref(),
            FlowNode::BoundaryEvent(event) => event.name.as_deref(),
        }
    }

    /// `true` for start, end, error-end, and boundary events.
    #[must_use]
    pub fn is_event(&self) -> bool {
        matches!(
            self,
            FlowNode::StartEvent { .. }
                | FlowNode::EndEvent { .. }
                | FlowNode::ErrorEndEvent { .. }
                | FlowNode::BoundaryEvent(_)
        )
    }

    /// Borrow the inner user task, if this node is one.
    #[must_use]
    pub fn as_user_task(&self) -> Option<&UserTask> {
        match self {
            FlowNode::UserTask(task) => Some(task),
            _ => None,
        }
    }

    /// Borrow the inner subprocess, if this node is one.
    #[must_use]
    pub fn as_subprocess(&self) -> Option<&SubProcess> {
        match self {
            FlowNode::SubProcess(sub) => Some(sub),
            _ => None,
        }
    }

    /// Borrow the inner boundary event, if this node is one.
    #[must_use]
    pub fn as_boundary_event(&self) -> Option<&BoundaryEvent> {
        match self {
            FlowNode::BoundaryEvent(event) => Some(event),
            _ => None,
        }
    }
}

/// Drop duplicate entries while keeping the first occurrence of each.
fn dedup_preserving_order(values: &[String]) -> Vec<String> {
    let mut seen = rustc_hash::FxHashSet::default();
    values
        .iter()
        .filter(|v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}
