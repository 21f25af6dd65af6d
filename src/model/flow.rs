//! Sequence flows, including the open-edge construction pattern.

use serde::{Deserialize, Serialize};

use super::element::Listener;

/// A directed edge between two nodes.
///
/// During chain construction a flow may be *open*: its `source` is known but
/// its `target` is resolved only once the next node in the sequence exists.
/// A graph is complete only when no flow is open; [`crate::chain`] enforces
/// this before returning.
///
/// # Examples
///
/// ```
/// use flowsmith::model::SequenceFlow;
///
/// let mut flow = SequenceFlow::open("approval_1");
/// assert!(flow.is_open());
///
/// flow.close("collab_1");
/// assert_eq!(flow.target.as_deref(), Some("collab_1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceFlow {
    /// Optional flow id; skeleton flows are anonymous, chain flows carry ids.
    pub id: Option<String>,
    /// Optional display name.
    pub name: Option<String>,
    /// Id of the source node. Always resolved.
    pub source: String,
    /// Id of the target node. `None` while the flow is open.
    pub target: Option<String>,
    /// Condition expression guarding this flow, if any.
    pub condition: Option<String>,
    /// Execution listeners fired when the flow is taken.
    pub listeners: Vec<Listener>,
}

impl SequenceFlow {
    /// A fully resolved flow from `source` to `target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            source: source.into(),
            target: Some(target.into()),
            condition: None,
            listeners: Vec::new(),
        }
    }

    /// An open flow: source known, target to be resolved later.
    pub fn open(source: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            source: source.into(),
            target: None,
            condition: None,
            listeners: Vec::new(),
        }
    }

    /// Set the flow id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the condition expression.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Append an execution listener.
    #[must_use]
    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Resolve the target of an open flow.
    pub fn close(&mut self, target: impl Into<String>) {
        self.target = Some(target.into());
    }

    /// `true` while the target is unresolved.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.target.is_none()
    }

    /// `true` if the flow touches `node_id` as source or target.
    #[must_use]
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target.as_deref() == Some(node_id)
    }
}
