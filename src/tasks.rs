//! Task descriptors and the id-prefix classifier.
//!
//! A [`TaskDescriptor`] is the caller-supplied specification of one human task
//! in the dynamic chain. Descriptors have no persistent identity: a fresh list
//! is supplied on every build, and the chain is rebuilt wholesale.
//!
//! The classifier is the *read* path: generated task node ids embed their kind
//! through a fixed prefix convention (see [`crate::contract`]), so an existing
//! subprocess can be read back into an ordered descriptor list without any
//! side table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::contract::{APPROVAL_TASK_PREFIX, COLLAB_TASK_PREFIX};
use crate::error::FlowError;
use crate::model::SubProcess;

/// Kind of a dynamic human task.
///
/// # Examples
///
/// ```
/// use flowsmith::tasks::TaskKind;
///
/// assert_eq!(TaskKind::classify("approval_2"), Some(TaskKind::Approval));
/// assert_eq!(TaskKind::classify("collab_1"), Some(TaskKind::Collaboration));
/// assert_eq!(TaskKind::classify("submit_task"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Branching task with approved/rejected outcomes routed by a gateway.
    Approval,
    /// Non-branching passthrough task.
    Collaboration,
}

impl TaskKind {
    /// The node-id prefix for tasks of this kind.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            TaskKind::Approval => APPROVAL_TASK_PREFIX,
            TaskKind::Collaboration => COLLAB_TASK_PREFIX,
        }
    }

    /// Derive a task kind from a node id by prefix convention.
    ///
    /// Returns `None` for ids outside the dynamic-task namespace (skeleton
    /// nodes, gateways, events), which the read path simply skips.
    #[must_use]
    pub fn classify(node_id: &str) -> Option<TaskKind> {
        if node_id.starts_with(APPROVAL_TASK_PREFIX) {
            Some(TaskKind::Approval)
        } else if node_id.starts_with(COLLAB_TASK_PREFIX) {
            Some(TaskKind::Collaboration)
        } else {
            None
        }
    }
}

impl FromStr for TaskKind {
    type Err = FlowError;

    /// Parse a kind name as supplied over an API boundary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approval" => Ok(TaskKind::Approval),
            "collaboration" => Ok(TaskKind::Collaboration),
            other => Err(FlowError::UnknownTaskKind(other.to_string())),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Approval => write!(f, "approval"),
            TaskKind::Collaboration => write!(f, "collaboration"),
        }
    }
}

/// Caller-supplied specification of one human task.
///
/// Total order is the caller's list order; `index` is a derived display and
/// sort key, not an identity.
///
/// # Examples
///
/// ```
/// use flowsmith::tasks::{TaskDescriptor, TaskKind};
///
/// let task = TaskDescriptor::new(TaskKind::Approval)
///     .with_name("Legal review")
///     .with_candidate_group("legal");
///
/// assert_eq!(task.kind, TaskKind::Approval);
/// assert_eq!(task.candidate_groups, vec!["legal"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Derived display/sort position (1-based once assigned).
    #[serde(default)]
    pub index: usize,
    /// Node id, populated when reading an existing chain back.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name; blank means "generate a default label".
    #[serde(default)]
    pub name: Option<String>,
    pub kind: TaskKind,
    /// Candidate users in caller order.
    #[serde(default)]
    pub candidate_users: Vec<String>,
    /// Candidate groups in caller order.
    #[serde(default)]
    pub candidate_groups: Vec<String>,
}

impl TaskDescriptor {
    /// A descriptor of the given kind with everything else empty.
    pub fn new(kind: TaskKind) -> Self {
        Self {
            index: 0,
            id: None,
            name: None,
            kind,
            candidate_users: Vec::new(),
            candidate_groups: Vec::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a candidate user.
    #[must_use]
    pub fn with_candidate_user(mut self, user: impl Into<String>) -> Self {
        self.candidate_users.push(user.into());
        self
    }

    /// Append a candidate group.
    #[must_use]
    pub fn with_candidate_group(mut self, group: impl Into<String>) -> Self {
        self.candidate_groups.push(group.into());
        self
    }

    /// The display name, unless it is blank.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Read the ordered task descriptors back out of an existing subprocess.
///
/// Only nodes whose id matches a known prefix are collected, in the traversal
/// order the storage yields; a final sort by `index` pins the result even if
/// that order ever diverges from construction order.
#[must_use]
pub fn descriptors_from(sub: &SubProcess) -> Vec<TaskDescriptor> {
    let mut tasks: Vec<TaskDescriptor> = sub
        .user_tasks()
        .filter_map(|task| {
            TaskKind::classify(&task.id).map(|kind| TaskDescriptor {
                index: 0,
                id: Some(task.id.clone()),
                name: task.name.clone(),
                kind,
                candidate_users: task.candidate_users.clone(),
                candidate_groups: task.candidate_groups.clone(),
            })
        })
        .collect();
    for (position, task) in tasks.iter_mut().enumerate() {
        task.index = position + 1;
    }
    tasks.sort_by_key(|t| t.index);
    tasks
}
