//! Process graph assembler: wraps a task chain in the fixed skeleton.
//!
//! The skeleton is the same for every definition:
//!
//! ```text
//! Start ──> Submit ──> [dynamic subprocess] ──> End
//!               ^              │ (boundary error event)
//!               └── "Rejected" ┘
//! ```
//!
//! A rejection anywhere in the chain raises the reserved error code, the
//! boundary event catches it, and its "Rejected" flow loops back to the
//! submit task so the document can be resubmitted. The loop-back is
//! intentional, not a construction artifact.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::build_task_chain;
use crate::contract::{
    ERROR_CODE_REJECTED, PROCESS_END_ID, PROCESS_START_ID, REJECTED_BOUNDARY_EVENT_ID,
    SUBMIT_TASK_ID,
};
use crate::error::FlowError;
use crate::model::{BoundaryEvent, FlowNode, ProcessGraph, SequenceFlow, SubProcess, UserTask};
use crate::tasks::TaskDescriptor;

/// Display-facing constants for assembled graphs.
///
/// These used to be ambient globals in earlier designs; carrying them as a
/// value keeps two assemblers with different conventions from interfering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblerConfig {
    /// Namespace / category stamped on every assembled graph.
    pub namespace: String,
    /// Separator between doc type and group in the derived process key.
    pub key_separator: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            namespace: "http://flowsmith.dev/processes".into(),
            key_separator: "_".into(),
        }
    }
}

/// Assembles complete process graphs around a dynamic task chain.
///
/// # Examples
///
/// ```
/// use flowsmith::assembler::ProcessAssembler;
/// use flowsmith::tasks::{TaskDescriptor, TaskKind};
///
/// let assembler = ProcessAssembler::default();
/// let tasks = vec![TaskDescriptor::new(TaskKind::Approval).with_candidate_group("legal")];
///
/// let graph = assembler.assemble("contract", "emea", &tasks).unwrap();
/// assert_eq!(graph.id, "contract_emea");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProcessAssembler {
    config: AssemblerConfig,
}

impl ProcessAssembler {
    /// An assembler using the given configuration.
    #[must_use]
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Derive the deterministic process key for a doc type and group.
    #[must_use]
    pub fn process_key(&self, doc_type: &str, group: &str) -> String {
        format!("{doc_type}{}{group}", self.config.key_separator)
    }

    /// Assemble a populated graph: the chain built from `tasks`, wrapped in
    /// the skeleton.
    ///
    /// # Errors
    ///
    /// Propagates chain-builder validation errors; no graph is produced on
    /// failure.
    pub fn assemble(
        &self,
        doc_type: &str,
        group: &str,
        tasks: &[TaskDescriptor],
    ) -> Result<ProcessGraph, FlowError> {
        let key = self.process_key(doc_type, group);
        let name = format!("Generated workflow for doc type {doc_type} and group {group}");
        debug!(%key, tasks = tasks.len(), "assembling populated process graph");

        let sub = build_task_chain(tasks, ERROR_CODE_REJECTED)?;
        Ok(self.skeleton(key, name, sub))
    }

    /// Assemble an "empty" graph seeding a brand-new definition: same
    /// skeleton, chain built from no tasks.
    pub fn assemble_empty(
        &self,
        doc_type: &str,
        group: &str,
        name: &str,
    ) -> Result<ProcessGraph, FlowError> {
        let key = self.process_key(doc_type, group);
        debug!(%key, "assembling empty process graph");

        let sub = build_task_chain(&[], ERROR_CODE_REJECTED)?;
        Ok(self.skeleton(key, name.to_string(), sub))
    }

    /// Wire the fixed skeleton around a built subprocess.
    fn skeleton(&self, key: String, name: String, sub: SubProcess) -> ProcessGraph {
        let sub_id = sub.id.clone();
        let mut graph = ProcessGraph::new(key, name, self.config.namespace.clone());

        graph.add_node(FlowNode::StartEvent {
            id: PROCESS_START_ID.into(),
            name: None,
        });
        graph.add_node(FlowNode::UserTask(UserTask::new(
            SUBMIT_TASK_ID,
            "Submit Document to Workflow",
            &[],
            &[],
            vec![],
        )));
        graph.add_flow(SequenceFlow::new(PROCESS_START_ID, SUBMIT_TASK_ID));

        graph.add_node(FlowNode::SubProcess(sub));
        graph.add_flow(SequenceFlow::new(SUBMIT_TASK_ID, &sub_id));

        graph.add_node(FlowNode::BoundaryEvent(BoundaryEvent {
            id: REJECTED_BOUNDARY_EVENT_ID.into(),
            name: Some("Rejected Error Event".into()),
            attached_to: sub_id.clone(),
            error_code: ERROR_CODE_REJECTED.into(),
        }));
        // Retry loop: a caught rejection routes back to the submit task.
        graph.add_flow(
            SequenceFlow::new(REJECTED_BOUNDARY_EVENT_ID, SUBMIT_TASK_ID).with_name("Rejected"),
        );

        graph.add_node(FlowNode::EndEvent {
            id: PROCESS_END_ID.into(),
            name: None,
        });
        graph.add_flow(SequenceFlow::new(&sub_id, PROCESS_END_ID));

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::DYNAMIC_SUBPROCESS_ID;
    use crate::tasks::TaskKind;

    #[test]
    fn key_derivation_uses_separator() {
        let assembler = ProcessAssembler::new(AssemblerConfig {
            namespace: "ns".into(),
            key_separator: "::".into(),
        });
        assert_eq!(assembler.process_key("contract", "emea"), "contract::emea");
    }

    #[test]
    fn skeleton_topology_is_fixed() {
        let graph = ProcessAssembler::default()
            .assemble_empty("report", "sales", "Report workflow")
            .unwrap();

        assert!(graph.validate().is_ok());
        assert!(graph.subprocess(DYNAMIC_SUBPROCESS_ID).is_some());

        let has_flow = |source: &str, target: &str| {
            graph
                .flows
                .iter()
                .any(|f| f.source == source && f.target.as_deref() == Some(target))
        };
        assert!(has_flow(PROCESS_START_ID, SUBMIT_TASK_ID));
        assert!(has_flow(SUBMIT_TASK_ID, DYNAMIC_SUBPROCESS_ID));
        assert!(has_flow(DYNAMIC_SUBPROCESS_ID, PROCESS_END_ID));
        // Rejection loops back to the submit task.
        assert!(has_flow(REJECTED_BOUNDARY_EVENT_ID, SUBMIT_TASK_ID));
    }

    #[test]
    fn both_modes_share_the_skeleton() {
        let assembler = ProcessAssembler::default();
        let empty = assembler
            .assemble_empty("report", "sales", "Report workflow")
            .unwrap();
        let tasks = vec![TaskDescriptor::new(TaskKind::Collaboration)];
        let populated = assembler.assemble("report", "sales", &tasks).unwrap();

        assert_eq!(empty.flows.len(), populated.flows.len());
        assert_eq!(empty.nodes.len(), populated.nodes.len());
        // Only the subprocess content differs.
        assert_ne!(
            empty.subprocess(DYNAMIC_SUBPROCESS_ID),
            populated.subprocess(DYNAMIC_SUBPROCESS_ID)
        );
    }

    #[test]
    fn boundary_event_carries_reserved_error_code() {
        let graph = ProcessAssembler::default()
            .assemble_empty("report", "sales", "Report workflow")
            .unwrap();
        let boundary = graph.boundary_event_for(DYNAMIC_SUBPROCESS_ID).unwrap();
        assert_eq!(boundary.error_code, ERROR_CODE_REJECTED);
        assert_eq!(boundary.id, REJECTED_BOUNDARY_EVENT_ID);
    }
}
